//! Polymorphic signature resolution (spec §4.4 "Polymorphic build"): some
//! functions' final signature depends on the literal value of an argument
//! that is only known at solve time (the printf-style formatter, the
//! template runner). These expose `Polymorphisms`/`Unify`/`Build` instead
//! of a fixed [`super::Info`].

use crate::error::{BuildError, Result};
use crate::kind::Kind;
use crate::types::{FuncType, Type};
use crate::values::Value;

use super::simple::{parse_format_string, FormatArg};

/// Spec §4.4 "Polymorphic function adds an earlier `Built` gate":
/// `New -> Built -> Initialised -> Running -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolymorphicState {
    New,
    Built,
    Initialised,
    Running,
    Closed,
}

/// State-transition guard for [`Polymorphic`] implementations, the
/// `Built`-gated sibling of [`super::Lifecycle`].
#[derive(Debug, Clone, Copy)]
pub struct PolyLifecycle(PolymorphicState);

impl Default for PolyLifecycle {
    fn default() -> Self {
        PolyLifecycle(PolymorphicState::New)
    }
}

impl PolyLifecycle {
    #[must_use]
    pub fn state(&self) -> PolymorphicState {
        self.0
    }

    /// # Panics
    /// Panics on a non-linear transition (`Closed -> Closed` excepted).
    pub fn transition(&mut self, to: PolymorphicState) {
        use PolymorphicState::{Built, Closed, Initialised, New, Running};
        let ok = matches!(
            (self.0, to),
            (New, Built) | (Built, Initialised) | (Initialised, Running) | (Running, Closed) | (Closed, Closed)
        );
        assert!(ok, "invalid polymorphic node lifecycle transition: {:?} -> {:?}", self.0, to);
        self.0 = to;
    }
}

/// The solver collaborator's side of `Unify` (spec §1: the solver itself
/// is out of scope; this is the narrow interface the core hands
/// constraints through). A "generator" constraint is the solver deferring
/// signature choice until the literal value driving it is known.
pub trait UnifySink {
    fn generator(&mut self, candidates: Vec<FuncType>);
}

/// Implemented by reactive-function nodes whose signature is not fixed
/// until `Build` is called (spec §4.4).
pub trait Polymorphic {
    /// Candidate signatures given whatever partial type/value information
    /// is available so far.
    fn polymorphisms(&self, partial_values: &[Option<Value>]) -> Result<Vec<FuncType>>;

    /// Emits a generator constraint to `sink` once enough is known to
    /// narrow the candidate set (possibly to exactly one).
    fn unify(&self, partial_values: &[Option<Value>], sink: &mut dyn UnifySink) -> Result<()> {
        sink.generator(self.polymorphisms(partial_values)?);
        Ok(())
    }

    /// Irrevocably fixes the final signature.
    fn build(&mut self, chosen: FuncType) -> Result<()>;

    /// Partially-specified before `Build` (arg-name placeholders, no
    /// argument types); fully specified after.
    fn info(&self) -> super::Info;
}

/// `%t -> Bool, %s -> Str, %d -> Int, %f -> Float, %v -> Variant` mapped
/// to a placeholder [`Type`] (a `Variant` kind placeholder carries no
/// narrowed inner type at this stage — that's filled in by unification).
fn kind_placeholder(kind: Kind) -> Type {
    match kind {
        Kind::Bool => Type::Bool,
        Kind::Str => Type::Str,
        Kind::Int => Type::Int,
        Kind::Float => Type::Float,
        Kind::Variant => Type::Variant(None),
        other => unreachable!("format-string parsing never yields kind {other}"),
    }
}

/// The printf-style formatter (spec §4.4/§4.4 format-string rules): its
/// signature is `func(format str, arg0 T0, arg1 T1, ...) str`, where the
/// `Ti` are read off the literal value of `format` once known.
#[derive(Debug, Clone, Default)]
pub struct PrintfFunc {
    lifecycle: PolyLifecycle,
    built_sig: Option<FuncType>,
}

impl PrintfFunc {
    #[must_use]
    pub fn new() -> Self {
        PrintfFunc::default()
    }

    fn signature_for(format: &str) -> Result<FuncType> {
        let directives = parse_format_string(format)?;
        let mut args = vec![(Some("format".to_string()), Type::Str)];
        let mut n = 0usize;
        for d in directives {
            if let FormatArg::Arg(kind) = d {
                args.push((Some(format!("arg{n}")), kind_placeholder(kind)));
                n += 1;
            }
        }
        Ok(FuncType::new(args, Some(Type::Str)))
    }
}

impl Polymorphic for PrintfFunc {
    fn polymorphisms(&self, partial_values: &[Option<Value>]) -> Result<Vec<FuncType>> {
        let Some(Some(Value::Str(format))) = partial_values.first() else {
            return Ok(Vec::new());
        };
        Ok(vec![Self::signature_for(format)?])
    }

    fn build(&mut self, chosen: FuncType) -> Result<()> {
        self.lifecycle.transition(PolymorphicState::Built);
        self.built_sig = Some(chosen);
        Ok(())
    }

    fn info(&self) -> super::Info {
        match &self.built_sig {
            Some(sig) => super::Info { pure: true, memo: true, sig: sig.clone() },
            None => super::Info { pure: true, memo: true, sig: FuncType::new(vec![], Some(Type::Str)) },
        }
    }
}

/// Validates a type as a template-runner variable argument (spec §4.4
/// "Template-rendering collaborator rules"): `bool, str, int, float, list,
/// map (with str keys), struct, or variant` are accepted; anything else
/// (a bare function or unification type) fails the build.
pub fn template_var_kind(ty: &Type) -> Result<(), BuildError> {
    match ty {
        Type::Bool
        | Type::Str
        | Type::Int
        | Type::Float
        | Type::List(_)
        | Type::Struct(_)
        | Type::Variant(_) => Ok(()),
        Type::Map { key, .. } => match key.as_ref() {
            Type::Str => Ok(()),
            _ => Err(BuildError::UnsupportedTemplateVarType(ty.to_string())),
        },
        Type::Func(_) | Type::Unification(_) => {
            Err(BuildError::UnsupportedTemplateVarType(ty.to_string()))
        }
    }
}

/// The template runner's signature (spec §4.4): `func(template str) str`
/// with no vars, or `func(template str, vars T) str` once `T` is known
/// and accepted by [`template_var_kind`].
#[must_use]
pub fn template_signature(vars_type: Option<&Type>) -> Result<FuncType, BuildError> {
    let mut args = vec![(Some("template".to_string()), Type::Str)];
    if let Some(t) = vars_type {
        template_var_kind(t)?;
        args.push((Some("vars".to_string()), t.copy()));
    }
    Ok(FuncType::new(args, Some(Type::Str)))
}
