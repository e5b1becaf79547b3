//! Compatibility comparison (spec §4.2 "ComplexCmp"): compares a concrete
//! query type against a candidate that may contain `Variant` placeholders
//! or be structurally partial (subtrees replaced by a null sentinel). Used
//! by the (external) unification solver to decide whether a polymorphic
//! candidate signature can satisfy a call site.
//!
//! Open-question resolution (spec §9 flags drift in the source around a
//! `nil` function return type on the query side): this implementation
//! treats a `None` return type on the *query* side as always contributing
//! `"partial"` to the result, regardless of what the candidate side
//! requires — a function whose own return type isn't pinned down yet is
//! read as "not enough information," never as an outright mismatch. This
//! is the one point spec §9 says to pick and document rather than infer.

use std::collections::{HashMap, HashSet};

use super::{Type, UnifElem};
use crate::error::ComplexCmpError;

/// The four-valued outcome of [`complex_cmp`]. `Exact` prints as the empty
/// string, matching the source vocabulary (`{"", "partial", "variant",
/// "both"}`) exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compat {
    Exact,
    Partial,
    Variant,
    Both,
}

impl Compat {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Compat::Exact => "",
            Compat::Partial => "partial",
            Compat::Variant => "variant",
            Compat::Both => "both",
        }
    }
}

impl std::fmt::Display for Compat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn combine(a: Compat, b: Compat) -> Compat {
    use Compat::{Both, Exact, Partial, Variant};
    match (a, b) {
        (Exact, x) | (x, Exact) => x,
        (x, y) if x == y => x,
        _ => Both,
    }
}

/// A candidate type that may have subtrees replaced by a null sentinel
/// (represented by `Option`/`None` at that position) — the solver's
/// "partial type," mirroring [`Type`]'s shape one level at a time.
#[derive(Debug, Clone)]
pub enum PartialType {
    Bool,
    Str,
    Int,
    Float,
    List(Option<Box<PartialType>>),
    Map { key: Option<Box<PartialType>>, val: Option<Box<PartialType>> },
    Struct { ord: Vec<String>, fields: HashMap<String, Option<PartialType>> },
    Func { ord: Vec<String>, args: HashMap<String, Option<PartialType>>, out: Option<Box<PartialType>> },
    Variant(Option<Box<PartialType>>),
    Unification(UnifElem),
}

impl PartialType {
    #[must_use]
    pub fn struct_(fields: Vec<(String, Option<PartialType>)>) -> PartialType {
        let ord = fields.iter().map(|(n, _)| n.clone()).collect();
        PartialType::Struct { ord, fields: fields.into_iter().collect() }
    }

    #[must_use]
    pub fn func_(args: Vec<(String, Option<PartialType>)>, out: Option<PartialType>) -> PartialType {
        let ord = args.iter().map(|(n, _)| n.clone()).collect();
        PartialType::Func { ord, args: args.into_iter().collect(), out: out.map(Box::new) }
    }
}

impl From<&Type> for PartialType {
    fn from(ty: &Type) -> Self {
        match ty {
            Type::Bool => PartialType::Bool,
            Type::Str => PartialType::Str,
            Type::Int => PartialType::Int,
            Type::Float => PartialType::Float,
            Type::List(val) => PartialType::List(Some(Box::new(PartialType::from(val.as_ref())))),
            Type::Map { key, val } => PartialType::Map {
                key: Some(Box::new(PartialType::from(key.as_ref()))),
                val: Some(Box::new(PartialType::from(val.as_ref()))),
            },
            Type::Struct(s) => PartialType::Struct {
                ord: s.ord.clone(),
                fields: s.fields.iter().map(|(k, v)| (k.clone(), Some(PartialType::from(v)))).collect(),
            },
            Type::Func(f) => PartialType::Func {
                ord: f.ord.clone(),
                args: f.args.iter().map(|(k, v)| (k.clone(), Some(PartialType::from(v)))).collect(),
                out: f.out.as_deref().map(|o| Box::new(PartialType::from(o))),
            },
            Type::Variant(inner) => {
                PartialType::Variant(inner.as_deref().map(|t| Box::new(PartialType::from(t))))
            }
            Type::Unification(e) => PartialType::Unification(e.clone()),
        }
    }
}

/// Compares the concrete `query` against `other`, which may be `None`
/// (wholly unknown) or a [`PartialType`] containing nested nils/variants.
pub fn complex_cmp(query: &Type, other: Option<&PartialType>) -> Result<Compat, ComplexCmpError> {
    complex_cmp_opt(Some(query), other)
}

fn complex_cmp_opt(
    query: Option<&Type>,
    other: Option<&PartialType>,
) -> Result<Compat, ComplexCmpError> {
    match (query, other) {
        (None, None) => Ok(Compat::Partial),
        (Some(_), Some(PartialType::Variant(None))) => Ok(Compat::Variant),
        (None, Some(PartialType::Variant(None))) => Ok(Compat::Both),
        (None, Some(_)) => Ok(Compat::Partial),
        (Some(_), None) => Ok(Compat::Partial),
        (Some(q), Some(PartialType::Variant(Some(inner)))) => {
            let inner_status = complex_cmp_opt(Some(q), Some(inner))?;
            Ok(combine(Compat::Variant, inner_status))
        }
        (Some(_), Some(PartialType::Unification(_))) => Ok(Compat::Partial),
        (Some(q), Some(o)) => complex_cmp_concrete(q, o),
    }
}

fn complex_cmp_concrete(q: &Type, o: &PartialType) -> Result<Compat, ComplexCmpError> {
    match (q, o) {
        (Type::Bool, PartialType::Bool)
        | (Type::Str, PartialType::Str)
        | (Type::Int, PartialType::Int)
        | (Type::Float, PartialType::Float) => Ok(Compat::Exact),
        (Type::List(qv), PartialType::List(ov)) => complex_cmp_opt(Some(qv), ov.as_deref()),
        (Type::Map { key: qk, val: qv }, PartialType::Map { key: ok, val: ov }) => {
            let k = complex_cmp_opt(Some(qk), ok.as_deref())?;
            let v = complex_cmp_opt(Some(qv), ov.as_deref())?;
            Ok(combine(k, v))
        }
        (Type::Struct(qs), PartialType::Struct { ord, fields }) => {
            let qnames: HashSet<&String> = qs.ord.iter().collect();
            let onames: HashSet<&String> = ord.iter().collect();
            if qnames != onames {
                return Err(ComplexCmpError(format!(
                    "struct field-name mismatch: {:?} vs {:?}",
                    qs.ord, ord
                )));
            }
            let mut status = Compat::Exact;
            for name in ord {
                let qf = qs.fields.get(name);
                let of = fields.get(name).and_then(Option::as_ref);
                status = combine(status, complex_cmp_opt(qf, of)?);
            }
            Ok(status)
        }
        (Type::Func(qf), PartialType::Func { ord, args, out }) => {
            if qf.ord.len() != ord.len() {
                return Err(ComplexCmpError(format!(
                    "func arity mismatch: {} vs {}",
                    qf.ord.len(),
                    ord.len()
                )));
            }
            let mut status = Compat::Exact;
            for name in ord {
                let qa = qf.args.get(name);
                let oa = args.get(name).and_then(Option::as_ref);
                status = combine(status, complex_cmp_opt(qa, oa)?);
            }
            let ret_status = match &qf.out {
                None => Compat::Partial,
                Some(qo) => complex_cmp_opt(Some(qo), out.as_deref())?,
            };
            Ok(combine(status, ret_status))
        }
        (Type::Unification(_), _) => {
            Err(ComplexCmpError("a unification variable is not a valid ComplexCmp query".into()))
        }
        _ => Err(ComplexCmpError(format!("kind mismatch comparing against a {q}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_concrete_types_are_exact() {
        let q = Type::new_list(Type::Str);
        let o = PartialType::from(&q);
        assert_eq!(complex_cmp(&q, Some(&o)).unwrap(), Compat::Exact);
    }

    #[test]
    fn both_nil_is_partial() {
        assert_eq!(complex_cmp_opt(None, None).unwrap(), Compat::Partial);
    }

    #[test]
    fn bare_variant_matches_anything() {
        let q = Type::Int;
        let o = PartialType::Variant(None);
        assert_eq!(complex_cmp(&q, Some(&o)).unwrap(), Compat::Variant);
    }

    #[test]
    fn nil_other_is_partial() {
        assert_eq!(complex_cmp(&Type::Int, None).unwrap(), Compat::Partial);
    }

    #[test]
    fn variant_list_is_compatible_with_str_list() {
        let q = Type::new_list(Type::Str);
        let o = PartialType::List(Some(Box::new(PartialType::Variant(None))));
        assert_eq!(complex_cmp(&q, Some(&o)).unwrap(), Compat::Variant);
    }

    #[test]
    fn struct_arity_and_names_must_match() {
        let q = Type::Struct(crate::types::StructType::new(vec![("x".into(), Type::Int)]));
        let o = PartialType::struct_(vec![("y".into(), Some(PartialType::Int))]);
        assert!(complex_cmp(&q, Some(&o)).is_err());
    }

    #[test]
    fn func_nil_query_return_is_tolerated_as_partial() {
        let q = Type::Func(crate::types::FuncType::new(vec![], None));
        let o = PartialType::func_(vec![], Some(PartialType::Int));
        assert_eq!(complex_cmp(&q, Some(&o)).unwrap(), Compat::Partial);
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        assert!(complex_cmp(&Type::Int, Some(&PartialType::Str)).is_err());
    }
}
