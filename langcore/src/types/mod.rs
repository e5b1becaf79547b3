//! The structural type algebra (spec §3 "Type", §4.2).
//!
//! A [`Type`] is a recursive structural description: booleans, strings,
//! integers, floats, lists, maps, ordered structs, ordered functions,
//! variants, and unification variables. Concrete types are immutable once
//! built; [`Type::copy`] produces an independent value for callers that
//! need to hand out a tree while keeping the original.

mod cmp;
mod complex_cmp;
mod parse;
mod print;
mod reflect;
mod util;

pub use cmp::cmp;
pub use complex_cmp::{complex_cmp, Compat, PartialType};
pub use reflect::{reflect, type_of, ReflectConfig};

use std::collections::HashMap;

use crate::error::ParseError;
use crate::kind::Kind;

/// The disjoint-set element backing a `Unification` type. The attached
/// data is the most specific [`Type`] known for the set, if any.
pub type UnifElem = disjoint_set::Element<Type>;

/// A structural type. See the module docs and spec §3 for the full shape.
#[derive(Debug, Clone)]
pub enum Type {
    Bool,
    Str,
    Int,
    Float,
    List(Box<Type>),
    Map { key: Box<Type>, val: Box<Type> },
    Struct(StructType),
    Func(FuncType),
    /// An unconstrained placeholder type, optionally narrowed to a known
    /// inner type.
    Variant(Option<Box<Type>>),
    Unification(UnifElem),
}

/// An ordered struct field list: `ord` gives field-name order, `fields`
/// the name-to-type mapping. Order is part of identity for [`cmp`].
#[derive(Debug, Clone)]
pub struct StructType {
    pub ord: Vec<String>,
    pub fields: HashMap<String, Type>,
}

impl StructType {
    /// Builds a struct type from an ordered list of `(name, type)` pairs.
    ///
    /// # Panics
    /// Panics on a duplicate field name: a malformed struct type is a
    /// programmer error, not a user error (spec §3 invariants).
    #[must_use]
    pub fn new(pairs: Vec<(String, Type)>) -> Self {
        let mut ord = Vec::with_capacity(pairs.len());
        let mut fields = HashMap::with_capacity(pairs.len());
        for (name, ty) in pairs {
            assert!(
                !fields.contains_key(&name),
                "duplicate struct field {name:?}"
            );
            ord.push(name.clone());
            fields.insert(name, ty);
        }
        StructType { ord, fields }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Type> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Type)> {
        self.ord.iter().map(move |n| (n.as_str(), &self.fields[n]))
    }
}

/// An ordered function signature. Argument names are preserved for
/// printing but are not part of [`cmp`] equality — only positional
/// argument types and the output type are.
#[derive(Debug, Clone)]
pub struct FuncType {
    pub ord: Vec<String>,
    pub args: HashMap<String, Type>,
    pub out: Option<Box<Type>>,
    /// Parallel to `ord`: `false` at position `i` means that argument was
    /// built with `name == None` and `ord[i]` is a synthetic placeholder
    /// (`"0"`, `"1"`, …), not a name the textual form actually carries.
    named: Vec<bool>,
}

impl FuncType {
    /// Builds a function type from an ordered argument list and optional
    /// return type. Unnamed arguments (`name == None`) receive the
    /// synthetic name `"0"`, `"1"`, … in parse/build order for internal
    /// lookups, but are printed (spec §4.2) without any name at all —
    /// see [`FuncType::iter_args`].
    ///
    /// # Panics
    /// Panics on a duplicate (or duplicate-with-synthetic) argument name.
    #[must_use]
    pub fn new(args: Vec<(Option<String>, Type)>, out: Option<Type>) -> Self {
        let mut ord = Vec::with_capacity(args.len());
        let mut named = Vec::with_capacity(args.len());
        let mut map = HashMap::with_capacity(args.len());
        for (i, (name, ty)) in args.into_iter().enumerate() {
            named.push(name.is_some());
            let name = name.unwrap_or_else(|| i.to_string());
            assert!(!map.contains_key(&name), "duplicate argument name {name:?}");
            ord.push(name.clone());
            map.insert(name, ty);
        }
        FuncType { ord, args: map, out: out.map(Box::new), named }
    }

    #[must_use]
    pub fn arg(&self, name: &str) -> Option<&Type> {
        self.args.get(name)
    }

    /// Yields each argument's declared name (`None` for an argument built
    /// with `name == None`, even though it has a synthetic entry in `ord`
    /// for lookup purposes) paired with its type, in declaration order.
    pub fn iter_args(&self) -> impl Iterator<Item = (Option<&str>, &Type)> {
        self.ord
            .iter()
            .zip(&self.named)
            .map(move |(n, &is_named)| (is_named.then_some(n.as_str()), &self.args[n]))
    }
}

impl Type {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Type::Bool => Kind::Bool,
            Type::Str => Kind::Str,
            Type::Int => Kind::Int,
            Type::Float => Kind::Float,
            Type::List(_) => Kind::List,
            Type::Map { .. } => Kind::Map,
            Type::Struct(_) => Kind::Struct,
            Type::Func(_) => Kind::Func,
            Type::Variant(_) => Kind::Variant,
            Type::Unification(_) => Kind::Unification,
        }
    }

    #[must_use]
    pub fn new_list(val: Type) -> Type {
        Type::List(Box::new(val))
    }

    #[must_use]
    pub fn new_map(key: Type, val: Type) -> Type {
        Type::Map { key: Box::new(key), val: Box::new(val) }
    }

    /// Parses the compact textual form (spec §4.2's grammar).
    pub fn parse(src: &str) -> Result<Type, ParseError> {
        parse::parse_type(src)
    }

    /// Deep-copies this type. Implemented, as in the source system, as a
    /// round trip through [`ToString`]/[`Type::parse`]: this preserves
    /// function argument names (which a naive structural clone, stopping
    /// at a plain recursive copy, would also preserve — the round trip
    /// matters because it is what guarantees printed output and the
    /// rebuilt tree agree). Unification variables in the copy are fresh,
    /// unconnected elements: see spec §8's note that [`cmp`] treats
    /// unification variables by pattern, not by shared identity, so
    /// `copy().cmp(self) == Ok(())` still holds.
    #[must_use]
    pub fn copy(&self) -> Type {
        Type::parse(&self.to_string()).unwrap_or_else(|e| {
            panic!("Type::to_string produced input Type::parse could not reparse: {e}")
        })
    }

    /// True iff any subtree is a `Variant`.
    #[must_use]
    pub fn has_variant(&self) -> bool {
        util::has_variant(self)
    }

    /// True iff any subtree contains a unification element.
    #[must_use]
    pub fn has_uni(&self) -> bool {
        util::has_uni(self)
    }

    /// Unwraps nested variants until a non-variant kind is reached (or
    /// until an unconstrained `Variant(None)` is hit, which has no
    /// further underlying type).
    #[must_use]
    pub fn underlying(&self) -> &Type {
        util::underlying(self)
    }

    /// Top-down visitor. Stops and returns the first error encountered.
    pub fn iter<E>(&self, f: &mut impl FnMut(&Type) -> Result<(), E>) -> Result<(), E> {
        util::iter(self, f)
    }
}
