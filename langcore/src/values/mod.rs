//! The value algebra (spec §4.3 "Value algebra"): structural values that
//! mirror [`crate::types::Type`] one kind at a time. A [`Value`] always
//! carries (or, for scalars, implies) the [`Type`] it was built against.

mod cmp;
mod convert;
mod print;

pub use cmp::cmp;
pub use convert::{into, value_of, FieldSource, FromValue, ValueOf};

use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{StructType, Type};

/// A function value's call contract: opaque, pure (spec §4.3 "`FuncValue`
/// … a pure function, distinct from the reactive-function node"). `Arc`
/// rather than `Rc`: per spec §5's scheduling model, values flow across
/// per-node channels between concurrently running nodes, so a `Value`
/// must itself be `Send + Sync`.
pub type Callable = Arc<dyn Fn(&[Value]) -> crate::error::Result<Value> + Send + Sync>;

/// A structural value. See the module docs and spec §4.3 for the full
/// shape; container variants also carry the declared [`Type`] of their
/// elements/fields so that [`cmp`] and construction can check it.
#[derive(Clone)]
pub enum Value {
    Bool(bool),
    Str(String),
    Int(i64),
    Float(f64),
    List { elem_ty: Type, elements: Vec<Value> },
    Map { key_ty: Type, val_ty: Type, entries: Vec<(Value, Value)> },
    Struct { ty: StructType, fields: HashMap<String, Value> },
    Func { ty: Type, call: Callable },
    Variant(Box<Value>),
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Func { .. } => f.write_str("Value::Func(<callable>)"),
            other => f.write_str(&other.to_string()),
        }
    }
}

impl Value {
    /// The zero value for `ty` (spec §4.3: `Type.New()`).
    ///
    /// # Panics
    /// Panics if `ty` is (or contains, for a container) an unconstrained
    /// `Unification` — unification variables have no zero value (programmer
    /// error, per spec §4.3).
    #[must_use]
    pub fn zero(ty: &Type) -> Value {
        match ty {
            Type::Bool => Value::Bool(false),
            Type::Str => Value::Str(String::new()),
            Type::Int => Value::Int(0),
            Type::Float => Value::Float(0.0),
            Type::List(val) => Value::List { elem_ty: val.as_ref().clone(), elements: Vec::new() },
            Type::Map { key, val } => {
                Value::Map { key_ty: key.as_ref().clone(), val_ty: val.as_ref().clone(), entries: Vec::new() }
            }
            Type::Struct(s) => Value::Struct {
                ty: s.clone(),
                fields: s.iter().map(|(name, t)| (name.to_string(), Value::zero(t))).collect(),
            },
            Type::Func(_) => panic!("Func has no zero value constructible without a callable"),
            Type::Variant(_) => panic!("Variant has no zero value: it must wrap a concrete value"),
            Type::Unification(_) => panic!("Unification has no zero value"),
        }
    }

    #[must_use]
    pub fn kind(&self) -> crate::kind::Kind {
        use crate::kind::Kind;
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Str(_) => Kind::Str,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::List { .. } => Kind::List,
            Value::Map { .. } => Kind::Map,
            Value::Struct { .. } => Kind::Struct,
            Value::Func { .. } => Kind::Func,
            Value::Variant(_) => Kind::Variant,
        }
    }

    /// Deep-copies this value (spec §4.3 "`Copy`: deep-copy producing an
    /// independent value tree"). `Func` values copy the `Arc` handle, not
    /// the closure body: callables are opaque and compared only by type.
    #[must_use]
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Bool(_) | Value::Str(_) | Value::Int(_) | Value::Float(_) => self.clone(),
            Value::List { elem_ty, elements } => Value::List {
                elem_ty: elem_ty.clone(),
                elements: elements.iter().map(Value::deep_copy).collect(),
            },
            Value::Map { key_ty, val_ty, entries } => Value::Map {
                key_ty: key_ty.clone(),
                val_ty: val_ty.clone(),
                entries: entries.iter().map(|(k, v)| (k.deep_copy(), v.deep_copy())).collect(),
            },
            Value::Struct { ty, fields } => Value::Struct {
                ty: ty.clone(),
                fields: fields.iter().map(|(k, v)| (k.clone(), v.deep_copy())).collect(),
            },
            Value::Func { .. } => self.clone(),
            Value::Variant(inner) => Value::Variant(Box::new(inner.deep_copy())),
        }
    }

    /// Looks up a map entry by deep structural equality of the key (spec
    /// §4.3: "key equality is by deep structural value comparison").
    #[must_use]
    pub fn map_get<'a>(entries: &'a [(Value, Value)], key: &Value) -> Option<&'a Value> {
        entries.iter().find(|(k, _)| cmp::cmp(k, key).is_ok()).map(|(_, v)| v)
    }
}
