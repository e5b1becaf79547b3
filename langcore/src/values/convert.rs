//! `ValueOfGolang`/`Into` (spec §4.3 "Value ↔ host runtime"): lossy
//! bidirectional conversion between a [`Value`] and a host (Rust) runtime
//! value.
//!
//! The source's `Into(value, destPtr)` writes through a caller-supplied
//! pointer so it can auto-allocate intermediate pointers and clear stale
//! slice/map contents in place. Rust has no addressable-destination
//! equivalent of a bare pointer outside of `&mut`, and an owned return
//! value already gets "auto-allocation" and "clear stale contents" for
//! free (there is no previous value to clear) — so [`into`] returns a
//! fresh `T` rather than writing through a pointer. Overflow, kind
//! mismatch, and nil-pointer (`None` where a value was required) failures
//! are preserved as [`crate::error::CoerceError`] per spec §6's
//! `ErrNilValue` sentinel.

use std::collections::HashMap;

use super::Value;
use crate::error::{CoerceError, Result};
use crate::types::{ReflectConfig, Type};

/// Host (Rust) types that can build a [`Value`] from themselves — the
/// `ValueOfGolang` direction.
pub trait ValueOf {
    fn value_of(&self, cfg: &ReflectConfig) -> Result<Value>;
}

/// Host (Rust) types that can be reconstructed from a [`Value`] — the
/// `Into` direction.
pub trait FromValue: Sized {
    fn from_value(value: &Value, cfg: &ReflectConfig) -> Result<Self>;
}

macro_rules! value_of_int {
    ($($t:ty),* $(,)?) => {$(
        impl ValueOf for $t {
            fn value_of(&self, _cfg: &ReflectConfig) -> Result<Value> {
                let n = i64::try_from(*self).map_err(|_| CoerceError::IntegerOverflow {
                    value: *self as i128 as i64,
                    target: "Int".into(),
                })?;
                Ok(Value::Int(n))
            }
        }
        impl FromValue for $t {
            fn from_value(value: &Value, _cfg: &ReflectConfig) -> Result<Self> {
                let Value::Int(n) = value else {
                    return Err(CoerceError::KindMismatch {
                        expected: "int".into(),
                        found: value.kind().to_string(),
                    }
                    .into());
                };
                <$t>::try_from(*n).map_err(|_| {
                    CoerceError::IntegerOverflow { value: *n, target: stringify!($t).into() }.into()
                })
            }
        }
    )*};
}
value_of_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ValueOf for f32 {
    fn value_of(&self, _cfg: &ReflectConfig) -> Result<Value> {
        Ok(Value::Float(f64::from(*self)))
    }
}
impl ValueOf for f64 {
    fn value_of(&self, _cfg: &ReflectConfig) -> Result<Value> {
        Ok(Value::Float(*self))
    }
}
impl FromValue for f64 {
    fn from_value(value: &Value, _cfg: &ReflectConfig) -> Result<Self> {
        match value {
            Value::Float(x) => Ok(*x),
            other => Err(CoerceError::KindMismatch { expected: "float".into(), found: other.kind().to_string() }.into()),
        }
    }
}

impl ValueOf for bool {
    fn value_of(&self, _cfg: &ReflectConfig) -> Result<Value> {
        Ok(Value::Bool(*self))
    }
}
impl FromValue for bool {
    fn from_value(value: &Value, _cfg: &ReflectConfig) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(CoerceError::KindMismatch { expected: "bool".into(), found: other.kind().to_string() }.into()),
        }
    }
}

impl ValueOf for String {
    fn value_of(&self, _cfg: &ReflectConfig) -> Result<Value> {
        Ok(Value::Str(self.clone()))
    }
}
impl FromValue for String {
    fn from_value(value: &Value, _cfg: &ReflectConfig) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => Err(CoerceError::KindMismatch { expected: "str".into(), found: other.kind().to_string() }.into()),
        }
    }
}

impl<T: ValueOf> ValueOf for Vec<T> {
    fn value_of(&self, cfg: &ReflectConfig) -> Result<Value> {
        let elements = self.iter().map(|x| x.value_of(cfg)).collect::<Result<Vec<_>>>()?;
        let elem_ty = elements.first().map_or(Type::Variant(None), Value::type_hint);
        Ok(Value::List { elem_ty, elements })
    }
}
impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value, cfg: &ReflectConfig) -> Result<Self> {
        match value {
            Value::List { elements, .. } => elements.iter().map(|v| T::from_value(v, cfg)).collect(),
            other => Err(CoerceError::KindMismatch { expected: "list".into(), found: other.kind().to_string() }.into()),
        }
    }
}

/// A `None` pointer fails host-side coercion with `ErrNilValue` (spec §6);
/// there is no structural analogue of "nil" to build from on the forward
/// direction.
impl<T: ValueOf> ValueOf for Option<T> {
    fn value_of(&self, cfg: &ReflectConfig) -> Result<Value> {
        self.as_ref().map_or(Err(CoerceError::NilValue.into()), |x| x.value_of(cfg))
    }
}
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value, cfg: &ReflectConfig) -> Result<Self> {
        Ok(Some(T::from_value(value, cfg)?))
    }
}

impl<V: ValueOf> ValueOf for HashMap<String, V> {
    fn value_of(&self, cfg: &ReflectConfig) -> Result<Value> {
        let mut entries = Vec::with_capacity(self.len());
        let mut val_ty = None;
        for (k, v) in self {
            let vv = v.value_of(cfg)?;
            val_ty.get_or_insert_with(|| vv.type_hint());
            entries.push((Value::Str(k.clone()), vv));
        }
        Ok(Value::Map { key_ty: Type::Str, val_ty: val_ty.unwrap_or(Type::Variant(None)), entries })
    }
}
impl<V: FromValue> FromValue for HashMap<String, V> {
    fn from_value(value: &Value, cfg: &ReflectConfig) -> Result<Self> {
        match value {
            Value::Map { entries, .. } => entries
                .iter()
                .map(|(k, v)| {
                    let Value::Str(key) = k else {
                        return Err(CoerceError::NonStringMapKey { found: k.kind().to_string() }.into());
                    };
                    Ok((key.clone(), V::from_value(v, cfg)?))
                })
                .collect(),
            other => Err(CoerceError::KindMismatch { expected: "map".into(), found: other.kind().to_string() }.into()),
        }
    }
}

impl Value {
    /// Best-effort [`Type`] for a freshly built value, used to stamp
    /// container element types during [`ValueOf::value_of`] when the
    /// caller hasn't supplied a declared type to check against.
    fn type_hint(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::Str(_) => Type::Str,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::List { elem_ty, .. } => Type::new_list(elem_ty.clone()),
            Value::Map { key_ty, val_ty, .. } => Type::new_map(key_ty.clone(), val_ty.clone()),
            Value::Struct { ty, .. } => Type::Struct(ty.clone()),
            Value::Func { ty, .. } => ty.clone(),
            Value::Variant(inner) => Type::Variant(Some(Box::new(inner.type_hint()))),
        }
    }
}

/// Host struct types implement this to describe their fields for
/// [`ReflectConfig`]-aware conversion in both directions, paralleling
/// [`crate::types::ReflectStruct`].
pub trait FieldSource: Sized {
    /// `(rust_field_name, tag_value_if_present, value_of_field)`.
    fn struct_fields(&self, cfg: &ReflectConfig) -> Vec<(&'static str, Option<&'static str>, Value)>;

    fn struct_value_of(&self, cfg: &ReflectConfig) -> Value {
        let pairs = self.struct_fields(cfg);
        let mut ord = Vec::with_capacity(pairs.len());
        let mut field_types = Vec::with_capacity(pairs.len());
        let mut fields = HashMap::with_capacity(pairs.len());
        for (field_name, tag, v) in pairs {
            let name = tag.map(str::to_string).unwrap_or_else(|| field_name.to_lowercase());
            ord.push(name.clone());
            field_types.push((name.clone(), v.type_hint()));
            fields.insert(name, v);
        }
        Value::Struct { ty: crate::types::StructType::new(field_types), fields }
    }
}

/// Convenience wrapper for [`FromValue::from_value`] (spec's `Into`).
pub fn into<T: FromValue>(value: &Value, cfg: &ReflectConfig) -> Result<T> {
    T::from_value(value, cfg)
}

/// Convenience wrapper for [`ValueOf::value_of`] (spec's `ValueOfGolang`).
pub fn value_of<T: ValueOf>(x: &T, cfg: &ReflectConfig) -> Result<Value> {
    x.value_of(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_scalars() {
        let cfg = ReflectConfig::default();
        let v = value_of(&42i32, &cfg).unwrap();
        assert_eq!(into::<i32>(&v, &cfg).unwrap(), 42);
    }

    #[test]
    fn overflow_on_narrowing_int_fails() {
        let cfg = ReflectConfig::default();
        let v = Value::Int(1000);
        assert!(into::<i8>(&v, &cfg).is_err());
    }

    #[test]
    fn none_option_fails_with_nil_value() {
        let cfg = ReflectConfig::default();
        let none: Option<i32> = None;
        let err = value_of(&none, &cfg).unwrap_err();
        assert!(matches!(err, crate::error::Error::Coerce(CoerceError::NilValue)));
    }

    #[test]
    fn map_requires_string_keys_on_read_back() {
        let cfg = ReflectConfig::default();
        let v = Value::Map {
            key_ty: Type::Int,
            val_ty: Type::Int,
            entries: vec![(Value::Int(1), Value::Int(2))],
        };
        assert!(into::<HashMap<String, i64>>(&v, &cfg).is_err());
    }

    #[test]
    fn vec_round_trips() {
        let cfg = ReflectConfig::default();
        let xs = vec![1i64, 2, 3];
        let v = value_of(&xs, &cfg).unwrap();
        assert_eq!(into::<Vec<i64>>(&v, &cfg).unwrap(), xs);
    }
}
