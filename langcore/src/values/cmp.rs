//! Structural equality and total ordering over [`Value`] (spec §4.3
//! "`Cmp`"/"`Ordering`"). `Func` values compare only by type — the
//! callable itself is opaque, matching spec's "callables are opaque".

use std::cmp::Ordering;

use super::Value;
use crate::error::CmpError;
use crate::types::cmp as type_cmp;

/// Deep structural equality. Map/struct comparison ignores entry/iteration
/// order (spec: "iteration order is not part of identity" for maps;
/// structs compare by declared field set).
pub fn cmp(a: &Value, b: &Value) -> Result<(), CmpError> {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) if x == y => Ok(()),
        (Value::Str(x), Value::Str(y)) if x == y => Ok(()),
        (Value::Int(x), Value::Int(y)) if x == y => Ok(()),
        (Value::Float(x), Value::Float(y)) if x == y => Ok(()),
        (Value::List { elements: xs, .. }, Value::List { elements: ys, .. }) => {
            if xs.len() != ys.len() {
                return Err(CmpError(format!("list length mismatch: {} != {}", xs.len(), ys.len())));
            }
            xs.iter().zip(ys).try_for_each(|(x, y)| cmp(x, y))
        }
        (Value::Map { entries: xs, .. }, Value::Map { entries: ys, .. }) => {
            if xs.len() != ys.len() {
                return Err(CmpError(format!("map size mismatch: {} != {}", xs.len(), ys.len())));
            }
            for (k, v) in xs {
                match Value::map_get(ys, k) {
                    Some(ov) => cmp(v, ov)?,
                    None => return Err(CmpError(format!("missing key {k} on right side"))),
                }
            }
            Ok(())
        }
        (Value::Struct { ty: t1, fields: f1 }, Value::Struct { ty: t2, fields: f2 }) => {
            if t1.ord != t2.ord {
                return Err(CmpError(format!("struct field set mismatch: {:?} != {:?}", t1.ord, t2.ord)));
            }
            for name in &t1.ord {
                cmp(&f1[name], &f2[name])?;
            }
            Ok(())
        }
        (Value::Func { ty: t1, .. }, Value::Func { ty: t2, .. }) => {
            type_cmp(t1, t2).map_err(|e| CmpError(format!("func value type mismatch: {e}")))
        }
        (Value::Variant(x), Value::Variant(y)) => cmp(x, y),
        _ => Err(CmpError(format!("{a} != {b}"))),
    }
}

/// A total order over comparable-kind values (spec §4.3 "`Ordering`"), for
/// sorting collections. Returns an error across incomparable kinds (e.g.
/// comparing a `Func` value, which has no ordering) instead of panicking,
/// since which values land in a sortable collection isn't a closed
/// invariant this module can enforce up front.
pub fn compare(a: &Value, b: &Value) -> Result<Ordering, CmpError> {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => Ok(x.cmp(y)),
        (Value::Str(x), Value::Str(y)) => Ok(x.cmp(y)),
        (Value::Int(x), Value::Int(y)) => Ok(x.cmp(y)),
        (Value::Float(x), Value::Float(y)) => {
            x.partial_cmp(y).ok_or_else(|| CmpError(format!("cannot order NaN values {x} and {y}")))
        }
        (Value::List { elements: xs, .. }, Value::List { elements: ys, .. }) => {
            for (x, y) in xs.iter().zip(ys) {
                match compare(x, y)? {
                    Ordering::Equal => continue,
                    other => return Ok(other),
                }
            }
            Ok(xs.len().cmp(&ys.len()))
        }
        (Value::Struct { ty, fields: f1 }, Value::Struct { ty: ty2, fields: f2 }) if ty.ord == ty2.ord => {
            let mut names = ty.ord.clone();
            names.sort();
            for name in names {
                match compare(&f1[&name], &f2[&name])? {
                    Ordering::Equal => continue,
                    other => return Ok(other),
                }
            }
            Ok(Ordering::Equal)
        }
        (Value::Map { entries: xs, .. }, Value::Map { entries: ys, .. }) => {
            let mut xs_sorted: Vec<_> = xs.iter().collect();
            let mut ys_sorted: Vec<_> = ys.iter().collect();
            xs_sorted.sort_by(|(k1, _), (k2, _)| compare(k1, k2).unwrap_or(Ordering::Equal));
            ys_sorted.sort_by(|(k1, _), (k2, _)| compare(k1, k2).unwrap_or(Ordering::Equal));
            for ((k1, v1), (k2, v2)) in xs_sorted.iter().zip(&ys_sorted) {
                match compare(k1, k2)? {
                    Ordering::Equal => {}
                    other => return Ok(other),
                }
                match compare(v1, v2)? {
                    Ordering::Equal => continue,
                    other => return Ok(other),
                }
            }
            Ok(xs.len().cmp(&ys.len()))
        }
        _ => Err(CmpError(format!("values of kind {} and {} have no total order", a.kind(), b.kind()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Type;

    fn list_of_ints(xs: &[i64]) -> Value {
        Value::List { elem_ty: Type::Int, elements: xs.iter().map(|n| Value::Int(*n)).collect() }
    }

    #[test]
    fn scalars_compare_by_value() {
        assert!(cmp(&Value::Int(4), &Value::Int(4)).is_ok());
        assert!(cmp(&Value::Int(4), &Value::Int(5)).is_err());
    }

    #[test]
    fn map_equality_ignores_entry_order() {
        let a = Value::Map {
            key_ty: Type::Str,
            val_ty: Type::Int,
            entries: vec![(Value::Str("a".into()), Value::Int(1)), (Value::Str("b".into()), Value::Int(2))],
        };
        let b = Value::Map {
            key_ty: Type::Str,
            val_ty: Type::Int,
            entries: vec![(Value::Str("b".into()), Value::Int(2)), (Value::Str("a".into()), Value::Int(1))],
        };
        assert!(cmp(&a, &b).is_ok());
    }

    #[test]
    fn bool_ordering_is_false_then_true() {
        assert_eq!(compare(&Value::Bool(false), &Value::Bool(true)).unwrap(), Ordering::Less);
    }

    #[test]
    fn list_ordering_is_lexicographic() {
        assert_eq!(compare(&list_of_ints(&[1, 2]), &list_of_ints(&[1, 3])).unwrap(), Ordering::Less);
        assert_eq!(compare(&list_of_ints(&[1]), &list_of_ints(&[1, 0])).unwrap(), Ordering::Less);
    }
}
