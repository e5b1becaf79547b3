//! Strict structural equality (spec §4.2 "Cmp"): reflexive, symmetric and
//! transitive on concrete types. `Func` argument names are ignored (only
//! positional argument types and the return type are compared).
//! `Unification` variables are compared by *pattern*: a pair of
//! first-encounter tables (one per side) assigns the same small integer to
//! an element the first time it's seen on its side, and every later
//! occurrence must agree — so two independently-parsed trees that reuse
//! their own variables in the same shape compare equal, even though the
//! disjoint-set elements themselves are unrelated.

use std::collections::HashMap;

use super::Type;
use crate::error::CmpError;

/// Structural equality. `Ok(())` iff `a` and `b` are the same type; any
/// [`Err`] is a mismatch (there is no separate "compatible but not equal"
/// outcome here — that's [`super::complex_cmp`]).
pub fn cmp(a: &Type, b: &Type) -> Result<(), CmpError> {
    let mut left = HashMap::new();
    let mut right = HashMap::new();
    cmp_with(a, b, &mut left, &mut right)
}

fn mismatch(a: &Type, b: &Type) -> CmpError {
    CmpError(format!("{a} != {b}"))
}

fn cmp_with(
    a: &Type,
    b: &Type,
    left: &mut HashMap<usize, u32>,
    right: &mut HashMap<usize, u32>,
) -> Result<(), CmpError> {
    match (a, b) {
        (Type::Bool, Type::Bool)
        | (Type::Str, Type::Str)
        | (Type::Int, Type::Int)
        | (Type::Float, Type::Float) => Ok(()),
        (Type::Variant(x), Type::Variant(y)) => match (x, y) {
            (None, None) => Ok(()),
            (Some(x), Some(y)) => cmp_with(x, y, left, right),
            _ => Err(mismatch(a, b)),
        },
        (Type::List(x), Type::List(y)) => cmp_with(x, y, left, right),
        (Type::Map { key: k1, val: v1 }, Type::Map { key: k2, val: v2 }) => {
            cmp_with(k1, k2, left, right)?;
            cmp_with(v1, v2, left, right)
        }
        (Type::Struct(s1), Type::Struct(s2)) => {
            if s1.ord != s2.ord {
                return Err(CmpError(format!(
                    "struct field order mismatch: {:?} != {:?}",
                    s1.ord, s2.ord
                )));
            }
            for name in &s1.ord {
                cmp_with(&s1.fields[name], &s2.fields[name], left, right)?;
            }
            Ok(())
        }
        (Type::Func(f1), Type::Func(f2)) => {
            if f1.ord.len() != f2.ord.len() {
                return Err(CmpError(format!(
                    "func arity mismatch: {} != {}",
                    f1.ord.len(),
                    f2.ord.len()
                )));
            }
            for (n1, n2) in f1.ord.iter().zip(&f2.ord) {
                cmp_with(&f1.args[n1], &f2.args[n2], left, right)?;
            }
            match (&f1.out, &f2.out) {
                (None, None) => Ok(()),
                (Some(o1), Some(o2)) => cmp_with(o1, o2, left, right),
                _ => Err(CmpError("func return-type presence mismatch".into())),
            }
        }
        (Type::Unification(e1), Type::Unification(e2)) => {
            let id1 = e1.repr_id();
            let id2 = e2.repr_id();
            let la = *left.entry(id1).or_insert(left.len() as u32);
            let lb = *right.entry(id2).or_insert(right.len() as u32);
            if la == lb {
                Ok(())
            } else {
                Err(CmpError("unification variables used in different patterns".into()))
            }
        }
        _ => Err(mismatch(a, b)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FuncType, StructType};

    #[test]
    fn scalars_equal_themselves() {
        assert!(cmp(&Type::Int, &Type::Int).is_ok());
        assert!(cmp(&Type::Int, &Type::Str).is_err());
    }

    #[test]
    fn func_ignores_arg_names() {
        let f1 = Type::Func(FuncType::new(vec![(Some("a".into()), Type::Int)], Some(Type::Str)));
        let f2 = Type::Func(FuncType::new(vec![(Some("z".into()), Type::Int)], Some(Type::Str)));
        assert!(cmp(&f1, &f2).is_ok());
    }

    #[test]
    fn func_differing_arity_mismatches() {
        let f1 = Type::Func(FuncType::new(vec![(None, Type::Int)], None));
        let f2 = Type::Func(FuncType::new(vec![], None));
        assert!(cmp(&f1, &f2).is_err());
    }

    #[test]
    fn struct_field_order_is_part_of_identity() {
        let s1 = Type::Struct(StructType::new(vec![("x".into(), Type::Int), ("y".into(), Type::Str)]));
        let s2 = Type::Struct(StructType::new(vec![("y".into(), Type::Str), ("x".into(), Type::Int)]));
        assert!(cmp(&s1, &s2).is_err());
    }

    #[test]
    fn unification_pattern_must_match_shape() {
        let e1 = disjoint_set::Element::new_elem();
        let e2 = disjoint_set::Element::new_elem();
        // func(?1, ?1) vs func(?1, ?2): same element reused on the left,
        // two distinct elements on the right -> different pattern.
        let left = Type::Func(FuncType::new(
            vec![(None, Type::Unification(e1.clone())), (None, Type::Unification(e1))],
            None,
        ));
        let f1 = disjoint_set::Element::new_elem();
        let f2 = disjoint_set::Element::new_elem();
        let right = Type::Func(FuncType::new(
            vec![(None, Type::Unification(f1)), (None, Type::Unification(f2))],
            None,
        ));
        assert!(cmp(&left, &right).is_err());
    }

    #[test]
    fn unification_pattern_matches_isomorphic_reuse() {
        let e1 = disjoint_set::Element::new_elem();
        let left = Type::Func(FuncType::new(
            vec![(None, Type::Unification(e1.clone())), (None, Type::Unification(e1))],
            None,
        ));
        let f1 = disjoint_set::Element::new_elem();
        let right = Type::Func(FuncType::new(
            vec![(None, Type::Unification(f1.clone())), (None, Type::Unification(f1))],
            None,
        ));
        assert!(cmp(&left, &right).is_ok());
    }

    #[test]
    fn copy_round_trips_through_cmp() {
        let ty = Type::parse("func(a str, b []map{str: int}) struct{x bool; y int}").unwrap();
        assert!(cmp(&ty.copy(), &ty).is_ok());
    }
}
