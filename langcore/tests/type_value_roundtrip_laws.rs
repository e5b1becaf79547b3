//! Property tests for the universally-quantified round-trip/idempotence
//! laws in spec §8 ("for every concrete type T …", "for every value v …"),
//! generating arbitrary small type/value trees rather than a fixed set of
//! hand-picked examples.

use langcore::types::{FuncType, StructType, Type};
use langcore::values::Value;
use proptest::prelude::*;

/// A concrete (no `Unification`) type, recursively generated. Unification
/// pattern-matching is already covered by the hand-written cases in
/// `types::cmp`'s inline tests, so this generator sticks to the shapes a
/// caller can actually print and reparse.
fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        Just(Type::Bool),
        Just(Type::Str),
        Just(Type::Int),
        Just(Type::Float),
        Just(Type::Variant(None)),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| Type::List(Box::new(t))),
            (inner.clone(), inner.clone())
                .prop_map(|(k, v)| Type::Map { key: Box::new(k), val: Box::new(v) }),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|fields| {
                let pairs = fields.into_iter().enumerate().map(|(i, t)| (format!("f{i}"), t)).collect();
                Type::Struct(StructType::new(pairs))
            }),
            (prop::collection::vec(inner.clone(), 0..3), prop::option::of(inner))
                .prop_map(|(arg_tys, out)| {
                    let args = arg_tys
                        .into_iter()
                        .enumerate()
                        .map(|(i, t)| {
                            // alternate named/unnamed args so both printed
                            // forms get exercised by the same generator
                            let name = if i % 2 == 0 { Some(format!("a{i}")) } else { None };
                            (name, t)
                        })
                        .collect();
                    Type::Func(FuncType::new(args, out))
                }),
        ]
    })
}

/// A value tree with a shape matching [`arb_type`] (minus `Func`, whose
/// values carry an opaque callable with no generic way to conjure one).
fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        ".*".prop_map(Value::Str),
        any::<i64>().prop_map(Value::Int),
        (-1e6..1e6f64).prop_map(Value::Float),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|v| Value::Variant(Box::new(v))),
            prop::collection::vec(inner.clone(), 0..3).prop_map(|elements| Value::List {
                elem_ty: Type::Variant(None),
                elements,
            }),
            prop::collection::vec((inner.clone(), inner.clone()), 0..3).prop_map(|entries| {
                Value::Map { key_ty: Type::Variant(None), val_ty: Type::Variant(None), entries }
            }),
            prop::collection::vec(inner, 0..3).prop_map(|fields| {
                let pairs: Vec<(String, Type)> =
                    fields.iter().enumerate().map(|(i, _)| (format!("f{i}"), Type::Variant(None))).collect();
                let ty = StructType::new(pairs);
                let fields = fields
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (format!("f{i}"), v))
                    .collect();
                Value::Struct { ty, fields }
            }),
        ]
    })
}

proptest! {
    #[test]
    fn type_round_trips_through_print_and_parse(ty in arb_type()) {
        let printed = ty.to_string();
        let reparsed = Type::parse(&printed).unwrap_or_else(|e| {
            panic!("could not reparse printed type {printed:?}: {e}")
        });
        prop_assert!(langcore::types::cmp(&ty, &reparsed).is_ok());
    }

    #[test]
    fn type_copy_cmp_equals_self(ty in arb_type()) {
        prop_assert!(langcore::types::cmp(&ty.copy(), &ty).is_ok());
    }

    #[test]
    fn type_cmp_is_reflexive(ty in arb_type()) {
        prop_assert!(langcore::types::cmp(&ty, &ty).is_ok());
    }

    #[test]
    fn value_deep_copy_cmp_equals_self(v in arb_value()) {
        prop_assert!(langcore::values::cmp(&v.deep_copy(), &v).is_ok());
    }

    #[test]
    fn value_cmp_is_reflexive(v in arb_value()) {
        prop_assert!(langcore::values::cmp(&v, &v).is_ok());
    }
}
