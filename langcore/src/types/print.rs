//! [`std::fmt::Display`] for [`Type`]: the inverse of [`super::parse`] for
//! concrete types. Unification variables print as `?1`, `?2`, … in
//! first-appearance order, using a map scoped to this one `Display` call —
//! two calls on the same type may assign different numbers, matching the
//! "per-print-call map" rule in spec §4.2.

use std::collections::HashMap;
use std::fmt;

use super::Type;

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids = HashMap::new();
        let mut next = 1u32;
        write_type(self, f, &mut ids, &mut next)
    }
}

fn write_type(
    ty: &Type,
    f: &mut fmt::Formatter<'_>,
    ids: &mut HashMap<usize, u32>,
    next: &mut u32,
) -> fmt::Result {
    match ty {
        Type::Bool => f.write_str("bool"),
        Type::Str => f.write_str("str"),
        Type::Int => f.write_str("int"),
        Type::Float => f.write_str("float"),
        // Narrowed variants (`Variant(Some(_))`) are a runtime-only detail
        // with no wire syntax; see DESIGN.md for why that's fine — the
        // round-trip law in spec §8 is scoped to concrete types, and a
        // variant is by definition not one.
        Type::Variant(_) => f.write_str("variant"),
        Type::List(val) => {
            f.write_str("[]")?;
            write_type(val, f, ids, next)
        }
        Type::Map { key, val } => {
            f.write_str("map{")?;
            write_type(key, f, ids, next)?;
            f.write_str(": ")?;
            write_type(val, f, ids, next)?;
            f.write_str("}")
        }
        Type::Struct(s) => {
            f.write_str("struct{")?;
            for (i, (name, t)) in s.iter().enumerate() {
                if i > 0 {
                    f.write_str("; ")?;
                }
                write!(f, "{name} ")?;
                write_type(t, f, ids, next)?;
            }
            f.write_str("}")
        }
        Type::Func(fun) => {
            f.write_str("func(")?;
            for (i, (name, t)) in fun.iter_args().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                if let Some(name) = name {
                    write!(f, "{name} ")?;
                }
                write_type(t, f, ids, next)?;
            }
            f.write_str(")")?;
            if let Some(out) = &fun.out {
                f.write_str(" ")?;
                write_type(out, f, ids, next)?;
            }
            Ok(())
        }
        Type::Unification(elem) => {
            let id = elem.repr_id();
            let n = *ids.entry(id).or_insert_with(|| {
                let v = *next;
                *next += 1;
                v
            });
            write!(f, "?{n}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parse::parse_type;
    use super::*;

    #[test]
    fn prints_function_type_verbatim() {
        let src = "func(a str, b []map{str: int}) struct{x bool; y int}";
        let ty = parse_type(src).unwrap();
        assert_eq!(ty.to_string(), src);
    }

    #[test]
    fn prints_fresh_numbering_each_call() {
        let ty = parse_type("func(?1, ?1) ?2").unwrap();
        assert_eq!(ty.to_string(), "func(?1, ?1) ?2");
        assert_eq!(ty.to_string(), "func(?1, ?1) ?2");
    }

    #[test]
    fn prints_func_with_no_return() {
        assert_eq!(parse_type("func(int, str)").unwrap().to_string(), "func(int, str)");
    }

    #[test]
    fn unnamed_func_args_round_trip_through_parse() {
        let src = "func(int, str) bool";
        let ty = parse_type(src).unwrap();
        assert_eq!(ty.to_string(), src);
        assert_eq!(ty.copy().to_string(), src);
    }
}
