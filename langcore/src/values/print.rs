//! [`std::fmt::Display`] for [`Value`] (spec §4.3 "`String`"/§6 "Value
//! textual form"): a canonical rendering distinct from any host default —
//! strings are double-quoted with `\n`/`\t`/`\\`/`\"` escapes, floats use
//! the shortest round-trip representation, lists print as `[a, b, c]`,
//! maps as `{"k": v, …}` in field-declaration/insertion order, structs as
//! `struct{k1: v1; k2: v2}` in declared field order.

use std::fmt;

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write_quoted(s, f),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::List { elements, .. } => {
                f.write_str("[")?;
                for (i, v) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Map { entries, .. } => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Struct { ty, fields } => {
                f.write_str("struct{")?;
                for (i, name) in ty.ord.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{name}: {}", fields[name])?;
                }
                f.write_str("}")
            }
            Value::Func { ty, .. } => write!(f, "<func {ty}>"),
            Value::Variant(inner) => write!(f, "{inner}"),
        }
    }
}

fn write_quoted(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\\' => f.write_str("\\\\")?,
            '"' => f.write_str("\\\"")?,
            other => write!(f, "{other}")?,
        }
    }
    f.write_str("\"")
}

/// Shortest round-trip representation: Rust's default `f64` `Display`
/// already produces this (`0` prints as `0`, `-4.2` as `-4.2`), matching
/// spec's "host's shortest round-trip representation" requirement.
fn format_float(x: f64) -> String {
    if x == x.trunc() && x.is_finite() {
        format!("{x:.0}")
    } else {
        x.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{StructType, Type};
    use std::collections::HashMap;

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(Value::Str("a\nb\"c".into()).to_string(), "\"a\\nb\\\"c\"");
    }

    #[test]
    fn integral_floats_print_without_trailing_zero() {
        assert_eq!(Value::Float(0.0).to_string(), "0");
        assert_eq!(Value::Float(-4.2).to_string(), "-4.2");
    }

    #[test]
    fn list_prints_bracketed_and_comma_separated() {
        let v = Value::List { elem_ty: Type::Int, elements: vec![Value::Int(1), Value::Int(2)] };
        assert_eq!(v.to_string(), "[1, 2]");
    }

    #[test]
    fn struct_prints_in_declared_field_order() {
        let ty = StructType::new(vec![("x".into(), Type::Int), ("y".into(), Type::Str)]);
        let mut fields = HashMap::new();
        fields.insert("x".to_string(), Value::Int(1));
        fields.insert("y".to_string(), Value::Str("hi".into()));
        let v = Value::Struct { ty, fields };
        assert_eq!(v.to_string(), "struct{x: 1; y: \"hi\"}");
    }
}
