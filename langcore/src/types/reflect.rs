//! `Reflect`/`TypeOf` (spec §4.2): lossy, bidirectional conversion between
//! a [`Type`] and a host (Rust) runtime type.
//!
//! Rust has no dynamic type-construction facility analogous to Go's
//! `reflect.StructOf` — there is no way to hand back "a Rust type" built
//! at runtime from a [`Type`] description the way the source system hands
//! back a `reflect.Type`. Per the core's own scope note ("does not attempt
//! to reproduce the exact host-language reflection semantics bit for bit
//! — only the observable structural behavior"), `reflect` is the identity
//! on the structural shape (it round-trips through [`Type::copy`], so it
//! still exercises — and can still panic on — malformed input, matching
//! the source contract). `type_of`/[`Reflectable`] cover the forward
//! direction, which *is* meaningful in Rust: deriving a [`Type`] from a
//! concrete, statically-known Rust type.
//!
//! | knob | meaning |
//! |---|---|
//! | `tag_key` | struct-tag name consulted for field aliasing (spec §6: `"lang"`) |
//! | `strict_tags` | missing tag is fatal instead of falling back to the lower-cased field name |
//! | `skip_private_or_bad_fields` | fields with no usable name are omitted rather than erroring |
//! | `interfaces_as_variant` | trait-object-shaped fields map to `Variant` |

use std::collections::HashMap;

use super::{StructType, Type};

/// Configuration for [`Reflectable::type_of`]/struct-tag aliasing, spec §4.2.
#[derive(Debug, Clone)]
pub struct ReflectConfig {
    pub tag_key: &'static str,
    pub strict_tags: bool,
    pub skip_private_or_bad_fields: bool,
    pub interfaces_as_variant: bool,
}

impl Default for ReflectConfig {
    fn default() -> Self {
        ReflectConfig {
            tag_key: "lang",
            strict_tags: false,
            skip_private_or_bad_fields: true,
            interfaces_as_variant: true,
        }
    }
}

/// Implemented by host (Rust) types that can describe their own
/// structural [`Type`] — the forward half of spec's `TypeOf`.
pub trait Reflectable {
    fn type_of(cfg: &ReflectConfig) -> Type;
}

macro_rules! reflectable_int {
    ($($t:ty),* $(,)?) => {$(
        impl Reflectable for $t {
            fn type_of(_cfg: &ReflectConfig) -> Type { Type::Int }
        }
    )*};
}
reflectable_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! reflectable_float {
    ($($t:ty),* $(,)?) => {$(
        impl Reflectable for $t {
            fn type_of(_cfg: &ReflectConfig) -> Type { Type::Float }
        }
    )*};
}
reflectable_float!(f32, f64);

impl Reflectable for bool {
    fn type_of(_cfg: &ReflectConfig) -> Type { Type::Bool }
}

impl Reflectable for String {
    fn type_of(_cfg: &ReflectConfig) -> Type { Type::Str }
}

impl<T: Reflectable> Reflectable for Vec<T> {
    fn type_of(cfg: &ReflectConfig) -> Type { Type::new_list(T::type_of(cfg)) }
}

impl<T: Reflectable> Reflectable for Box<T> {
    fn type_of(cfg: &ReflectConfig) -> Type { T::type_of(cfg) }
}

/// Nil pointers are a value-level concern ([`crate::error::CoerceError::NilValue`]);
/// at the type level an `Option<T>` describes the same shape as `T`.
impl<T: Reflectable> Reflectable for Option<T> {
    fn type_of(cfg: &ReflectConfig) -> Type { T::type_of(cfg) }
}

impl<V: Reflectable> Reflectable for HashMap<String, V> {
    fn type_of(cfg: &ReflectConfig) -> Type { Type::new_map(Type::Str, V::type_of(cfg)) }
}

/// Implemented by host struct types to describe their ordered field list
/// for [`ReflectConfig`]-aware aliasing. Each entry is
/// `(rust_field_name, tag_value_if_present, field_type)`.
///
/// There is no derive macro here (the teacher's own `DeepSizeOf` is the
/// one macro-derived trait in this family, and it is out of scope to
/// reimplement a derive crate for this); host structs list their fields
/// by hand, the way the teacher hand-writes its `Keyword`/`Syntax` tables.
pub trait ReflectStruct {
    fn struct_fields(cfg: &ReflectConfig) -> Vec<(&'static str, Option<&'static str>, Type)>;

    fn struct_type_of(cfg: &ReflectConfig) -> Type {
        let pairs = Self::struct_fields(cfg)
            .into_iter()
            .map(|(field_name, tag, ty)| {
                let name = match tag {
                    Some(t) => t.to_string(),
                    None => {
                        assert!(
                            !cfg.strict_tags,
                            "missing {:?} tag on field {field_name:?} under strict tag policy",
                            cfg.tag_key
                        );
                        field_name.to_lowercase()
                    }
                };
                (name, ty)
            })
            .collect();
        Type::Struct(StructType::new(pairs))
    }
}

/// See the module docs: this reimplementation has no dynamic
/// host-type-construction facility, so `reflect` is the identity on
/// structure (round-tripping through [`Type::copy`], which is where a
/// malformed tree would panic, matching the source's "panics on malformed
/// input" contract).
#[must_use]
pub fn reflect(ty: &Type) -> Type {
    ty.copy()
}

/// Convenience wrapper for [`Reflectable::type_of`].
#[must_use]
pub fn type_of<T: Reflectable>(cfg: &ReflectConfig) -> Type {
    T::type_of(cfg)
}
