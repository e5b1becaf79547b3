use super::Type;

pub(super) fn has_variant(ty: &Type) -> bool {
    match ty {
        Type::Variant(_) => true,
        Type::List(val) => has_variant(val),
        Type::Map { key, val } => has_variant(key) || has_variant(val),
        Type::Struct(s) => s.iter().any(|(_, t)| has_variant(t)),
        Type::Func(f) => {
            f.iter_args().any(|(_, t)| has_variant(t)) || f.out.as_deref().is_some_and(has_variant)
        }
        Type::Bool | Type::Str | Type::Int | Type::Float | Type::Unification(_) => false,
    }
}

pub(super) fn has_uni(ty: &Type) -> bool {
    match ty {
        Type::Unification(_) => true,
        Type::List(val) => has_uni(val),
        Type::Map { key, val } => has_uni(key) || has_uni(val),
        Type::Struct(s) => s.iter().any(|(_, t)| has_uni(t)),
        Type::Func(f) => {
            f.iter_args().any(|(_, t)| has_uni(t)) || f.out.as_deref().is_some_and(has_uni)
        }
        Type::Bool | Type::Str | Type::Int | Type::Float | Type::Variant(_) => false,
    }
}

pub(super) fn underlying(ty: &Type) -> &Type {
    match ty {
        Type::Variant(Some(inner)) => underlying(inner),
        _ => ty,
    }
}

pub(super) fn iter<E>(ty: &Type, f: &mut impl FnMut(&Type) -> Result<(), E>) -> Result<(), E> {
    f(ty)?;
    match ty {
        Type::List(val) => iter(val, f),
        Type::Map { key, val } => {
            iter(key, f)?;
            iter(val, f)
        }
        Type::Struct(s) => {
            for (_, t) in s.iter() {
                iter(t, f)?;
            }
            Ok(())
        }
        Type::Func(fun) => {
            for (_, t) in fun.iter_args() {
                iter(t, f)?;
            }
            if let Some(out) = &fun.out {
                iter(out, f)?;
            }
            Ok(())
        }
        Type::Variant(Some(inner)) => iter(inner, f),
        Type::Bool
        | Type::Str
        | Type::Int
        | Type::Float
        | Type::Variant(None)
        | Type::Unification(_) => Ok(()),
    }
}
