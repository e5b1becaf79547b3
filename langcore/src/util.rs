//! Shared name-handling helpers for the registry key scheme (spec §6
//! "Registry key").

/// A `<module>.<name>` registry key is valid only if both halves are
/// non-empty identifiers (ASCII alphanumeric plus `_`, not starting with
/// a digit).
#[must_use]
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builds the `<module>.<name>` registry key (spec §6).
#[must_use]
pub fn registry_key(module: &str, name: &str) -> String {
    format!("{module}.{name}")
}

/// Rewrites a registry key for embedding into a template namespace (spec
/// §6): `.` becomes `#`, and a package-less function (no module, i.e. an
/// empty `module`) is prefixed with `#` to avoid colliding with a
/// dotted-then-rewritten name that happens to start with the same bare
/// identifier.
#[must_use]
pub fn template_namespace_key(module: &str, name: &str) -> String {
    if module.is_empty() {
        format!("#{name}")
    } else {
        format!("{module}#{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_identifiers_starting_with_letter_or_underscore() {
        assert!(is_valid_identifier("net"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("a1"));
    }

    #[test]
    fn rejects_empty_or_digit_leading_names() {
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("1abc"));
        assert!(!is_valid_identifier("a.b"));
    }

    #[test]
    fn registry_key_joins_with_a_dot() {
        assert_eq!(registry_key("net", "listen"), "net.listen");
    }

    #[test]
    fn template_namespace_key_replaces_dot_and_prefixes_package_less_names() {
        assert_eq!(template_namespace_key("net", "listen"), "net#listen");
        assert_eq!(template_namespace_key("", "len"), "#len");
    }
}
