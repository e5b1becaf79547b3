//! Printf-style format-string parsing (spec §4.4 "Format-string rules"):
//! `%t`/`%s`/`%d`/`%f`/`%v` select the expected argument kind, `%%` is a
//! literal `%`, anything else after `%` is a build failure.

use crate::error::BuildError;
use crate::kind::Kind;

/// One parsed format directive: either a literal run of text or a
/// typed argument placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatArg {
    Literal(String),
    Arg(Kind),
}

/// Parses `format` into an ordered list of [`FormatArg`]s. Adjacent
/// literal characters are coalesced into a single [`FormatArg::Literal`].
pub fn parse_format_string(format: &str) -> Result<Vec<FormatArg>, BuildError> {
    let mut out = Vec::new();
    let mut literal = String::new();
    let mut chars = format.char_indices().peekable();
    while let Some((pos, c)) = chars.next() {
        if c != '%' {
            literal.push(c);
            continue;
        }
        let Some(&(_, verb)) = chars.peek() else {
            return Err(BuildError::DanglingFormatEscape);
        };
        chars.next();
        let kind = match verb {
            '%' => {
                literal.push('%');
                continue;
            }
            't' => Kind::Bool,
            's' => Kind::Str,
            'd' => Kind::Int,
            'f' => Kind::Float,
            'v' => Kind::Variant,
            other => {
                return Err(BuildError::BadFormatVerb {
                    pos: crate::error::Pos { row: 1, col: (pos + 1) as u32 },
                    verb: other,
                })
            }
        };
        if !literal.is_empty() {
            out.push(FormatArg::Literal(std::mem::take(&mut literal)));
        }
        out.push(FormatArg::Arg(kind));
    }
    if !literal.is_empty() {
        out.push(FormatArg::Literal(literal));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_literals_and_args() {
        let parsed = parse_format_string("a=%d, b=%s!").unwrap();
        assert_eq!(
            parsed,
            vec![
                FormatArg::Literal("a=".into()),
                FormatArg::Arg(Kind::Int),
                FormatArg::Literal(", b=".into()),
                FormatArg::Arg(Kind::Str),
                FormatArg::Literal("!".into()),
            ]
        );
    }

    #[test]
    fn percent_percent_is_a_literal_percent() {
        assert_eq!(parse_format_string("100%%").unwrap(), vec![FormatArg::Literal("100%".into())]);
    }

    #[test]
    fn unknown_verb_is_a_build_error() {
        assert!(matches!(parse_format_string("%q"), Err(BuildError::BadFormatVerb { verb: 'q', .. })));
    }

    #[test]
    fn dangling_percent_is_a_build_error() {
        assert!(matches!(parse_format_string("abc%"), Err(BuildError::DanglingFormatEscape)));
    }

    #[test]
    fn all_format_kinds_are_recognised() {
        let parsed = parse_format_string("%t%s%d%f%v").unwrap();
        assert_eq!(
            parsed,
            vec![
                FormatArg::Arg(Kind::Bool),
                FormatArg::Arg(Kind::Str),
                FormatArg::Arg(Kind::Int),
                FormatArg::Arg(Kind::Float),
                FormatArg::Arg(Kind::Variant),
            ]
        );
    }
}
