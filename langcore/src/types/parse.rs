//! Recursive-descent parser for the compact textual type form (spec §4.2).
//! Parsing is total and deterministic: any input either parses to exactly
//! one [`Type`] or produces a [`ParseError`].

use std::collections::HashMap;

use super::{FuncType, StructType, Type, UnifElem};
use crate::error::{ParseError, Pos};

struct Parser {
    chars: Vec<char>,
    pos: usize,
    uni_table: HashMap<u64, UnifElem>,
}

pub(super) fn parse_type(src: &str) -> Result<Type, ParseError> {
    let mut p = Parser { chars: src.chars().collect(), pos: 0, uni_table: HashMap::new() };
    let ty = p.parse_type_expr()?;
    p.skip_ws();
    if p.pos != p.chars.len() {
        return Err(p.err(format!("unexpected trailing input {:?}", p.rest_preview())));
    }
    Ok(ty)
}

impl Parser {
    fn pos_info(&self) -> Pos {
        Pos { row: 1, col: (self.pos + 1) as u32 }
    }

    fn err(&self, message: impl Into<String>) -> ParseError {
        ParseError::ParseError { pos: self.pos_info(), message: message.into() }
    }

    fn rest_preview(&self) -> String {
        self.chars[self.pos..].iter().take(16).collect()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ')) {
            self.pos += 1;
        }
    }

    fn expect_char(&mut self, c: char) -> Result<(), ParseError> {
        if self.peek() == Some(c) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.err(format!("expected {c:?}, found {:?}", self.peek())))
        }
    }

    fn expect_str(&mut self, s: &str) -> Result<(), ParseError> {
        for c in s.chars() {
            self.expect_char(c)?;
        }
        Ok(())
    }

    fn read_word(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ParseError::LexerUnrecognized {
                pos: Pos { row: 1, col: (start + 1) as u32 },
                near: self.chars[start..].iter().take(16).collect(),
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn read_digits(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.err("expected a digit"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_type_expr(&mut self) -> Result<Type, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some('[') => {
                self.expect_str("[]")?;
                let val = self.parse_type_expr()?;
                Ok(Type::new_list(val))
            }
            Some('?') => {
                let pos = self.pos_info();
                self.bump();
                let digits = self.read_digits()?;
                if digits.len() > 1 && digits.starts_with('0') {
                    return Err(ParseError::LexerIntegerOverflow { pos });
                }
                let n: u64 = digits
                    .parse()
                    .map_err(|_| ParseError::LexerIntegerOverflow { pos })?;
                let elem = self
                    .uni_table
                    .entry(n)
                    .or_insert_with(disjoint_set::Element::new_elem)
                    .clone();
                Ok(Type::Unification(elem))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.parse_keyword_or_compound(),
            other => Err(ParseError::LexerUnrecognized {
                pos: self.pos_info(),
                near: other.map(String::from).unwrap_or_default(),
            }),
        }
    }

    fn parse_keyword_or_compound(&mut self) -> Result<Type, ParseError> {
        let word = self.read_word()?;
        match word.as_str() {
            "bool" => Ok(Type::Bool),
            "str" => Ok(Type::Str),
            "int" => Ok(Type::Int),
            "float" => Ok(Type::Float),
            "variant" => Ok(Type::Variant(None)),
            "map" => {
                self.expect_char('{')?;
                let key = self.parse_type_expr()?;
                self.skip_ws();
                self.expect_char(':')?;
                self.skip_ws();
                let val = self.parse_type_expr()?;
                self.skip_ws();
                self.expect_char('}')?;
                Ok(Type::new_map(key, val))
            }
            "struct" => {
                self.expect_char('{')?;
                let mut pairs = Vec::new();
                self.skip_ws();
                if self.peek() != Some('}') {
                    loop {
                        self.skip_ws();
                        let name = self.read_word()?;
                        self.expect_char(' ')?;
                        let ty = self.parse_type_expr()?;
                        pairs.push((name, ty));
                        self.skip_ws();
                        match self.peek() {
                            Some(';') => {
                                self.bump();
                            }
                            Some('}') => break,
                            _ => return Err(self.err("expected ';' or '}' in struct type")),
                        }
                    }
                }
                self.expect_char('}')?;
                Ok(Type::Struct(StructType::new(pairs)))
            }
            "func" => {
                self.expect_char('(')?;
                let mut args = Vec::new();
                self.skip_ws();
                if self.peek() != Some(')') {
                    loop {
                        self.skip_ws();
                        let (name, ty) = self.parse_func_arg()?;
                        args.push((name, ty));
                        self.skip_ws();
                        match self.peek() {
                            Some(',') => {
                                self.bump();
                            }
                            Some(')') => break,
                            _ => return Err(self.err("expected ',' or ')' in func type")),
                        }
                    }
                }
                self.expect_char(')')?;
                let save = self.pos;
                self.skip_ws();
                let out = match self.peek() {
                    None | Some(';' | '}' | ',' | ':' | ')') => {
                        self.pos = save;
                        None
                    }
                    _ => Some(self.parse_type_expr()?),
                };
                Ok(Type::Func(FuncType::new(args, out)))
            }
            other => Err(ParseError::LexerUnrecognized {
                pos: self.pos_info(),
                near: other.to_string(),
            }),
        }
    }

    /// Parses a single `func(...)` argument: either `T` or `name " " T`.
    /// Disambiguated by a tentative read-then-rewind on the identifier.
    fn parse_func_arg(&mut self) -> Result<(Option<String>, Type), ParseError> {
        let save = self.pos;
        if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic() || c == '_') {
            if let Ok(word) = self.read_word() {
                if self.peek() == Some(' ') {
                    self.bump();
                    let ty = self.parse_type_expr()?;
                    return Ok((Some(word), ty));
                }
            }
        }
        self.pos = save;
        let ty = self.parse_type_expr()?;
        Ok((None, ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert!(matches!(parse_type("bool").unwrap(), Type::Bool));
        assert!(matches!(parse_type("str").unwrap(), Type::Str));
        assert!(matches!(parse_type("int").unwrap(), Type::Int));
        assert!(matches!(parse_type("float").unwrap(), Type::Float));
        assert!(matches!(parse_type("variant").unwrap(), Type::Variant(None)));
    }

    #[test]
    fn parses_list_of_list() {
        let ty = parse_type("[][]int").unwrap();
        match ty {
            Type::List(inner) => assert!(matches!(*inner, Type::List(_))),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn parses_map() {
        let ty = parse_type("map{str: int}").unwrap();
        match ty {
            Type::Map { key, val } => {
                assert!(matches!(*key, Type::Str));
                assert!(matches!(*val, Type::Int));
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn parses_struct_without_trailing_semicolon() {
        let ty = parse_type("struct{x bool; y int}").unwrap();
        match ty {
            Type::Struct(s) => assert_eq!(s.ord, vec!["x", "y"]),
            _ => panic!("expected struct"),
        }
    }

    #[test]
    fn parses_func_with_mixed_named_and_bare_args() {
        let ty = parse_type("func(a str, b []map{str: int}) struct{x bool; y int}").unwrap();
        match ty {
            Type::Func(f) => {
                assert_eq!(f.ord, vec!["a", "b"]);
                assert!(f.out.is_some());
            }
            _ => panic!("expected func"),
        }
    }

    #[test]
    fn parses_func_with_no_return() {
        let ty = parse_type("func(int, str)").unwrap();
        match ty {
            Type::Func(f) => {
                assert_eq!(f.ord, vec!["0", "1"]);
                assert!(f.out.is_none());
            }
            _ => panic!("expected func"),
        }
    }

    #[test]
    fn shares_unification_element_within_one_parse() {
        let ty = parse_type("func(?1, ?1) ?2").unwrap();
        let Type::Func(f) = ty else { panic!("expected func") };
        let (a, b) = (f.arg("0").unwrap(), f.arg("1").unwrap());
        let (Type::Unification(ea), Type::Unification(eb)) = (a, b) else {
            panic!("expected unification args")
        };
        assert!(ea.is_connected(eb));
        let Some(out) = &f.out else { panic!("expected return type") };
        let Type::Unification(eout) = out.as_ref() else { panic!("expected unification out") };
        assert!(!ea.is_connected(eout));
    }

    #[test]
    fn separate_parses_produce_unrelated_elements() {
        let a = parse_type("?1").unwrap();
        let b = parse_type("?1").unwrap();
        let (Type::Unification(ea), Type::Unification(eb)) = (a, b) else { panic!() };
        assert!(!ea.is_connected(&eb));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse_type("struct{x bool").is_err());
        assert!(parse_type("func(a str").is_err());
        assert!(parse_type("bogus").is_err());
        assert!(parse_type("int extra").is_err());
    }

    #[test]
    fn rejects_leading_zero_unification_index() {
        assert!(parse_type("?01").is_err());
    }
}
