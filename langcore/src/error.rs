//! Error vocabulary shared across the type/value/function boundary.
//!
//! Programmer errors (malformed type literals built by hand, violated
//! invariants, out-of-order node lifecycle calls) are `panic!`s, not
//! `Result`s, matching the teacher's treatment of its own keyword tables
//! and state machines — they are never meant to reach a user. Everything
//! in this module is a *recoverable* error: parse failures, unification
//! mismatches, host-coercion problems, and reactive-node build/runtime
//! failures.

use std::fmt;

/// A source location for parse errors, `row`/`col` both 1-based, matching
/// the wire-level contract in the external-interfaces section of the
/// core's specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub row: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Failures from lexing/parsing the compact textual form of a [`crate::types::Type`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("{pos}: unrecognized input near {near:?}")]
    LexerUnrecognized { pos: Pos, near: String },
    #[error("{pos}: bad string escape")]
    LexerStringBadEscaping { pos: Pos },
    #[error("{pos}: integer literal overflow")]
    LexerIntegerOverflow { pos: Pos },
    #[error("{pos}: float literal overflow")]
    LexerFloatOverflow { pos: Pos },
    #[error("{pos}: {message}")]
    ParseError { pos: Pos, message: String },
}

impl ParseError {
    #[must_use]
    pub fn pos(&self) -> Pos {
        match self {
            ParseError::LexerUnrecognized { pos, .. }
            | ParseError::LexerStringBadEscaping { pos }
            | ParseError::LexerIntegerOverflow { pos }
            | ParseError::LexerFloatOverflow { pos }
            | ParseError::ParseError { pos, .. } => *pos,
        }
    }
}

/// `Cmp` found two types unequal, or the comparison was ill-formed (e.g.
/// comparing across incompatible unification-variable patterns).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("type mismatch: {0}")]
pub struct CmpError(pub String);

/// `ComplexCmp` could not even establish compatibility (as opposed to
/// returning a non-error status of `"variant"`/`"partial"`/`"both"`, which
/// are *successful* outcomes).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("incompatible: {0}")]
pub struct ComplexCmpError(pub String);

/// Host-runtime reflection/coercion failures (`ValueOfGolang`/`Into` in the
/// source vocabulary).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoerceError {
    #[error("nil value")]
    NilValue,
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: String, found: String },
    #[error("integer overflow converting {value} to {target}")]
    IntegerOverflow { value: i64, target: String },
    #[error("map keys must be strings, found {found}")]
    NonStringMapKey { found: String },
    #[error("missing field {field:?} in struct of type {type_name}")]
    MissingField { type_name: String, field: String },
}

/// Failure to finalise a polymorphic reactive-function node's signature
/// (bad format string, bad template argument type).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("{pos}: unsupported format verb %{verb:?}")]
    BadFormatVerb { pos: Pos, verb: char },
    #[error("dangling %% escape at end of format string")]
    DanglingFormatEscape,
    #[error("template variable type {0} is not a valid template argument type")]
    UnsupportedTemplateVarType(String),
}

/// A reactive node's `Stream` returned an error; the engine that owns the
/// dataflow graph is expected to treat the whole graph as tainted.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("{0}")]
    Coerce(#[from] CoerceError),
    #[error("producer failed: {0}")]
    Producer(String),
    #[error("node used out of lifecycle order: {0}")]
    LifecycleViolation(&'static str),
}

/// The crate's top-level error type, gathering every recoverable failure
/// kind named in the core's external-interfaces and error-handling
/// sections.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Cmp(#[from] CmpError),
    #[error(transparent)]
    ComplexCmp(#[from] ComplexCmpError),
    #[error(transparent)]
    Coerce(#[from] CoerceError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
