//! Structural type/value algebra, unification-variable substrate, and
//! reactive-function core for a declarative configuration language.
//!
//! This crate covers the subsystem a language runtime needs to describe,
//! compare, and stream values: [`types`] (the structural type algebra and
//! its textual form), [`values`] (the mirrored value algebra and
//! host-runtime interop), [`func`] (the reactive-function/fact contract
//! and its process-wide registry), and [`fs`] (the embedded read-only
//! module filesystem). The lexer/parser for language source, the full
//! type-unification solver, resource engines, and the template engine
//! that wraps user-supplied functions are treated as external
//! collaborators and are out of scope.

pub mod error;
pub mod fs;
pub mod func;
pub mod kind;
pub mod types;
pub mod util;
pub mod values;

pub use error::{Error, Result};
pub use kind::Kind;
