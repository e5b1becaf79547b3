//! The reactive-function/fact contract (spec §4.4): a streaming dataflow
//! vertex that receives a stream of input tuples and emits a stream of
//! output values.
//!
//! The core deliberately does not assume a particular task runtime (spec
//! §5): [`Node::stream`] is free to run on an OS thread, a pool, or an
//! async task, so long as it keeps the ordering/cancellation guarantees in
//! the module docs below. `crossbeam::channel` (the teacher's own choice
//! in `mm0-rs/src/server.rs` for its request/response plumbing) is the
//! concrete channel type used at the `Init` boundary: bounded or unbounded,
//! `select!`-friendly, and usable from either a thread or a scoped thread
//! without an async runtime dependency.

mod polymorphic;
mod registry;
mod simple;

pub use polymorphic::{template_var_kind, Polymorphic, PolymorphicState, PrintfFunc};
pub use registry::{Factory, Registry, REGISTRY};
pub use simple::{parse_format_string, FormatArg};

use crossbeam::channel::{Receiver, Sender};

use crate::error::{Result, StreamError};
use crate::types::FuncType;
use crate::values::Value;

/// The node lifecycle (spec §4.4 "State machines"). Transitions are
/// linear; `Close` is idempotent. [`Lifecycle::transition`] panics on an
/// out-of-order call — "calls out of order... are programmer errors."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    New,
    Initialised,
    Running,
    Closed,
}

/// Embeddable state-transition guard for [`Node`] implementations. Mirrors
/// the disjoint-set's "attached data" idea: a small piece of bookkeeping a
/// node carries alongside its own fields rather than reimplementing the
/// same linear check everywhere.
#[derive(Debug, Clone, Copy)]
pub struct Lifecycle(NodeState);

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle(NodeState::New)
    }
}

impl Lifecycle {
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.0
    }

    /// # Panics
    /// Panics if `to` does not linearly follow the current state (`Closed`
    /// is the one idempotent exception: `Closed -> Closed` is allowed).
    pub fn transition(&mut self, to: NodeState) {
        use NodeState::{Closed, Initialised, New, Running};
        let ok = matches!(
            (self.0, to),
            (New, Initialised) | (Initialised, Running) | (Running, Closed) | (Closed, Closed)
        );
        assert!(ok, "invalid node lifecycle transition: {:?} -> {:?}", self.0, to);
        self.0 = to;
    }
}

/// Spec §4.4 "Describe signature": `pure` means deterministic and
/// side-effect-free (eligible for off-graph precomputation); `memo` means
/// the engine may cache `(inputs) -> output` across invocations. A
/// `Fact` is the degenerate case where `sig` takes no arguments.
#[derive(Debug, Clone)]
pub struct Info {
    pub pure: bool,
    pub memo: bool,
    pub sig: FuncType,
}

/// Auxiliary services handed to a node at [`Node::init`] time: a world
/// handle placeholder for resource-engine collaborators (out of scope
/// here, spec §1), a debug flag, and a logging target. Kept deliberately
/// thin — the core's obligation ends at handing these through.
#[derive(Debug, Clone, Default)]
pub struct Host {
    pub debug: bool,
    /// `deploy base path` / `embeddedfs://` URI, when the node was built
    /// from an embedded module (spec §4.4 "an optional data blob").
    pub data: Option<String>,
}

/// Runtime context supplied once at [`Node::init`] (spec §4.4 "Init(ctx)").
pub struct Ctx {
    pub input: Receiver<Vec<Value>>,
    pub output: Sender<Value>,
    /// Closed by the engine to signal cancellation; nodes `select!` on
    /// this alongside `input`/timers rather than polling a flag.
    pub cancel: Receiver<()>,
    pub host: Host,
}

/// A reactive-function node (spec §4.4). Implementors embed a
/// [`Lifecycle`] and call [`Lifecycle::transition`] at the start of each
/// method to get the state machine's invariants for free.
pub trait Node {
    fn info(&self) -> Info;

    /// Deterministic positional-index -> argument-name map.
    fn arg_gen(&self, i: usize) -> String {
        i.to_string()
    }

    /// Post-construction consistency check; must be called before
    /// [`Node::init`].
    fn validate(&self) -> Result<()>;

    fn init(&mut self, ctx: Ctx) -> Result<()>;

    /// The run loop. See the module docs for the five invariants this
    /// must uphold (initial-output, change-suppression, single-close,
    /// prompt-cancellation, input-closure-is-not-return).
    fn stream(&mut self) -> std::result::Result<(), StreamError>;

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Helper for upholding invariant 2 ("each subsequent output must differ,
/// by structural `Cmp`, from the immediately preceding one") without every
/// [`Node`] impl re-deriving it by hand.
#[derive(Default)]
pub struct ChangeSuppressor {
    last: Option<Value>,
}

impl ChangeSuppressor {
    /// Returns `true` (caller should emit `v`) the first time it's called,
    /// or whenever `v` differs (by [`crate::values::cmp`]) from the
    /// previously emitted value. Spec §4.4 notes that by construction the
    /// input type has already been unified, so a `Cmp` failure here is
    /// read the same as "different" rather than surfaced as its own case.
    pub fn should_emit(&mut self, v: &Value) -> bool {
        let emit = match &self.last {
            None => true,
            Some(prev) => crate::values::cmp(prev, v)
                .map(|()| false)
                .unwrap_or_else(|_| true),
        };
        if emit {
            self.last = Some(v.deep_copy());
        }
        emit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_allows_the_linear_path() {
        let mut lc = Lifecycle::default();
        lc.transition(NodeState::Initialised);
        lc.transition(NodeState::Running);
        lc.transition(NodeState::Closed);
        lc.transition(NodeState::Closed);
    }

    #[test]
    #[should_panic(expected = "invalid node lifecycle transition")]
    fn lifecycle_rejects_skipping_init() {
        let mut lc = Lifecycle::default();
        lc.transition(NodeState::Running);
    }

    #[test]
    fn change_suppressor_only_emits_on_difference() {
        let mut cs = ChangeSuppressor::default();
        assert!(cs.should_emit(&Value::Int(1)));
        assert!(!cs.should_emit(&Value::Int(1)));
        assert!(cs.should_emit(&Value::Int(2)));
    }
}
