use crossbeam::channel::bounded;
use langcore::error::StreamError;
use langcore::func::{ChangeSuppressor, Ctx, Host, Info, Lifecycle, Node, NodeState};
use langcore::types::FuncType;
use langcore::values::Value;

/// A fact (a [`Node`] whose signature takes no arguments) reading a
/// canned clock that ticks `{1, 1, 1, 2}`: invariant 2 says each output
/// must differ from the immediately preceding one, so only two values
/// (`1` then `2`) should reach `Ctx.output`.
struct ClockFactNode {
    lifecycle: Lifecycle,
    ctx: Option<Ctx>,
    ticks: Vec<i64>,
}

impl ClockFactNode {
    fn new(ticks: Vec<i64>) -> Self {
        ClockFactNode { lifecycle: Lifecycle::default(), ctx: None, ticks }
    }
}

impl Node for ClockFactNode {
    fn info(&self) -> Info {
        Info { pure: false, memo: false, sig: FuncType::new(vec![], Some(langcore::types::Type::Int)) }
    }

    fn validate(&self) -> langcore::error::Result<()> {
        Ok(())
    }

    fn init(&mut self, ctx: Ctx) -> langcore::error::Result<()> {
        self.lifecycle.transition(NodeState::Initialised);
        self.ctx = Some(ctx);
        Ok(())
    }

    fn stream(&mut self) -> Result<(), StreamError> {
        self.lifecycle.transition(NodeState::Running);
        let ctx = self.ctx.as_ref().expect("init must run before stream");
        let mut suppressor = ChangeSuppressor::default();
        for &tick in &self.ticks {
            let v = Value::Int(tick);
            if suppressor.should_emit(&v) {
                ctx.output.send(v).map_err(|e| StreamError::Producer(e.to_string()))?;
            }
        }
        self.lifecycle.transition(NodeState::Closed);
        Ok(())
    }
}

#[test]
fn fact_emits_initial_value_and_suppresses_duplicates() {
    let (_input_tx, input_rx) = bounded::<Vec<Value>>(1);
    let (output_tx, output_rx) = bounded::<Value>(4);
    let (_cancel_tx, cancel_rx) = bounded::<()>(0);

    let mut node = ClockFactNode::new(vec![1, 1, 1, 2]);
    node.validate().unwrap();
    node.init(Ctx { input: input_rx, output: output_tx, cancel: cancel_rx, host: Host::default() })
        .unwrap();
    node.stream().unwrap();

    let emitted: Vec<i64> = output_rx
        .try_iter()
        .map(|v| match v {
            Value::Int(n) => n,
            other => panic!("expected Int, got {other:?}"),
        })
        .collect();
    assert_eq!(emitted, vec![1, 2]);
}
