//! Non-local control flow.
//!
//! `اكسر`, `تابع` and `ارجع` do not unwind through errors: every statement
//! evaluates to a [`Flow`], and a signal travels outward through the
//! `Flow::Signal` channel until a construct that owns it consumes it.
//! Loops consume unlabeled signals and signals carrying their own label;
//! function calls consume returns.

use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    Break,
    Continue,
    Return,
}

impl SignalKind {
    /// Keyword spelling, for diagnostics.
    pub const fn keyword(self) -> &'static str {
        match self {
            SignalKind::Break => "اكسر",
            SignalKind::Continue => "تابع",
            SignalKind::Return => "ارجع",
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoopSignal {
    pub kind: SignalKind,
    pub label: Option<String>,
    pub payload: Value,
}

impl LoopSignal {
    pub fn new(kind: SignalKind, label: Option<String>) -> Self {
        LoopSignal {
            kind,
            label,
            payload: Value::None,
        }
    }

    pub fn ret(payload: Value) -> Self {
        LoopSignal {
            kind: SignalKind::Return,
            label: None,
            payload,
        }
    }

    /// Whether a construct labeled `label` owns this signal. Unlabeled
    /// signals belong to the nearest construct.
    pub fn targets(&self, label: Option<&str>) -> bool {
        match &self.label {
            None => true,
            Some(wanted) => label == Some(wanted.as_str()),
        }
    }
}

/// Outcome of evaluating a statement.
#[derive(Clone, Debug)]
pub enum Flow {
    Normal(Value),
    Signal(LoopSignal),
}

impl Flow {
    #[inline]
    pub fn unit() -> Self {
        Flow::Normal(Value::None)
    }
}

/// What a loop does with the flow of one iteration of its body.
#[derive(Debug)]
pub enum LoopAction {
    /// Run the next iteration.
    Next,
    /// Leave the loop with this value.
    Exit(Value),
    /// Leave the loop and hand the signal to the enclosing construct.
    Propagate(LoopSignal),
}

/// Classify a body's flow for a loop labeled `label`.
pub fn loop_action(flow: Flow, label: Option<&str>) -> LoopAction {
    match flow {
        Flow::Normal(_) => LoopAction::Next,
        Flow::Signal(signal) => match signal.kind {
            SignalKind::Return => LoopAction::Propagate(signal),
            _ if !signal.targets(label) => LoopAction::Propagate(signal),
            SignalKind::Continue => LoopAction::Next,
            SignalKind::Break => LoopAction::Exit(signal.payload),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(kind: SignalKind, label: Option<&str>) -> Flow {
        Flow::Signal(LoopSignal::new(kind, label.map(str::to_owned)))
    }

    #[test]
    fn unlabeled_signals_belong_to_the_nearest_loop() {
        assert!(matches!(
            loop_action(signal(SignalKind::Break, None), Some("الخارجي")),
            LoopAction::Exit(Value::None)
        ));
        assert!(matches!(
            loop_action(signal(SignalKind::Continue, None), None),
            LoopAction::Next
        ));
    }

    #[test]
    fn labeled_signals_pass_foreign_loops() {
        assert!(matches!(
            loop_action(signal(SignalKind::Break, Some("الخارجي")), Some("الداخلي")),
            LoopAction::Propagate(_)
        ));
        assert!(matches!(
            loop_action(signal(SignalKind::Continue, Some("الخارجي")), None),
            LoopAction::Propagate(_)
        ));
        assert!(matches!(
            loop_action(signal(SignalKind::Break, Some("الخارجي")), Some("الخارجي")),
            LoopAction::Exit(_)
        ));
    }

    #[test]
    fn returns_always_propagate() {
        let flow = Flow::Signal(LoopSignal::ret(Value::int(1)));
        match loop_action(flow, None) {
            LoopAction::Propagate(signal) => {
                assert_eq!(signal.kind, SignalKind::Return);
                assert_eq!(signal.payload, Value::int(1));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn normal_flow_continues() {
        assert!(matches!(
            loop_action(Flow::Normal(Value::int(3)), None),
            LoopAction::Next
        ));
        assert!(matches!(Flow::unit(), Flow::Normal(Value::None)));
    }
}
