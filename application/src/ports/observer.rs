//! Workflow observation port
//!
//! Observers receive every [`WorkflowEvent`] of a run plus attempt
//! boundaries from the session runner. They are side channels only:
//! nothing an observer does can change control flow.

use crew_domain::WorkflowEvent;
use std::sync::Arc;

/// Callback for workflow events
///
/// Implementations live in the infrastructure layer (tracing / JSONL
/// transcript) and the presentation layer (console).
pub trait WorkflowObserver: Send + Sync {
    /// Called for every agent switch, output, tool invocation and result
    fn on_event(&self, event: &WorkflowEvent);

    /// Called when an attempt starts (1-based)
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    /// Called when an attempt ends; `failure` is `None` on success
    fn on_attempt_end(&self, _attempt: u32, _failure: Option<&str>) {}
}

/// No-op observer for when events are not needed
pub struct NoObserver;

impl WorkflowObserver for NoObserver {
    fn on_event(&self, _event: &WorkflowEvent) {}
}

/// An observer that delegates to multiple inner observers, in order.
///
/// ```text
/// Orchestrator ──▶ CompositeObserver ──┬─▶ TracingEventLogger (log file)
///                                      ├─▶ JsonlEventLogger   (events.jsonl)
///                                      └─▶ ConsoleReporter    (terminal)
/// ```
#[derive(Default)]
pub struct CompositeObserver {
    delegates: Vec<Arc<dyn WorkflowObserver>>,
}

impl CompositeObserver {
    pub fn new(delegates: Vec<Arc<dyn WorkflowObserver>>) -> Self {
        Self { delegates }
    }

    pub fn with(mut self, observer: Arc<dyn WorkflowObserver>) -> Self {
        self.delegates.push(observer);
        self
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

/// Delegate a method call to all inner observers.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl WorkflowObserver for CompositeObserver {
    fn on_event(&self, event: &WorkflowEvent) {
        delegate!(self, on_event, event);
    }

    fn on_attempt_start(&self, attempt: u32, max_attempts: u32) {
        delegate!(self, on_attempt_start, attempt, max_attempts);
    }

    fn on_attempt_end(&self, attempt: u32, failure: Option<&str>) {
        delegate!(self, on_attempt_end, attempt, failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl WorkflowObserver for Recorder {
        fn on_event(&self, event: &WorkflowEvent) {
            self.seen.lock().unwrap().push(event.kind().to_string());
        }

        fn on_attempt_end(&self, attempt: u32, failure: Option<&str>) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("end:{}:{}", attempt, failure.unwrap_or("ok")));
        }
    }

    #[test]
    fn test_composite_fans_out_in_order() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let composite = CompositeObserver::new(vec![a.clone(), b.clone()]);

        composite.on_event(&WorkflowEvent::AgentSwitched {
            agent: "ExplorerAgent".into(),
            from: None,
            reason: None,
        });
        composite.on_attempt_end(1, None);

        for recorder in [&a, &b] {
            assert_eq!(
                *recorder.seen.lock().unwrap(),
                vec!["agent_switched".to_string(), "end:1:ok".to_string()]
            );
        }
    }

    #[test]
    fn test_empty_composite() {
        let composite = CompositeObserver::default();
        assert!(composite.is_empty());
        composite.on_attempt_start(1, 3);
    }
}
