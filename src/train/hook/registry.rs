//! Hook registry: ordered dispatch with OR-aggregated control signals

use super::traits::{Event, Hook};
use crate::model::Model;
use crate::train::state::RunState;
use crate::{Error, Result};

/// Ordered collection of hooks bound to one training run.
///
/// Registration order is dispatch order and is significant: an earlier hook
/// can publish state a later hook observes within the same dispatch. Every
/// hook is invoked for every event; the dispatch result is the logical OR
/// of all returns, so one hook cannot suppress another's signal.
pub struct HookRegistry<M: Model> {
    hooks: Vec<Box<dyn Hook<M>>>,
}

impl<M: Model> HookRegistry<M> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Append a hook at the end of the dispatch order
    pub fn push<H: Hook<M> + 'static>(&mut self, hook: H) {
        self.hooks.push(Box::new(hook));
    }

    /// Insert a hook at an explicit dispatch position.
    ///
    /// An index past the end appends.
    pub fn insert<H: Hook<M> + 'static>(&mut self, index: usize, hook: H) {
        let index = index.min(self.hooks.len());
        self.hooks.insert(index, Box::new(hook));
    }

    /// Number of registered hooks
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if no hooks are registered
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Registered hook names, in dispatch order
    pub fn names(&self) -> Vec<&'static str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }

    /// Dispatch one event to every hook in registration order.
    ///
    /// Returns the OR of all control signals. A callback error aborts
    /// dispatch immediately and is wrapped with the hook and event that
    /// failed.
    pub fn fire(&mut self, event: Event, run: &mut RunState<M>) -> Result<bool> {
        let mut signal = false;
        for hook in &mut self.hooks {
            let out = hook.dispatch(event, run).map_err(|e| Error::Hook {
                hook: hook.name().to_string(),
                event,
                message: e.to_string(),
            })?;
            signal = signal || out;
        }
        Ok(signal)
    }
}

impl<M: Model> Default for HookRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::train::testing::StubModel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn run_state() -> RunState<StubModel> {
        RunState::new(RunConfig::new("exp", "/tmp/out"), 1, 0.01)
    }

    /// Records its dispatch position and returns a fixed signal
    struct OrderedHook {
        signal: bool,
        order: Arc<AtomicUsize>,
        seen_at: Arc<AtomicUsize>,
        calls: Arc<AtomicUsize>,
    }

    impl OrderedHook {
        fn new(signal: bool, order: Arc<AtomicUsize>) -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
            let seen_at = Arc::new(AtomicUsize::new(usize::MAX));
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self { signal, order, seen_at: seen_at.clone(), calls: calls.clone() },
                seen_at,
                calls,
            )
        }
    }

    impl Hook<StubModel> for OrderedHook {
        fn name(&self) -> &'static str {
            "OrderedHook"
        }

        fn on_epoch_end(&mut self, _run: &mut RunState<StubModel>) -> crate::Result<bool> {
            self.seen_at
                .store(self.order.fetch_add(1, Ordering::SeqCst), Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.signal)
        }
    }

    struct FailingHook;

    impl Hook<StubModel> for FailingHook {
        fn name(&self) -> &'static str {
            "FailingHook"
        }

        fn on_batch_end(&mut self, _run: &mut RunState<StubModel>) -> crate::Result<bool> {
            Err(crate::Error::Compute("bad metric".to_string()))
        }
    }

    #[test]
    fn test_fire_invokes_every_hook_in_order() {
        let order = Arc::new(AtomicUsize::new(0));
        let (first, first_at, first_calls) = OrderedHook::new(true, order.clone());
        let (second, second_at, second_calls) = OrderedHook::new(false, order.clone());

        let mut registry = HookRegistry::new();
        registry.push(first);
        registry.push(second);

        let mut run = run_state();
        let signal = registry.fire(Event::EpochEnd, &mut run).unwrap();

        // no short-circuit: the true from the first hook must not stop the second
        assert!(signal);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
        assert!(first_at.load(Ordering::SeqCst) < second_at.load(Ordering::SeqCst));
    }

    #[test]
    fn test_fire_result_is_or_of_returns() {
        let order = Arc::new(AtomicUsize::new(0));
        let mut registry = HookRegistry::new();
        let (a, _, _) = OrderedHook::new(false, order.clone());
        let (b, _, _) = OrderedHook::new(false, order.clone());
        registry.push(a);
        registry.push(b);

        let mut run = run_state();
        assert!(!registry.fire(Event::EpochEnd, &mut run).unwrap());

        let (c, _, _) = OrderedHook::new(true, order);
        registry.push(c);
        assert!(registry.fire(Event::EpochEnd, &mut run).unwrap());
    }

    #[test]
    fn test_fire_on_unimplemented_event_returns_false() {
        let order = Arc::new(AtomicUsize::new(0));
        let (a, _, _) = OrderedHook::new(true, order);
        let mut registry = HookRegistry::new();
        registry.push(a);

        let mut run = run_state();
        // OrderedHook only implements epoch_end
        assert!(!registry.fire(Event::BatchBegin, &mut run).unwrap());
    }

    #[test]
    fn test_callback_error_aborts_dispatch_and_names_hook() {
        let order = Arc::new(AtomicUsize::new(0));
        let (after, _, after_calls) = OrderedHook::new(false, order);

        let mut registry = HookRegistry::new();
        registry.push(FailingHook);
        registry.push(after);

        let mut run = run_state();
        let err = registry.fire(Event::BatchEnd, &mut run).unwrap_err();
        match err {
            Error::Hook { hook, event, .. } => {
                assert_eq!(hook, "FailingHook");
                assert_eq!(event, Event::BatchEnd);
            }
            other => panic!("expected hook error, got {other}"),
        }
        // dispatch stopped at the failing hook
        assert_eq!(after_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_insert_at_explicit_index() {
        let order = Arc::new(AtomicUsize::new(0));
        let (a, a_at, _) = OrderedHook::new(false, order.clone());
        let (b, b_at, _) = OrderedHook::new(false, order.clone());
        let (c, c_at, _) = OrderedHook::new(false, order);

        let mut registry = HookRegistry::new();
        registry.push(a);
        registry.push(b);
        registry.insert(1, c);
        assert_eq!(registry.len(), 3);

        let mut run = run_state();
        registry.fire(Event::EpochEnd, &mut run).unwrap();
        assert!(a_at.load(Ordering::SeqCst) < c_at.load(Ordering::SeqCst));
        assert!(c_at.load(Ordering::SeqCst) < b_at.load(Ordering::SeqCst));
    }

    #[test]
    fn test_insert_past_end_appends() {
        let order = Arc::new(AtomicUsize::new(0));
        let (a, _, _) = OrderedHook::new(false, order);
        let mut registry: HookRegistry<StubModel> = HookRegistry::new();
        registry.insert(42, a);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_registry_signals_false() {
        let mut registry: HookRegistry<StubModel> = HookRegistry::default();
        assert!(registry.is_empty());
        let mut run = run_state();
        for event in Event::ALL {
            assert!(!registry.fire(event, &mut run).unwrap());
        }
    }
}
