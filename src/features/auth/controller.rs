//! Plumbing shared by the flow controllers. A controller keeps its local UI
//! state in a [`FlowCell`] and reports every change to the view through a
//! callback. Async continuations only hold a `Weak` handle to their controller,
//! so a page torn down mid-request makes them no-ops.

use std::cell::RefCell;

/// Imperative navigation to a router path.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F: Fn(&str)> Navigator for F {
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Local state of one controller plus its change listener.
pub(crate) struct FlowCell<S> {
    state: RefCell<S>,
    on_change: Box<dyn Fn(&S)>,
}

impl<S: Clone + PartialEq> FlowCell<S> {
    pub(crate) fn new(state: S, on_change: impl Fn(&S) + 'static) -> Self {
        Self {
            state: RefCell::new(state),
            on_change: Box::new(on_change),
        }
    }

    pub(crate) fn get(&self) -> S {
        self.state.borrow().clone()
    }

    /// Applies `change` and notifies the listener when the state differs.
    /// The listener runs after the borrow is released, so it may read back.
    pub(crate) fn update<R>(&self, change: impl FnOnce(&mut S) -> R) -> R {
        let (result, changed) = {
            let mut state = self.state.borrow_mut();
            let before = state.clone();
            let result = change(&mut state);
            let changed = (*state != before).then(|| state.clone());
            (result, changed)
        };

        if let Some(snapshot) = changed {
            (self.on_change)(&snapshot);
        }
        result
    }
}
