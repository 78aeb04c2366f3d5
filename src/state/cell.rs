//! Storage seam for controller state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Controllers write through [`StateCell`] so the same state machine drives a
//! reactive `RwSignal` in components and a plain `Rc<RefCell<_>>` in native
//! tests, where no reactive runtime is running.

#[cfg(test)]
#[path = "cell_test.rs"]
mod cell_test;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::{RwSignal, Update, WithUntracked};

pub trait StateCell<S>: Clone + 'static {
    /// Read the current state without subscribing to changes.
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R;

    /// Mutate the state and notify observers.
    fn update(&self, f: impl FnOnce(&mut S));

    fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.with(S::clone)
    }
}

/// Non-reactive shared cell.
#[derive(Debug, Default)]
pub struct LocalCell<S>(Rc<RefCell<S>>);

impl<S> LocalCell<S> {
    pub fn new(state: S) -> Self {
        Self(Rc::new(RefCell::new(state)))
    }
}

impl<S> Clone for LocalCell<S> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<S: 'static> StateCell<S> for LocalCell<S> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.0.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.0.borrow_mut());
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
    fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        WithUntracked::with_untracked(self, f)
    }

    fn update(&self, f: impl FnOnce(&mut S)) {
        Update::update(self, f);
    }
}
