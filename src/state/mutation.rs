//! Mutation controller for create/update/delete calls.
//!
//! ERROR HANDLING
//! ==============
//! Unlike fetches, a failed mutation is both recorded in state and returned
//! to the caller, because callers usually need to stop a multi-step flow when
//! a write fails.

#[cfg(test)]
#[path = "mutation_test.rs"]
mod mutation_test;

use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::cell::{LocalCell, StateCell};
use super::fetch::FetchState;
use super::sequence::{CancelHandle, RequestSequence};
use crate::net::error::{ApiError, normalize_error};

type MutationFn<P, T> = Rc<dyn Fn(P) -> LocalBoxFuture<'static, Result<T, ApiError>>>;

pub struct MutationController<P, T, C = LocalCell<FetchState<T>>> {
    state: C,
    mutation: MutationFn<P, T>,
    sequence: RequestSequence,
}

impl<P, T, C: Clone> Clone for MutationController<P, T, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            mutation: Rc::clone(&self.mutation),
            sequence: self.sequence.clone(),
        }
    }
}

impl<P: 'static, T: Clone + 'static> MutationController<P, T> {
    pub fn new<F, Fut>(mutation: F) -> Self
    where
        F: Fn(P) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        Self::with_cell(LocalCell::new(FetchState::default()), mutation)
    }
}

impl<P, T, C> MutationController<P, T, C>
where
    P: 'static,
    T: Clone + 'static,
    C: StateCell<FetchState<T>>,
{
    pub fn with_cell<F, Fut>(state: C, mutation: F) -> Self
    where
        F: Fn(P) -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let mutation: MutationFn<P, T> = Rc::new(move |params| mutation(params).boxed_local());
        Self { state, mutation, sequence: RequestSequence::new() }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// Run the mutation.
    ///
    /// The returned future yields the producer's own result: `Ok(value)` on
    /// success, or the original error after its normalized message has been
    /// recorded. State is only written while this call is the latest one and
    /// the controller has not been reset since it started.
    pub fn mutate(&self, params: P) -> impl Future<Output = Result<T, ApiError>> + 'static + use<P, T, C> {
        let ticket = self.sequence.issue();
        let request = ticket.map(|_| {
            self.state.update(|s| {
                s.loading = true;
                s.error = None;
            });
            (self.mutation)(params)
        });
        let this = self.clone();
        async move {
            let (Some(ticket), Some(request)) = (ticket, request) else {
                return Err(ApiError::Message("mutation cancelled".to_owned()));
            };
            let result = request.await;
            if this.sequence.is_current(ticket) {
                match &result {
                    Ok(value) => this.state.update(|s| {
                        s.data = Some(value.clone());
                        s.error = None;
                        s.loading = false;
                    }),
                    Err(err) => {
                        let message = normalize_error(err);
                        this.state.update(|s| {
                            s.error = Some(message);
                            s.loading = false;
                        });
                    }
                }
            }
            result
        }
    }

    /// Return to the initial state. A mutation still in flight keeps its
    /// result for its caller but no longer writes state.
    pub fn reset(&self) {
        self.sequence.invalidate();
        self.state.update(|s| *s = FetchState::default());
    }

    pub fn dispose(&self) {
        self.sequence.close();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.sequence.cancel_handle()
    }
}
