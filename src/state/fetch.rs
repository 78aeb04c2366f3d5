//! Single-fetch controller: one producer, one observable [`FetchState`].
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and dashboard widgets bind a producer (usually a call into
//! `net::resources`) and render off `loading`/`error`/`data`. Errors are
//! absorbed into state so rendering code branches on `error` instead of
//! handling failures itself.
//!
//! ERROR HANDLING
//! ==============
//! A failed producer leaves `error` holding the normalized message. Nothing
//! is thrown past the controller; retry is a fresh `refetch()`.

#[cfg(test)]
#[path = "fetch_test.rs"]
mod fetch_test;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::cell::{LocalCell, StateCell};
use super::sequence::{CancelHandle, RequestSequence, Ticket};
use crate::net::error::{ApiError, normalize_error};

pub(crate) type Producer<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<T, ApiError>>>;

/// Observable state of a single producer.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self { data: None, loading: false, error: None }
    }
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        !self.loading && self.data.is_none() && self.error.is_none()
    }
}

/// Invocation options shared by the fetch and paginated controllers.
pub struct FetchOptions<T> {
    /// Fetch once automatically when the consumer mounts.
    pub immediate: bool,
    /// Drop the previous payload when a new fetch starts.
    pub clear_stale_data: bool,
    pub on_success: Option<Rc<dyn Fn(&T)>>,
    pub on_error: Option<Rc<dyn Fn(&ApiError)>>,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self { immediate: true, clear_stale_data: false, on_success: None, on_error: None }
    }
}

impl<T> Clone for FetchOptions<T> {
    fn clone(&self) -> Self {
        Self {
            immediate: self.immediate,
            clear_stale_data: self.clear_stale_data,
            on_success: self.on_success.clone(),
            on_error: self.on_error.clone(),
        }
    }
}

impl<T> FetchOptions<T> {
    /// Options that wait for an explicit `refetch()`.
    pub fn deferred() -> Self {
        Self { immediate: false, ..Self::default() }
    }

    #[must_use]
    pub fn clear_stale_data(mut self, clear: bool) -> Self {
        self.clear_stale_data = clear;
        self
    }

    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&T) + 'static) -> Self {
        self.on_success = Some(Rc::new(f));
        self
    }

    #[must_use]
    pub fn on_error(mut self, f: impl Fn(&ApiError) + 'static) -> Self {
        self.on_error = Some(Rc::new(f));
        self
    }
}

pub struct FetchController<T, C = LocalCell<FetchState<T>>> {
    state: C,
    producer: Producer<T>,
    options: FetchOptions<T>,
    sequence: RequestSequence,
    mounted: Rc<Cell<bool>>,
}

impl<T, C: Clone> Clone for FetchController<T, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            producer: Rc::clone(&self.producer),
            options: self.options.clone(),
            sequence: self.sequence.clone(),
            mounted: Rc::clone(&self.mounted),
        }
    }
}

impl<T: Clone + 'static> FetchController<T> {
    /// Controller over a fresh, non-reactive state cell.
    pub fn new<F, Fut>(producer: F, options: FetchOptions<T>) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        Self::with_cell(LocalCell::new(FetchState::default()), producer, options)
    }
}

impl<T, C> FetchController<T, C>
where
    T: Clone + 'static,
    C: StateCell<FetchState<T>>,
{
    pub fn with_cell<F, Fut>(state: C, producer: F, options: FetchOptions<T>) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let producer: Producer<T> = Rc::new(move || producer().boxed_local());
        Self {
            state,
            producer,
            options,
            sequence: RequestSequence::new(),
            mounted: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    /// The initial fetch, returned exactly once and only when `immediate`.
    pub fn mount(&self) -> Option<impl Future<Output = ()> + 'static + use<T, C>> {
        if self.mounted.replace(true) || !self.options.immediate {
            return None;
        }
        Some(self.refetch())
    }

    /// Start a fetch.
    ///
    /// `loading` flips and the producer is invoked before this returns; the
    /// returned future applies the outcome. Overlapping calls each issue a
    /// request, and only the most recently started one may settle state.
    pub fn refetch(&self) -> impl Future<Output = ()> + 'static + use<T, C> {
        let pending = self.sequence.issue().map(|ticket| {
            let clear = self.options.clear_stale_data;
            self.state.update(|s| {
                s.loading = true;
                s.error = None;
                if clear {
                    s.data = None;
                }
            });
            (ticket, (self.producer)())
        });
        let this = self.clone();
        async move {
            let Some((ticket, request)) = pending else {
                return;
            };
            let result = request.await;
            this.settle(ticket, result);
        }
    }

    fn settle(&self, ticket: Ticket, result: Result<T, ApiError>) {
        if !self.sequence.is_current(ticket) {
            leptos::logging::log!("fetch: dropping superseded response #{}", ticket.number());
            return;
        }
        match result {
            Ok(value) => {
                let notify = self.options.on_success.as_ref().map(|_| value.clone());
                self.state.update(|s| {
                    s.data = Some(value);
                    s.error = None;
                    s.loading = false;
                });
                if let (Some(cb), Some(value)) = (&self.options.on_success, notify) {
                    cb(&value);
                }
            }
            Err(err) => {
                let message = normalize_error(&err);
                self.state.update(|s| {
                    s.error = Some(message);
                    s.loading = false;
                });
                if let Some(cb) = &self.options.on_error {
                    cb(&err);
                }
            }
        }
    }

    /// Tear down: outstanding responses are discarded and later calls are
    /// no-ops.
    pub fn dispose(&self) {
        self.sequence.close();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.sequence.cancel_handle()
    }
}
