//! Paginated-fetch controller for list endpoints.
//!
//! DESIGN
//! ======
//! The controller keeps the request parameters it last asked for, but the
//! response envelope is authoritative for what is shown: page index, page
//! size and totals are always copied from the envelope, since the backend
//! may clamp them.
//!
//! `update_params` computes the merged parameters once and hands that value
//! straight to the producer, so a fetch never reads parameters that are
//! about to be replaced.

#[cfg(test)]
#[path = "paginated_test.rs"]
mod paginated_test;

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::cell::{LocalCell, StateCell};
use super::fetch::FetchOptions;
use super::sequence::{CancelHandle, RequestSequence, Ticket};
use crate::net::error::{ApiError, normalize_error};
use crate::net::query::{DEFAULT_PAGE_SIZE, ListParams, PAGE_KEY, SIZE_KEY};
use crate::net::types::PageEnvelope;

type PageProducer<T> = Rc<dyn Fn(ListParams) -> LocalBoxFuture<'static, Result<PageEnvelope<T>, ApiError>>>;

/// Observable state of a paginated list.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatedState<T> {
    pub data: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    /// Zero-based index of the page in `data`.
    pub current_page: u32,
    pub page_size: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub params: ListParams,
}

impl<T> Default for PaginatedState<T> {
    fn default() -> Self {
        Self::from_params(ListParams::default())
    }
}

impl<T> PaginatedState<T> {
    /// Empty state seeded from the initial request parameters.
    pub fn from_params(params: ListParams) -> Self {
        Self {
            data: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            current_page: params.page().unwrap_or(0),
            page_size: params.size().unwrap_or(DEFAULT_PAGE_SIZE),
            loading: false,
            error: None,
            params,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page.saturating_add(1) < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 0
    }

    fn apply_page(&mut self, page: PageEnvelope<T>) {
        self.data = page.content;
        self.total_elements = page.total_elements;
        self.total_pages = page.total_pages;
        self.current_page = page.number;
        self.page_size = page.size;
    }
}

pub struct PaginatedController<T, C = LocalCell<PaginatedState<T>>> {
    state: C,
    producer: PageProducer<T>,
    options: FetchOptions<PageEnvelope<T>>,
    sequence: RequestSequence,
    mounted: Rc<Cell<bool>>,
}

impl<T, C: Clone> Clone for PaginatedController<T, C> {
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

impl<T: Clone + 'static> PaginatedController<T> {
    pub fn new<F, Fut>(producer: F, initial_params: ListParams, options: FetchOptions<PageEnvelope<T>>) -> Self
    where
        F: Fn(ListParams) -> Fut + 'static,
        Fut: Future<Output = Result<PageEnvelope<T>, ApiError>> + 'static,
    {
        Self::with_cell(LocalCell::new(PaginatedState::from_params(initial_params)), producer, options)
    }
}

impl<T, C> PaginatedController<T, C>
where
    T: Clone + 'static,
    C: StateCell<PaginatedState<T>>,
{
    /// Controller over an existing cell; the cell's `params` are the
    /// initial parameters.
    pub fn with_cell<F, Fut>(state: C, producer: F, options: FetchOptions<PageEnvelope<T>>) -> Self
    where
        F: Fn(ListParams) -> Fut + 'static,
        Fut: Future<Output = Result<PageEnvelope<T>, ApiError>> + 'static,
    {
        let producer: PageProducer<T> = Rc::new(move |params| producer(params).boxed_local());
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

    /// Fetch again with the stored parameters.
    pub fn refetch(&self) -> impl Future<Output = ()> + 'static + use<T, C> {
        let params = self.state.with(|s| s.params.clone());
        self.fetch_with(params)
    }

    /// Merge `partial` into the stored parameters and fetch with the result.
    pub fn update_params(&self, partial: ListParams) -> impl Future<Output = ()> + 'static + use<T, C> {
        let merged = self.state.with(|s| s.params.merged(&partial));
        // A disposed controller fetches nothing, so it must not record params
        // it never requested.
        if !self.sequence.is_closed() {
            let stored = merged.clone();
            self.state.update(|s| s.params = stored);
        }
        self.fetch_with(merged)
    }

    pub fn go_to_page(&self, page: u32) -> impl Future<Output = ()> + 'static + use<T, C> {
        self.update_params(ListParams::new().with(PAGE_KEY, page))
    }

    /// Change the page size; always returns to the first page.
    pub fn change_page_size(&self, size: u32) -> impl Future<Output = ()> + 'static + use<T, C> {
        self.update_params(ListParams::new().with(SIZE_KEY, size).with(PAGE_KEY, 0))
    }

    fn fetch_with(&self, params: ListParams) -> impl Future<Output = ()> + 'static + use<T, C> {
        let pending = self.sequence.issue().map(|ticket| {
            let clear = self.options.clear_stale_data;
            self.state.update(|s| {
                s.loading = true;
                s.error = None;
                if clear {
                    s.data.clear();
                }
            });
            (ticket, (self.producer)(params))
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

    fn settle(&self, ticket: Ticket, result: Result<PageEnvelope<T>, ApiError>) {
        if !self.sequence.is_current(ticket) {
            leptos::logging::log!("paginated: dropping superseded page response #{}", ticket.number());
            return;
        }
        match result {
            Ok(page) => {
                let notify = self.options.on_success.as_ref().map(|_| page.clone());
                self.state.update(|s| {
                    s.apply_page(page);
                    s.error = None;
                    s.loading = false;
                });
                if let (Some(cb), Some(page)) = (&self.options.on_success, notify) {
                    cb(&page);
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

    pub fn dispose(&self) {
        self.sequence.close();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.sequence.cancel_handle()
    }
}
