//! Leptos hooks over the data-fetch controllers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components call these inside their body. Each hook backs its controller
//! with an `RwSignal`, starts the initial fetch, and cancels the controller
//! when the owning component is cleaned up, so a response landing after
//! unmount never writes state.
//!
//! TRADE-OFFS
//! ==========
//! Controllers hold `Rc` producers and are not `Send`, so handles keep them
//! in local `StoredValue` storage. The handles themselves are `Copy` and can
//! be moved into view closures and event handlers freely.
//!
//! Settlement futures are spawned only under `hydrate`. On the server the
//! initial fetch is started (state shows `loading`) but never awaited, which
//! matches what the client renders before its own fetch settles.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::future::Future;

use leptos::prelude::{LocalStorage, RwSignal, StoredValue, WithValue, on_cleanup};

use super::fetch::{FetchController, FetchOptions, FetchState};
use super::mutation::MutationController;
use super::paginated::{PaginatedController, PaginatedState};
use crate::net::error::ApiError;
use crate::net::query::ListParams;
use crate::net::types::PageEnvelope;

fn spawn_settlement(settlement: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(settlement);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        drop(settlement);
    }
}

type FetchCell<T> = RwSignal<FetchState<T>>;

pub struct FetchHandle<T: Send + Sync + 'static> {
    state: FetchCell<T>,
    controller: StoredValue<FetchController<T, FetchCell<T>>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for FetchHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for FetchHandle<T> {}

impl<T: Clone + Send + Sync + 'static> FetchHandle<T> {
    pub fn state(&self) -> RwSignal<FetchState<T>> {
        self.state
    }

    pub fn refetch(&self) {
        if let Some(settlement) = self.controller.try_with_value(FetchController::refetch) {
            spawn_settlement(settlement);
        }
    }
}

/// Fetch once on mount (unless deferred) and expose the state as a signal.
pub fn use_fetch<T, F, Fut>(producer: F, options: FetchOptions<T>) -> FetchHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = RwSignal::new(FetchState::default());
    let controller = FetchController::with_cell(state, producer, options);

    let cancel = controller.cancel_handle();
    on_cleanup(move || cancel.cancel());

    if let Some(initial) = controller.mount() {
        spawn_settlement(initial);
    }
    FetchHandle { state, controller: StoredValue::new_local(controller) }
}

pub struct MutationHandle<P: 'static, T: Send + Sync + 'static> {
    state: FetchCell<T>,
    controller: StoredValue<MutationController<P, T, FetchCell<T>>, LocalStorage>,
}

impl<P: 'static, T: Send + Sync + 'static> Clone for MutationHandle<P, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: 'static, T: Send + Sync + 'static> Copy for MutationHandle<P, T> {}

impl<P: 'static, T: Clone + Send + Sync + 'static> MutationHandle<P, T> {
    pub fn state(&self) -> RwSignal<FetchState<T>> {
        self.state
    }

    /// Fire the mutation; the outcome lands in `state`.
    pub fn mutate(&self, params: P) {
        self.mutate_then(params, |_| {});
    }

    /// Fire the mutation and hand the outcome to `then` once it settles.
    pub fn mutate_then(&self, params: P, then: impl FnOnce(Result<T, ApiError>) + 'static) {
        let Some(pending) = self.controller.try_with_value(|c| c.mutate(params)) else {
            return;
        };
        spawn_settlement(async move { then(pending.await) });
    }

    pub fn reset(&self) {
        let _ = self.controller.try_with_value(MutationController::reset);
    }
}

/// Mutation state as a signal; nothing runs until `mutate` is called.
pub fn use_mutation<P, T, F, Fut>(mutation: F) -> MutationHandle<P, T>
where
    P: 'static,
    T: Clone + Send + Sync + 'static,
    F: Fn(P) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = RwSignal::new(FetchState::default());
    let controller = MutationController::with_cell(state, mutation);

    let cancel = controller.cancel_handle();
    on_cleanup(move || cancel.cancel());

    MutationHandle { state, controller: StoredValue::new_local(controller) }
}

type PageCell<T> = RwSignal<PaginatedState<T>>;

pub struct PaginatedHandle<T: Send + Sync + 'static> {
    state: PageCell<T>,
    controller: StoredValue<PaginatedController<T, PageCell<T>>, LocalStorage>,
}

impl<T: Send + Sync + 'static> Clone for PaginatedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for PaginatedHandle<T> {}

impl<T: Clone + Send + Sync + 'static> PaginatedHandle<T> {
    pub fn state(&self) -> RwSignal<PaginatedState<T>> {
        self.state
    }

    pub fn refetch(&self) {
        if let Some(settlement) = self.controller.try_with_value(PaginatedController::refetch) {
            spawn_settlement(settlement);
        }
    }

    pub fn update_params(&self, partial: ListParams) {
        if let Some(settlement) = self.controller.try_with_value(|c| c.update_params(partial)) {
            spawn_settlement(settlement);
        }
    }

    pub fn go_to_page(&self, page: u32) {
        if let Some(settlement) = self.controller.try_with_value(|c| c.go_to_page(page)) {
            spawn_settlement(settlement);
        }
    }

    pub fn change_page_size(&self, size: u32) {
        if let Some(settlement) = self.controller.try_with_value(|c| c.change_page_size(size)) {
            spawn_settlement(settlement);
        }
    }
}

/// Paginated list state as a signal, seeded from `initial_params`.
pub fn use_paginated<T, F, Fut>(
    producer: F,
    initial_params: ListParams,
    options: FetchOptions<PageEnvelope<T>>,
) -> PaginatedHandle<T>
where
    T: Clone + Send + Sync + 'static,
    F: Fn(ListParams) -> Fut + 'static,
    Fut: Future<Output = Result<PageEnvelope<T>, ApiError>> + 'static,
{
    let state = RwSignal::new(PaginatedState::from_params(initial_params));
    let controller = PaginatedController::with_cell(state, producer, options);

    let cancel = controller.cancel_handle();
    on_cleanup(move || cancel.cancel());

    if let Some(initial) = controller.mount() {
        spawn_settlement(initial);
    }
    PaginatedHandle { state, controller: StoredValue::new_local(controller) }
}
