//! Scripted producers for controller tests.
//!
//! Each producer call records its argument and parks on a oneshot channel
//! until the test settles that call, so tests decide exactly which request
//! finishes when.

use std::cell::RefCell;
use std::rc::Rc;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::net::error::ApiError;

type Call<P, T> = (P, Option<oneshot::Sender<Result<T, ApiError>>>);

pub(crate) struct Gate<P, T> {
    calls: Rc<RefCell<Vec<Call<P, T>>>>,
}

impl<P, T> Clone for Gate<P, T> {
    fn clone(&self) -> Self {
        Self { calls: Rc::clone(&self.calls) }
    }
}

impl<P: Clone + 'static, T: 'static> Gate<P, T> {
    pub(crate) fn new() -> Self {
        Self { calls: Rc::new(RefCell::new(Vec::new())) }
    }

    /// Producer taking one argument; every call parks until settled.
    pub(crate) fn producer(&self) -> impl Fn(P) -> LocalBoxFuture<'static, Result<T, ApiError>> + 'static + use<P, T> {
        let calls = Rc::clone(&self.calls);
        move |params: P| {
            let (tx, rx) = oneshot::channel();
            calls.borrow_mut().push((params, Some(tx)));
            async move { rx.await.unwrap_or(Err(ApiError::Unknown)) }.boxed_local()
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub(crate) fn params(&self, index: usize) -> P {
        self.calls.borrow()[index].0.clone()
    }

    pub(crate) fn settle(&self, index: usize, result: Result<T, ApiError>) {
        let sender = self.calls.borrow_mut()[index].1.take().expect("call already settled");
        let _ = sender.send(result);
    }
}

impl<T: 'static> Gate<(), T> {
    /// Zero-argument producer for the single-fetch controller.
    pub(crate) fn nullary(&self) -> impl Fn() -> LocalBoxFuture<'static, Result<T, ApiError>> + 'static + use<T> {
        let producer = self.producer();
        move || producer(())
    }
}
