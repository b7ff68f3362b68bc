//! One-shot readiness signal gating store access

use crate::error::StoreError;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Observable state of a store's readiness signal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadyState {
    /// Nobody has awaited the load yet
    NotStarted,
    /// The load is in flight
    Loading,
    /// The document is loaded; waits complete immediately
    Ready,
    /// The load failed; waits fail until the store is re-initialised
    Failed,
}

type LoadResult = Result<(), Arc<StoreError>>;

/// A load shared by every waiter
///
/// The load runs once, driven by whichever waiter polls it first, and its
/// outcome (including failure) is replayed to every later waiter.
#[derive(Clone)]
pub(crate) struct Readiness {
    load: Shared<BoxFuture<'static, LoadResult>>,
    started: Arc<AtomicBool>,
}

impl Readiness {
    pub(crate) fn new<F>(load: F) -> Self
    where
        F: Future<Output = Result<(), StoreError>> + Send + 'static,
    {
        let started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&started);

        let load = async move {
            flag.store(true, Ordering::Release);
            load.await.map_err(Arc::new)
        }
        .boxed()
        .shared();

        Self { load, started }
    }

    pub(crate) async fn wait(&self) -> Result<(), StoreError> {
        self.load.clone().await.map_err(StoreError::Load)
    }

    pub(crate) fn state(&self) -> ReadyState {
        match self.load.peek() {
            Some(Ok(())) => ReadyState::Ready,
            Some(Err(_)) => ReadyState::Failed,
            None if self.started.load(Ordering::Acquire) => ReadyState::Loading,
            None => ReadyState::NotStarted,
        }
    }
}

impl fmt::Debug for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Readiness {{ state: {:?} }}", self.state())
    }
}
