//! Async query cache — status-tracked memoization of one remote call.
//!
//! DESIGN
//! ======
//! One instance wraps one async fetch function and remembers the last value
//! and last error independently. Concurrent calls are neither coalesced nor
//! ordered: each `call` invokes the fetch again, and whichever settlement
//! lands last overwrites the cache, regardless of issue order. Consumers
//! must not assume first-issued-first-settled.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures are captured in the cache (status + error detail) and
//! logged at `warn`; they are never returned as `Err`. A failed query is
//! only retried by an explicit new `call`.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use futures::future::BoxFuture;
use tracing::warn;

use crate::net::api::ApiError;

/// Fetch lifecycle status for one query instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never called.
    #[default]
    Idle,
    /// A fetch is in flight (possibly more than one).
    Pending,
    /// The last settlement was a value.
    Success,
    /// The last settlement was an error.
    Error,
}

type FetchFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O, ApiError>> + Send + Sync>;

struct QueryInner<O> {
    status: QueryStatus,
    value: Option<O>,
    error: Option<ApiError>,
}

impl<O> Default for QueryInner<O> {
    fn default() -> Self {
        Self { status: QueryStatus::Idle, value: None, error: None }
    }
}

/// Generic async query cache. Clones share the fetch function and state.
pub struct Query<I, O> {
    fetch: FetchFn<I, O>,
    inner: Arc<Mutex<QueryInner<O>>>,
}

impl<I, O> Clone for Query<I, O> {
    fn clone(&self) -> Self {
        Self { fetch: self.fetch.clone(), inner: self.inner.clone() }
    }
}

impl<I, O: Clone> Query<I, O> {
    /// Wrap an async fetch function.
    pub fn new<F, Fut>(fetch: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, ApiError>> + Send + 'static,
    {
        Self {
            fetch: Arc::new(move |input| fetch(input).boxed()),
            inner: Arc::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueryInner<O>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Invoke the fetch. Status flips to `Pending` before the fetch starts
    /// and to `Success`/`Error` when this particular call settles,
    /// overwriting whatever settled before it.
    ///
    /// Returns a clone of the value this settlement produced, or `None` on
    /// error (the error itself lands in [`Query::error`]).
    pub async fn call(&self, input: I) -> Option<O> {
        self.lock().status = QueryStatus::Pending;
        let result = (self.fetch)(input).await;
        let mut inner = self.lock();
        match result {
            Ok(value) => {
                inner.status = QueryStatus::Success;
                inner.value = Some(value.clone());
                Some(value)
            }
            Err(error) => {
                warn!(%error, "query fetch failed");
                inner.status = QueryStatus::Error;
                inner.error = Some(error);
                None
            }
        }
    }

    /// Return the cached value without re-invoking the fetch when the last
    /// settlement was a success; otherwise behave like [`Query::call`] with
    /// the default input.
    pub async fn get_or_call(&self) -> Option<O>
    where
        I: Default,
    {
        {
            let inner = self.lock();
            if inner.status == QueryStatus::Success {
                return inner.value.clone();
            }
        }
        self.call(I::default()).await
    }

    /// Current fetch lifecycle status.
    #[must_use]
    pub fn status(&self) -> QueryStatus {
        self.lock().status
    }

    /// Last successful value, if any. Survives later error settlements.
    #[must_use]
    pub fn value(&self) -> Option<O> {
        self.lock().value.clone()
    }

    /// Last error, if any.
    #[must_use]
    pub fn error(&self) -> Option<ApiError> {
        self.lock().error.clone()
    }
}
