//! Debounced search over a remote catalog.
//!
//! Each [`DebouncedSearch::set_query`] restarts a quiet-period timer; only
//! when the timer runs out is the fetch function called, with the latest
//! query. A response for a query that has since been superseded is dropped,
//! even if it arrives after a newer one would have.
//!
//! The empty query is scheduled on creation so the default catalog page
//! loads without any input.

use crate::error::ApiError;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::{mpsc, watch};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, sleep_until};

/// What a search box renders.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState<T> {
    /// Latest query typed, not necessarily fetched yet.
    pub query: String,
    /// Results for the latest query that completed.
    pub results: Vec<T>,
    /// A search for `query` is scheduled or in flight.
    pub loading: bool,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: true,
        }
    }
}

/// Handle to a running debounced search. Dropping it stops all pending work.
pub struct DebouncedSearch<T> {
    query_tx: mpsc::UnboundedSender<String>,
    state: Arc<watch::Sender<SearchState<T>>>,
    state_rx: watch::Receiver<SearchState<T>>,
    task: JoinHandle<()>,
    cancelled: AtomicBool,
}

impl<T> DebouncedSearch<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start the search actor. Must be called inside a tokio runtime.
    pub fn new<F, Fut>(delay: Duration, fetch: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<T>, ApiError>> + Send + 'static,
    {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::default());
        let state = Arc::new(state_tx);

        let task = tokio::spawn(search_actor(
            delay,
            Arc::new(fetch),
            query_rx,
            Arc::clone(&state),
        ));

        Self {
            query_tx,
            state,
            state_rx,
            task,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Record a keystroke. The state reports `loading` from this call on,
    /// unless the search has been cancelled.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let live = !self.is_cancelled();
        self.state.send_modify(|s| {
            s.query = query.clone();
            s.loading = live;
        });
        if !live {
            debug!("Search cancelled, ignoring query '{query}'");
            return;
        }
        if self.query_tx.send(query).is_err() {
            warn!("Search query dropped: search actor has stopped");
            self.state.send_modify(|s| s.loading = false);
        }
    }

    pub fn state(&self) -> SearchState<T> {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState<T>> {
        self.state_rx.clone()
    }

    /// Wait until the latest query has its results. Returns at once when
    /// the search is cancelled.
    pub async fn settled(&mut self) -> SearchState<T> {
        if self.is_cancelled() {
            return self.state();
        }
        if let Ok(state) = self.state_rx.wait_for(|state| !state.loading).await {
            return state.clone();
        }
        self.state()
    }

    /// Stop the timer and any in-flight fetch. Later queries are ignored.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
        self.state.send_modify(|s| s.loading = false);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst) || self.task.is_finished()
    }
}

impl<T> Drop for DebouncedSearch<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

type FetchResult<T> = (u64, Result<Vec<T>, ApiError>);

async fn search_actor<T, F, Fut>(
    delay: Duration,
    fetch: Arc<F>,
    mut query_rx: mpsc::UnboundedReceiver<String>,
    state: Arc<watch::Sender<SearchState<T>>>,
) where
    T: Clone + Send + Sync + 'static,
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + Send + 'static,
{
    // Dropping the set (actor aborted or finished) aborts in-flight fetches.
    let mut in_flight: JoinSet<FetchResult<T>> = JoinSet::new();
    let mut generation: u64 = 0;
    let mut pending: Option<String> = Some(String::new());
    let mut deadline = Instant::now() + delay;

    loop {
        tokio::select! {
            received = query_rx.recv() => {
                let Some(query) = received else {
                    break;
                };
                generation += 1;
                in_flight.abort_all();
                pending = Some(query);
                deadline = Instant::now() + delay;
            }

            _ = sleep_until(deadline), if pending.is_some() => {
                if let Some(query) = pending.take() {
                    debug!("Searching for '{query}' (generation {generation})");
                    let fetch = Arc::clone(&fetch);
                    let id = generation;
                    in_flight.spawn(async move { (id, fetch(query).await) });
                }
            }

            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                let (id, result) = match joined {
                    Ok(finished) => finished,
                    Err(e) if e.is_cancelled() => continue,
                    Err(e) => {
                        warn!("Search task failed: {e}");
                        continue;
                    }
                };

                if id != generation {
                    debug!("Discarding results of superseded search (generation {id})");
                    continue;
                }

                match result {
                    Ok(results) => {
                        debug!("Search generation {id} returned {} results", results.len());
                        state.send_modify(|s| {
                            s.results = results;
                            s.loading = false;
                        });
                    }
                    Err(e) => {
                        warn!("Search failed, showing no results: {e}");
                        state.send_modify(|s| {
                            s.results.clear();
                            s.loading = false;
                        });
                    }
                }
            }
        }
    }

    debug!("Search actor stopped");
}
