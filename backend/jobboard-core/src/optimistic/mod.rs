//! Optimistic mutation with rollback against a remote collection.
//!
//! [`mutate`] applies a local change to a [`ViewState`] before the remote
//! call runs, then keeps it, replaces it with the server's copy, or restores
//! the previous value when the call fails.
//!
//! # Guarantees
//!
//! - At most one mutation per key is in flight. A second one on a busy key
//!   fails with [`ApiError::Validation`] and leaves the collection untouched.
//! - Rollback touches only the failed key, so a concurrent mutation on a
//!   different key keeps its result.
//! - Once the view is unmounted, reconciliation is skipped and the outcome
//!   is [`MutationOutcome::Stale`].

mod view_state;

pub use view_state::{Keyed, ViewState};

use crate::error::ApiError;

use std::future::Future;

use log::{debug, warn};

/// How a mutation ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    /// The server accepted the change. Holds the canonical copy if the
    /// server returned one (it has already replaced the optimistic value).
    Committed(Option<T>),
    /// The view went away before the call resolved; nothing was written.
    Stale,
}

impl<T> MutationOutcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, MutationOutcome::Committed(_))
    }
}

/// What stood at the key before the optimistic write.
struct Previous<T> {
    value: Option<T>,
    index: Option<usize>,
}

/// Releases the busy key even if the mutation future is dropped mid-flight.
struct BusyGuard<'a, T: Keyed> {
    view: &'a ViewState<T>,
    key: T::Key,
}

impl<T: Keyed> Drop for BusyGuard<'_, T> {
    fn drop(&mut self) {
        self.view.release(&self.key);
    }
}

/// Apply `transform` to the item at `key` now, run `remote`, reconcile.
///
/// `transform` receives the current item (or `None`) and returns the new
/// item (`None` removes it). `remote` is not polled until the optimistic
/// value has been published. On `Ok(Some(canonical))` the canonical copy
/// replaces the optimistic one.
///
/// # Errors
///
/// Returns the remote error after rolling back and setting the view's
/// error banner, or a validation error if `key` is already busy.
pub async fn mutate<T, F, Fut>(
    view: &ViewState<T>,
    key: T::Key,
    transform: F,
    remote: Fut,
) -> Result<MutationOutcome<T>, ApiError>
where
    T: Keyed,
    F: FnOnce(Option<&T>) -> Option<T>,
    Fut: Future<Output = Result<Option<T>, ApiError>>,
{
    if !view.is_mounted() {
        debug!("Mutation on {key:?} skipped: view not mounted");
        return Ok(MutationOutcome::Stale);
    }

    if !view.try_claim(&key) {
        return Err(ApiError::validation(format!(
            "Another change to {key:?} is still in progress"
        )));
    }
    let _guard = BusyGuard {
        view,
        key: key.clone(),
    };

    let previous = apply_local(view, &key, transform);
    view.clear_error();

    let result = remote.await;

    if !view.is_mounted() {
        debug!("Mutation on {key:?} resolved after unmount; ignoring");
        return Ok(MutationOutcome::Stale);
    }

    match result {
        Ok(canonical) => {
            if let Some(ref canonical) = canonical {
                merge_canonical(view, &key, canonical.clone());
            }
            debug!("Mutation on {key:?} committed");
            Ok(MutationOutcome::Committed(canonical))
        }
        Err(e) => {
            rollback(view, &key, previous);
            warn!("Mutation on {key:?} rolled back: {e}");
            view.set_error(e.user_message());
            Err(e)
        }
    }
}

fn position<T: Keyed>(items: &[T], key: &T::Key) -> Option<usize> {
    items.iter().position(|item| item.key() == *key)
}

fn apply_local<T, F>(view: &ViewState<T>, key: &T::Key, transform: F) -> Previous<T>
where
    T: Keyed,
    F: FnOnce(Option<&T>) -> Option<T>,
{
    let mut previous = Previous {
        value: None,
        index: None,
    };

    view.modify(|items| {
        let index = position(items, key);
        let current = index.map(|i| &items[i]);
        let next = transform(current);
        previous = Previous {
            value: current.cloned(),
            index,
        };

        match (index, next) {
            (Some(i), Some(next)) => items[i] = next,
            (Some(i), None) => {
                items.remove(i);
            }
            (None, Some(next)) => items.push(next),
            (None, None) => {}
        }
    });

    previous
}

fn merge_canonical<T: Keyed>(view: &ViewState<T>, key: &T::Key, canonical: T) {
    view.modify(|items| match position(items, key) {
        Some(i) => items[i] = canonical,
        None => items.push(canonical),
    });
}

fn rollback<T: Keyed>(view: &ViewState<T>, key: &T::Key, previous: Previous<T>) {
    view.modify(|items| {
        let current = position(items, key);
        match (previous.value, current) {
            (Some(value), Some(i)) => items[i] = value,
            (Some(value), None) => {
                let index = previous.index.unwrap_or(items.len()).min(items.len());
                items.insert(index, value);
            }
            (None, Some(i)) => {
                items.remove(i);
            }
            (None, None) => {}
        }
    });
}
