use crate::error::ApiError;
use crate::optimistic::{MutationOutcome, ViewState, mutate};

use models::JobPosting;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::oneshot;

fn jobs(ids: &[u64]) -> Vec<JobPosting> {
    ids.iter().map(|id| JobPosting::new(*id, format!("Job {id}"))).collect()
}

fn ids(view: &ViewState<JobPosting>) -> Vec<u64> {
    view.snapshot().iter().map(|j| j.id).collect()
}

fn renamed(job: Option<&JobPosting>, title: &str) -> Option<JobPosting> {
    job.map(|j| JobPosting {
        title: title.to_string(),
        ..j.clone()
    })
}

#[tokio::test]
async fn given_successful_remote_when_deleting_then_item_stays_removed() {
    let view = ViewState::new(jobs(&[1, 2, 3]));

    let outcome = mutate(&*view, 2, |_| None, async { Ok(None) }).await.unwrap();

    assert_eq!(outcome, MutationOutcome::Committed(None));
    assert_eq!(ids(&view), vec![1, 3]);
    assert_eq!(view.error(), None);
    assert!(!view.is_busy(&2));
}

/// **VALUE**: The collection is updated before the network call resolves.
///
/// **WHY THIS MATTERS**: That is the whole point of an optimistic update; the
/// row must disappear on click, not after the round-trip.
///
/// **BUG THIS CATCHES**: Applying the transform after awaiting the remote call.
#[tokio::test]
async fn given_pending_remote_when_observing_then_optimistic_value_already_visible() {
    let view = ViewState::new(jobs(&[1, 2, 3]));
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let mutation = mutate(&*view, 2, |_| None, async {
        let _ = release_rx.await;
        Ok(None)
    });
    let observer = async {
        tokio::task::yield_now().await;
        let during = ids(&view);
        let busy = view.is_busy(&2);
        let _ = release_tx.send(());
        (during, busy)
    };

    let (result, (during, busy)) = tokio::join!(mutation, observer);

    assert!(result.is_ok());
    assert_eq!(during, vec![1, 3]);
    assert!(busy, "Key is busy while the call is in flight");
}

#[tokio::test]
async fn given_failing_remote_when_deleting_then_item_restored_at_original_index() {
    let view = ViewState::new(jobs(&[1, 2, 3]));

    let result = mutate(&*view, 2, |_| None, async {
        Err(ApiError::rejected(500u16, "Job could not be deleted"))
    })
    .await;

    assert!(result.is_err());
    assert_eq!(ids(&view), vec![1, 2, 3]);
    assert_eq!(view.error().as_deref(), Some("Job could not be deleted"));
}

#[tokio::test]
async fn given_failing_remote_when_inserting_then_insert_removed() {
    let view = ViewState::new(jobs(&[1]));

    let result = mutate(
        &*view,
        8,
        |_| Some(JobPosting::new(8, "New")),
        async { Err(ApiError::network("offline", false)) },
    )
    .await;

    assert!(result.is_err());
    assert_eq!(ids(&view), vec![1]);
    assert_eq!(
        view.error().as_deref(),
        Some("Network error - please check your connection and retry.")
    );
}

#[tokio::test]
async fn given_canonical_copy_when_committing_then_it_replaces_optimistic_value() {
    let view = ViewState::new(jobs(&[1, 2]));
    let canonical = JobPosting {
        status: Some(String::from("open")),
        ..JobPosting::new(2, "Server title")
    };
    let returned = canonical.clone();

    let outcome = mutate(&*view, 2, |j| renamed(j, "Local title"), async move {
        Ok(Some(returned))
    })
    .await
    .unwrap();

    assert!(outcome.is_committed());
    assert_eq!(view.get(&2), Some(canonical));
}

/// **VALUE**: One in-flight mutation per key.
///
/// **BUG THIS CATCHES**: A double click sending two deletes, or a second
/// mutation capturing the first one's optimistic value as its "previous"
/// and restoring the wrong thing on rollback.
#[tokio::test]
async fn given_busy_key_when_mutating_again_then_validation_error_and_no_change() {
    let view = ViewState::new(jobs(&[1, 2]));
    let (release_tx, release_rx) = oneshot::channel::<()>();

    let first = mutate(&*view, 1, |j| renamed(j, "First"), async {
        let _ = release_rx.await;
        Ok(None)
    });
    let second = async {
        tokio::task::yield_now().await;
        let result = mutate(&*view, 1, |_| None, async { Ok(None) }).await;
        let _ = release_tx.send(());
        result
    };

    let (first, second) = tokio::join!(first, second);

    assert!(first.is_ok());
    assert!(matches!(second, Err(ApiError::Validation { .. })));
    assert_eq!(ids(&view), vec![1, 2]);
    assert_eq!(view.get(&1).map(|j| j.title), Some(String::from("First")));
}

#[tokio::test]
async fn given_concurrent_keys_when_one_fails_then_other_keeps_its_result() {
    let view = ViewState::new(jobs(&[1, 2, 3]));
    let (fail_tx, fail_rx) = oneshot::channel::<()>();

    let failing = mutate(&*view, 1, |j| renamed(j, "Renamed"), async {
        let _ = fail_rx.await;
        Err(ApiError::rejected(409u16, "conflict"))
    });
    let succeeding = async {
        let result = mutate(&*view, 3, |_| None, async { Ok(None) }).await;
        let _ = fail_tx.send(());
        result
    };

    let (failed, succeeded) = tokio::join!(failing, succeeding);

    assert!(failed.is_err());
    assert!(succeeded.is_ok());
    assert_eq!(ids(&view), vec![1, 2], "Job 3 stays deleted");
    assert_eq!(view.get(&1).map(|j| j.title), Some(String::from("Job 1")));
}

#[tokio::test]
async fn given_unmounted_view_when_remote_fails_then_stale_and_nothing_written() {
    let view = ViewState::new(jobs(&[1, 2]));

    let outcome = mutate(&*view, 2, |_| None, async {
        view.unmount();
        Err(ApiError::network("offline", false))
    })
    .await
    .unwrap();

    assert_eq!(outcome, MutationOutcome::Stale);
    assert_eq!(ids(&view), vec![1], "No rollback into an unmounted view");
    assert_eq!(view.error(), None);
}

#[tokio::test]
async fn given_unmounted_view_when_mutating_then_remote_never_runs() {
    let view = ViewState::new(jobs(&[1]));
    view.unmount();
    let mut called = false;

    let outcome = mutate(&*view, 1, |_| None, async {
        called = true;
        Ok(None)
    })
    .await
    .unwrap();

    assert_eq!(outcome, MutationOutcome::Stale);
    assert!(!called);
    assert_eq!(ids(&view), vec![1]);
}

/// **VALUE**: Rollback invariant over random collections and operations.
///
/// **WHY THIS MATTERS**: Delete, replace and insert each restore differently
/// (re-insert at index, swap back, remove); all three must leave the list
/// structurally equal to the pre-call snapshot.
///
/// **BUG THIS CATCHES**: Re-inserting a deleted item at the end instead of its
/// original position, or leaving a failed insert behind.
#[tokio::test]
async fn given_random_failed_mutations_when_rolled_back_then_snapshot_restored() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..300 {
        let len = rng.gen_range(0..12u64);
        let view = ViewState::new(jobs(&(0..len).collect::<Vec<_>>()));
        let before = view.snapshot();

        let key = rng.gen_range(0..len + 3);
        let op = rng.gen_range(0..3);

        let result = mutate(
            &*view,
            key,
            move |current| match op {
                0 => None,
                1 => renamed(current, "changed"),
                _ => Some(JobPosting::new(key, "inserted")),
            },
            async { Err(ApiError::rejected(500u16, "nope")) },
        )
        .await;

        assert!(result.is_err());
        assert_eq!(view.snapshot(), before, "key {key}, op {op}");
        assert!(!view.is_busy(&key));
    }
}
