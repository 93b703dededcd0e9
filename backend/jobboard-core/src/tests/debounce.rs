use crate::debounce::DebouncedSearch;
use crate::error::ApiError;

use std::future::{Ready, ready};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(300);

type Calls = Arc<Mutex<Vec<String>>>;

fn recorded(calls: &Calls) -> Vec<String> {
    calls.lock().unwrap().clone()
}

fn echo_fetch(
    calls: &Calls,
) -> impl Fn(String) -> Ready<Result<Vec<String>, ApiError>> + Send + Sync + 'static {
    let calls = Arc::clone(calls);
    move |query: String| {
        calls.lock().unwrap().push(query.clone());
        ready(Ok(vec![format!("{query}-result")]))
    }
}

#[tokio::test(start_paused = true)]
async fn given_no_input_when_delay_elapses_then_empty_query_is_fetched() {
    let calls = Calls::default();
    let mut search = DebouncedSearch::new(DELAY, echo_fetch(&calls));

    assert!(search.state().loading);
    let state = search.settled().await;

    assert_eq!(recorded(&calls), vec![String::new()]);
    assert_eq!(state.results, vec![String::from("-result")]);
    assert!(!state.loading);
}

/// **VALUE**: A burst of keystrokes costs exactly one request.
///
/// **WHY THIS MATTERS**: Catalog search hits the server on every fetch; typing
/// "rust" must not send "r", "ru", "rus".
///
/// **BUG THIS CATCHES**: A timer that is not restarted by each keystroke.
#[tokio::test(start_paused = true)]
async fn given_keystroke_burst_when_settled_then_one_fetch_with_last_value() {
    let calls = Calls::default();
    let mut search = DebouncedSearch::new(DELAY, echo_fetch(&calls));

    for query in ["r", "ru", "rus", "rust"] {
        search.set_query(query);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let state = search.settled().await;

    assert_eq!(recorded(&calls), vec![String::from("rust")]);
    assert_eq!(state.query, "rust");
    assert_eq!(state.results, vec![String::from("rust-result")]);
}

#[tokio::test(start_paused = true)]
async fn given_pause_longer_than_delay_when_typing_again_then_two_fetches() {
    let calls = Calls::default();
    let mut search = DebouncedSearch::new(DELAY, echo_fetch(&calls));
    search.settled().await;

    search.set_query("ha");
    tokio::time::sleep(DELAY * 2).await;
    search.set_query("ha noi");
    let state = search.settled().await;

    assert_eq!(
        recorded(&calls),
        vec![String::new(), String::from("ha"), String::from("ha noi")]
    );
    assert_eq!(state.results, vec![String::from("ha noi-result")]);
}

#[tokio::test(start_paused = true)]
async fn given_set_query_when_called_then_loading_reported_immediately() {
    let calls = Calls::default();
    let mut search = DebouncedSearch::new(DELAY, echo_fetch(&calls));
    search.settled().await;

    search.set_query("java");

    let state = search.state();
    assert!(state.loading);
    assert_eq!(state.query, "java");
}

/// **VALUE**: Out-of-order responses never overwrite newer results.
///
/// **BUG THIS CATCHES**: A slow response for "s" landing after the response
/// for "sql" and replacing the list with stale matches.
#[tokio::test(start_paused = true)]
async fn given_slow_superseded_fetch_when_newer_completes_then_stale_results_discarded() {
    let calls = Calls::default();
    let recorder = Arc::clone(&calls);
    let mut search = DebouncedSearch::new(DELAY, move |query: String| {
        recorder.lock().unwrap().push(query.clone());
        async move {
            let latency = if query == "s" { 5_000 } else { 10 };
            tokio::time::sleep(Duration::from_millis(latency)).await;
            Ok(vec![format!("{query}-result")])
        }
    });
    search.settled().await;

    search.set_query("s");
    tokio::time::sleep(DELAY + Duration::from_millis(50)).await;
    search.set_query("sql");
    let state = search.settled().await;
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert_eq!(
        recorded(&calls),
        vec![String::new(), String::from("s"), String::from("sql")]
    );
    assert_eq!(state.results, vec![String::from("sql-result")]);
    assert_eq!(search.state().results, vec![String::from("sql-result")]);
}

#[tokio::test(start_paused = true)]
async fn given_failing_fetch_when_settled_then_empty_results_and_not_loading() {
    let mut search = DebouncedSearch::new(DELAY, |query: String| async move {
        if query == "boom" {
            Err(ApiError::network("connection reset", false))
        } else {
            Ok(vec![String::from("kept until failure")])
        }
    });
    assert_eq!(search.settled().await.results.len(), 1);

    search.set_query("boom");
    let state = search.settled().await;

    assert!(state.results.is_empty());
    assert!(!state.loading);
}

#[tokio::test(start_paused = true)]
async fn given_cancelled_search_when_delay_elapses_then_nothing_fetched() {
    let calls = Calls::default();
    let search = DebouncedSearch::new(DELAY, echo_fetch(&calls));

    search.cancel();
    search.set_query("late");
    tokio::time::sleep(DELAY * 3).await;

    assert!(recorded(&calls).is_empty());
    assert!(search.is_cancelled());
}

/// **BUG THIS CATCHES**: A cancelled search left `loading` set, so a
/// spinner bound to it never stopped and `settled` never returned.
#[tokio::test(start_paused = true)]
async fn given_cancelled_search_when_typing_then_not_loading_and_settled_returns() {
    let calls = Calls::default();
    let mut search = DebouncedSearch::new(DELAY, echo_fetch(&calls));

    search.cancel();
    assert!(!search.state().loading);

    search.set_query("rust");
    let state = tokio::time::timeout(Duration::from_secs(10), search.settled())
        .await
        .expect("settled() should return for a cancelled search");

    assert_eq!(state.query, "rust");
    assert!(!state.loading);
    assert!(recorded(&calls).is_empty());
}

/// **VALUE**: Dropping the handle aborts a fetch that is already running.
///
/// **WHY THIS MATTERS**: A closed search box must not keep writing results
/// for a screen that no longer exists.
#[tokio::test(start_paused = true)]
async fn given_in_flight_fetch_when_handle_dropped_then_fetch_aborted() {
    let completed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&completed);
    let search = DebouncedSearch::new(DELAY, move |_query: String| {
        let flag = Arc::clone(&flag);
        async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            flag.store(true, Ordering::SeqCst);
            Ok(Vec::<String>::new())
        }
    });

    tokio::time::sleep(DELAY + Duration::from_millis(10)).await;
    drop(search);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(!completed.load(Ordering::SeqCst));
}
