use crate::filter::{FilterSet, StatusTab, compose, compose_cloned};

use models::{Company, JobPosting, SkillAssignment};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

fn job(id: u64, title: &str, location: &str, status: Option<&str>) -> JobPosting {
    JobPosting {
        location: location.to_string(),
        status: status.map(str::to_string),
        ..JobPosting::new(id, title)
    }
}

fn board() -> Vec<JobPosting> {
    vec![
        job(1, "Rust Engineer", "Ha Noi", Some("open")),
        job(2, "Frontend Developer", "Ho Chi Minh City", Some("closed")),
        job(3, "Data Engineer", "Da Nang", Some("draft")),
        JobPosting {
            is_open: Some(false),
            ..job(4, "QA Tester", "ha noi", None)
        },
        JobPosting {
            state: Some(String::from("Draft")),
            ..job(5, "DevOps", "Remote", None)
        },
    ]
}

fn ids(jobs: &[&JobPosting]) -> Vec<u64> {
    jobs.iter().map(|j| j.id).collect()
}

#[test]
fn given_empty_filter_when_composing_then_everything_in_order() {
    let jobs = board();

    let visible = compose(&jobs, &FilterSet::default());

    assert_eq!(ids(&visible), vec![1, 2, 3, 4, 5]);
    assert!(FilterSet::default().is_empty());
}

#[test]
fn given_query_when_composing_then_case_insensitive_substring_match() {
    let jobs = board();

    let visible = compose(&jobs, &FilterSet::default().with_query("  ENGINEER "));

    assert_eq!(ids(&visible), vec![1, 3]);
}

#[test]
fn given_location_when_composing_then_case_insensitive_match() {
    let jobs = board();

    let visible = compose(&jobs, &FilterSet::default().with_location("HA NOI"));

    assert_eq!(ids(&visible), vec![1, 4]);
}

/// **VALUE**: Tabs use the normalized status, not the raw field.
///
/// **WHY THIS MATTERS**: Older postings only carry `state` or `is_open`; a raw
/// `status == "closed"` comparison would hide them from every tab but "All".
///
/// **BUG THIS CATCHES**: Job 4 (`is_open: false`) missing from "Closed", or
/// job 5 (`state: "Draft"`) missing from "Draft".
#[test]
fn given_status_tabs_when_composing_then_normalized_status_used() {
    let jobs = board();
    let tab = |tab| ids(&compose(&jobs, &FilterSet::default().with_tab(tab)));

    assert_eq!(tab(StatusTab::Open), vec![1]);
    assert_eq!(tab(StatusTab::Closed), vec![2, 4]);
    assert_eq!(tab(StatusTab::Draft), vec![3, 5]);
    assert_eq!(tab(StatusTab::All), vec![1, 2, 3, 4, 5]);
}

#[test]
fn given_combined_predicates_when_composing_then_all_must_hold() {
    let jobs = board();
    let filter = FilterSet::default()
        .with_query("e")
        .with_location("ha noi")
        .with_tab(StatusTab::Closed);

    assert_eq!(ids(&compose(&jobs, &filter)), vec![4]);
}

#[test]
fn given_skill_selection_when_composing_then_superset_required() {
    let mut jobs = board();
    jobs[0].skills = vec![SkillAssignment::picked(7, "Rust"), SkillAssignment::picked(9, "SQL")];
    jobs[2].skills = vec![SkillAssignment::picked(9, "SQL")];

    let both = compose(&jobs, &FilterSet::default().with_skills([7, 9]));
    let sql = compose(&jobs, &FilterSet::default().with_skills([9]));

    assert_eq!(ids(&both), vec![1]);
    assert_eq!(ids(&sql), vec![1, 3]);
}

#[test]
fn given_companies_when_filtering_then_tab_does_not_apply() {
    let companies: Vec<Company> = serde_json::from_value(serde_json::json!([
        {"id": 1, "name": "Acme", "location": "Da Nang", "industry": "Logistics"},
        {"id": 2, "name": "Globex", "location": "Ha Noi"}
    ]))
    .unwrap();
    let filter = FilterSet::default().with_query("logistics").with_tab(StatusTab::Open);

    let visible = compose_cloned(&companies, &filter);

    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Acme");
}

#[test]
fn given_tab_names_when_parsing_then_case_insensitive() {
    assert_eq!("Open".parse::<StatusTab>(), Ok(StatusTab::Open));
    assert_eq!("".parse::<StatusTab>(), Ok(StatusTab::All));
    assert!("archived".parse::<StatusTab>().is_err());
}

// ============================================
// RANDOMIZED PROPERTIES
// ============================================

const TITLES: [&str; 6] = ["Rust", "rust dev", "Go", "Data", "QA", "Support"];
const LOCATIONS: [&str; 4] = ["Ha Noi", "Da Nang", "Remote", ""];
const STATUSES: [Option<&str>; 5] = [Some("open"), Some("closed"), Some("draft"), Some("Paused"), None];
const QUERIES: [&str; 5] = ["", "rust", "A", "zzz", "dev"];
const TABS: [StatusTab; 4] = [StatusTab::All, StatusTab::Open, StatusTab::Closed, StatusTab::Draft];

fn random_board(rng: &mut StdRng) -> Vec<JobPosting> {
    let len = rng.gen_range(0..30);
    (0..len)
        .map(|id| JobPosting {
            is_open: if rng.gen_bool(0.3) { Some(rng.gen_bool(0.5)) } else { None },
            ..job(
                id,
                TITLES.choose(rng).copied().unwrap_or("x"),
                LOCATIONS.choose(rng).copied().unwrap_or(""),
                STATUSES.choose(rng).copied().flatten(),
            )
        })
        .collect()
}

fn random_filter(rng: &mut StdRng) -> FilterSet {
    FilterSet::default()
        .with_query(*QUERIES.choose(rng).unwrap_or(&""))
        .with_location(*LOCATIONS.choose(rng).unwrap_or(&""))
        .with_tab(*TABS.choose(rng).unwrap_or(&StatusTab::All))
}

/// **VALUE**: `compose` is pure and order-preserving for arbitrary inputs.
///
/// **WHY THIS MATTERS**: Views recompute the visible list on every keystroke;
/// a non-deterministic or reordering filter makes rows jump around.
///
/// **BUG THIS CATCHES**: Sorting, deduplicating or dropping matching items.
#[test]
fn given_random_boards_when_composing_then_output_is_ordered_subsequence_of_matches() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for _ in 0..500 {
        let jobs = random_board(&mut rng);
        let filter = random_filter(&mut rng);

        let first = ids(&compose(&jobs, &filter));
        let second = ids(&compose(&jobs, &filter));
        assert_eq!(first, second, "Deterministic");

        let expected: Vec<u64> = jobs.iter().filter(|j| filter.matches(*j)).map(|j| j.id).collect();
        assert_eq!(first, expected, "Exactly the matching items, in input order");

        let unconstrained = ids(&compose(&jobs, &FilterSet::default()));
        assert_eq!(unconstrained, jobs.iter().map(|j| j.id).collect::<Vec<_>>());
    }
}

#[test]
fn given_random_boards_when_filtering_twice_then_idempotent() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let jobs = random_board(&mut rng);
        let filter = random_filter(&mut rng);

        let once = compose_cloned(&jobs, &filter);
        let twice = compose_cloned(&once, &filter);

        assert_eq!(once, twice);
    }
}
