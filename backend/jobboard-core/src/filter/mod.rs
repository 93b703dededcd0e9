//! Client-side filtering of an already loaded list.
//!
//! [`compose`] is pure: same input, same output, and the relative order of
//! the input is preserved. An empty [`FilterSet`] returns every item.

mod filterable;

pub use filterable::Filterable;

use models::{JobStatus, SkillId};

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Status tab of the employer job board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusTab {
    #[default]
    All,
    Open,
    Closed,
    Draft,
}

impl StatusTab {
    pub fn matches(&self, status: &JobStatus) -> bool {
        match self {
            StatusTab::All => true,
            StatusTab::Open => *status == JobStatus::Open,
            StatusTab::Closed => *status == JobStatus::Closed,
            StatusTab::Draft => *status == JobStatus::Draft,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTab::All => "all",
            StatusTab::Open => "open",
            StatusTab::Closed => "closed",
            StatusTab::Draft => "draft",
        }
    }
}

impl fmt::Display for StatusTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusTab {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusTab::All),
            "open" => Ok(StatusTab::Open),
            "closed" => Ok(StatusTab::Closed),
            "draft" => Ok(StatusTab::Draft),
            other => Err(format!(
                "unknown tab '{other}' (expected all, open, closed or draft)"
            )),
        }
    }
}

/// Every active predicate of a list view. `Default` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Case-insensitive substring over [`Filterable::search_fields`].
    pub query: String,
    /// Case-insensitive substring over [`Filterable::location`].
    pub location: String,
    pub tab: StatusTab,
    /// The item must carry all of these skills.
    pub skills: BTreeSet<SkillId>,
}

impl FilterSet {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_tab(mut self, tab: StatusTab) -> Self {
        self.tab = tab;
        self
    }

    pub fn with_skills(mut self, skills: impl IntoIterator<Item = SkillId>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.location.trim().is_empty()
            && self.tab == StatusTab::All
            && self.skills.is_empty()
    }

    pub fn matches<T: Filterable>(&self, item: &T) -> bool {
        let query = self.query.trim().to_lowercase();
        let location = self.location.trim().to_lowercase();
        self.matches_prepared(item, &query, &location)
    }

    fn matches_prepared<T: Filterable>(&self, item: &T, query: &str, location: &str) -> bool {
        if !query.is_empty()
            && !item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(query))
        {
            return false;
        }

        if !location.is_empty() {
            let hit = item
                .location()
                .is_some_and(|value| value.to_lowercase().contains(location));
            if !hit {
                return false;
            }
        }

        // Entities without a status are not constrained by the tab.
        if let Some(status) = item.status() {
            if !self.tab.matches(&status) {
                return false;
            }
        }

        if !self.skills.is_empty() {
            let carried: BTreeSet<SkillId> = item.skill_ids().into_iter().collect();
            if !self.skills.is_subset(&carried) {
                return false;
            }
        }

        true
    }
}

/// Items of `items` that satisfy `filter`, in their original order.
pub fn compose<'a, T: Filterable>(items: &'a [T], filter: &FilterSet) -> Vec<&'a T> {
    let query = filter.query.trim().to_lowercase();
    let location = filter.location.trim().to_lowercase();

    items
        .iter()
        .filter(|item| filter.matches_prepared(*item, &query, &location))
        .collect()
}

/// Owned variant of [`compose`].
pub fn compose_cloned<T: Filterable + Clone>(items: &[T], filter: &FilterSet) -> Vec<T> {
    compose(items, filter).into_iter().cloned().collect()
}
