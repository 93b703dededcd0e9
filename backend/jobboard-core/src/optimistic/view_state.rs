use models::{Application, ApplicationId, Company, CompanyId, JobId, JobPosting, SkillAssignment, SkillId};

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;
use tokio::sync::watch;

/// An entity identified by a key that is unique within its collection.
pub trait Keyed: Clone + Send + Sync + 'static {
    type Key: Eq + Hash + Clone + Debug + Send + Sync + 'static;

    fn key(&self) -> Self::Key;
}

impl Keyed for JobPosting {
    type Key = JobId;

    fn key(&self) -> JobId {
        self.id
    }
}

impl Keyed for SkillAssignment {
    type Key = SkillId;

    fn key(&self) -> SkillId {
        self.skill_id
    }
}

impl Keyed for Application {
    type Key = ApplicationId;

    fn key(&self) -> ApplicationId {
        self.id
    }
}

impl Keyed for Company {
    type Key = CompanyId;

    fn key(&self) -> CompanyId {
        self.id
    }
}

/// The collection a view renders, plus its inline error banner.
///
/// Every write is published through `watch` channels so a renderer can
/// subscribe instead of polling. Lives for as long as the view is mounted;
/// call [`ViewState::unmount`] when the view goes away so in-flight
/// mutations stop writing into it.
pub struct ViewState<T: Keyed> {
    items: watch::Sender<Vec<T>>,
    error: watch::Sender<Option<String>>,
    busy: watch::Sender<HashSet<T::Key>>,
    mounted: AtomicBool,
}

impl<T: Keyed> ViewState<T> {
    pub fn new(items: Vec<T>) -> Arc<Self> {
        Arc::new(Self {
            items: watch::Sender::new(items),
            error: watch::Sender::new(None),
            busy: watch::Sender::new(HashSet::new()),
            mounted: AtomicBool::new(true),
        })
    }

    pub fn empty() -> Arc<Self> {
        Self::new(Vec::new())
    }

    /// Copy of the collection as currently published.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, key: &T::Key) -> Option<T> {
        self.items
            .borrow()
            .iter()
            .find(|item| item.key() == *key)
            .cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<T>> {
        self.items.subscribe()
    }

    /// Replace the whole collection, e.g. after a (re)load.
    pub fn replace_all(&self, items: Vec<T>) {
        if self.is_mounted() {
            self.items.send_replace(items);
        }
    }

    /// Inline error banner for the last failed operation.
    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    pub fn set_error(&self, message: impl Into<String>) {
        if self.is_mounted() {
            self.error.send_replace(Some(message.into()));
        }
    }

    pub fn clear_error(&self) {
        self.error.send_if_modified(|error| error.take().is_some());
    }

    /// Whether a mutation on `key` is currently in flight.
    pub fn is_busy(&self, key: &T::Key) -> bool {
        self.busy.borrow().contains(key)
    }

    pub fn subscribe_busy(&self) -> watch::Receiver<HashSet<T::Key>> {
        self.busy.subscribe()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        if self.mounted.swap(false, Ordering::AcqRel) {
            debug!("View unmounted; pending mutations will be ignored");
        }
    }

    pub(crate) fn try_claim(&self, key: &T::Key) -> bool {
        self.busy.send_if_modified(|busy| busy.insert(key.clone()))
    }

    pub(crate) fn release(&self, key: &T::Key) {
        self.busy.send_if_modified(|busy| busy.remove(key));
    }

    /// Read-modify-write of the collection as one step; subscribers are
    /// notified afterwards.
    pub(crate) fn modify(&self, f: impl FnOnce(&mut Vec<T>)) {
        self.items.send_modify(f);
    }
}
