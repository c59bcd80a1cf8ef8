//! Collaborators of the share collector.
//!
//! The collector never reaches for global state: validator membership, share
//! persistence and event emission are injected through these traits. The
//! in-memory implementations back the tests and demos and are ordered
//! (`BTreeMap`/`BTreeSet`) so that every replica iterates them identically.

use std::collections::{BTreeMap, BTreeSet};

use crate::{PersistedKeyShare, collector::KeyShareEvent};

/// Read access to the current validator set.
pub trait ValidatorRegistry {
    fn is_registered(&self, validator: &str) -> bool;

    fn all_validators(&self) -> Vec<String>;
}

/// Durable key share records, one per `(validator, height)`.
pub trait ShareStore {
    fn get(&self, validator: &str, height: u64) -> Option<PersistedKeyShare>;

    /// All records for `height`.
    fn get_all(&self, height: u64) -> Vec<PersistedKeyShare>;

    /// Inserts the record, replacing any record for the same validator and height.
    fn put(&mut self, share: PersistedKeyShare);
}

/// Receiver of accepted-submission events.
pub trait EventSink {
    fn emit(&mut self, event: KeyShareEvent);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryRegistry {
    validators: BTreeSet<String>,
}

impl MemoryRegistry {
    pub fn new<I, S>(validators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            validators: validators.into_iter().map(Into::into).collect(),
        }
    }

    pub fn register(&mut self, validator: impl Into<String>) {
        self.validators.insert(validator.into());
    }

    pub fn remove(&mut self, validator: &str) -> bool {
        self.validators.remove(validator)
    }
}

impl ValidatorRegistry for MemoryRegistry {
    fn is_registered(&self, validator: &str) -> bool {
        self.validators.contains(validator)
    }

    fn all_validators(&self) -> Vec<String> {
        self.validators.iter().cloned().collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryShareStore {
    shares: BTreeMap<(u64, String), PersistedKeyShare>,
}

impl MemoryShareStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

impl ShareStore for MemoryShareStore {
    fn get(&self, validator: &str, height: u64) -> Option<PersistedKeyShare> {
        self.shares.get(&(height, validator.to_owned())).cloned()
    }

    fn get_all(&self, height: u64) -> Vec<PersistedKeyShare> {
        self.shares
            .range((height, String::new())..)
            .take_while(|((h, _), _)| *h == height)
            .map(|(_, share)| share.clone())
            .collect()
    }

    fn put(&mut self, share: PersistedKeyShare) {
        self.shares
            .insert((share.height, share.validator.clone()), share);
    }
}

/// Event sink that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct MemoryEvents {
    pub events: Vec<KeyShareEvent>,
}

impl EventSink for MemoryEvents {
    fn emit(&mut self, event: KeyShareEvent) {
        self.events.push(event);
    }
}
