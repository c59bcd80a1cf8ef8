//! Per-height cache of reconstructed keys.
//!
//! Entries are keyed by a BLAKE3 digest of the verified share set. When a
//! submission leaves the set unchanged (e.g. a validator resubmits the same
//! share) the cached key is returned instead of running the reconstruction
//! again. Verification itself is never cached.
//!
//! At most `capacity` heights are retained; inserting beyond that evicts the
//! lowest heights first.

use std::collections::BTreeMap;

use blake3::Hasher;

use crate::{AggregatedKey, ShareIndex};

const DIGEST_DOMAIN: &[u8] = b"keyshare::verified-set";

#[derive(Clone, Debug)]
struct Entry {
    digest: [u8; 32],
    key: AggregatedKey,
}

#[derive(Clone, Debug)]
pub(crate) struct AggregateCache {
    entries: BTreeMap<u64, Entry>,
    capacity: usize,
}

impl AggregateCache {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
        }
    }

    /// Digest of a verified set given as `(index, share bytes, commitment bytes)`.
    ///
    /// The set is sorted by index first, so the digest is order independent.
    pub(crate) fn digest(members: &mut [(ShareIndex, Vec<u8>, Vec<u8>)]) -> [u8; 32] {
        members.sort_by_key(|(index, _, _)| *index);
        let mut hasher = Hasher::new();
        hasher.update(DIGEST_DOMAIN);
        hasher.update(&(members.len() as u64).to_le_bytes());
        for (index, share, commitment) in members.iter() {
            hasher.update(&index.to_le_bytes());
            hasher.update(share);
            hasher.update(commitment);
        }
        *hasher.finalize().as_bytes()
    }

    /// Cached key for `height` if it was computed from the set `digest`.
    pub(crate) fn lookup(&self, height: u64, digest: &[u8; 32]) -> Option<&AggregatedKey> {
        self.entries
            .get(&height)
            .filter(|entry| &entry.digest == digest)
            .map(|entry| &entry.key)
    }

    pub(crate) fn get(&self, height: u64) -> Option<&AggregatedKey> {
        self.entries.get(&height).map(|entry| &entry.key)
    }

    pub(crate) fn insert(&mut self, digest: [u8; 32], key: AggregatedKey) {
        self.entries.insert(key.height, Entry { digest, key });
        while self.entries.len() > self.capacity {
            self.entries.pop_first();
        }
    }

    /// Drops the key for `height`, returning `true` if one was cached.
    pub(crate) fn remove(&mut self, height: u64) -> bool {
        self.entries.remove(&height).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
