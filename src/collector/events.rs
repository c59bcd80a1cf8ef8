//! Inputs and outputs of a key share submission.

use serde::{Deserialize, Serialize};

use crate::ShareIndex;

/// Block currently being executed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BlockContext {
    pub height: u64,
    /// Block time in unix seconds.
    pub time: u64,
}

/// A validator's key share for `height`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SendKeyShare {
    pub validator: String,
    pub height: u64,
    pub index: ShareIndex,
    pub share_hex: String,
    pub commitment_hex: String,
}

/// Audit record of an accepted submission.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyShareEvent {
    pub validator: String,
    pub height: u64,
    pub index: ShareIndex,
    pub share_hex: String,
    pub commitment_hex: String,
    pub received_at_height: u64,
}

/// Decryption key reconstructed for a height.
///
/// Derived state: it can always be recomputed from the stored shares.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AggregatedKey {
    pub height: u64,
    /// Compressed G2 encoding of the key.
    pub key_material: Vec<u8>,
    /// Indices of the shares that produced the key, ascending.
    pub contributors: Vec<ShareIndex>,
}

impl AggregatedKey {
    /// Short BLAKE3 fingerprint, safe to log.
    pub fn fingerprint(&self) -> String {
        let digest = blake3::hash(&self.key_material);
        hex::encode(&digest.as_bytes()[..8])
    }
}

/// Outcome of an accepted submission.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub accepted: bool,
    /// `None` if aggregation was skipped (below quorum) or failed internally.
    pub aggregated_key: Option<AggregatedKey>,
    pub event: KeyShareEvent,
}
