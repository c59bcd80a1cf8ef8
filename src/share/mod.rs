//! Key share data model.
//!
//! A validator submits its share of the height's decryption key as an
//! [`EncodedShare`]: a hex-encoded G2 point (the secret share `s_i · H(id)`)
//! and a hex-encoded G1 point (the commitment `s_i · g1`), tagged with the
//! validator's index in the threshold scheme.
//!
//! - [`ExtractedShare`] and [`Commitment`] are the decoded points. They only
//!   live for the duration of one aggregation attempt.
//! - [`PersistedKeyShare`] is the durable record kept by the share store, one
//!   per `(validator, height)`.

use serde::{Deserialize, Serialize};

use crate::PairingBackend;

mod codec;
pub use codec::{decode, encode};

mod verify;
pub use verify::{Suite, verify_share};

/// Position of a validator in the threshold scheme. Always non-zero.
pub type ShareIndex = u32;

/// Wire form of a key share as submitted by a validator.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EncodedShare {
    pub index: ShareIndex,
    pub share_hex: String,
    pub commitment_hex: String,
}

/// Decoded secret share in the secret group (G2).
#[derive(Debug)]
pub struct ExtractedShare<B: PairingBackend> {
    pub index: ShareIndex,
    pub secret_point: B::G2,
}

impl<B: PairingBackend> Clone for ExtractedShare<B> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            secret_point: self.secret_point,
        }
    }
}

/// Decoded public commitment in the commitment group (G1).
#[derive(Debug)]
pub struct Commitment<B: PairingBackend> {
    pub index: ShareIndex,
    pub commitment_point: B::G1,
}

impl<B: PairingBackend> Clone for Commitment<B> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            commitment_point: self.commitment_point,
        }
    }
}

/// Durable key share record, one per `(validator, height)`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PersistedKeyShare {
    pub validator: String,
    pub height: u64,
    pub share_hex: String,
    pub commitment_hex: String,
    pub index: ShareIndex,
    /// Block time (unix seconds) at which the share was received.
    pub received_at_time: u64,
    pub received_at_height: u64,
}

impl PersistedKeyShare {
    pub fn encoded(&self) -> EncodedShare {
        EncodedShare {
            index: self.index,
            share_hex: self.share_hex.clone(),
            commitment_hex: self.commitment_hex.clone(),
        }
    }
}
