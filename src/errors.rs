//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by the concrete
//! primitive implementation (blstrs) as well as the closed `Error` kind
//! enumeration surfaced by the codec, verifier, aggregator and collector.
//!
//! The errors are implemented with `thiserror` so callers can match on the
//! exact rejection reason instead of parsing strings.
//!
//! # Examples
//!
//! ```rust
//! use keyshare::{EncodingField, Error};
//!
//! let err = Error::MalformedEncoding {
//!     field: EncodingField::Share,
//!     reason: "odd number of digits".into(),
//! };
//! assert!(err.is_rejection());
//! ```

use core::fmt;

use thiserror::Error;

/// Errors bubbled up from the primitive implementation (blstrs).
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(&'static str),
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
}

/// Which half of an encoded key share an encoding error refers to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodingField {
    /// The secret share point (secret group).
    Share,
    /// The public commitment point (commitment group).
    Commitment,
}

impl fmt::Display for EncodingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingField::Share => f.write_str("key share"),
            EncodingField::Commitment => f.write_str("commitment"),
        }
    }
}

/// Errors returned by the key share pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validator {validator} is not registered")]
    NotRegistered { validator: String },
    #[error("malformed {field} encoding: {reason}")]
    MalformedEncoding {
        field: EncodingField,
        reason: String,
    },
    #[error("{field} is not a valid group element: {reason}")]
    InvalidGroupElement {
        field: EncodingField,
        reason: String,
    },
    #[error("key share {index} does not match its commitment")]
    InvalidShare { index: u32 },
    #[error("invalid key share index {index}")]
    InvalidShareIndex { index: u32 },
    #[error("target height {target} is behind current height {current}")]
    StaleHeight { target: u64, current: u64 },
    #[error("unsupported primitive: {0}")]
    UnsupportedPrimitive(BackendError),
    #[error("insufficient shares: required {required}, provided {provided}")]
    InsufficientShares { required: usize, provided: usize },
    #[error(
        "commitment at position {position} has index {commitment_index}, share has {share_index}"
    )]
    CommitmentMismatch {
        position: usize,
        share_index: u32,
        commitment_index: u32,
    },
    #[error("got {shares} shares but {commitments} commitments")]
    LengthMismatch { shares: usize, commitments: usize },
    #[error("duplicate share index {index}")]
    DuplicateIndex { index: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl Error {
    /// Returns `true` for the kinds that reject a submission outright.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::NotRegistered { .. }
                | Error::MalformedEncoding { .. }
                | Error::InvalidGroupElement { .. }
                | Error::InvalidShare { .. }
                | Error::InvalidShareIndex { .. }
                | Error::StaleHeight { .. }
                | Error::UnsupportedPrimitive(_)
        )
    }
}
