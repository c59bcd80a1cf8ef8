//! Configuration types for key share collection.
//!
//! This module provides the primitive suite selection (backend and curve), the
//! scheme-wide identity used for hash-to-curve, and the policy knobs of the
//! collector (height acceptance, index range and quorum).
//!
//! # Example
//!
//! ```rust
//! use keyshare::{HeightPolicy, KeyshareConfig};
//!
//! let config = KeyshareConfig {
//!     height_policy: HeightPolicy::RejectPast,
//!     parties: Some(4),
//!     threshold: Some(3),
//!     ..KeyshareConfig::default()
//! };
//! config.validate().expect("valid config");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BackendError, Error};

/// Scheme-wide identity hashed onto the secret group.
pub const DEFAULT_IDENTITY: &str = "Random_IBE_ID";

/// Domain separation tag for hashing the identity onto G2.
pub const DEFAULT_HASH_DST: &str = "BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Default number of heights whose aggregated key is kept in memory.
pub const DEFAULT_MAX_CACHED_HEIGHTS: usize = 256;

/// Supported pairing-friendly elliptic curves.
///
/// - **BLS12-381**: the curve every deployed key share is encoded on.
/// - **BN254**: listed so that configurations naming it fail with a
///   descriptive `UnsupportedPrimitive` instead of a parse error.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum CurveId {
    /// BN254 curve (~100-bit security)
    Bn254,
    /// BLS12-381 curve (~128-bit security)
    #[default]
    Bls12_381,
}

/// Cryptographic backend implementations.
///
/// Only the blstrs backend is compiled into this crate; `Arkworks` remains a
/// recognised identifier so that a configuration produced for another build is
/// rejected cleanly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum BackendId {
    /// Arkworks backend (not available in this build)
    Arkworks,
    /// blstrs backend (optimized assembly, BLS12-381 only)
    #[default]
    Blst,
}

/// Backend and curve configuration for the primitive interface.
///
/// # Supported Combinations
///
/// | Backend    | BLS12-381 | BN254 |
/// |------------|-----------|-------|
/// | Arkworks   | ✗         | ✗     |
/// | blst       | ✓         | ✗     |
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// The cryptographic backend to use
    pub backend: BackendId,
    /// The pairing-friendly curve to use
    pub curve: CurveId,
}

impl SuiteConfig {
    /// Creates a new suite configuration.
    pub fn new(backend: BackendId, curve: CurveId) -> Self {
        Self { backend, curve }
    }

    /// Validates that this backend/curve combination can hash onto the secret
    /// group in the current build.
    ///
    /// # Example
    ///
    /// ```rust
    /// use keyshare::{BackendId, CurveId, SuiteConfig};
    ///
    /// let config = SuiteConfig::new(BackendId::Blst, CurveId::Bn254);
    /// assert!(config.ensure_supported().is_err());
    /// ```
    pub fn ensure_supported(&self) -> Result<(), BackendError> {
        match (self.backend, self.curve) {
            (BackendId::Blst, CurveId::Bls12_381) => {
                if cfg!(feature = "blst") {
                    Ok(())
                } else {
                    Err(BackendError::UnsupportedFeature(
                        "compile with `blst` feature to use the blstrs backend",
                    ))
                }
            }
            (BackendId::Blst, CurveId::Bn254) => Err(BackendError::UnsupportedCurve(
                "bn254 is not supported by the blstrs backend",
            )),
            (BackendId::Arkworks, _) => Err(BackendError::UnsupportedFeature(
                "the arkworks backend is not compiled into this crate",
            )),
        }
    }
}

/// Whether shares targeting a height below the current block are accepted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightPolicy {
    /// Accept any target height.
    #[default]
    AcceptAll,
    /// Reject target heights strictly below the current block height.
    RejectPast,
}

impl HeightPolicy {
    /// Checks `target` against the block currently being executed.
    pub fn check(&self, target: u64, current: u64) -> Result<(), Error> {
        match self {
            HeightPolicy::AcceptAll => Ok(()),
            HeightPolicy::RejectPast if target < current => {
                Err(Error::StaleHeight { target, current })
            }
            HeightPolicy::RejectPast => Ok(()),
        }
    }
}

/// Collector configuration.
///
/// # Fields
///
/// - `suite`: Primitive backend and curve
/// - `identity`: Scheme-wide identity hashed onto the secret group
/// - `hash_dst`: Domain separation tag for hash-to-curve
/// - `height_policy`: Acceptance rule for the submitted target height
/// - `parties`: Optional upper bound for share indices (`1..=parties`)
/// - `threshold`: Optional quorum below which no aggregation is attempted
/// - `max_cached_heights`: Number of heights whose aggregated key is retained
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyshareConfig {
    pub suite: SuiteConfig,
    pub identity: String,
    pub hash_dst: String,
    pub height_policy: HeightPolicy,
    pub parties: Option<u32>,
    pub threshold: Option<u32>,
    pub max_cached_heights: usize,
}

impl Default for KeyshareConfig {
    fn default() -> Self {
        Self {
            suite: SuiteConfig::default(),
            identity: DEFAULT_IDENTITY.to_owned(),
            hash_dst: DEFAULT_HASH_DST.to_owned(),
            height_policy: HeightPolicy::default(),
            parties: None,
            threshold: None,
            max_cached_heights: DEFAULT_MAX_CACHED_HEIGHTS,
        }
    }
}

impl KeyshareConfig {
    /// Validates the configuration.
    ///
    /// The suite itself is not checked here: an unsupported suite is reported
    /// per submission as `UnsupportedPrimitive`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.identity.is_empty() {
            return Err(Error::InvalidConfig("identity must not be empty".into()));
        }
        if self.hash_dst.is_empty() {
            return Err(Error::InvalidConfig(
                "hash-to-curve dst must not be empty".into(),
            ));
        }
        if self.parties == Some(0) {
            return Err(Error::InvalidConfig("parties must be greater than 0".into()));
        }
        if self.threshold == Some(0) {
            return Err(Error::InvalidConfig(
                "threshold must be greater than 0".into(),
            ));
        }
        if self.max_cached_heights == 0 {
            return Err(Error::InvalidConfig(
                "max_cached_heights must be greater than 0".into(),
            ));
        }
        match (self.parties, self.threshold) {
            (Some(parties), Some(threshold)) if threshold > parties => Err(Error::InvalidConfig(
                "threshold must be less than or equal to parties".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Checks a submitted share index against the configured range.
    pub fn check_index(&self, index: u32) -> Result<(), Error> {
        if index == 0 {
            return Err(Error::InvalidShareIndex { index });
        }
        match self.parties {
            Some(parties) if index > parties => Err(Error::InvalidShareIndex { index }),
            _ => Ok(()),
        }
    }

    /// Returns `true` when `available` verified shares meet the quorum.
    pub fn has_quorum(&self, available: usize) -> bool {
        self.threshold
            .is_none_or(|threshold| available >= threshold as usize)
    }
}
