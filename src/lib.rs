//! # keyshare: threshold key share collection
//!
//! Validators each hold one share of a threshold-shared decryption key. For
//! every block height they submit their share of that height's key; once
//! enough valid shares have arrived the combined decryption key for the height
//! can be reconstructed.
//!
//! ## Overview
//!
//! A key share is a pair of BLS12-381 points:
//!
//! ```text
//! share      S_i = s_i · H(id)   (G2, 96 bytes compressed)
//! commitment C_i = s_i · g1      (G1, 48 bytes compressed)
//! ```
//!
//! where `H(id)` is the scheme identity hashed onto G2. A share is valid when
//! `e(C_i, H(id)) == e(g1, S_i)`. Any set of valid shares is combined with
//! Lagrange weights at zero into the height key `Σ λ_i · S_i`.
//!
//! ## Architecture
//!
//! - **share**: data model ([`EncodedShare`], [`PersistedKeyShare`]), hex codec
//!   ([`decode`]) and pairing verifier ([`Suite`], [`verify_share`]).
//! - **[`aggregate`]**: threshold reconstruction of the height key.
//! - **[`ShareCollector`]**: the submission entry point. Validator registry,
//!   share store and event sink are injected through [`ValidatorRegistry`],
//!   [`ShareStore`] and [`EventSink`].
//! - **config**: [`KeyshareConfig`] with suite selection, identity, height
//!   policy and quorum.
//! - **[`dealer`]**: a trusted dealer used by tests, benchmarks and demos to
//!   produce a split with a known master secret.
//! - **errors**: the closed [`Error`] enumeration.
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "blst")]
//! # fn main() -> Result<(), keyshare::Error> {
//! use keyshare::{
//!     BlockContext, KeyshareConfig, MemoryEvents, MemoryRegistry, MemoryShareStore,
//!     SendKeyShare, ShareCollector, dealer::Dealer,
//! };
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let config = KeyshareConfig::default();
//! let mut rng = StdRng::seed_from_u64(7);
//! let dealer = Dealer::split(&mut rng, 2, 3)?;
//! let shares = dealer.derive_all(config.identity.as_bytes(), config.hash_dst.as_bytes())?;
//!
//! let mut collector: ShareCollector<_, _, _> = ShareCollector::new(
//!     config,
//!     MemoryRegistry::new(["val1", "val2", "val3"]),
//!     MemoryShareStore::new(),
//!     MemoryEvents::default(),
//! )?;
//!
//! let ctx = BlockContext { height: 100, time: 0 };
//! for (validator, share) in ["val1", "val2"].into_iter().zip(&shares) {
//!     let result = collector.submit(
//!         ctx,
//!         SendKeyShare {
//!             validator: validator.into(),
//!             height: 100,
//!             index: share.index,
//!             share_hex: share.share_hex.clone(),
//!             commitment_hex: share.commitment_hex.clone(),
//!         },
//!     )?;
//!     assert!(result.accepted);
//! }
//!
//! let key = collector.aggregated_key(100).expect("aggregated");
//! assert_eq!(key.contributors, vec![1, 2]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "blst"))]
//! # fn main() {}
//! ```
//!
//! ## Feature Flags
//!
//! - **`blst`** (default): blstrs backend for BLS12-381
//!
//! ## Determinism
//!
//! A submission runs to completion on the calling thread. Verification and
//! aggregation never fan out, so every replica derives the same key from the
//! same sequence of submissions. Only the dealer parallelises (with Rayon).
//!
//! ## Security Considerations
//!
//! - Shares are re-verified on every aggregation attempt; verification results
//!   are never cached.
//! - Identity points are rejected at decode time, since an identity share with
//!   an identity commitment passes the pairing check trivially.
//! - Logs carry a BLAKE3 fingerprint of an aggregated key, never the key.

mod arith;
mod config;
mod errors;
mod share;

pub use arith::*;
pub use config::*;
pub use errors::*;
pub use share::*;

#[cfg(feature = "blst")]
mod aggregate;
#[cfg(feature = "blst")]
pub use aggregate::{DecryptionKey, aggregate};

#[cfg(feature = "blst")]
mod collector;
#[cfg(feature = "blst")]
pub use collector::*;

#[cfg(feature = "blst")]
pub mod dealer;
