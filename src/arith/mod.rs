//! Cryptographic primitive interface and its blst implementation.
//!
//! This module provides trait abstractions for the primitives consumed by the
//! key share pipeline, so the codec, verifier and aggregator are written
//! against traits rather than a concrete curve library.
//!
//! # Architecture
//!
//! - **[`field`]**: Scalar field operations (Fr) - inversion, batch inversion, encoding
//! - **[`group`]**: Curve points (G1, G2, GT) - arithmetic, compressed encoding, hash-to-curve
//! - **[`pairing`]**: Bilinear pairing operations - `e(G1, G2) -> GT`
//! - **[`poly`]**: Dense polynomials used to split secrets
//! - **[`lagrange`]**: Lagrange coefficients for reconstruction at zero
//!
//! # Backend Support
//!
//! | Feature | Backend | Curve | Status |
//! |---------|---------|-------|--------|
//! | `blst` (default) | blstrs | BLS12-381 | Stable |
//!
//! # Example
//!
//! ```rust
//! use rand::thread_rng;
//! use keyshare::{CurvePoint, FieldElement, PairingBackend, PairingEngine};
//!
//! let mut rng = thread_rng();
//! let scalar = <PairingEngine as PairingBackend>::Scalar::random(&mut rng);
//!
//! let g1 = <PairingEngine as PairingBackend>::G1::generator();
//! let point = g1.mul_scalar(&scalar);
//!
//! let g2 = <PairingEngine as PairingBackend>::G2::generator();
//! let gt = PairingEngine::pairing(&point, &g2);
//! println!("{:?}", gt);
//! ```

mod field;
pub use field::*;

mod group;
pub use group::*;

mod pairing;
pub use pairing::*;

mod poly;
pub use poly::*;

#[cfg(feature = "blst")]
mod lagrange;
#[cfg(feature = "blst")]
pub use lagrange::*;
