use std::fmt::Debug;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::PairingEngine;

use crate::{BackendError, CurvePoint, FieldElement, HashToCurve, TargetGroup};

/// Main backend trait that ties together all cryptographic operations.
///
/// Key shares live in `G2` (the secret group) and commitments in `G1` (the
/// commitment group). The secret group must support hash-to-curve so the
/// scheme identity can be mapped onto it.
///
/// # Example
///
/// ```rust,no_run
/// use keyshare::{CurvePoint, PairingBackend, PairingEngine};
///
/// type G1 = <PairingEngine as PairingBackend>::G1;
/// type G2 = <PairingEngine as PairingBackend>::G2;
///
/// // e(G1, G2) -> GT
/// let result = PairingEngine::pairing(&G1::generator(), &G2::generator());
/// ```
pub trait PairingBackend: Send + Sync + Debug + Sized + 'static {
    /// Scalar field type (Fr).
    type Scalar: FieldElement;
    /// First curve group (G1), holds commitments.
    type G1: CurvePoint<Self::Scalar>;
    /// Second curve group (G2), holds key shares.
    type G2: HashToCurve<Self::Scalar>;
    /// Pairing target group (GT).
    type Target: TargetGroup;

    /// Computes the bilinear pairing: `e(g1, g2) -> GT`.
    ///
    /// The pairing satisfies bilinearity: `e(a*P, b*Q) = e(P, Q)^(ab)`.
    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target;

    /// Computes a product of pairings: `∏ e(g1[i], g2[i])`.
    ///
    /// This is more efficient than computing individual pairings and multiplying.
    /// Returns an error if the input arrays have different lengths.
    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError>;
}
