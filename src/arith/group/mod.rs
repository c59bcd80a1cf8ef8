use std::fmt::Debug;

use crate::{BackendError, FieldElement};

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::{G1, G2, Gt};

/// Elliptic curve point abstraction for G1 and G2 groups.
///
/// This trait provides operations on elliptic curve points in projective
/// coordinates together with their canonical compressed encoding, which is
/// the binary form carried (hex-encoded) by key shares and commitments.
///
/// # Example
///
/// ```rust,no_run
/// use keyshare::{CurvePoint, FieldElement, Fr, G1};
/// use rand::thread_rng;
///
/// let mut rng = thread_rng();
/// let scalar = Fr::random(&mut rng);
///
/// let point = G1::generator().mul_scalar(&scalar);
/// let bytes = CurvePoint::to_bytes(&point);
/// let decoded = G1::from_bytes(&bytes).expect("valid encoding");
/// ```
pub trait CurvePoint<F: FieldElement>:
    Clone + Send + Sync + Debug + PartialEq + 'static + Copy
{
    /// Returns the point at infinity (identity element).
    fn identity() -> Self;

    /// Returns the standard generator for this group.
    fn generator() -> Self;

    /// Checks if this point is the identity element.
    fn is_identity(&self) -> bool;

    /// Returns the additive inverse of this point.
    fn negate(&self) -> Self;

    /// Performs scalar multiplication: returns `scalar * self`.
    fn mul_scalar(&self, scalar: &F) -> Self;

    /// Computes `∑ scalars[i] * points[i]`.
    ///
    /// Returns an error if the slices have different lengths.
    fn multi_scalar_multiplication(points: &[Self], scalars: &[F]) -> Result<Self, BackendError>;

    /// Serializes the point in compressed form.
    fn to_bytes(&self) -> Vec<u8>;

    /// Deserializes a compressed point, checking curve and subgroup membership.
    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError>;
}

/// Curve groups that support hashing arbitrary bytes onto the curve.
///
/// Implementations follow the hash-to-curve construction with the random
/// oracle encoding, so the output has no known discrete log relation to the
/// generator.
pub trait HashToCurve<F: FieldElement>: CurvePoint<F> {
    /// Hashes `msg` onto the curve under the domain separation tag `dst`.
    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Self;
}

/// Pairing target group (GT) abstraction.
///
/// This trait represents the target group of the pairing operation, which is
/// a multiplicative subgroup of the extension field.
pub trait TargetGroup: Clone + Send + Sync + Debug + PartialEq + 'static {
    /// Returns the multiplicative identity element.
    fn identity() -> Self;

    /// Combines (multiplies) two target group elements.
    fn combine(&self, other: &Self) -> Self;
}
