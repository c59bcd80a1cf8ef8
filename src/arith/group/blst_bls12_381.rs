//! blst-backed group types for BLS12-381.
//!
//! G1 points compress to 48 bytes and G2 points to 96 bytes, using the
//! ZCash serialization format (flag bits in the most significant byte).
//! Decoding goes through `from_compressed`, which rejects points that are
//! off the curve or outside the prime-order subgroup.
//!
//! # Feature
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::{G1Affine, G1Projective, G2Affine, G2Projective, Gt as BlstGt, Scalar};
use group::{Curve, Group};

use crate::{BackendError, CurvePoint, HashToCurve, TargetGroup};

pub type G1 = G1Projective;
pub type G2 = G2Projective;
pub type Gt = BlstGt;

const G1_COMPRESSED_SIZE: usize = 48;
const G2_COMPRESSED_SIZE: usize = 96;

impl CurvePoint<Scalar> for G1 {
    fn identity() -> Self {
        <G1Projective as Group>::identity()
    }

    fn generator() -> Self {
        <G1Projective as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn multi_scalar_multiplication(points: &[Self], scalars: &[Scalar]) -> Result<Self, BackendError> {
        if points.len() != scalars.len() {
            return Err(BackendError::Math("points and scalars length mismatch"));
        }
        Ok(G1Projective::multi_exp(points, scalars))
    }

    fn to_bytes(&self) -> Vec<u8> {
        <Self as Curve>::to_affine(self).to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let raw: [u8; G1_COMPRESSED_SIZE] = bytes
            .try_into()
            .map_err(|_| BackendError::Serialization("invalid G1 length"))?;
        Option::<G1Affine>::from(G1Affine::from_compressed(&raw))
            .map(G1Projective::from)
            .ok_or(BackendError::Serialization("invalid G1 point"))
    }
}

impl HashToCurve<Scalar> for G1 {
    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Self {
        G1Projective::hash_to_curve(msg, dst, &[])
    }
}

impl CurvePoint<Scalar> for G2 {
    fn identity() -> Self {
        <G2Projective as Group>::identity()
    }

    fn generator() -> Self {
        <G2Projective as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn multi_scalar_multiplication(points: &[Self], scalars: &[Scalar]) -> Result<Self, BackendError> {
        if points.len() != scalars.len() {
            return Err(BackendError::Math("points and scalars length mismatch"));
        }
        Ok(G2Projective::multi_exp(points, scalars))
    }

    fn to_bytes(&self) -> Vec<u8> {
        <Self as Curve>::to_affine(self).to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, BackendError> {
        let raw: [u8; G2_COMPRESSED_SIZE] = bytes
            .try_into()
            .map_err(|_| BackendError::Serialization("invalid G2 length"))?;
        Option::<G2Affine>::from(G2Affine::from_compressed(&raw))
            .map(G2Projective::from)
            .ok_or(BackendError::Serialization("invalid G2 point"))
    }
}

impl HashToCurve<Scalar> for G2 {
    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Self {
        G2Projective::hash_to_curve(msg, dst, &[])
    }
}

impl TargetGroup for Gt {
    fn identity() -> Self {
        <Gt as Group>::identity()
    }

    fn combine(&self, other: &Self) -> Self {
        self + other
    }
}
