//! Trusted dealer producing a controlled threshold split.
//!
//! The collector assumes key generation already happened elsewhere. The dealer
//! reproduces its output locally so that tests, benchmarks and demos know the
//! ground-truth master secret: it samples a polynomial `f` of degree
//! `threshold - 1` with `f(0) = s`, hands party `i` the scalar `f(i)`, and
//! derives per-identity key shares
//!
//! ```text
//! share_i      = f(i) · H(id)   (G2)
//! commitment_i = f(i) · g1      (G1)
//! ```
//!
//! # Security
//!
//! A dealer knows the master secret. It is not a substitute for distributed
//! key generation.

use rand_core::RngCore;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::instrument;

use crate::{
    CurvePoint, DensePolynomial, EncodedShare, FieldElement, Fr, G1, G2, HashToCurve, Polynomial,
    ShareIndex, errors::Error,
};

/// A party's scalar share of the master secret.
#[derive(Clone, Copy, Debug)]
pub struct SecretShare {
    pub index: ShareIndex,
    pub scalar: Fr,
}

/// Polynomial split of a master secret.
#[derive(Clone, Debug)]
pub struct Dealer {
    polynomial: DensePolynomial,
    threshold: usize,
    parties: usize,
}

impl Dealer {
    /// Samples a fresh master secret and splits it `threshold`-of-`parties`.
    #[instrument(level = "info", skip(rng))]
    pub fn split<R: RngCore + ?Sized>(
        rng: &mut R,
        threshold: usize,
        parties: usize,
    ) -> Result<Self, Error> {
        let master = <Fr as FieldElement>::random(&mut *rng);
        Self::split_secret(rng, master, threshold, parties)
    }

    /// Splits a given master secret `threshold`-of-`parties`.
    pub fn split_secret<R: RngCore + ?Sized>(
        rng: &mut R,
        master: Fr,
        threshold: usize,
        parties: usize,
    ) -> Result<Self, Error> {
        if threshold == 0 {
            return Err(Error::InvalidConfig(
                "threshold must be greater than 0".into(),
            ));
        }
        if parties < threshold {
            return Err(Error::InvalidConfig(
                "threshold must be less than or equal to parties".into(),
            ));
        }
        if ShareIndex::try_from(parties).is_err() {
            return Err(Error::InvalidConfig("too many parties".into()));
        }

        let polynomial = DensePolynomial::random_with_constant(rng, master, threshold - 1);
        Ok(Self {
            polynomial,
            threshold,
            parties,
        })
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    pub fn master_secret(&self) -> Fr {
        self.polynomial.coeffs()[0]
    }

    /// Master public key `s · g1`.
    pub fn master_public_key(&self) -> G1 {
        <G1 as CurvePoint<Fr>>::generator().mul_scalar(&self.master_secret())
    }

    /// Scalar share of party `index`, or `None` outside `1..=parties`.
    pub fn secret_share(&self, index: ShareIndex) -> Option<SecretShare> {
        if index == 0 || index as usize > self.parties {
            return None;
        }
        Some(SecretShare {
            index,
            scalar: self.polynomial.evaluate(&Fr::from_u64(u64::from(index))),
        })
    }

    /// Derives the key share of party `index` for `identity`.
    pub fn derive_share(
        &self,
        index: ShareIndex,
        identity: &[u8],
        dst: &[u8],
    ) -> Result<EncodedShare, Error> {
        let q = <G2 as HashToCurve<Fr>>::hash_to_curve(identity, dst);
        self.derive_with_point(index, &q)
    }

    /// Derives the key shares of every party for `identity`, ordered by index.
    ///
    /// # Errors
    ///
    /// The first derivation error, if any party's share cannot be derived.
    #[instrument(level = "debug", skip_all, fields(parties = self.parties))]
    pub fn derive_all(&self, identity: &[u8], dst: &[u8]) -> Result<Vec<EncodedShare>, Error> {
        let q = <G2 as HashToCurve<Fr>>::hash_to_curve(identity, dst);
        (1..=self.parties as ShareIndex)
            .into_par_iter()
            .map(|index| self.derive_with_point(index, &q))
            .collect()
    }

    /// Ground-truth decryption key `s · H(identity)`.
    pub fn expected_key(&self, identity: &[u8], dst: &[u8]) -> G2 {
        <G2 as HashToCurve<Fr>>::hash_to_curve(identity, dst).mul_scalar(&self.master_secret())
    }

    fn derive_with_point(&self, index: ShareIndex, q: &G2) -> Result<EncodedShare, Error> {
        let share = self
            .secret_share(index)
            .ok_or(Error::InvalidShareIndex { index })?;
        let secret_point = q.mul_scalar(&share.scalar);
        let commitment_point = <G1 as CurvePoint<Fr>>::generator().mul_scalar(&share.scalar);
        Ok(EncodedShare {
            index,
            share_hex: hex::encode(CurvePoint::<Fr>::to_bytes(&secret_point)),
            commitment_hex: hex::encode(CurvePoint::<Fr>::to_bytes(&commitment_point)),
        })
    }
}
