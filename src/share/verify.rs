//! Pairing-based verification of key shares against their commitments.
//!
//! A share `S = s · Q` of the height key and its commitment `C = s · g1` are
//! consistent exactly when
//!
//! ```text
//! e(C, Q) == e(g1, S)
//! ```
//!
//! where `Q = H(id)` is the scheme identity hashed onto G2. The check is run as
//! a single product of pairings, `e(C, Q) · e(-g1, S) == 1`.

use core::{fmt::Debug, marker::PhantomData};

use tracing::{instrument, trace};

use crate::{
    Commitment, CurvePoint, ExtractedShare, HashToCurve, KeyshareConfig, PairingBackend,
    ShareIndex, SuiteConfig, TargetGroup,
    errors::Error,
    share::codec::decode,
};

/// Returns `true` if `share` is the key share committed to by `commitment`
/// relative to `identity_point`.
///
/// A failed check is a `false`, never an error. Shares and commitments with
/// different indices never verify.
#[instrument(level = "trace", skip_all, fields(index = share.index))]
pub fn verify_share<B: PairingBackend>(
    commitment: &Commitment<B>,
    share: &ExtractedShare<B>,
    identity_point: &B::G2,
) -> bool {
    if commitment.index != share.index {
        return false;
    }
    let g1 = <B::G1 as CurvePoint<B::Scalar>>::generator();
    B::multi_pairing(
        &[commitment.commitment_point, g1.negate()],
        &[*identity_point, share.secret_point],
    )
    .map(|product| product == <B::Target as TargetGroup>::identity())
    .unwrap_or(false)
}

/// Primitive configuration plus the scheme identity.
///
/// The suite hashes the scheme identity onto the secret group and checks
/// decoded shares against it. Computing the identity point is the only step
/// that can fail for configuration reasons.
pub struct Suite<B: PairingBackend> {
    config: SuiteConfig,
    identity: Vec<u8>,
    dst: Vec<u8>,
    _phantom: PhantomData<B>,
}

impl<B: PairingBackend> Debug for Suite<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Suite")
            .field("config", &self.config)
            .field("identity", &String::from_utf8_lossy(&self.identity))
            .field("dst", &String::from_utf8_lossy(&self.dst))
            .finish()
    }
}

impl<B: PairingBackend> Clone for Suite<B> {
    fn clone(&self) -> Self {
        Self {
            config: self.config,
            identity: self.identity.clone(),
            dst: self.dst.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<B: PairingBackend> Suite<B> {
    pub fn new(config: SuiteConfig, identity: &[u8], dst: &[u8]) -> Self {
        Self {
            config,
            identity: identity.to_vec(),
            dst: dst.to_vec(),
            _phantom: PhantomData,
        }
    }

    pub fn from_config(config: &KeyshareConfig) -> Self {
        Self::new(
            config.suite,
            config.identity.as_bytes(),
            config.hash_dst.as_bytes(),
        )
    }

    /// Hashes the scheme identity onto the secret group.
    ///
    /// The result is the same for every share, so callers compute it once per
    /// aggregation attempt and pass it to [`Suite::verify`].
    ///
    /// # Errors
    ///
    /// `Error::UnsupportedPrimitive` if the configured backend/curve cannot
    /// produce a hashable point in this build.
    pub fn identity_point(&self) -> Result<B::G2, Error> {
        self.config
            .ensure_supported()
            .map_err(Error::UnsupportedPrimitive)?;
        Ok(<B::G2 as HashToCurve<B::Scalar>>::hash_to_curve(
            &self.identity,
            &self.dst,
        ))
    }

    /// See [`verify_share`].
    pub fn verify(
        &self,
        commitment: &Commitment<B>,
        share: &ExtractedShare<B>,
        identity_point: &B::G2,
    ) -> bool {
        verify_share(commitment, share, identity_point)
    }

    /// Decodes a share and checks it against its commitment.
    ///
    /// # Errors
    ///
    /// The codec errors, or `Error::InvalidShare` when the pairing check fails.
    #[instrument(level = "trace", skip(self, share_hex, commitment_hex, identity_point))]
    pub fn decode_and_verify(
        &self,
        share_hex: &str,
        commitment_hex: &str,
        index: ShareIndex,
        identity_point: &B::G2,
    ) -> Result<(ExtractedShare<B>, Commitment<B>), Error> {
        let (share, commitment) = decode::<B>(share_hex, commitment_hex, index)?;
        if !self.verify(&commitment, &share, identity_point) {
            return Err(Error::InvalidShare { index });
        }
        trace!(index, "key share verified");
        Ok((share, commitment))
    }
}
