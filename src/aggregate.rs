//! Threshold reconstruction of the height decryption key.
//!
//! Each verified share `S_i = f(i) · Q` is weighted with the Lagrange
//! coefficient of its index over the full participating set and the weighted
//! points are summed in G2:
//!
//! ```text
//! K = Σ_i λ_i · S_i = f(0) · Q
//! ```
//!
//! With at least `threshold` shares of a degree `threshold - 1` polynomial the
//! result is the master key for the identity; with fewer it is a well-formed
//! but unrelated point.
//!
//! The aggregator does not verify shares. Callers must only pass shares that
//! passed [`Suite::verify`](crate::Suite::verify) in the same attempt.

use std::collections::BTreeSet;

use tracing::instrument;

use crate::{
    Commitment, CurvePoint, ExtractedShare, FieldElement, Fr, PairingBackend, ShareIndex,
    errors::Error, lagrange_coefficients_at_zero,
};

/// Reconstructed decryption key together with the indices that produced it.
#[derive(Debug)]
pub struct DecryptionKey<B: PairingBackend> {
    pub point: B::G2,
    /// Contributing share indices in ascending order.
    pub contributors: Vec<ShareIndex>,
}

impl<B: PairingBackend> Clone for DecryptionKey<B> {
    fn clone(&self) -> Self {
        Self {
            point: self.point,
            contributors: self.contributors.clone(),
        }
    }
}

impl<B: PairingBackend> DecryptionKey<B> {
    /// Compressed encoding of the key point.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.point.to_bytes()
    }
}

/// Combines verified shares into the height decryption key.
///
/// `shares` and `commitments` are matched by position and the index of each
/// pair must agree. The result does not depend on the order of the pairs.
///
/// # Errors
///
/// - `Error::InsufficientShares` if no share is supplied
/// - `Error::LengthMismatch` if the slices differ in length
/// - `Error::CommitmentMismatch` if a position pairs different indices
/// - `Error::InvalidShareIndex` for index 0
/// - `Error::DuplicateIndex` if an index appears twice
#[instrument(level = "debug", skip_all, fields(shares = shares.len()))]
pub fn aggregate<B: PairingBackend<Scalar = Fr>>(
    shares: &[ExtractedShare<B>],
    commitments: &[Commitment<B>],
) -> Result<DecryptionKey<B>, Error> {
    if shares.is_empty() {
        return Err(Error::InsufficientShares {
            required: 1,
            provided: 0,
        });
    }
    if shares.len() != commitments.len() {
        return Err(Error::LengthMismatch {
            shares: shares.len(),
            commitments: commitments.len(),
        });
    }

    let mut seen = BTreeSet::new();
    for (position, (share, commitment)) in shares.iter().zip(commitments).enumerate() {
        if share.index != commitment.index {
            return Err(Error::CommitmentMismatch {
                position,
                share_index: share.index,
                commitment_index: commitment.index,
            });
        }
        if share.index == 0 {
            return Err(Error::InvalidShareIndex { index: 0 });
        }
        if !seen.insert(share.index) {
            return Err(Error::DuplicateIndex { index: share.index });
        }
    }

    let points: Vec<Fr> = shares
        .iter()
        .map(|share| Fr::from_u64(u64::from(share.index)))
        .collect();
    let coefficients = lagrange_coefficients_at_zero(&points)?;
    let secret_points: Vec<B::G2> = shares.iter().map(|share| share.secret_point).collect();
    let point = B::G2::multi_scalar_multiplication(&secret_points, &coefficients)?;

    Ok(DecryptionKey {
        point,
        contributors: seen.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        DEFAULT_HASH_DST, DEFAULT_IDENTITY, EncodedShare, PairingEngine, dealer::Dealer, decode,
    };

    type Pair = (ExtractedShare<PairingEngine>, Commitment<PairingEngine>);

    fn setup(seed: u64, threshold: usize, parties: usize) -> (Dealer, Vec<Pair>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let dealer = Dealer::split(&mut rng, threshold, parties).expect("split");
        let pairs = dealer
            .derive_all(DEFAULT_IDENTITY.as_bytes(), DEFAULT_HASH_DST.as_bytes())
            .expect("derive all")
            .iter()
            .map(|e: &EncodedShare| {
                decode::<PairingEngine>(&e.share_hex, &e.commitment_hex, e.index).expect("decode")
            })
            .collect();
        (dealer, pairs)
    }

    fn run(pairs: &[Pair]) -> Result<DecryptionKey<PairingEngine>, Error> {
        let shares: Vec<_> = pairs.iter().map(|(s, _)| s.clone()).collect();
        let commitments: Vec<_> = pairs.iter().map(|(_, c)| c.clone()).collect();
        aggregate(&shares, &commitments)
    }

    #[test]
    fn threshold_subset_reconstructs_key() {
        let (dealer, pairs) = setup(1, 3, 5);
        let expected = dealer.expected_key(DEFAULT_IDENTITY.as_bytes(), DEFAULT_HASH_DST.as_bytes());

        let full = run(&pairs).expect("full set");
        assert_eq!(full.point, expected);
        assert_eq!(full.contributors, vec![1, 2, 3, 4, 5]);

        let subset = [pairs[4].clone(), pairs[0].clone(), pairs[2].clone()];
        let partial = run(&subset).expect("subset");
        assert_eq!(partial.point, expected);
        assert_eq!(partial.contributors, vec![1, 3, 5]);
    }

    #[test]
    fn below_threshold_does_not_reconstruct() {
        let (dealer, pairs) = setup(2, 2, 3);
        let expected = dealer.expected_key(DEFAULT_IDENTITY.as_bytes(), DEFAULT_HASH_DST.as_bytes());
        let key = run(&pairs[..1]).expect("single share");
        assert_ne!(key.point, expected);
        assert_eq!(key.point, pairs[0].0.secret_point);
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            run(&[]),
            Err(Error::InsufficientShares {
                required: 1,
                provided: 0
            })
        ));
    }

    #[test]
    fn rejects_misaligned_input() {
        let (_, pairs) = setup(3, 2, 3);
        let shares: Vec<_> = pairs.iter().map(|(s, _)| s.clone()).collect();
        let commitments: Vec<_> = pairs.iter().rev().map(|(_, c)| c.clone()).collect();
        assert!(matches!(
            aggregate(&shares, &commitments),
            Err(Error::CommitmentMismatch { position: 0, .. })
        ));
        assert!(matches!(
            aggregate(&shares, &commitments[..2]),
            Err(Error::LengthMismatch {
                shares: 3,
                commitments: 2
            })
        ));
    }

    #[test]
    fn rejects_duplicate_index() {
        let (_, pairs) = setup(4, 2, 3);
        let duplicated = [pairs[0].clone(), pairs[1].clone(), pairs[0].clone()];
        assert!(matches!(
            run(&duplicated),
            Err(Error::DuplicateIndex { index: 1 })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn permutation_invariant(order in Just((0usize..5).collect::<Vec<_>>()).prop_shuffle()) {
            let (_, pairs) = setup(5, 3, 5);
            let reference = run(&pairs).expect("reference");
            let shuffled: Vec<Pair> = order.iter().map(|&i| pairs[i].clone()).collect();
            let key = run(&shuffled).expect("shuffled");
            prop_assert_eq!(key.point, reference.point);
            prop_assert_eq!(key.contributors, reference.contributors);
        }
    }
}
