//! Hex codec for key shares and commitments.
//!
//! Shares are compressed G2 points and commitments compressed G1 points,
//! both carried as lowercase or uppercase hex without a `0x` prefix.

use crate::{
    Commitment, CurvePoint, EncodedShare, ExtractedShare, FieldElement, PairingBackend, ShareIndex,
    errors::{EncodingField, Error},
};

/// Decodes a hex-encoded share and commitment into typed curve points.
///
/// The share is decoded first, then the commitment, so a submission with two
/// bad encodings reports the share.
///
/// # Errors
///
/// - `Error::MalformedEncoding` if either string is not valid hex
/// - `Error::InvalidGroupElement` if the bytes are not a point of the expected
///   group, or decode to the identity
pub fn decode<B: PairingBackend>(
    share_hex: &str,
    commitment_hex: &str,
    index: ShareIndex,
) -> Result<(ExtractedShare<B>, Commitment<B>), Error> {
    let share_bytes = decode_hex(share_hex, EncodingField::Share)?;
    let secret_point = decode_point::<B::Scalar, B::G2>(&share_bytes, EncodingField::Share)?;

    let commitment_bytes = decode_hex(commitment_hex, EncodingField::Commitment)?;
    let commitment_point =
        decode_point::<B::Scalar, B::G1>(&commitment_bytes, EncodingField::Commitment)?;

    Ok((
        ExtractedShare {
            index,
            secret_point,
        },
        Commitment {
            index,
            commitment_point,
        },
    ))
}

/// Encodes a share and its commitment into the wire form.
pub fn encode<B: PairingBackend>(
    share: &ExtractedShare<B>,
    commitment: &Commitment<B>,
) -> EncodedShare {
    EncodedShare {
        index: share.index,
        share_hex: hex::encode(share.secret_point.to_bytes()),
        commitment_hex: hex::encode(commitment.commitment_point.to_bytes()),
    }
}

fn decode_hex(input: &str, field: EncodingField) -> Result<Vec<u8>, Error> {
    hex::decode(input).map_err(|e| Error::MalformedEncoding {
        field,
        reason: e.to_string(),
    })
}

fn decode_point<F: FieldElement, P: CurvePoint<F>>(
    bytes: &[u8],
    field: EncodingField,
) -> Result<P, Error> {
    let point = P::from_bytes(bytes).map_err(|e| Error::InvalidGroupElement {
        field,
        reason: e.to_string(),
    })?;
    if point.is_identity() {
        return Err(Error::InvalidGroupElement {
            field,
            reason: "identity point".into(),
        });
    }
    Ok(point)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{DEFAULT_HASH_DST, DEFAULT_IDENTITY, Fr, G1, G2, PairingEngine, dealer::Dealer};

    fn sample() -> EncodedShare {
        let mut rng = StdRng::seed_from_u64(21);
        let dealer = Dealer::split(&mut rng, 2, 3).expect("split");
        dealer
            .derive_share(1, DEFAULT_IDENTITY.as_bytes(), DEFAULT_HASH_DST.as_bytes())
            .expect("derive")
    }

    #[test]
    fn decode_valid_share() {
        let encoded = sample();
        let (share, commitment) =
            decode::<PairingEngine>(&encoded.share_hex, &encoded.commitment_hex, 1)
                .expect("decode");
        assert_eq!(share.index, 1);
        assert_eq!(commitment.index, 1);
        assert_eq!(encode(&share, &commitment), encoded);
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        let encoded = sample();
        let result = decode::<PairingEngine>(
            &encoded.share_hex.to_uppercase(),
            &encoded.commitment_hex.to_uppercase(),
            1,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn malformed_hex() {
        let encoded = sample();
        let err = decode::<PairingEngine>("zz", &encoded.commitment_hex, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedEncoding {
                field: EncodingField::Share,
                ..
            }
        ));

        let err = decode::<PairingEngine>(&encoded.share_hex, "abc", 1).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedEncoding {
                field: EncodingField::Commitment,
                ..
            }
        ));
    }

    #[test]
    fn swapped_groups_are_rejected() {
        let encoded = sample();
        // G1 bytes where a G2 share is expected.
        let err =
            decode::<PairingEngine>(&encoded.commitment_hex, &encoded.commitment_hex, 1)
                .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidGroupElement {
                field: EncodingField::Share,
                ..
            }
        ));

        let err = decode::<PairingEngine>(&encoded.share_hex, &encoded.share_hex, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidGroupElement {
                field: EncodingField::Commitment,
                ..
            }
        ));
    }

    #[test]
    fn identity_points_are_rejected() {
        let identity_share = hex::encode(CurvePoint::to_bytes(&<G2 as CurvePoint<Fr>>::identity()));
        let identity_commitment =
            hex::encode(CurvePoint::to_bytes(&<G1 as CurvePoint<Fr>>::identity()));
        let err =
            decode::<PairingEngine>(&identity_share, &identity_commitment, 1).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidGroupElement {
                field: EncodingField::Share,
                ..
            }
        ));
    }
}
