//! Lagrange coefficients for threshold reconstruction.
//!
//! Shares are evaluations `f(x_i)` of a secret polynomial at distinct,
//! non-zero points `x_i` (the share indices). The secret is `f(0)`, which is
//! recovered as a weighted sum of the shares:
//!
//! ```text
//! f(0) = Σ_i λ_i · f(x_i),    λ_i = Π_{j≠i} x_j / (x_j - x_i)
//! ```
//!
//! The coefficients only depend on the *set* of participating points, so the
//! reconstruction does not depend on the order in which shares arrive.
//!
//! # Complexity
//!
//! - Time: O(k²) field multiplications for k participants plus a single
//!   batched inversion (Montgomery's trick)

use tracing::instrument;

use crate::{BackendError, FieldElement, Fr};

/// Computes `λ_i` for evaluating the interpolating polynomial at zero.
///
/// `points[i]` is the evaluation point of the i-th share; the returned vector
/// is aligned with `points`.
///
/// # Errors
///
/// - `BackendError::Math` if `points` is empty
/// - `BackendError::Math` if a point is zero or two points coincide
///
/// # Example
///
/// ```rust
/// use keyshare::{FieldElement, Fr, lagrange_coefficients_at_zero};
///
/// let points = [Fr::from_u64(1), Fr::from_u64(2)];
/// let coeffs = lagrange_coefficients_at_zero(&points).expect("distinct points");
///
/// // f(x) = 5 + 3x: f(1) = 8, f(2) = 11
/// let secret = coeffs[0] * Fr::from_u64(8) + coeffs[1] * Fr::from_u64(11);
/// assert_eq!(secret, Fr::from_u64(5));
/// ```
#[instrument(level = "trace", skip_all, fields(points = points.len()))]
pub fn lagrange_coefficients_at_zero(points: &[Fr]) -> Result<Vec<Fr>, BackendError> {
    if points.is_empty() {
        return Err(BackendError::Math("no interpolation points"));
    }
    if points.iter().any(<Fr as FieldElement>::is_zero) {
        return Err(BackendError::Math("interpolation point must be non-zero"));
    }

    let mut numerators = Vec::with_capacity(points.len());
    let mut denominators = Vec::with_capacity(points.len());
    for (i, x_i) in points.iter().enumerate() {
        let mut num = Fr::one();
        let mut den = Fr::one();
        for (j, x_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            num *= x_j;
            den *= *x_j - x_i;
        }
        numerators.push(num);
        denominators.push(den);
    }

    // A zero denominator means two points coincide.
    Fr::batch_inversion(&mut denominators)
        .map_err(|_| BackendError::Math("interpolation points must be distinct"))?;

    Ok(numerators
        .into_iter()
        .zip(denominators)
        .map(|(num, den_inv)| num * den_inv)
        .collect())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{DensePolynomial, Polynomial};

    #[test]
    fn reconstructs_constant_term() {
        let mut rng = StdRng::seed_from_u64(11);
        let secret = <Fr as FieldElement>::random(&mut rng);
        let poly = DensePolynomial::random_with_constant(&mut rng, secret, 2);

        let points: Vec<Fr> = [2u64, 5, 9].into_iter().map(Fr::from_u64).collect();
        let evals: Vec<Fr> = points.iter().map(|x| poly.evaluate(x)).collect();
        let coeffs = lagrange_coefficients_at_zero(&points).expect("coefficients");

        let recovered = coeffs
            .iter()
            .zip(evals.iter())
            .fold(Fr::from_u64(0), |acc, (l, y)| acc + *l * y);
        assert_eq!(recovered, secret);
    }

    #[test]
    fn single_point_has_unit_weight() {
        let coeffs = lagrange_coefficients_at_zero(&[Fr::from_u64(7)]).expect("coefficients");
        assert_eq!(coeffs, vec![Fr::one()]);
    }

    #[test]
    fn rejects_degenerate_points() {
        assert!(lagrange_coefficients_at_zero(&[]).is_err());
        assert!(lagrange_coefficients_at_zero(&[Fr::from_u64(0), Fr::one()]).is_err());
        assert!(lagrange_coefficients_at_zero(&[Fr::from_u64(3), Fr::from_u64(3)]).is_err());
    }
}
