use ff::Field;
use rand_core::RngCore;

use crate::{Fr, Polynomial};

#[derive(Clone, Debug)]
pub struct DensePolynomial {
    pub coeffs: Vec<Fr>,
}

impl Polynomial<Fr> for DensePolynomial {
    fn degree(&self) -> usize {
        if self.coeffs.len() == 1 && self.coeffs[0] == Fr::ZERO {
            0
        } else {
            self.coeffs.len().saturating_sub(1)
        }
    }

    fn coeffs(&self) -> &[Fr] {
        &self.coeffs
    }

    fn evaluate(&self, point: &Fr) -> Fr {
        let mut coeffs = self.coeffs.iter().rev();
        let Some(leading) = coeffs.next() else {
            return Fr::ZERO;
        };
        coeffs.fold(*leading, |acc, coeff| acc * point + coeff)
    }

    fn from_coefficients_vec(coeffs: Vec<Fr>) -> Self {
        DensePolynomial::from_coefficients_vec(coeffs)
    }
}

impl DensePolynomial {
    /// Create a dense polynomial from the provided coefficient vector.
    ///
    /// The coefficients are in ascending order (constant term first). The
    /// constructor trims leading zero coefficients to keep the representation
    /// canonical.
    pub fn from_coefficients_vec(coeffs: Vec<Fr>) -> Self {
        let mut poly = DensePolynomial { coeffs };
        poly.truncate_leading_zeros();
        poly
    }

    /// Samples a polynomial of exactly `degree` with the given constant term.
    pub fn random_with_constant<R: RngCore + ?Sized>(
        rng: &mut R,
        constant: Fr,
        degree: usize,
    ) -> Self {
        let mut coeffs = Vec::with_capacity(degree + 1);
        coeffs.push(constant);
        coeffs.extend((0..degree).map(|_| <Fr as Field>::random(&mut *rng)));
        if degree > 0 {
            while coeffs[degree] == Fr::ZERO {
                coeffs[degree] = <Fr as Field>::random(&mut *rng);
            }
        }
        Self { coeffs }
    }

    fn truncate_leading_zeros(&mut self) {
        while self.coeffs.len() > 1 && self.coeffs.last() == Some(&Fr::ZERO) {
            self.coeffs.pop();
        }
        if self.coeffs.is_empty() {
            self.coeffs.push(Fr::ZERO);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::FieldElement;

    #[test]
    fn random_with_constant_has_exact_degree() {
        let mut rng = StdRng::seed_from_u64(3);
        let secret = Fr::from_u64(5);
        let poly = DensePolynomial::random_with_constant(&mut rng, secret, 4);
        assert_eq!(poly.degree(), 4);
        assert_eq!(poly.evaluate(&Fr::ZERO), secret);
    }

    #[test]
    fn trims_leading_zeros() {
        let poly = DensePolynomial::from_coefficients_vec(vec![Fr::ONE, Fr::ZERO, Fr::ZERO]);
        assert_eq!(poly.degree(), 0);
        assert_eq!(poly.evaluate(&Fr::from_u64(9)), Fr::ONE);
    }
}
