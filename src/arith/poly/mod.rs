//! Univariate polynomials over the scalar field.
//!
//! Polynomials are represented in **coefficient form** with coefficients in
//! ascending order: `p(x) = c_0 + c_1*x + ... + c_n*x^n` is stored as
//! `[c_0, c_1, ..., c_n]`. The dealer uses them to split a master secret,
//! where `c_0` is the secret and each party receives `p(index)`.
//!
//! # Example
//!
//! ```rust
//! use keyshare::{DensePolynomial, FieldElement, Fr, Polynomial};
//!
//! // p(x) = 1 + 2x + 3x^2
//! let coeffs = vec![Fr::from_u64(1), Fr::from_u64(2), Fr::from_u64(3)];
//! let poly = DensePolynomial::from_coefficients_vec(coeffs);
//!
//! assert_eq!(poly.evaluate(&Fr::from_u64(2)), Fr::from_u64(17));
//! assert_eq!(poly.degree(), 2);
//! ```

use std::fmt::Debug;

use crate::FieldElement;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::DensePolynomial;

/// Polynomial interface for univariate polynomials.
pub trait Polynomial<F: FieldElement>: Clone + Send + Sync + Debug + 'static {
    /// Returns the degree of this polynomial.
    fn degree(&self) -> usize;

    /// Returns the coefficients in ascending order (constant term first).
    fn coeffs(&self) -> &[F];

    /// Evaluates the polynomial at the given point using Horner's method.
    fn evaluate(&self, point: &F) -> F;

    /// Constructs a polynomial from its coefficients (ascending order).
    fn from_coefficients_vec(coeffs: Vec<F>) -> Self;
}
