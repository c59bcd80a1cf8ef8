use std::fmt::Debug;

use rand_core::RngCore;

use crate::BackendError;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::Fr;

/// Field element abstraction for scalar field operations.
///
/// This trait abstracts over the scalar field Fr of the elliptic curve,
/// providing the operations needed to weight key shares during threshold
/// reconstruction and to split secrets in the dealer.
///
/// # Example
///
/// ```rust,no_run
/// use rand::thread_rng;
/// use keyshare::{FieldElement, Fr};
///
/// let mut rng = thread_rng();
/// let mut values = vec![Fr::random(&mut rng), Fr::from_u64(7)];
///
/// // Montgomery's trick: one inversion for the whole slice
/// Fr::batch_inversion(&mut values).expect("non-zero elements");
/// ```
pub trait FieldElement: Clone + Send + Sync + Debug + 'static + Copy {
    /// Returns the multiplicative identity (one) element.
    fn one() -> Self;

    /// Returns `true` for the additive identity.
    fn is_zero(&self) -> bool;

    /// Generates a random field element using the provided RNG.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Performs batch inversion of a slice of field elements.
    fn batch_inversion(elements: &mut [Self]) -> Result<(), BackendError>;

    /// Convert u64 to self.
    fn from_u64(n: u64) -> Self;
}
