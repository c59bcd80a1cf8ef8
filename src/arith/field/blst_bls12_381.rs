//! blst-backed scalar field for BLS12-381.
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::Scalar;
use ff::Field;
use rand_core::RngCore;

use crate::{BackendError, FieldElement};

pub type Fr = Scalar;

impl FieldElement for Scalar {
    fn one() -> Self {
        Scalar::ONE
    }

    fn is_zero(&self) -> bool {
        Field::is_zero(self).into()
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <Scalar as Field>::random(rng)
    }

    fn batch_inversion(elements: &mut [Self]) -> Result<(), BackendError> {
        use ff::BatchInvert;

        if elements.is_empty() {
            return Ok(());
        }

        if elements.iter().any(|elem| bool::from(Field::is_zero(elem))) {
            return Err(BackendError::Math("cannot invert zero element"));
        }

        // Montgomery's trick
        elements.iter_mut().batch_invert();

        Ok(())
    }

    fn from_u64(n: u64) -> Self {
        Scalar::from(n)
    }
}
