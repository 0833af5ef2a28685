use ndarray::{ArrayD, IxDyn};
use ndarray_rand::{rand_distr::Normal, RandomExt};
use rand::{rngs::StdRng, SeedableRng};

use crate::{Error, Result};

/// A named, mutable parameter array owned by exactly one layer.
///
/// Parameters are initialized once at layer construction and thereafter
/// only overwritten through [`Param::set_value`] or [`Param::value_mut`]
/// (e.g. by a state load). Nothing in this crate tracks gradients through
/// them.
#[derive(Clone, Debug)]
pub struct Param {
    name: String,
    value: ArrayD<f32>,
}

impl Param {
    pub fn new(name: String, value: ArrayD<f32>) -> Self {
        Self { name, value }
    }

    /// Standard-normal initialized parameter. `seed` fixes the sampler
    /// for reproducible construction.
    pub fn randn(name: String, shape: &[usize], seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let dist = Normal::new(0.0f32, 1.0).expect("valid normal parameters");
        let value = ArrayD::random_using(IxDyn(shape), dist, &mut rng);
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn value(&self) -> &ArrayD<f32> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut ArrayD<f32> {
        &mut self.value
    }

    /// Replaces the value, rejecting any shape change.
    pub fn set_value(&mut self, value: ArrayD<f32>) -> Result<()> {
        if value.shape() != self.value.shape() {
            return Err(Error::ShapeMismatch {
                expected: self.value.shape().to_vec(),
                actual: value.shape().to_vec(),
            });
        }
        self.value = value;
        Ok(())
    }
}
