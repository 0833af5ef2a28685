pub mod bilinear;
pub mod centered;
pub mod fourier;
pub mod linear_relu;

use crate::{Param, Result, Tensor};

/// A composable array-to-array transform.
///
/// The forward pass must be a deterministic function of the input and the
/// current parameter values; layers hold no other state. Layers with
/// parameters expose them as an ordered list so a caller can inspect,
/// update, or persist them explicitly.
pub trait Layer: std::fmt::Debug + Send + Sync {
    fn forward(&self, input: &Tensor) -> Result<Tensor>;
    fn name(&self) -> &str;
    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>>;

    fn parameters(&self) -> Vec<&Param> {
        Vec::new()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        Vec::new()
    }
}

pub use bilinear::Bilinear;
pub use centered::Centered;
pub use fourier::FourierHalf;
pub use linear_relu::LinearRelu;
