use crate::{Error, Result, Tensor};

/// Subtracts the mean over all elements, so the output always averages
/// to zero. Works on any shape, keeps it unchanged. No parameters.
#[derive(Debug, Clone)]
pub struct Centered {
    name: String,
}

impl Centered {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

impl super::Layer for Centered {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let mean = input.data().mean().ok_or_else(|| {
            Error::DegenerateInput("Cannot center an empty array".to_string())
        })?;
        Ok(Tensor::new(input.data() - mean))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        Ok(input_shape.to_vec())
    }
}
