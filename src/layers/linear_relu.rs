use crate::{Error, Param, Result, Tensor};
use ndarray::{Ix1, Ix2, IxDyn};

/// Affine transform with a baked-in rectifier: `relu(x · W + b)`.
///
/// Weight `(in_units, out_units)` and bias `(out_units,)` are sampled
/// from a standard normal at construction. The forward pass reads the
/// raw parameter values; there is no gradient tracking here.
#[derive(Debug, Clone)]
pub struct LinearRelu {
    name: String,
    weight: Param,
    bias: Param,
    in_units: usize,
    out_units: usize,
}

impl LinearRelu {
    pub fn new(name: String, in_units: usize, out_units: usize) -> Result<Self> {
        Self::build(name, in_units, out_units, None)
    }

    /// Reproducible construction: `seed` fixes the weight sampler, the
    /// bias uses `seed + 1` so the two draws stay independent.
    pub fn seeded(name: String, in_units: usize, out_units: usize, seed: u64) -> Result<Self> {
        Self::build(name, in_units, out_units, Some(seed))
    }

    fn build(
        name: String,
        in_units: usize,
        out_units: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        if in_units == 0 || out_units == 0 {
            return Err(Error::Layer(format!(
                "LinearRelu requires positive dimensions, got in={} out={}",
                in_units, out_units
            )));
        }

        let weight = Param::randn("weight".to_string(), &[in_units, out_units], seed);
        let bias = Param::randn("bias".to_string(), &[out_units], seed.map(|s| s + 1));

        Ok(Self {
            name,
            weight,
            bias,
            in_units,
            out_units,
        })
    }

    pub fn in_units(&self) -> usize {
        self.in_units
    }

    pub fn out_units(&self) -> usize {
        self.out_units
    }
}

impl super::Layer for LinearRelu {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let input_2d = input
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| Error::ShapeMismatch {
                expected: vec![0, self.in_units],
                actual: input.shape().to_vec(),
            })?;

        if input_2d.ncols() != self.in_units {
            return Err(Error::ShapeMismatch {
                expected: vec![input_2d.nrows(), self.in_units],
                actual: input.shape().to_vec(),
            });
        }

        let weight = self
            .weight
            .value()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|e| Error::Layer(format!("Weight view failed: {}", e)))?;
        let bias = self
            .bias
            .value()
            .view()
            .into_dimensionality::<Ix1>()
            .map_err(|e| Error::Layer(format!("Bias view failed: {}", e)))?;

        let mut output = input_2d.dot(&weight);
        output += &bias;
        output.mapv_inplace(|x| x.max(0.0));

        let output_dyn = output
            .into_shape_with_order(IxDyn(&[input_2d.nrows(), self.out_units]))
            .map_err(|e| Error::Layer(format!("Reshape failed: {}", e)))?;

        Ok(Tensor::new(output_dyn))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        if input_shape.len() != 2 || input_shape[1] != self.in_units {
            return Err(Error::ShapeMismatch {
                expected: vec![0, self.in_units],
                actual: input_shape.to_vec(),
            });
        }
        Ok(vec![input_shape[0], self.out_units])
    }

    fn parameters(&self) -> Vec<&Param> {
        vec![&self.weight, &self.bias]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.weight, &mut self.bias]
    }
}
