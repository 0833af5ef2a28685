use crate::{Error, Param, Result, Tensor};
use ndarray::{Array2, Axis, Ix2, Ix3, IxDyn};

/// Bilinear tensor reduction: for each output channel `k`,
/// `y[n,k] = sum_ij W[i,j,k] * x[n,i] * x[n,j]`.
///
/// Owns one weight tensor of shape `(input_dim, input_dim, output_dim)`,
/// standard-normal initialized. No activation. The contraction is done
/// channel by channel as `(x · W[..,..,k]) · x`, which matches the naive
/// double sum in floating point up to summation order.
#[derive(Debug, Clone)]
pub struct Bilinear {
    name: String,
    weight: Param,
    input_dim: usize,
    output_dim: usize,
}

impl Bilinear {
    pub fn new(name: String, input_dim: usize, output_dim: usize) -> Result<Self> {
        Self::build(name, input_dim, output_dim, None)
    }

    pub fn seeded(name: String, input_dim: usize, output_dim: usize, seed: u64) -> Result<Self> {
        Self::build(name, input_dim, output_dim, Some(seed))
    }

    fn build(
        name: String,
        input_dim: usize,
        output_dim: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        if input_dim == 0 || output_dim == 0 {
            return Err(Error::Layer(format!(
                "Bilinear requires positive dimensions, got in={} out={}",
                input_dim, output_dim
            )));
        }

        let weight = Param::randn(
            "weight".to_string(),
            &[input_dim, input_dim, output_dim],
            seed,
        );

        Ok(Self {
            name,
            weight,
            input_dim,
            output_dim,
        })
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }
}

impl super::Layer for Bilinear {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let input_2d = input
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| Error::ShapeMismatch {
                expected: vec![0, self.input_dim],
                actual: input.shape().to_vec(),
            })?;

        if input_2d.ncols() != self.input_dim {
            return Err(Error::ShapeMismatch {
                expected: vec![input_2d.nrows(), self.input_dim],
                actual: input.shape().to_vec(),
            });
        }

        let weight = self
            .weight
            .value()
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| Error::Layer(format!("Weight view failed: {}", e)))?;

        let batch = input_2d.nrows();
        let mut output = Array2::<f32>::zeros((batch, self.output_dim));

        for k in 0..self.output_dim {
            let wk = weight.index_axis(Axis(2), k);
            // (batch, d) · (d, d) -> (batch, d), then row-wise dot with x.
            let projected = input_2d.dot(&wk);
            let channel = (&projected * &input_2d).sum_axis(Axis(1));
            output.column_mut(k).assign(&channel);
        }

        let output_dyn = output
            .into_shape_with_order(IxDyn(&[batch, self.output_dim]))
            .map_err(|e| Error::Layer(format!("Reshape failed: {}", e)))?;

        Ok(Tensor::new(output_dyn))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        if input_shape.len() != 2 || input_shape[1] != self.input_dim {
            return Err(Error::ShapeMismatch {
                expected: vec![0, self.input_dim],
                actual: input_shape.to_vec(),
            });
        }
        Ok(vec![input_shape[0], self.output_dim])
    }

    fn parameters(&self) -> Vec<&Param> {
        vec![&self.weight]
    }

    fn parameters_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.weight]
    }
}

#[cfg(test)]
mod tests {
    use super::super::Layer;
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::ArrayD;

    #[test]
    fn test_output_shape() {
        let layer = Bilinear::seeded("reduce".to_string(), 4, 2, 3).unwrap();
        let input = Tensor::from_vec((0..12).map(|i| i as f32).collect(), &[3, 4]).unwrap();
        let output = layer.forward(&input).unwrap();
        assert_eq!(output.shape(), &[3, 2]);
    }

    #[test]
    fn test_all_ones_weight_hand_example() {
        // With W all ones and x = [1, 2], y_k = (1 + 2)^2 = 9 for each k.
        let mut layer = Bilinear::seeded("reduce".to_string(), 2, 2, 0).unwrap();
        layer.parameters_mut()[0]
            .set_value(ArrayD::ones(IxDyn(&[2, 2, 2])))
            .unwrap();

        let input = Tensor::from_vec(vec![1.0, 2.0], &[1, 2]).unwrap();
        let output = layer.forward(&input).unwrap();

        assert_eq!(output.shape(), &[1, 2]);
        for v in output.to_vec() {
            assert_abs_diff_eq!(v, 9.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_matches_double_loop() {
        let layer = Bilinear::seeded("reduce".to_string(), 3, 2, 9).unwrap();
        let w = layer.weight.value().clone();

        let x = [[0.5f32, -1.0, 2.0], [1.5, 0.0, -0.5]];
        let input = Tensor::from_vec(x.iter().flatten().copied().collect(), &[2, 3]).unwrap();
        let output = layer.forward(&input).unwrap();

        for n in 0..2 {
            for k in 0..2 {
                let mut expected = 0.0f32;
                for i in 0..3 {
                    for j in 0..3 {
                        expected += w[[i, j, k]] * x[n][i] * x[n][j];
                    }
                }
                assert_abs_diff_eq!(output.to_vec()[n * 2 + k], expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_wrong_input_dim() {
        let layer = Bilinear::seeded("reduce".to_string(), 4, 2, 1).unwrap();
        let input = Tensor::from_vec(vec![1.0; 6], &[2, 3]).unwrap();
        assert!(matches!(
            layer.forward(&input),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
