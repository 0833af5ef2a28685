use crate::{Error, Result, Tensor};
use ndarray::{Array2, Array3, Ix2, IxDyn};
use rustfft::{num_complex::Complex, FftPlanner};

/// Forward DFT along the last axis, keeping only the first `floor(n/2)`
/// frequency bins. Standard unnormalized convention. No parameters.
///
/// Input is real-valued, shape `(batch, n)` with `n >= 2`. The complex
/// half-spectrum is available directly from [`FourierHalf::transform`];
/// the [`Layer`](super::Layer) forward packs real and imaginary parts
/// into a trailing axis of size 2, shape `(batch, n/2, 2)`, so the layer
/// stays composable in a real-valued pipeline.
#[derive(Debug, Clone)]
pub struct FourierHalf {
    name: String,
}

impl FourierHalf {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    /// Half-spectrum of each row as complex coefficients.
    pub fn transform(&self, input: &Tensor) -> Result<Array2<Complex<f32>>> {
        let input_2d = input
            .data()
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| Error::ShapeMismatch {
                expected: vec![0, 2],
                actual: input.shape().to_vec(),
            })?;

        let n = input_2d.ncols();
        if n < 2 {
            return Err(Error::DegenerateInput(format!(
                "Fourier transform needs at least 2 samples per row, got {}",
                n
            )));
        }

        let half = n / 2;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);

        let mut output = Array2::<Complex<f32>>::zeros((input_2d.nrows(), half));
        let mut buffer: Vec<Complex<f32>> = Vec::with_capacity(n);

        for (row_idx, row) in input_2d.rows().into_iter().enumerate() {
            buffer.clear();
            buffer.extend(row.iter().map(|&x| Complex::new(x, 0.0)));
            fft.process(&mut buffer);

            for (col_idx, coeff) in buffer.iter().take(half).enumerate() {
                output[[row_idx, col_idx]] = *coeff;
            }
        }

        Ok(output)
    }
}

impl super::Layer for FourierHalf {
    fn forward(&self, input: &Tensor) -> Result<Tensor> {
        let spectrum = self.transform(input)?;
        let (batch, half) = spectrum.dim();

        let mut packed = Array3::<f32>::zeros((batch, half, 2));
        for ((n, k), coeff) in spectrum.indexed_iter() {
            packed[[n, k, 0]] = coeff.re;
            packed[[n, k, 1]] = coeff.im;
        }

        let output_dyn = packed
            .into_shape_with_order(IxDyn(&[batch, half, 2]))
            .map_err(|e| Error::Layer(format!("Reshape failed: {}", e)))?;

        Ok(Tensor::new(output_dyn))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        if input_shape.len() != 2 {
            return Err(Error::ShapeMismatch {
                expected: vec![0, 2],
                actual: input_shape.to_vec(),
            });
        }
        if input_shape[1] < 2 {
            return Err(Error::DegenerateInput(format!(
                "Fourier transform needs at least 2 samples per row, got {}",
                input_shape[1]
            )));
        }
        Ok(vec![input_shape[0], input_shape[1] / 2, 2])
    }
}
