use approx::assert_abs_diff_eq;
use nanolayers::layers::{Bilinear, Centered, FourierHalf, Layer, LinearRelu};
use nanolayers::{Error, Tensor};
use rustfft::num_complex::Complex;

#[test]
fn test_centered_zero_mean_any_shape() {
    let layer = Centered::new("center".to_string());

    for shape in [vec![6], vec![2, 3], vec![1, 2, 3]] {
        let input = Tensor::from_vec((1..=6).map(|i| i as f32 * 1.7).collect(), &shape).unwrap();
        let output = layer.forward(&input).unwrap();

        assert_eq!(output.shape(), shape.as_slice());
        let mean: f32 = output.to_vec().iter().sum::<f32>() / 6.0;
        assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-6);
    }
}

#[test]
fn test_centered_is_exact_subtraction() {
    let layer = Centered::new("center".to_string());

    let values = vec![10.0f32, -4.0, 3.5, 0.5];
    let input = Tensor::from_vec(values.clone(), &[4]).unwrap();
    let output = layer.forward(&input).unwrap();

    let mean = input.data().mean().unwrap();
    for (got, x) in output.to_vec().iter().zip(values.iter()) {
        assert_eq!(*got, x - mean);
    }
}

#[test]
fn test_centered_empty_input_rejected() {
    let layer = Centered::new("center".to_string());
    let result = layer.forward(&Tensor::zeros(&[0, 3]));
    assert!(matches!(result, Err(Error::DegenerateInput(_))));
}

#[test]
fn test_linear_relu_shape_and_sign() {
    let layer = LinearRelu::seeded("dense".to_string(), 5, 3, 21).unwrap();

    let input = Tensor::from_vec((0..10).map(|i| (i as f32) - 4.5).collect(), &[2, 5]).unwrap();
    let output = layer.forward(&input).unwrap();

    assert_eq!(output.shape(), &[2, 3]);
    assert!(output.to_vec().iter().all(|&v| v >= 0.0));
}

#[test]
fn test_linear_relu_matches_independent_computation() {
    let layer = LinearRelu::seeded("dense".to_string(), 5, 3, 21).unwrap();
    let params = layer.parameters();
    let w = params[0].value().clone();
    let b = params[1].value().clone();

    let x: Vec<f32> = (0..10).map(|i| (i as f32) * 0.3 - 1.2).collect();
    let input = Tensor::from_vec(x.clone(), &[2, 5]).unwrap();
    let output = layer.forward(&input).unwrap();

    for n in 0..2 {
        for k in 0..3 {
            let mut pre = b[[k]];
            for i in 0..5 {
                pre += x[n * 5 + i] * w[[i, k]];
            }
            assert_abs_diff_eq!(output.to_vec()[n * 3 + k], pre.max(0.0), epsilon = 1e-5);
        }
    }
}

#[test]
fn test_linear_relu_seeding_is_reproducible() {
    let a = LinearRelu::seeded("dense".to_string(), 4, 4, 77).unwrap();
    let b = LinearRelu::seeded("dense".to_string(), 4, 4, 77).unwrap();

    assert_eq!(a.parameters()[0].value(), b.parameters()[0].value());
    assert_eq!(a.parameters()[1].value(), b.parameters()[1].value());
}

#[test]
fn test_linear_relu_parameter_ordering() {
    let layer = LinearRelu::seeded("dense".to_string(), 5, 3, 1).unwrap();
    let params = layer.parameters();

    assert_eq!(params.len(), 2);
    assert_eq!(params[0].name(), "weight");
    assert_eq!(params[0].shape(), &[5, 3]);
    assert_eq!(params[1].name(), "bias");
    assert_eq!(params[1].shape(), &[3]);
}

#[test]
fn test_linear_relu_shape_mismatch() {
    let layer = LinearRelu::seeded("dense".to_string(), 5, 3, 1).unwrap();

    let input = Tensor::from_vec(vec![1.0; 8], &[2, 4]).unwrap();
    assert!(matches!(
        layer.forward(&input),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn test_bilinear_shape() {
    let layer = Bilinear::seeded("reduce".to_string(), 4, 2, 13).unwrap();

    let input = Tensor::from_vec((0..12).map(|i| i as f32 * 0.1).collect(), &[3, 4]).unwrap();
    let output = layer.forward(&input).unwrap();

    assert_eq!(output.shape(), &[3, 2]);
}

#[test]
fn test_bilinear_matches_double_summation() {
    let layer = Bilinear::seeded("reduce".to_string(), 4, 2, 13).unwrap();
    let w = layer.parameters()[0].value().clone();

    let x: Vec<f32> = (0..12).map(|i| (i as f32) * 0.25 - 1.0).collect();
    let input = Tensor::from_vec(x.clone(), &[3, 4]).unwrap();
    let output = layer.forward(&input).unwrap();

    for n in 0..3 {
        for k in 0..2 {
            let mut expected = 0.0f32;
            for i in 0..4 {
                for j in 0..4 {
                    expected += w[[i, j, k]] * x[n * 4 + i] * x[n * 4 + j];
                }
            }
            assert_abs_diff_eq!(output.to_vec()[n * 2 + k], expected, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_fourier_half_length_eight() {
    let layer = FourierHalf::new("fft".to_string());

    let row = [0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let input = Tensor::from_vec(row.to_vec(), &[1, 8]).unwrap();
    let spectrum = layer.transform(&input).unwrap();

    assert_eq!(spectrum.dim(), (1, 4));

    // Bin 0 of an unnormalized forward DFT is the plain sum.
    assert_abs_diff_eq!(spectrum[[0, 0]].re, 28.0, epsilon = 1e-5);
    assert_abs_diff_eq!(spectrum[[0, 0]].im, 0.0, epsilon = 1e-5);

    // Check every kept bin against a direct evaluation.
    for k in 0..4 {
        let mut expected = Complex::new(0.0f32, 0.0);
        for (j, &x) in row.iter().enumerate() {
            let angle = -2.0 * std::f32::consts::PI * (k * j) as f32 / 8.0;
            expected += Complex::new(x * angle.cos(), x * angle.sin());
        }
        assert_abs_diff_eq!(spectrum[[0, k]].re, expected.re, epsilon = 1e-4);
        assert_abs_diff_eq!(spectrum[[0, k]].im, expected.im, epsilon = 1e-4);
    }
}

#[test]
fn test_fourier_rejects_single_sample() {
    let layer = FourierHalf::new("fft".to_string());

    let input = Tensor::from_vec(vec![1.0], &[1, 1]).unwrap();
    assert!(matches!(
        layer.forward(&input),
        Err(Error::DegenerateInput(_))
    ));
    assert!(layer.output_shape(&[1, 1]).is_err());
}

#[test]
fn test_fourier_odd_length_keeps_floor_half() {
    let layer = FourierHalf::new("fft".to_string());

    let input = Tensor::from_vec(vec![1.0; 7], &[1, 7]).unwrap();
    let spectrum = layer.transform(&input).unwrap();
    assert_eq!(spectrum.dim(), (1, 3));
    assert_eq!(layer.output_shape(&[1, 7]).unwrap(), vec![1, 3, 2]);
}
