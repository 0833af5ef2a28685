//! # nanolayers
//!
//! A minimal-size Rust library of hand-rolled neural network layers:
//! mean-centering, linear + ReLU with owned parameters, a bilinear
//! tensor reduction, and a half-spectrum Fourier transform. Forward
//! passes only - no training, no autograd.
//!
//! ## Example
//!
//! ```rust
//! use nanolayers::{layers::LinearRelu, Sequential, Tensor};
//!
//! let mut model = Sequential::new("demo".to_string());
//! model.add(Box::new(LinearRelu::seeded("hidden".to_string(), 4, 8, 7).unwrap()));
//! model.add(Box::new(LinearRelu::seeded("head".to_string(), 8, 1, 8).unwrap()));
//!
//! let input = Tensor::from_vec(vec![0.5; 8], &[2, 4]).unwrap();
//! let output = model.predict(&input).unwrap();
//! assert_eq!(output.shape(), &[2, 1]);
//! ```

pub mod error;
pub mod layers;
pub mod model;
pub mod param;
pub mod tensor;

pub use error::{Error, Result};
pub use model::Sequential;
pub use param::Param;
pub use tensor::Tensor;
