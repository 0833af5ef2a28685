use std::path::Path;

use crate::{layers::Layer, Error, Result, Tensor};

/// Ordered pipeline of layers. Each layer's output feeds the next
/// layer's input; the container owns its layers and nothing else.
#[derive(Debug)]
pub struct Sequential {
    name: String,
    layers: Vec<Box<dyn Layer>>,
}

impl Sequential {
    pub fn new(name: String) -> Self {
        Self {
            name,
            layers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, layer: Box<dyn Layer>) {
        self.layers.push(layer);
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    pub(crate) fn layers(&self) -> &[Box<dyn Layer>] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Box<dyn Layer>] {
        &mut self.layers
    }

    pub fn predict(&self, input: &Tensor) -> Result<Tensor> {
        if self.layers.is_empty() {
            return Err(Error::Model(
                "Cannot predict with an empty model".to_string(),
            ));
        }

        let mut current = input.clone();

        for (idx, layer) in self.layers.iter().enumerate() {
            current = layer
                .forward(&current)
                .map_err(|e| Error::Layer(format!("Layer {} ({}): {}", idx, layer.name(), e)))?;
        }

        Ok(current)
    }

    pub fn output_shape(&self, input_shape: &[usize]) -> Result<Vec<usize>> {
        let mut current_shape = input_shape.to_vec();

        for layer in &self.layers {
            current_shape = layer.output_shape(&current_shape)?;
        }

        Ok(current_shape)
    }

    pub fn summary(&self, input_shape: &[usize]) -> String {
        let mut s = String::new();
        s.push_str(&format!("Model: {}\n", self.name));
        s.push_str("_________________________________________________________________\n");
        s.push_str("Layer (type)                 Output Shape              Params\n");
        s.push_str("=================================================================\n");

        let mut current_shape = input_shape.to_vec();

        for layer in &self.layers {
            current_shape = match layer.output_shape(&current_shape) {
                Ok(shape) => shape,
                Err(_) => vec![],
            };

            let param_count: usize = layer
                .parameters()
                .iter()
                .map(|p| p.value().len())
                .sum();

            s.push_str(&format!(
                "{:28} {:<25} {}\n",
                layer.name(),
                format!("{:?}", current_shape),
                param_count
            ));
        }

        s.push_str("=================================================================\n");
        s.push_str(&format!("Total layers: {}\n", self.layers.len()));

        s
    }

    /// Writes every layer's named parameters to a JSON state file.
    pub fn save_state<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        super::state::save_state(self, path.as_ref())
    }

    /// Restores parameter values from a state file written by
    /// [`Sequential::save_state`]. Layer order, names, and shapes must
    /// match the current model exactly.
    pub fn load_state<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        super::state::load_state(self, path.as_ref())
    }
}
