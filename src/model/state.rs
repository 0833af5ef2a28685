//! Explicit parameter persistence. No reflection: the state file is a
//! plain JSON listing of each layer's named parameter arrays, restored
//! positionally with name and shape checks.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use super::Sequential;
use crate::{Error, Result};

#[derive(Serialize, Deserialize)]
struct ParamRecord {
    name: String,
    shape: Vec<usize>,
    data: Vec<f32>,
}

#[derive(Serialize, Deserialize)]
struct LayerRecord {
    name: String,
    params: Vec<ParamRecord>,
}

#[derive(Serialize, Deserialize)]
struct ModelState {
    model: String,
    layers: Vec<LayerRecord>,
}

pub(super) fn save_state(model: &Sequential, path: &Path) -> Result<()> {
    let layers = model
        .layers()
        .iter()
        .map(|layer| LayerRecord {
            name: layer.name().to_string(),
            params: layer
                .parameters()
                .iter()
                .map(|p| ParamRecord {
                    name: p.name().to_string(),
                    shape: p.shape().to_vec(),
                    data: p.value().iter().copied().collect(),
                })
                .collect(),
        })
        .collect();

    let state = ModelState {
        model: model.name().to_string(),
        layers,
    };

    let file = File::create(path)?;
    serde_json::to_writer(BufWriter::new(file), &state)?;
    Ok(())
}

pub(super) fn load_state(model: &mut Sequential, path: &Path) -> Result<()> {
    let file = File::open(path)?;
    let state: ModelState = serde_json::from_reader(BufReader::new(file))?;

    if state.layers.len() != model.num_layers() {
        return Err(Error::State(format!(
            "State file has {} layers, model has {}",
            state.layers.len(),
            model.num_layers()
        )));
    }

    for (layer, record) in model.layers_mut().iter_mut().zip(state.layers.iter()) {
        if layer.name() != record.name {
            return Err(Error::State(format!(
                "Layer name mismatch: model has '{}', state file has '{}'",
                layer.name(),
                record.name
            )));
        }

        let layer_name = layer.name().to_string();
        let mut params = layer.parameters_mut();
        if params.len() != record.params.len() {
            return Err(Error::State(format!(
                "Layer '{}' has {} parameters, state file has {}",
                layer_name,
                params.len(),
                record.params.len()
            )));
        }

        for (param, saved) in params.iter_mut().zip(record.params.iter()) {
            if param.name() != saved.name {
                return Err(Error::State(format!(
                    "Parameter name mismatch in layer '{}': '{}' vs '{}'",
                    layer_name,
                    param.name(),
                    saved.name
                )));
            }

            let value = ArrayD::from_shape_vec(IxDyn(&saved.shape), saved.data.clone())
                .map_err(|e| Error::State(format!("Malformed state data: {}", e)))?;
            param.set_value(value)?;
        }
    }

    Ok(())
}
