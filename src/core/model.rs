//! ONNX inference engine adapter.
//!
//! The engine itself is opaque: it loads a serialized graph and maps input
//! tensors to output tensors. Everything downstream talks to the [`Embedder`]
//! trait so a different runtime (or a mock in tests) can be swapped in.

use std::path::Path;

use ndarray::Array4;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{Tensor, ValueType};

use crate::core::preprocess::InputShape;
use crate::error::{AppError, Result};

/// Spatial fallback when the model declares its height/width symbolically.
/// 112x112 is the ArcFace family convention.
const DEFAULT_SPATIAL_DIM: usize = 112;

/// Anything that can turn a preprocessed input tensor into an embedding
/// vector.
pub trait Embedder {
    /// Run inference on a (1, C, H, W) tensor and return the flattened
    /// embedding.
    fn embed(&mut self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// An ONNX Runtime session producing face embeddings.
pub struct OnnxEmbedder {
    session: Session,
    input_name: String,
    output_name: String,
}

impl std::fmt::Debug for OnnxEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbedder")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .finish()
    }
}

impl OnnxEmbedder {
    /// Load an ONNX model from a file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Inference`] if the file is missing or is not a
    /// valid ONNX graph.
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        log::info!("Loading ONNX model: {}", model_path.display());

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .commit_from_file(model_path)?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| AppError::ShapeMismatch("model declares no inputs".to_string()))?;
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| AppError::ShapeMismatch("model declares no outputs".to_string()))?;

        Ok(Self {
            session,
            input_name,
            output_name,
        })
    }

    /// The input shape the loaded model expects, without the batch dimension.
    ///
    /// Symbolic (dynamic) channel and spatial dimensions fall back to 3 and
    /// 112 respectively.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ShapeMismatch`] if the model input is not a 4-D
    /// tensor.
    pub fn input_shape(&self) -> Result<InputShape> {
        let input = self
            .session
            .inputs()
            .first()
            .ok_or_else(|| AppError::ShapeMismatch("model declares no inputs".to_string()))?;

        let dims: Vec<i64> = match input.dtype() {
            ValueType::Tensor { shape, .. } => shape.iter().copied().collect(),
            other => {
                return Err(AppError::ShapeMismatch(format!(
                    "model input '{}' is not a tensor: {:?}",
                    input.name(), other
                )))
            }
        };

        if dims.len() != 4 {
            return Err(AppError::ShapeMismatch(format!(
                "model input '{}' is {}-D, expected (batch, channels, height, width)",
                input.name(),
                dims.len()
            )));
        }

        let dim = |d: i64, fallback: usize| if d > 0 { d as usize } else { fallback };
        let shape = InputShape::new(
            dim(dims[1], 3),
            dim(dims[2], DEFAULT_SPATIAL_DIM),
            dim(dims[3], DEFAULT_SPATIAL_DIM),
        );

        log::debug!(
            "Model input '{}' shape: {}x{}x{}",
            input.name(),
            shape.channels,
            shape.height,
            shape.width
        );
        Ok(shape)
    }
}

impl Embedder for OnnxEmbedder {
    fn embed(&mut self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let tensor = Tensor::from_array(input.clone())?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor])?;

        let output = outputs.get(self.output_name.as_str()).ok_or_else(|| {
            AppError::ShapeMismatch(format!("model produced no output '{}'", self.output_name))
        })?;

        let (_shape, data) = output.try_extract_tensor::<f32>()?;
        log::debug!("Embedding dimensionality: {}", data.len());

        Ok(data.to_vec())
    }
}
