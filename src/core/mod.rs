//! Core functionality for the image comparison pipeline

/// Wraps the ONNX inference engine behind the [`Embedder`](model::Embedder) seam.
pub mod model;
/// Converts decoded images into normalized model input tensors.
pub mod preprocess;
/// Provides the cosine similarity metric over embedding vectors.
pub mod similarity;
