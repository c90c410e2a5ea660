#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

//! # facesim
//!
//! Compare two face images by the cosine similarity of their embeddings,
//! produced by an ONNX face-recognition model such as ArcFace.
//!
//! The pipeline has three stages:
//!
//! - **Preprocessing**: decode, coerce to RGB, resize to the model's input
//!   shape, and normalize into a (1, C, H, W) tensor
//! - **Inference**: feed the tensor through the model to obtain an embedding
//!   vector ([`Embedder`] is the seam for substituting engines)
//! - **Similarity**: cosine similarity between the two embeddings
//!
//! Basic usage:
//! ```rust,no_run
//! use facesim::{compare_images, Normalization, Result};
//!
//! fn main() -> Result<()> {
//!     let score = compare_images(
//!         "arcface.onnx",
//!         "face_a.jpg",
//!         "face_b.jpg",
//!         &Normalization::default(),
//!     )?;
//!     println!("Cosine similarity: {}", score);
//!     Ok(())
//! }
//! ```

// Internal modules
pub mod core;
/// Defines the application's error types and result aliases.
pub mod error;

// Public API exports
pub use crate::{
    core::model::{Embedder, OnnxEmbedder},
    core::preprocess::{preprocess_file, preprocess_image, InputShape, Normalization},
    core::similarity::cosine_similarity,
    error::{AppError, Result},
};

use std::path::Path;

/// Initialize the application with default settings
///
/// This function sets up logging. It should be called early in the
/// application startup process, before any pipeline work.
pub fn init() {
    let env = env_logger::Env::default()
        .default_filter_or("info")
        .default_write_style_or("auto");

    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_module_path(false)
        .format_target(false)
        .init();

    log::debug!("facesim initialized");
}

/// Compare two images with an already-loaded embedder.
///
/// Each image runs through an identical, independent preprocess + inference
/// pass; the embedder is the only shared state and is reused for both calls.
///
/// # Errors
///
/// Propagates preprocessing and inference failures, and fails if either
/// embedding has zero magnitude.
pub fn compare_with_embedder<E: Embedder, P: AsRef<Path>>(
    embedder: &mut E,
    shape: InputShape,
    norm: &Normalization,
    image1: P,
    image2: P,
) -> Result<f32> {
    let tensor1 = preprocess_file(&image1, shape, norm)?;
    let embedding1 = embedder.embed(&tensor1)?;

    let tensor2 = preprocess_file(&image2, shape, norm)?;
    let embedding2 = embedder.embed(&tensor2)?;

    cosine_similarity(&embedding1, &embedding2)
}

/// Load an ONNX model and compare two images end to end.
///
/// This is the convenience entry point for the whole pipeline: the model is
/// loaded once, its declared input shape is honored, and both images are
/// processed sequentially.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, either image cannot be
/// decoded, or inference fails.
pub fn compare_images<P: AsRef<Path>>(
    model_path: P,
    image1: P,
    image2: P,
    norm: &Normalization,
) -> Result<f32> {
    let mut embedder = OnnxEmbedder::load(model_path)?;
    let shape = embedder.input_shape()?;
    compare_with_embedder(&mut embedder, shape, norm, image1, image2)
}
