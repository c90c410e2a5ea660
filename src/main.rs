//! facesim CLI
//!
//! Loads an ONNX face-embedding model, runs it on two images, and prints the
//! cosine similarity of the resulting embeddings.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use facesim::{compare_with_embedder, init, Normalization, OnnxEmbedder};

/// Compare two face images with an ONNX embedding model
#[derive(Parser, Debug)]
#[command(name = "facesim", version, about)]
struct Cli {
    /// Path to the ONNX model
    model_path: PathBuf,

    /// Path to the first image
    image1_path: PathBuf,

    /// Path to the second image
    image2_path: PathBuf,

    /// Per-channel mean subtracted after scaling (e.g. 0.5,0.5,0.5)
    #[arg(long, value_delimiter = ',', value_name = "R,G,B")]
    mean: Option<Vec<f32>>,

    /// Per-channel standard deviation applied after the mean shift
    #[arg(long, value_delimiter = ',', value_name = "R,G,B")]
    std: Option<Vec<f32>>,
}

fn to_channels(name: &str, values: Option<Vec<f32>>) -> anyhow::Result<Option<[f32; 3]>> {
    match values {
        None => Ok(None),
        Some(v) => {
            let channels: [f32; 3] = v
                .try_into()
                .map_err(|_| anyhow::anyhow!("--{} requires exactly three values", name))?;
            Ok(Some(channels))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init();

    let norm = Normalization {
        mean: to_channels("mean", cli.mean)?,
        std: to_channels("std", cli.std)?,
        ..Normalization::default()
    };

    let mut embedder = OnnxEmbedder::load(&cli.model_path)
        .with_context(|| format!("failed to load model {}", cli.model_path.display()))?;
    let shape = embedder
        .input_shape()
        .context("failed to determine model input shape")?;

    log::info!(
        "Comparing {} and {}",
        cli.image1_path.display(),
        cli.image2_path.display()
    );

    let similarity = compare_with_embedder(
        &mut embedder,
        shape,
        &norm,
        &cli.image1_path,
        &cli.image2_path,
    )?;

    println!("Cosine similarity: {}", similarity);
    Ok(())
}
