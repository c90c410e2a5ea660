//! Cosine similarity over embedding vectors.

use ndarray::ArrayView1;

use crate::error::{AppError, Result};

/// Compute the cosine similarity between two embedding vectors.
///
/// The result is `dot(a, b) / (|a| * |b|)`, clamped to `[-1, 1]` to absorb
/// floating-point drift.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] if the vectors differ in length or if
/// either has zero magnitude (the angle is undefined in that case, and a NaN
/// would print as a legitimate-looking score).
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(AppError::InvalidInput(format!(
            "embedding lengths differ: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Err(AppError::InvalidInput(
            "embeddings are empty".to_string(),
        ));
    }

    let a = ArrayView1::from(a);
    let b = ArrayView1::from(b);

    let dot_product = a.dot(&b);
    let norm_a = a.dot(&a).sqrt();
    let norm_b = b.dot(&b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(AppError::InvalidInput(
            "embedding has zero magnitude".to_string(),
        ));
    }

    Ok((dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn test_identical_vectors() {
        let v = vec![0.3, -1.2, 4.5, 0.01];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_symmetry() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-4.0, 0.5, 2.0];
        assert_eq!(
            cosine_similarity(&a, &b).unwrap(),
            cosine_similarity(&b, &a).unwrap()
        );
    }

    #[test]
    fn test_orthogonal_vectors() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < TOLERANCE);
    }

    #[test]
    fn test_opposite_vectors() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_zero_magnitude_is_error() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).is_err());
        assert!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_length_mismatch_is_error() {
        assert!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn test_empty_is_error() {
        assert!(cosine_similarity(&[], &[]).is_err());
    }
}
