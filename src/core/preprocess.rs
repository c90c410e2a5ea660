//! Image preprocessing: file path or decoded image to a normalized NCHW tensor.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage};
use ndarray::Array4;

use crate::error::{AppError, Result};

/// The tensor shape a model expects for a single image, without the batch
/// dimension: (channels, height, width).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputShape {
    /// Number of color channels (must be 3)
    pub channels: usize,
    /// Spatial height in pixels
    pub height: usize,
    /// Spatial width in pixels
    pub width: usize,
}

impl InputShape {
    /// Create a new input shape
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
        }
    }
}

/// Pixel normalization parameters applied after decoding.
///
/// The default scales raw `u8` pixels by `1/255` into `[0, 1]` and applies no
/// mean/std shift. Models trained with channel statistics can supply them
/// here instead of baking a constant into the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalization {
    /// Multiplier applied to each raw pixel value
    pub scale: f32,
    /// Optional per-channel mean, subtracted after scaling
    pub mean: Option<[f32; 3]>,
    /// Optional per-channel standard deviation, divided after the mean shift
    pub std: Option<[f32; 3]>,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            scale: 1.0 / 255.0,
            mean: None,
            std: None,
        }
    }
}

impl Normalization {
    fn apply(&self, value: u8, channel: usize) -> f32 {
        let mut v = value as f32 * self.scale;
        if let Some(mean) = self.mean {
            v -= mean[channel];
        }
        if let Some(std) = self.std {
            v /= std[channel];
        }
        v
    }
}

/// Preprocess a decoded image into a model input tensor.
///
/// The image is coerced to 3-channel RGB (grayscale and alpha sources
/// included), resized exactly to the target spatial dimensions with bilinear
/// interpolation, normalized, and laid out as (1, C, H, W).
///
/// # Errors
///
/// Returns [`AppError::ShapeMismatch`] if the requested shape is not
/// 3-channel.
pub fn preprocess_image(
    img: &DynamicImage,
    shape: InputShape,
    norm: &Normalization,
) -> Result<Array4<f32>> {
    if shape.channels != 3 {
        return Err(AppError::ShapeMismatch(format!(
            "only 3-channel input is supported, model wants {}",
            shape.channels
        )));
    }

    let resized = img.resize_exact(shape.width as u32, shape.height as u32, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let mut tensor = Array4::<f32>::zeros((1, 3, shape.height, shape.width));
    for y in 0..shape.height {
        for x in 0..shape.width {
            let pixel = rgb.get_pixel(x as u32, y as u32);
            for c in 0..3 {
                tensor[[0, c, y, x]] = norm.apply(pixel[c], c);
            }
        }
    }

    Ok(tensor)
}

/// Decode an image file and preprocess it into a model input tensor.
///
/// # Errors
///
/// Returns [`AppError::Io`] if the file is missing or unreadable and
/// [`AppError::Image`] if it is not a decodable image.
pub fn preprocess_file<P: AsRef<Path>>(
    path: P,
    shape: InputShape,
    norm: &Normalization,
) -> Result<Array4<f32>> {
    let path = path.as_ref();
    log::debug!("Preprocessing image: {}", path.display());

    let data = std::fs::read(path)?;
    let img = image::load_from_memory(&data)?;
    preprocess_image(&img, shape, norm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn gradient_image(width: u32, height: u32) -> DynamicImage {
        let mut imgbuf = RgbImage::new(width, height);
        for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
            *pixel = image::Rgb([
                (x as f32 * 255.0 / width as f32) as u8,
                (y as f32 * 255.0 / height as f32) as u8,
                128,
            ]);
        }
        DynamicImage::ImageRgb8(imgbuf)
    }

    #[test]
    fn test_output_shape_and_range() {
        let img = gradient_image(37, 91);
        let shape = InputShape::new(3, 112, 112);
        let tensor = preprocess_image(&img, shape, &Normalization::default()).unwrap();

        assert_eq!(tensor.dim(), (1, 3, 112, 112));
        assert!(tensor.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_grayscale_coerced_to_rgb() {
        let img = DynamicImage::ImageLuma8(image::GrayImage::new(20, 20));
        let shape = InputShape::new(3, 64, 64);
        let tensor = preprocess_image(&img, shape, &Normalization::default()).unwrap();

        assert_eq!(tensor.dim(), (1, 3, 64, 64));
    }

    #[test]
    fn test_mean_std_normalization() {
        let img = gradient_image(8, 8);
        let shape = InputShape::new(3, 8, 8);
        let norm = Normalization {
            scale: 1.0 / 255.0,
            mean: Some([0.5, 0.5, 0.5]),
            std: Some([0.5, 0.5, 0.5]),
        };
        let tensor = preprocess_image(&img, shape, &norm).unwrap();

        // (v/255 - 0.5) / 0.5 maps [0, 1] onto [-1, 1]
        assert!(tensor.iter().all(|&v| (-1.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_rejects_non_rgb_shape() {
        let img = gradient_image(8, 8);
        let shape = InputShape::new(1, 8, 8);
        assert!(preprocess_image(&img, shape, &Normalization::default()).is_err());
    }
}
