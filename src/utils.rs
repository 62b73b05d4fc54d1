// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Utility functions for converting between images and dense pixel batches.

use image::RgbImage;
use ndarray::{Array4, ArrayView3, Axis};

use crate::error::{RenderError, Result};

/// Stack equally sized RGB images into a `[F, H, W, 3]` batch scaled to `[0, 1]`.
///
/// # Arguments
///
/// * `images` - Frames to stack, all of the same size.
///
/// # Errors
///
/// Returns [`RenderError::ImageError`] if the frames differ in size.
pub fn images_to_batch(images: &[RgbImage]) -> Result<Array4<f32>> {
    let Some(first) = images.first() else {
        return Ok(Array4::zeros((0, 0, 0, 3)));
    };
    let (width, height) = first.dimensions();
    let (w, h) = (width as usize, height as usize);

    let mut batch = Array4::zeros((images.len(), h, w, 3));
    for (i, (image, mut slot)) in images.iter().zip(batch.outer_iter_mut()).enumerate() {
        if image.dimensions() != (width, height) {
            let (iw, ih) = image.dimensions();
            return Err(RenderError::ImageError(format!(
                "frame {i} is {iw}x{ih}, expected {width}x{height}"
            )));
        }
        for (dst, &src) in slot.iter_mut().zip(image.as_raw()) {
            *dst = f32::from(src) / 255.0;
        }
    }

    Ok(batch)
}

/// Convert one `[H, W, 3]` frame in `[0, 1]` back to an RGB image.
///
/// Values are multiplied by 255, clamped and truncated.
///
/// # Errors
///
/// Returns an error if the frame is not 3-channel or too large for an image.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn frame_to_image(frame: ArrayView3<f32>) -> Result<RgbImage> {
    let shape = frame.shape();
    if shape[2] != 3 {
        return Err(RenderError::ImageError(format!(
            "expected 3 channels, got {}",
            shape[2]
        )));
    }
    let height = u32::try_from(shape[0])
        .map_err(|_| RenderError::ImageError("Image height exceeds u32::MAX".to_string()))?;
    let width = u32::try_from(shape[1])
        .map_err(|_| RenderError::ImageError("Image width exceeds u32::MAX".to_string()))?;

    let rgb_data: Vec<u8> = frame
        .iter()
        .map(|&v| (v * 255.0).clamp(0.0, 255.0) as u8)
        .collect();

    RgbImage::from_raw(width, height, rgb_data)
        .ok_or_else(|| RenderError::ImageError("Failed to create image from array".to_string()))
}

/// Split a `[F, H, W, 3]` batch into RGB images.
///
/// # Errors
///
/// Returns an error if any frame cannot be converted (see [`frame_to_image`]).
pub fn batch_to_images(batch: &Array4<f32>) -> Result<Vec<RgbImage>> {
    batch.axis_iter(Axis(0)).map(frame_to_image).collect()
}

/// Format a count with a singular or plural noun, e.g. `1 frame`, `3 frames`.
#[must_use]
pub fn pluralize(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else if word.ends_with('s') || word.ends_with("ch") || word.ends_with("sh") {
        format!("{count} {word}es")
    } else {
        format!("{count} {word}s")
    }
}
