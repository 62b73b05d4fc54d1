// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Combining rendered skeletons with background images.
//!
//! Two modes are provided: [`mask_paste`] copies non-black skeleton pixels
//! onto a background, and [`blend`] mixes two images with a uniform weight.
//! Backgrounds are brought to the skeleton size with [`resize_area`] first.

use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::{Rgb, RgbImage};

use crate::error::{RenderError, Result};

/// Resize an RGB image with area-style interpolation.
///
/// Shrinking uses a box filter, which averages every source pixel covered by
/// a destination pixel. Enlarging (on either axis) uses bilinear filtering.
/// Same-size input is returned as a copy.
///
/// # Errors
///
/// Returns [`RenderError::ResizeError`] if either size has a zero side or the
/// resize fails.
pub fn resize_area(image: &RgbImage, width: u32, height: u32) -> Result<RgbImage> {
    let (src_w, src_h) = image.dimensions();
    if (src_w, src_h) == (width, height) {
        return Ok(image.clone());
    }
    if src_w == 0 || src_h == 0 || width == 0 || height == 0 {
        return Err(RenderError::ResizeError(format!(
            "cannot resize {src_w}x{src_h} to {width}x{height}"
        )));
    }

    let src = Image::from_vec_u8(src_w, src_h, image.as_raw().clone(), PixelType::U8x3)
        .map_err(|e| RenderError::ResizeError(format!("Failed to create source image: {e}")))?;
    let mut dst = Image::new(width, height, PixelType::U8x3);

    let filter = if width <= src_w && height <= src_h {
        FilterType::Box
    } else {
        FilterType::Bilinear
    };
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter));
    Resizer::new()
        .resize(&src, &mut dst, Some(&options))
        .map_err(|e| RenderError::ResizeError(e.to_string()))?;

    RgbImage::from_raw(width, height, dst.into_vec())
        .ok_or_else(|| RenderError::ResizeError("Failed to create resized buffer".to_string()))
}

/// ITU-R BT.601 luma of a pixel.
#[must_use]
pub fn luminance(pixel: &Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0;
    0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b)
}

/// Copy skeleton pixels with non-zero luminance onto a background.
///
/// The background is resized to the skeleton size. Without a background the
/// skeleton is returned unchanged.
///
/// # Errors
///
/// Returns an error if the background cannot be resized.
pub fn mask_paste(skeleton: &RgbImage, background: Option<&RgbImage>) -> Result<RgbImage> {
    let Some(background) = background else {
        return Ok(skeleton.clone());
    };
    let (width, height) = skeleton.dimensions();
    let mut out = resize_area(background, width, height)?;
    for (dst, src) in out.pixels_mut().zip(skeleton.pixels()) {
        if luminance(src) > 0.0 {
            *dst = *src;
        }
    }
    Ok(out)
}

/// Blend `alpha * top + (1 - alpha) * bottom` per channel, rounded and
/// saturated to `u8`.
///
/// `bottom` is resized to the size of `top`; `alpha` is clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if `bottom` cannot be resized.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn blend(top: &RgbImage, bottom: &RgbImage, alpha: f32) -> Result<RgbImage> {
    let alpha = alpha.clamp(0.0, 1.0);
    let (width, height) = top.dimensions();
    let mut out = resize_area(bottom, width, height)?;
    for (dst, src) in out.iter_mut().zip(top.iter()) {
        let value = alpha * f32::from(*src) + (1.0 - alpha) * f32::from(*dst);
        *dst = value.round().clamp(0.0, 255.0) as u8;
    }
    Ok(out)
}
