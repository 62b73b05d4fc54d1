// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Drawing configuration.
//!
//! This module defines the [`DrawConfig`] struct, which controls how keypoint
//! frames are rasterized: confidence threshold, stroke compatibility tier,
//! keypoint scheme, person selection and how the skeleton is combined with a
//! background image.

use crate::keypoints::{CanvasSize, MAX_CANVAS_SIDE};
use crate::render::DEFAULT_THRESHOLD;
use crate::scheme::Scheme;

/// How a rendered skeleton is combined with a background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompositeMode {
    /// Draw directly onto a copy of the background, then blend the result
    /// with the untouched background: `alpha * drawn + (1 - alpha) * background`.
    /// An alpha of 1.0 keeps the drawn canvas as is.
    Overlay {
        /// Blend weight of the drawn canvas (0.0 to 1.0).
        alpha: f32,
    },
    /// Draw on black, then copy every non-black skeleton pixel onto the
    /// background.
    MaskPaste,
}

impl Default for CompositeMode {
    fn default() -> Self {
        Self::Overlay { alpha: 1.0 }
    }
}

/// Configuration for skeleton rendering.
///
/// This struct uses a builder pattern for convenient construction.
///
/// # Example
///
/// ```rust
/// use openpose_render::{DrawConfig, Scheme};
///
/// let config = DrawConfig::new()
///     .with_threshold(0.5)
///     .with_scheme(Scheme::Body)
///     .with_scale_for_xinsr(true);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DrawConfig {
    /// Keypoints with confidence below this value are not drawn (0.0 to 1.0).
    pub threshold: f32,
    /// Multiply stick width by the compatibility tier for thick-line
    /// conditioning models.
    pub scale_for_xinsr: bool,
    /// Keypoint layout to extract and draw.
    pub scheme: Scheme,
    /// Draw every person of a frame; when `false` only the first one.
    pub draw_all_people: bool,
    /// Background combination mode.
    pub composite: CompositeMode,
    /// Canvas used when the input carries no usable size.
    pub default_canvas: CanvasSize,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scale_for_xinsr: false,
            scheme: Scheme::WholeBody,
            draw_all_people: true,
            composite: CompositeMode::default(),
            default_canvas: CanvasSize::DRAW_DEFAULT,
        }
    }
}

impl DrawConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the confidence threshold, clamped to `[0, 1]`.
    ///
    /// # Arguments
    ///
    /// * `threshold` - The minimum keypoint confidence.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = if threshold.is_nan() {
            DEFAULT_THRESHOLD
        } else {
            threshold.clamp(0.0, 1.0)
        };
        self
    }

    /// Enable or disable the stick width compatibility multiplier.
    #[must_use]
    pub const fn with_scale_for_xinsr(mut self, enabled: bool) -> Self {
        self.scale_for_xinsr = enabled;
        self
    }

    /// Set the keypoint scheme.
    #[must_use]
    pub const fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Draw all people of a frame, or only the first one.
    #[must_use]
    pub const fn with_draw_all_people(mut self, all: bool) -> Self {
        self.draw_all_people = all;
        self
    }

    /// Use [`CompositeMode::Overlay`] with the given alpha, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_overlay(mut self, alpha: f32) -> Self {
        let alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        self.composite = CompositeMode::Overlay { alpha };
        self
    }

    /// Use [`CompositeMode::MaskPaste`].
    #[must_use]
    pub const fn with_mask_paste(mut self) -> Self {
        self.composite = CompositeMode::MaskPaste;
        self
    }

    /// Set the fallback canvas size.
    ///
    /// Each side is clamped to `1..=MAX_CANVAS_SIDE`, the bound applied to
    /// canvas sizes read from pose JSON.
    ///
    /// # Arguments
    ///
    /// * `width` - Canvas width in pixels.
    /// * `height` - Canvas height in pixels.
    #[must_use]
    pub fn with_default_canvas(mut self, width: u32, height: u32) -> Self {
        self.default_canvas = CanvasSize::new(
            width.clamp(1, MAX_CANVAS_SIDE),
            height.clamp(1, MAX_CANVAS_SIDE),
        );
        self
    }
}
