// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Sequence rendering.
//!
//! Renders every frame of a keypoint sequence onto its own canvas, combines
//! it with an optional background and stacks the results into a dense
//! `[F, H, W, 3]` batch with values in `[0, 1]`. Frames share no mutable
//! state and are rendered in parallel.

use image::RgbImage;
use ndarray::Array4;
use rayon::prelude::*;

use crate::composite::{blend, mask_paste, resize_area};
use crate::config::{CompositeMode, DrawConfig};
use crate::error::Result;
use crate::extract::extract;
use crate::keypoints::{KeypointFrame, PoseInput};
use crate::render::{DrawStats, draw_pose};
use crate::scale::{ScaleRule, stroke_scale};
use crate::utils::{images_to_batch, pluralize};
use crate::verbose;

/// A rendered frame and what was drawn on it.
#[derive(Debug, Clone)]
pub struct RenderedFrame {
    /// Final RGB pixels at the frame's declared size.
    pub image: RgbImage,
    /// Counts of drawn elements across all people.
    pub stats: DrawStats,
}

/// Render one frame.
///
/// People are drawn in list order (later ones overdraw earlier ones), or only
/// the first one when [`DrawConfig::draw_all_people`] is off. The background,
/// if any, is resized to the frame size and combined per
/// [`DrawConfig::composite`].
///
/// # Errors
///
/// Returns an error if the background cannot be resized.
pub fn render_frame(
    frame: &KeypointFrame,
    background: Option<&RgbImage>,
    config: &DrawConfig,
) -> Result<RenderedFrame> {
    let size = frame.size();
    let (width, height) = (size.width, size.height);
    let scale = stroke_scale(width, height, config.scale_for_xinsr, ScaleRule::Body);
    let count = if config.draw_all_people {
        frame.people.len()
    } else {
        1
    };

    let draw = |canvas: &mut RgbImage| {
        let mut stats = DrawStats::default();
        for person in frame.people.iter().take(count) {
            let pose = extract(person, config.scheme, width, height);
            stats += draw_pose(canvas, &pose, config.scheme, config.threshold, scale);
        }
        stats
    };

    let (image, stats) = match config.composite {
        CompositeMode::Overlay { alpha } => {
            let base = background
                .map(|bg| resize_area(bg, width, height))
                .transpose()?;
            let mut canvas = base.clone().unwrap_or_else(|| RgbImage::new(width, height));
            let stats = draw(&mut canvas);
            let image = match base {
                Some(base) if alpha < 1.0 => blend(&canvas, &base, alpha)?,
                _ => canvas,
            };
            (image, stats)
        }
        CompositeMode::MaskPaste => {
            let mut canvas = RgbImage::new(width, height);
            let stats = draw(&mut canvas);
            (mask_paste(&canvas, background)?, stats)
        }
    };

    Ok(RenderedFrame { image, stats })
}

/// Render a sequence to RGB images, all at the size of the first frame.
///
/// Backgrounds are matched one-to-one when their count equals the frame
/// count; otherwise the first background is used for every frame. An empty
/// sequence yields one blank frame of [`DrawConfig::default_canvas`] size.
///
/// # Errors
///
/// Returns an error if a background or frame cannot be resized.
pub fn render_images(
    frames: &[KeypointFrame],
    backgrounds: &[RgbImage],
    config: &DrawConfig,
) -> Result<Vec<RgbImage>> {
    let blank;
    let frames = if frames.is_empty() {
        blank = [KeypointFrame::blank(config.default_canvas)];
        &blank[..]
    } else {
        frames
    };

    let rendered: Vec<RenderedFrame> = frames
        .par_iter()
        .enumerate()
        .map(|(i, frame)| {
            let background = if backgrounds.len() == frames.len() {
                backgrounds.get(i)
            } else {
                backgrounds.first()
            };
            render_frame(frame, background, config)
        })
        .collect::<Result<_>>()?;

    let mut total = DrawStats::default();
    for frame in &rendered {
        total += frame.stats;
    }
    verbose!(
        "rendered {}: {}, {}, {}",
        pluralize(rendered.len(), "frame"),
        pluralize(total.limbs, "limb"),
        pluralize(total.joints, "joint"),
        pluralize(total.hand_edges, "hand edge")
    );

    let (width, height) = rendered[0].image.dimensions();
    rendered
        .into_iter()
        .map(|frame| resize_area(&frame.image, width, height))
        .collect()
}

/// Render a sequence into a dense `[F, H, W, 3]` batch with values in `[0, 1]`.
///
/// See [`render_images`] for background and sizing rules.
///
/// # Errors
///
/// Returns an error if a background or frame cannot be resized.
pub fn render_sequence(
    frames: &[KeypointFrame],
    backgrounds: &[RgbImage],
    config: &DrawConfig,
) -> Result<Array4<f32>> {
    images_to_batch(&render_images(frames, backgrounds, config)?)
}

/// Parse pose JSON and render it.
///
/// Frames without a declared size use [`DrawConfig::default_canvas`].
///
/// # Errors
///
/// Returns an error if the text is not valid JSON or rendering fails.
pub fn render_json(
    text: &str,
    backgrounds: &[RgbImage],
    config: &DrawConfig,
) -> Result<Array4<f32>> {
    let frames = PoseInput::from_json_str(text, config.default_canvas)?
        .into_frames(config.default_canvas);
    render_sequence(&frames, backgrounds, config)
}
