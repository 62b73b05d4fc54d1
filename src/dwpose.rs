// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! DW-pose style rendering of editor pose JSON.
//!
//! The editor stores poses as `{"width", "height", "people": [...]}` in its
//! own coordinate space. [`render_dw_pose`] rescales those keypoints to the
//! requested output size and draws the 17 body limbs with dimmed palette
//! colors and the 18 joints at full brightness. Colors come out
//! channel-reversed relative to the palette, matching the editor's output.

#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use std::path::Path;

use image::RgbImage;
use serde_json::{Map, Value};

use crate::composite::mask_paste;
use crate::draw::{fill_circle, fill_convex_poly};
use crate::io::load_image;
use crate::render::limb_polygon;
use crate::scale::{ScaleRule, stroke_scale};
use crate::visualizer::Color;
use crate::visualizer::skeleton::{BODY_POINTS, LIMB_SEQ};
use crate::warn;

/// Brightness factor applied to limb colors.
pub const LIMB_DIM: f32 = 0.6;

/// Render editor pose JSON to a `width` x `height` RGB image.
///
/// Empty or invalid JSON, or JSON without people, yields a black image. The
/// source coordinate space is taken from `width`/`height`, then
/// `canvas_width`/`canvas_height`, then the output size. A keypoint is drawn
/// only when its confidence is strictly positive.
///
/// # Arguments
///
/// * `pose_json` - Editor pose JSON text.
/// * `width`, `height` - Output size in pixels.
/// * `scale_for_xinsr` - Apply the stick width compatibility multiplier.
#[must_use]
pub fn render_dw_pose(pose_json: &str, width: u32, height: u32, scale_for_xinsr: bool) -> RgbImage {
    let mut canvas = RgbImage::new(width, height);
    if pose_json.trim().is_empty() {
        return canvas;
    }
    let Ok(Value::Object(data)) = serde_json::from_str::<Value>(pose_json) else {
        return canvas;
    };
    let Some(people) = data.get("people").and_then(Value::as_array) else {
        return canvas;
    };

    let scale_x = f64::from(width) / source_side(&data, ["width", "canvas_width"], width);
    let scale_y = f64::from(height) / source_side(&data, ["height", "canvas_height"], height);
    let stroke = stroke_scale(width, height, scale_for_xinsr, ScaleRule::DwPose);

    for person in people {
        let points = person_points(person, scale_x, scale_y);

        for (i, &[a, b]) in LIMB_SEQ.iter().enumerate() {
            let (Some(Some(pa)), Some(Some(pb))) = (points.get(a), points.get(b)) else {
                continue;
            };
            let polygon = limb_polygon(
                (pa.0 as f32, pa.1 as f32),
                (pb.0 as f32, pb.1 as f32),
                stroke.stick_width,
            );
            let color = Color::from_index(i).scaled(LIMB_DIM).reversed();
            fill_convex_poly(&mut canvas, &polygon, color.into());
        }

        for (i, point) in points.iter().enumerate().take(BODY_POINTS) {
            if let Some(center) = point {
                let color = Color::from_index(i).reversed();
                fill_circle(&mut canvas, *center, stroke.joint_radius, color.into());
            }
        }
    }

    canvas
}

/// Mask-paste a DW-pose image onto the background image at `background`.
///
/// Without a path, or when the background cannot be read or resized, the
/// pose image is returned as is.
#[must_use]
pub fn render_dw_combined(pose: &RgbImage, background: Option<&Path>) -> RgbImage {
    let Some(path) = background else {
        return pose.clone();
    };
    let combined = load_image(path).and_then(|bg| mask_paste(pose, Some(&bg)));
    match combined {
        Ok(image) => image,
        Err(e) => {
            warn!("Background {} unusable, using pose only: {e}", path.display());
            pose.clone()
        }
    }
}

/// First positive numeric value among `keys`, else `fallback`.
fn source_side(data: &Map<String, Value>, keys: [&str; 2], fallback: u32) -> f64 {
    keys.iter()
        .filter_map(|key| data.get(*key).and_then(Value::as_f64))
        .find(|&v| v > 0.0)
        .unwrap_or_else(|| f64::from(fallback))
}

/// Rescaled integer keypoints of one person; `None` for absent points.
///
/// A person whose keypoint array holds non-numeric values yields no points.
fn person_points(person: &Value, scale_x: f64, scale_y: f64) -> Vec<Option<(i32, i32)>> {
    let Some(values) = person.get("pose_keypoints_2d").and_then(Value::as_array) else {
        return Vec::new();
    };
    let Some(flat) = values.iter().map(Value::as_f64).collect::<Option<Vec<f64>>>() else {
        return Vec::new();
    };
    flat.chunks_exact(3)
        .map(|kp| (kp[2] > 0.0).then(|| ((kp[0] * scale_x) as i32, (kp[1] * scale_y) as i32)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn painted(canvas: &RgbImage) -> usize {
        canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    fn pose_json(width: u32, height: u32, flat: &[f64]) -> String {
        json!({ "width": width, "height": height, "people": [{ "pose_keypoints_2d": flat }] })
            .to_string()
    }

    #[test]
    fn test_invalid_input_is_black() {
        for text in ["", "   ", "{oops", "[]", r#"{"width": 10}"#] {
            let img = render_dw_pose(text, 32, 24, false);
            assert_eq!(img.dimensions(), (32, 24));
            assert_eq!(painted(&img), 0);
        }
    }

    #[test]
    fn test_limb_and_joint_colors() {
        // neck (1) -> right shoulder (2): limb 0, palette red dimmed to 153.
        let mut flat = vec![0.0; 18 * 3];
        flat[3..6].copy_from_slice(&[100.0, 100.0, 1.0]);
        flat[6..9].copy_from_slice(&[40.0, 100.0, 1.0]);
        let img = render_dw_pose(&pose_json(512, 512, &flat), 512, 512, false);

        // Limb 0 is (255, 0, 0) dimmed and channel-reversed.
        assert_eq!(img.get_pixel(70, 100).0, [0, 0, 153]);
        // Joint 1 is (255, 85, 0) channel-reversed.
        assert_eq!(img.get_pixel(100, 100).0, [0, 85, 255]);
        // Joint 2 is (255, 170, 0) channel-reversed.
        assert_eq!(img.get_pixel(40, 100).0, [0, 170, 255]);
    }

    #[test]
    fn test_coordinates_rescaled() {
        let mut flat = vec![0.0; 18 * 3];
        flat[0..3].copy_from_slice(&[50.0, 25.0, 0.5]);
        let img = render_dw_pose(&pose_json(100, 50, &flat), 400, 200, false);
        assert_eq!(img.get_pixel(200, 100).0, [0, 0, 255]);
    }

    #[test]
    fn test_zero_confidence_points_absent() {
        let mut flat = vec![0.0; 18 * 3];
        flat[3..6].copy_from_slice(&[100.0, 100.0, 0.0]);
        flat[6..9].copy_from_slice(&[40.0, 100.0, 1.0]);
        let img = render_dw_pose(&pose_json(512, 512, &flat), 512, 512, false);
        assert_eq!(img.get_pixel(70, 100).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(100, 100).0, [0, 0, 0]);
        assert_ne!(img.get_pixel(40, 100).0, [0, 0, 0]);
    }

    #[test]
    fn test_short_array_skips_missing_limbs() {
        let flat = [10.0, 10.0, 1.0, 20.0, 20.0, 1.0, 30.0, 30.0];
        let img = render_dw_pose(&pose_json(64, 64, &flat), 64, 64, false);
        assert!(painted(&img) > 0);
    }

    #[test]
    fn test_canvas_size_fallback() {
        let text = json!({
            "canvas_width": 100,
            "canvas_height": 100,
            "people": [{ "pose_keypoints_2d": [50.0, 50.0, 1.0] }]
        })
        .to_string();
        let img = render_dw_pose(&text, 200, 200, false);
        assert_ne!(img.get_pixel(100, 100).0, [0, 0, 0]);
    }

    #[test]
    fn test_combined_without_background() {
        let pose = RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
        assert_eq!(render_dw_combined(&pose, None), pose);
        let missing = Path::new("/nonexistent/background.png");
        assert_eq!(render_dw_combined(&pose, Some(missing)), pose);
    }

    #[test]
    fn test_far_off_canvas_points_ignored() {
        let img = render_dw_pose(&pose_json(512, 512, &[1e12, 1e12, 1.0]), 64, 64, false);
        assert_eq!(painted(&img), 0);

        let flat = [-1e12, -1e12, 1.0, 1e12, 1e12, 1.0];
        let img = render_dw_pose(&pose_json(512, 512, &flat), 64, 64, false);
        assert_eq!(img.dimensions(), (64, 64));
    }
}
