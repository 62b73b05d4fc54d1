// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Resolution-adaptive stroke sizing.
//!
//! Every renderer derives its limb half-thickness and joint radius from the
//! canvas size through [`stroke_scale`], so all outputs share one convention.

/// Reference side length of the DW-pose stroke rule.
pub const DWPOSE_REFERENCE_SIDE: f64 = 512.0;

/// Joint radius of the DW-pose rule at the reference side.
pub const DWPOSE_BASE_RADIUS: f64 = 2.0;

/// Largest compatibility multiplier.
pub const MAX_COMPAT_MULTIPLIER: i32 = 7;

/// Canvas sides below this keep a compatibility multiplier of 1.
pub const COMPAT_MIN_SIDE: u32 = 500;

/// Stroke sizing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleRule {
    /// Stick width from `(W+H)/2 / 256`, joint radius from `(W+H)/2 / 192`.
    #[default]
    Body,
    /// Joint radius 2 px at a 512 px side, scaled by the longer side.
    DwPose,
}

/// Limb half-thickness and joint radius in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeScale {
    /// Minor semi-axis of a limb ellipse.
    pub stick_width: i32,
    /// Radius of a joint circle.
    pub joint_radius: i32,
}

/// Compatibility multiplier for line weight on a `width` x `height` canvas.
///
/// `1` below a 500 px longer side, otherwise `min(2 + side / 1000, 7)`.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn compat_multiplier(width: u32, height: u32) -> i32 {
    let target = width.max(height);
    if target < COMPAT_MIN_SIDE {
        1
    } else {
        (2 + (target / 1000) as i32).min(MAX_COMPAT_MULTIPLIER)
    }
}

/// Compute stroke sizes for a canvas.
///
/// # Arguments
///
/// * `width`, `height` - Canvas size in pixels.
/// * `compat` - Apply [`compat_multiplier`] to the stick width.
/// * `rule` - Base sizing rule.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn stroke_scale(width: u32, height: u32, compat: bool, rule: ScaleRule) -> StrokeScale {
    let (w, h) = (f64::from(width), f64::from(height));
    let (stick_width, joint_radius) = match rule {
        ScaleRule::Body => {
            let avg_size = (w + h) / 2.0;
            let stick = ((avg_size / 256.0).floor() as i32).max(1);
            let radius = ((avg_size / 192.0).floor() as i32).max(2);
            (stick, radius)
        }
        ScaleRule::DwPose => {
            let factor = w.max(h) / DWPOSE_REFERENCE_SIDE;
            let radius = (DWPOSE_BASE_RADIUS * factor).max(1.0) as i32;
            (radius, radius)
        }
    };

    let stick_width = if compat {
        stick_width * compat_multiplier(width, height)
    } else {
        stick_width
    };

    StrokeScale {
        stick_width,
        joint_radius,
    }
}
