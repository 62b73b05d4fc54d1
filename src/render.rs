// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton rendering for the body and wholebody schemes.
//!
//! Limbs are drawn in topology order as filled ellipses, then joints as filled
//! circles on top. The wholebody pass adds face points, feet, and both hands
//! (20 colored edges per hand plus joints). Every element is gated on the
//! confidence of the keypoints it touches; nothing is written for an element
//! whose keypoints fall below the threshold.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use image::RgbImage;
use imageproc::point::Point;
use std::ops::{AddAssign, Range};

use crate::draw::{draw_thick_line, ellipse_poly, fill_circle, fill_convex_poly};
use crate::extract::ExtractedPose;
use crate::scale::StrokeScale;
use crate::scheme::Scheme;
use crate::visualizer::Color;
use crate::visualizer::skeleton::{
    BODY_POINTS, FACE_RANGE, FEET_RANGE, HAND_EDGES, LEFT_HAND_RANGE, LIMB_SEQ, RIGHT_HAND_RANGE,
};

/// Default keypoint confidence threshold.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Limbs shorter than this (pixels) are skipped.
pub const MIN_LIMB_LENGTH: f32 = 1.0;

/// Radius of face keypoints.
pub const FACE_RADIUS: i32 = 4;
/// Radius of foot keypoints.
pub const FOOT_RADIUS: i32 = 3;
/// Radius of hand joints.
pub const HAND_JOINT_RADIUS: i32 = 4;
/// Thickness of hand edges.
pub const HAND_EDGE_THICKNESS: i32 = 2;

/// Feet and hand points must lie strictly beyond this margin from the origin.
pub const ORIGIN_MARGIN: f32 = 0.01;

/// Hand edges longer than `diagonal / HAND_EDGE_DIVISOR` are skipped.
pub const HAND_EDGE_DIVISOR: f64 = 5.0;

/// Counts of elements written to the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Body limb polygons.
    pub limbs: usize,
    /// Body joint circles.
    pub joints: usize,
    /// Face keypoint circles.
    pub face_points: usize,
    /// Foot keypoint circles.
    pub foot_points: usize,
    /// Hand edge lines.
    pub hand_edges: usize,
    /// Hand joint circles.
    pub hand_joints: usize,
}

impl DrawStats {
    /// Total number of drawn elements.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.limbs
            + self.joints
            + self.face_points
            + self.foot_points
            + self.hand_edges
            + self.hand_joints
    }
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, other: Self) {
        self.limbs += other.limbs;
        self.joints += other.joints;
        self.face_points += other.face_points;
        self.foot_points += other.foot_points;
        self.hand_edges += other.hand_edges;
        self.hand_joints += other.hand_joints;
    }
}

/// Draw one person for `scheme`.
pub fn draw_pose(
    canvas: &mut RgbImage,
    pose: &ExtractedPose,
    scheme: Scheme,
    threshold: f32,
    scale: StrokeScale,
) -> DrawStats {
    match scheme {
        Scheme::Body => draw_body(canvas, pose, threshold, scale),
        Scheme::WholeBody => draw_wholebody(canvas, pose, threshold, scale),
    }
}

/// Draw the 17 limbs and 18 joints of an OpenPose body.
///
/// Limb `i` uses palette color `i mod 18`; joint `j` uses `j mod 18`. Joints
/// outside the canvas are skipped; limbs are clipped.
pub fn draw_body(
    canvas: &mut RgbImage,
    pose: &ExtractedPose,
    threshold: f32,
    scale: StrokeScale,
) -> DrawStats {
    let mut stats = DrawStats::default();
    let n = pose.len().min(BODY_POINTS);

    for (i, &[a, b]) in LIMB_SEQ.iter().enumerate() {
        if a >= n || b >= n {
            continue;
        }
        if pose.score(a) < threshold || pose.score(b) < threshold {
            continue;
        }
        let (pa, pb) = (pose.xy(a), pose.xy(b));
        if (pa.0 - pb.0).hypot(pa.1 - pb.1) < MIN_LIMB_LENGTH {
            continue;
        }
        let polygon = limb_polygon(pa, pb, scale.stick_width);
        fill_convex_poly(canvas, &polygon, Color::from_index(i).into());
        stats.limbs += 1;
    }

    for j in 0..n {
        if pose.score(j) < threshold {
            continue;
        }
        let (x, y) = pixel(pose.xy(j));
        if in_canvas(x, y, canvas) {
            fill_circle(canvas, (x, y), scale.joint_radius, Color::from_index(j).into());
            stats.joints += 1;
        }
    }

    stats
}

/// Draw a 134-point wholebody pose: body, face, feet, then both hands.
pub fn draw_wholebody(
    canvas: &mut RgbImage,
    pose: &ExtractedPose,
    threshold: f32,
    scale: StrokeScale,
) -> DrawStats {
    let mut stats = draw_body(canvas, pose, threshold, scale);

    for i in clipped(FACE_RANGE, pose) {
        if pose.score(i) < threshold {
            continue;
        }
        let (x, y) = pixel(pose.xy(i));
        if in_canvas(x, y, canvas) {
            fill_circle(canvas, (x, y), FACE_RADIUS, Color::from_index(i).into());
            stats.face_points += 1;
        }
    }

    for i in clipped(FEET_RANGE, pose) {
        if pose.score(i) < threshold {
            continue;
        }
        let (x, y) = pixel(pose.xy(i));
        if in_margin(x, y, canvas) {
            fill_circle(canvas, (x, y), FOOT_RADIUS, Color::WHITE.into());
            stats.foot_points += 1;
        }
    }

    for hand in [LEFT_HAND_RANGE, RIGHT_HAND_RANGE] {
        stats += draw_hand(canvas, pose, hand, threshold);
    }

    stats
}

/// Draw one hand's 20 edges and 21 joints, offset by the hand's base index.
fn draw_hand(
    canvas: &mut RgbImage,
    pose: &ExtractedPose,
    hand: Range<usize>,
    threshold: f32,
) -> DrawStats {
    let mut stats = DrawStats::default();
    if hand.end > pose.len() {
        return stats;
    }

    let (width, height) = canvas.dimensions();
    let max_edge = f64::from(width).hypot(f64::from(height)) / HAND_EDGE_DIVISOR;
    let base = hand.start;

    for (ie, &[a, b]) in HAND_EDGES.iter().enumerate() {
        let (a, b) = (base + a, base + b);
        if pose.score(a) < threshold || pose.score(b) < threshold {
            continue;
        }
        let (fa, fb) = (pose.xy(a), pose.xy(b));
        let length = f64::from(fb.0 - fa.0).hypot(f64::from(fb.1 - fa.1));
        if length > max_edge {
            continue;
        }
        let (pa, pb) = (pixel(fa), pixel(fb));
        if in_margin(pa.0, pa.1, canvas) && in_margin(pb.0, pb.1, canvas) {
            let hue = ie as f32 / HAND_EDGES.len() as f32;
            let color = Color::from_hsv(hue, 1.0, 1.0);
            draw_thick_line(canvas, pa, pb, HAND_EDGE_THICKNESS, color.into());
            stats.hand_edges += 1;
        }
    }

    for i in hand {
        if pose.score(i) < threshold {
            continue;
        }
        let (x, y) = pixel(pose.xy(i));
        if in_margin(x, y, canvas) {
            fill_circle(canvas, (x, y), HAND_JOINT_RADIUS, Color::BLUE.into());
            stats.hand_joints += 1;
        }
    }

    stats
}

/// Ellipse polygon of a limb between `a` and `b`.
///
/// The ellipse is centered on the midpoint with semi-axes `(length / 2,
/// stick_width)` and rotated by `atan2(dy, dx)` degrees, all truncated to
/// integers.
pub(crate) fn limb_polygon(a: (f32, f32), b: (f32, f32), stick_width: i32) -> Vec<Point<i32>> {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    let length = dx.hypot(dy);
    let center = (((a.0 + b.0) / 2.0) as i32, ((a.1 + b.1) / 2.0) as i32);
    let angle = f64::from(dy).atan2(f64::from(dx)).to_degrees() as i32;
    ellipse_poly(center, ((length / 2.0) as i32, stick_width), angle, 1)
}

/// Truncate a keypoint to integer pixel coordinates.
fn pixel((x, y): (f32, f32)) -> (i32, i32) {
    (x as i32, y as i32)
}

fn in_canvas(x: i32, y: i32, canvas: &RgbImage) -> bool {
    let (width, height) = canvas.dimensions();
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

/// Inside the canvas and strictly past [`ORIGIN_MARGIN`] on both axes, which
/// rejects zero placeholders left by padding.
fn in_margin(x: i32, y: i32, canvas: &RgbImage) -> bool {
    x as f32 > ORIGIN_MARGIN && y as f32 > ORIGIN_MARGIN && in_canvas(x, y, canvas)
}

fn clipped(range: Range<usize>, pose: &ExtractedPose) -> Range<usize> {
    range.start.min(pose.len())..range.end.min(pose.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use crate::keypoints::Person;
    use crate::scale::{ScaleRule, stroke_scale};

    /// Distinct, well separated positions for the 18 body joints on 512x512.
    fn body_points() -> Vec<(f32, f32)> {
        vec![
            (256.0, 80.0),  // nose
            (256.0, 140.0), // neck
            (200.0, 140.0),
            (170.0, 210.0),
            (150.0, 280.0),
            (312.0, 140.0),
            (342.0, 210.0),
            (362.0, 280.0),
            (220.0, 290.0),
            (215.0, 380.0),
            (210.0, 470.0),
            (292.0, 290.0),
            (297.0, 380.0),
            (302.0, 470.0),
            (240.0, 70.0),
            (272.0, 70.0),
            (225.0, 80.0),
            (287.0, 80.0),
        ]
    }

    fn person(points: &[(f32, f32)], conf: impl Fn(usize) -> f32) -> Person {
        Person::new(
            points
                .iter()
                .enumerate()
                .flat_map(|(i, &(x, y))| [x, y, conf(i)])
                .collect(),
        )
    }

    fn painted(canvas: &RgbImage) -> usize {
        canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn test_full_body_draws_every_limb_and_joint() {
        let pose = extract(&person(&body_points(), |_| 1.0), Scheme::Body, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_body(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.limbs, 17);
        assert_eq!(stats.joints, 18);
        assert_eq!(canvas.get_pixel(256, 80).0, [255, 0, 0]);
    }

    #[test]
    fn test_low_confidence_writes_nothing() {
        let pose = extract(&person(&body_points(), |_| 0.29), Scheme::Body, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_body(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.total(), 0);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_degenerate_limb_skipped() {
        let mut points = body_points();
        points[2] = points[1];
        let pose = extract(&person(&points, |_| 1.0), Scheme::Body, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_body(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.limbs, 16);
    }

    #[test]
    fn test_out_of_bounds_joint_skipped() {
        let mut points = body_points();
        points[10] = (600.0, 470.0);
        let pose = extract(&person(&points, |_| 1.0), Scheme::Body, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_body(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.joints, 17);
        assert_eq!(stats.limbs, 17);
    }

    #[test]
    fn test_limb_orientation_follows_segment() {
        // Horizontal limb: the ellipse must be wide, not tall.
        let polygon = limb_polygon((100.0, 50.0), (200.0, 50.0), 4);
        let xs: Vec<i32> = polygon.iter().map(|p| p.x).collect();
        let ys: Vec<i32> = polygon.iter().map(|p| p.y).collect();
        assert_eq!(xs.iter().min(), Some(&100));
        assert_eq!(xs.iter().max(), Some(&200));
        assert_eq!(ys.iter().min(), Some(&46));
        assert_eq!(ys.iter().max(), Some(&54));
    }

    fn wholebody_with(points: &[(usize, (f32, f32))]) -> Person {
        let mut flat = vec![0.0; 134 * 3];
        for &(i, (x, y)) in points {
            flat[i * 3] = x;
            flat[i * 3 + 1] = y;
            flat[i * 3 + 2] = 1.0;
        }
        Person::new(flat)
    }

    #[test]
    fn test_wholebody_sparse_person() {
        // Five valid points: neck, right shoulder, left-hand wrist + first
        // finger joint, one foot point.
        let person = wholebody_with(&[
            (1, (256.0, 140.0)),
            (2, (200.0, 140.0)),
            (92, (100.0, 300.0)),
            (93, (110.0, 310.0)),
            (30, (250.0, 500.0)),
        ]);
        let pose = extract(&person, Scheme::WholeBody, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_wholebody(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);

        assert_eq!(stats.limbs, 1);
        assert_eq!(stats.joints, 2);
        assert_eq!(stats.hand_edges, 1);
        assert_eq!(stats.hand_joints, 2);
        assert_eq!(stats.foot_points, 1);
        assert_eq!(stats.face_points, 0);
    }

    #[test]
    fn test_long_hand_edge_never_drawn() {
        // diagonal(512, 512) / 5 ~= 144.8 px
        let person = wholebody_with(&[(113, (50.0, 50.0)), (114, (250.0, 50.0))]);
        let pose = extract(&person, Scheme::WholeBody, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_wholebody(&mut canvas, &pose, 0.0, scale);
        assert_eq!(stats.hand_edges, 0);
        assert_eq!(stats.hand_joints, 2);
        assert_eq!(canvas.get_pixel(150, 50).0, [0, 0, 0]);
    }

    #[test]
    fn test_hand_edge_color_and_joint_color() {
        let person = wholebody_with(&[(113, (100.0, 100.0)), (114, (140.0, 100.0))]);
        let pose = extract(&person, Scheme::WholeBody, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_wholebody(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.hand_edges, 1);
        assert_eq!(canvas.get_pixel(120, 100).0, [255, 0, 0]);
        assert_eq!(canvas.get_pixel(100, 100).0, [0, 0, 255]);
    }

    #[test]
    fn test_far_apart_hand_points_skip_edge() {
        let person = wholebody_with(&[(92, (1e10, 10.0)), (93, (-1e10, 10.0))]);
        let pose = extract(&person, Scheme::WholeBody, 512, 512);
        let mut canvas = RgbImage::new(512, 512);
        let scale = stroke_scale(512, 512, false, ScaleRule::Body);
        let stats = draw_wholebody(&mut canvas, &pose, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.hand_edges, 0);
        assert_eq!(stats.hand_joints, 0);
        assert_eq!(painted(&canvas), 0);
    }

    #[test]
    fn test_origin_placeholders_suppressed() {
        // Zero confidence threshold lets padded zero points through the gate,
        // but the origin margin still rejects them.
        let pose = extract(&Person::default(), Scheme::WholeBody, 64, 64);
        let mut canvas = RgbImage::new(64, 64);
        let scale = stroke_scale(64, 64, false, ScaleRule::Body);
        let stats = draw_wholebody(&mut canvas, &pose, 0.0, scale);
        assert_eq!(stats.foot_points, 0);
        assert_eq!(stats.hand_joints, 0);
        assert_eq!(stats.hand_edges, 0);
    }

    #[test]
    fn test_face_points_use_palette() {
        let person = wholebody_with(&[(18, (40.0, 40.0))]);
        let pose = extract(&person, Scheme::WholeBody, 128, 128);
        let mut canvas = RgbImage::new(128, 128);
        let scale = stroke_scale(128, 128, false, ScaleRule::Body);
        let stats = draw_pose(&mut canvas, &pose, Scheme::WholeBody, DEFAULT_THRESHOLD, scale);
        assert_eq!(stats.face_points, 1);
        assert_eq!(canvas.get_pixel(40, 40).0, [255, 0, 0]);
    }

    #[test]
    fn test_stats_accumulate() {
        let mut a = DrawStats {
            limbs: 1,
            ..DrawStats::default()
        };
        a += DrawStats {
            hand_edges: 2,
            ..DrawStats::default()
        };
        assert_eq!(a.total(), 3);
    }
}
