// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Raster primitives for skeleton drawing.
//!
//! Limbs are filled ellipse polygons sampled at integer degrees, joints are
//! filled circles and hand edges are thick line segments. Polygon filling is
//! scanline based and clipped to the canvas up front, so arbitrarily distant
//! vertices from bad detections cost no more than on-canvas ones.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use imageproc::point::Point;

/// Sample the outline of a rotated ellipse.
///
/// Points are taken every `delta` degrees over the full turn, rotated by
/// `angle` degrees around `center`, rounded half-to-even and deduplicated
/// against their predecessor. The closing point repeats the first one.
///
/// # Arguments
///
/// * `center` - Ellipse center in pixels.
/// * `axes` - Semi-axes (along the rotated x, along the rotated y).
/// * `angle` - Rotation in integer degrees.
/// * `delta` - Angular step in degrees (clamped to at least 1).
#[must_use]
pub fn ellipse_poly(center: (i32, i32), axes: (i32, i32), angle: i32, delta: i32) -> Vec<Point<i32>> {
    let delta = delta.max(1);
    let (sin_a, cos_a) = f64::from(angle.rem_euclid(360)).to_radians().sin_cos();
    let (cx, cy) = (f64::from(center.0), f64::from(center.1));
    let (a, b) = (f64::from(axes.0), f64::from(axes.1));

    let mut points: Vec<Point<i32>> = Vec::with_capacity((360 / delta + 2) as usize);
    let mut step = 0;
    while step < 360 + delta {
        let (sin_t, cos_t) = f64::from(step.min(360)).to_radians().sin_cos();
        let (x, y) = (a * cos_t, b * sin_t);
        let point = Point::new(
            (cx + x * cos_a - y * sin_a).round_ties_even() as i32,
            (cy + x * sin_a + y * cos_a).round_ties_even() as i32,
        );
        if points.last() != Some(&point) {
            points.push(point);
        }
        step += delta;
    }

    if points.len() == 1 {
        let c = Point::new(center.0, center.1);
        points = vec![c, c];
    }
    points
}

/// Fill a convex polygon, boundary included.
///
/// Degenerate inputs (one point, a segment, collinear points) fill the pixels
/// they cover. Rows and columns outside the canvas are skipped.
pub fn fill_convex_poly(canvas: &mut RgbImage, points: &[Point<i32>], color: Rgb<u8>) {
    if points.is_empty() {
        return;
    }
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let y_min = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
    let y_max = points
        .iter()
        .map(|p| p.y)
        .max()
        .unwrap_or(-1)
        .min(height as i32 - 1);

    for y in y_min..=y_max {
        let Some((x_lo, x_hi)) = row_span(points, y) else {
            continue;
        };
        let x_lo = x_lo.max(0.0);
        let x_hi = x_hi.min(f64::from(width - 1));
        if x_lo > x_hi {
            continue;
        }
        for x in (x_lo as u32)..=(x_hi as u32) {
            canvas.put_pixel(x, y as u32, color);
        }
    }
}

/// Horizontal extent of the polygon outline on row `y`, rounded to pixel centers.
fn row_span(points: &[Point<i32>], y: i32) -> Option<(f64, f64)> {
    let yf = f64::from(y);
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;

    for (i, p0) in points.iter().enumerate() {
        let p1 = points[(i + 1) % points.len()];
        let (x0, y0) = (f64::from(p0.x), f64::from(p0.y));
        let (x1, y1) = (f64::from(p1.x), f64::from(p1.y));
        if yf < y0.min(y1) || yf > y0.max(y1) {
            continue;
        }
        if p0.y == p1.y {
            lo = lo.min(x0.min(x1));
            hi = hi.max(x0.max(x1));
        } else {
            let x = x0 + (yf - y0) * (x1 - x0) / (y1 - y0);
            lo = lo.min(x);
            hi = hi.max(x);
        }
    }

    (lo <= hi).then(|| (lo.round(), hi.round()))
}

/// Draw a filled circle; parts outside the canvas are clipped.
///
/// Circles that cannot touch the canvas are skipped before rasterizing, so
/// centers near the `i32` limits never reach the circle routine.
pub fn fill_circle(canvas: &mut RgbImage, center: (i32, i32), radius: i32, color: Rgb<u8>) {
    let radius = radius.max(0);
    let (width, height) = canvas.dimensions();
    let r = i64::from(radius);
    let (cx, cy) = (i64::from(center.0), i64::from(center.1));
    if cx + r < 0 || cy + r < 0 || cx - r >= i64::from(width) || cy - r >= i64::from(height) {
        return;
    }
    draw_filled_circle_mut(canvas, center, radius, color);
}

/// Draw a line segment of the given pixel thickness with round caps.
pub fn draw_thick_line(
    canvas: &mut RgbImage,
    start: (i32, i32),
    end: (i32, i32),
    thickness: i32,
    color: Rgb<u8>,
) {
    if thickness <= 1 {
        draw_line_segment_mut(
            canvas,
            (start.0 as f32, start.1 as f32),
            (end.0 as f32, end.1 as f32),
            color,
        );
        return;
    }

    let half = f64::from(thickness) / 2.0;
    let cap_radius = thickness / 2;
    let (dx, dy) = (f64::from(end.0 - start.0), f64::from(end.1 - start.1));
    let length = dx.hypot(dy);

    if length > 0.0 {
        let (nx, ny) = (-dy / length * half, dx / length * half);
        let offset = |p: (i32, i32), sign: f64| {
            Point::new(
                (f64::from(p.0) + sign * nx).round() as i32,
                (f64::from(p.1) + sign * ny).round() as i32,
            )
        };
        let quad = [
            offset(start, 1.0),
            offset(end, 1.0),
            offset(end, -1.0),
            offset(start, -1.0),
        ];
        fill_convex_poly(canvas, &quad, color);
    }

    fill_circle(canvas, start, cap_radius, color);
    fill_circle(canvas, end, cap_radius, color);
}
