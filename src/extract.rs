// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Keypoint extraction.
//!
//! Turns a person's flat `x, y, confidence` arrays into an `N x 2` coordinate
//! array and an `N` confidence array for a [`Scheme`], denormalizing each
//! segment to pixel space. Extraction never fails: missing or malformed data
//! yields zero triples, which every renderer treats as absent.

use ndarray::{Array1, Array2, ArrayViewMut2, s};

use crate::keypoints::Person;
use crate::scheme::Scheme;
use crate::visualizer::skeleton::{
    BODY_POINTS, FACE_RANGE, FEET_RANGE, LEFT_HAND_RANGE, RIGHT_HAND_RANGE, WHOLEBODY_POINTS,
    WHOLEBODY_SEGMENTS,
};

/// Segments whose values at or below this bound are taken as normalized.
pub const NORMALIZED_MAX: f32 = 1.0;

/// Pixel-space keypoints of one person.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPose {
    /// Keypoint coordinates with shape (N, 2), pixel units.
    pub coords: Array2<f32>,
    /// Keypoint confidences with shape (N,).
    pub scores: Array1<f32>,
}

impl ExtractedPose {
    /// A pose of `n` absent (zero) keypoints.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self {
            coords: Array2::zeros((n, 2)),
            scores: Array1::zeros(n),
        }
    }

    /// Split an (N, 3) triple array into coordinates and confidences.
    #[must_use]
    pub fn from_triples(triples: &Array2<f32>) -> Self {
        Self {
            coords: triples.slice(s![.., 0..2]).to_owned(),
            scores: triples.column(2).to_owned(),
        }
    }

    /// Number of keypoint slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns `true` if there are no keypoint slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Pixel coordinates of keypoint `i`.
    #[must_use]
    pub fn xy(&self, i: usize) -> (f32, f32) {
        (self.coords[[i, 0]], self.coords[[i, 1]])
    }

    /// Confidence of keypoint `i`, zero when out of range.
    #[must_use]
    pub fn score(&self, i: usize) -> f32 {
        self.scores.get(i).copied().unwrap_or(0.0)
    }
}

/// Extract a person's keypoints for `scheme` on a `width` x `height` canvas.
///
/// * `Body` yields 18 slots; arrays shorter than 18 triples yield all zeros.
/// * `WholeBody` yields 134 slots; shorter arrays are zero-padded, longer ones
///   truncated. Named face/foot/hand arrays fill sub-ranges the packed array
///   does not reach.
///
/// Each segment is denormalized independently (see [`denormalize`]).
#[must_use]
pub fn extract(person: &Person, scheme: Scheme, width: u32, height: u32) -> ExtractedPose {
    let mut triples = match scheme {
        Scheme::Body => body_triples(&person.pose_keypoints_2d),
        Scheme::WholeBody => wholebody_triples(person),
    };

    match scheme {
        Scheme::Body => denormalize(triples.view_mut(), width, height),
        Scheme::WholeBody => {
            for segment in WHOLEBODY_SEGMENTS {
                denormalize(triples.slice_mut(s![segment, ..]), width, height);
            }
        }
    }

    ExtractedPose::from_triples(&triples)
}

/// Scale a segment's x by `width` and y by `height` when its largest x/y value
/// is at most [`NORMALIZED_MAX`]; otherwise leave it as pixel coordinates.
///
/// Re-running on already denormalized data is a no-op as long as some
/// coordinate exceeds 1 pixel. A pose legitimately lying within the top-left
/// pixel is indistinguishable from a normalized one and gets scaled.
#[allow(clippy::cast_precision_loss)]
pub fn denormalize(mut points: ArrayViewMut2<f32>, width: u32, height: u32) {
    if points.is_empty() {
        return;
    }
    let max = points
        .slice(s![.., 0..2])
        .iter()
        .fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
    if max <= NORMALIZED_MAX {
        points.column_mut(0).mapv_inplace(|x| x * width as f32);
        points.column_mut(1).mapv_inplace(|y| y * height as f32);
    }
}

fn body_triples(flat: &[f32]) -> Array2<f32> {
    let mut triples = Array2::zeros((BODY_POINTS, 3));
    if flat.len() >= BODY_POINTS * 3 {
        fill_triples(&mut triples, 0, flat, BODY_POINTS);
    }
    triples
}

fn wholebody_triples(person: &Person) -> Array2<f32> {
    let mut triples = Array2::zeros((WHOLEBODY_POINTS, 3));
    let packed = &person.pose_keypoints_2d;
    let packed_points = packed.len() / 3;
    fill_triples(&mut triples, 0, packed, WHOLEBODY_POINTS);

    let named = [
        (FACE_RANGE, &person.face_keypoints_2d),
        (FEET_RANGE, &person.foot_keypoints_2d),
        (LEFT_HAND_RANGE, &person.hand_left_keypoints_2d),
        (RIGHT_HAND_RANGE, &person.hand_right_keypoints_2d),
    ];
    for (range, segment) in named {
        if let Some(flat) = segment
            && packed_points <= range.start
        {
            fill_triples(&mut triples, range.start, flat, range.len());
        }
    }
    triples
}

/// Copy up to `max_points` whole triples from `flat` into rows starting at `start`.
/// A trailing partial triple is dropped.
fn fill_triples(triples: &mut Array2<f32>, start: usize, flat: &[f32], max_points: usize) {
    for (i, chunk) in flat.chunks_exact(3).take(max_points).enumerate() {
        let mut row = triples.row_mut(start + i);
        row[0] = chunk[0];
        row[1] = chunk[1];
        row[2] = chunk[2];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(points: &[(f32, f32, f32)]) -> Vec<f32> {
        points.iter().flat_map(|&(x, y, c)| [x, y, c]).collect()
    }

    #[test]
    fn test_body_short_input_is_all_zero() {
        let person = Person::new(flat(&[(0.5, 0.5, 1.0); 17]));
        let pose = extract(&person, Scheme::Body, 100, 200);
        assert_eq!(pose.len(), 18);
        assert!(pose.scores.iter().all(|&s| s == 0.0));
        assert!(pose.coords.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_body_denormalizes() {
        let mut points = vec![(0.0, 0.0, 0.0); 18];
        points[0] = (0.5, 0.25, 0.9);
        let pose = extract(&Person::new(flat(&points)), Scheme::Body, 100, 200);
        assert_eq!(pose.xy(0), (50.0, 50.0));
        assert!((pose.score(0) - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_body_truncates_extra_points() {
        let points = vec![(10.0, 20.0, 1.0); 25];
        let pose = extract(&Person::new(flat(&points)), Scheme::Body, 100, 100);
        assert_eq!(pose.len(), 18);
        assert_eq!(pose.xy(17), (10.0, 20.0));
    }

    #[test]
    fn test_pixel_space_is_idempotent() {
        let mut points = vec![(0.0, 0.0, 0.0); 18];
        points[1] = (120.0, 64.0, 1.0);
        points[2] = (0.5, 0.5, 1.0);
        let person = Person::new(flat(&points));
        let first = extract(&person, Scheme::Body, 512, 512);

        let again: Vec<(f32, f32, f32)> = (0..18)
            .map(|i| {
                let (x, y) = first.xy(i);
                (x, y, first.score(i))
            })
            .collect();
        let second = extract(&Person::new(flat(&again)), Scheme::Body, 512, 512);
        assert_eq!(first, second);
        assert_eq!(first.xy(2), (0.5, 0.5));
    }

    #[test]
    fn test_wholebody_always_134_points() {
        for n in [0usize, 5, 134, 200] {
            let person = Person::new(flat(&vec![(5.0, 5.0, 1.0); n]));
            let pose = extract(&person, Scheme::WholeBody, 64, 64);
            assert_eq!(pose.len(), 134);
            assert_eq!(pose.coords.shape(), &[134, 2]);
            let present = pose.scores.iter().filter(|&&s| s > 0.0).count();
            assert_eq!(present, n.min(134));
        }
    }

    #[test]
    fn test_wholebody_partial_triple_dropped() {
        let mut values = flat(&[(5.0, 5.0, 1.0); 2]);
        values.extend([7.0, 7.0]);
        let pose = extract(&Person::new(values), Scheme::WholeBody, 64, 64);
        assert!((pose.score(1) - 1.0).abs() < f32::EPSILON);
        assert_eq!(pose.score(2), 0.0);
    }

    #[test]
    fn test_wholebody_per_segment_denormalization() {
        let mut points = vec![(0.0, 0.0, 0.0); 134];
        points[0] = (300.0, 400.0, 1.0); // body already in pixels
        points[92] = (0.5, 0.5, 1.0); // left hand normalized
        let pose = extract(&Person::new(flat(&points)), Scheme::WholeBody, 640, 480);
        assert_eq!(pose.xy(0), (300.0, 400.0));
        assert_eq!(pose.xy(92), (320.0, 240.0));
    }

    #[test]
    fn test_wholebody_named_segments_fill_gaps() {
        let mut person = Person::new(flat(&[(0.5, 0.5, 1.0); 18]));
        person.hand_right_keypoints_2d = Some(flat(&[(10.0, 20.0, 0.8); 30]));
        person.face_keypoints_2d = Some(flat(&[(0.1, 0.1, 0.7); 2]));
        let pose = extract(&person, Scheme::WholeBody, 100, 100);

        assert_eq!(pose.xy(113), (10.0, 20.0));
        assert_eq!(pose.xy(133), (10.0, 20.0));
        assert!((pose.xy(18).0 - 10.0).abs() < 1e-4);
        assert_eq!(pose.score(20), 0.0);
        assert_eq!(pose.score(92), 0.0);
    }

    #[test]
    fn test_packed_array_wins_over_named_segment() {
        let mut person = Person::new(flat(&[(50.0, 50.0, 1.0); 134]));
        person.hand_left_keypoints_2d = Some(flat(&[(9.0, 9.0, 1.0); 21]));
        let pose = extract(&person, Scheme::WholeBody, 100, 100);
        assert_eq!(pose.xy(92), (50.0, 50.0));
    }

    #[test]
    fn test_score_out_of_range_is_zero() {
        let pose = ExtractedPose::zeros(3);
        assert_eq!(pose.score(10), 0.0);
        assert!(!pose.is_empty());
    }
}
