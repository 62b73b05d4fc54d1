// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Pose keypoint data model and ingress normalization.
//!
//! Upstream pose data arrives as loosely shaped JSON: a single frame object,
//! a list of frames, or a bare list of person records. [`PoseInput`] names
//! those three shapes and resolves them once into a canonical list of
//! [`KeypointFrame`]s. Malformed pieces never fail the parse; they degrade to
//! empty keypoint arrays, blank frames, or default canvas sizes.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Keys whose presence marks a JSON object as a person record.
pub const PERSON_KEYS: [&str; 6] = [
    "pose_keypoints_2d",
    "face_keypoints_2d",
    "hand_left_keypoints_2d",
    "hand_right_keypoints_2d",
    "foot_keypoints_2d",
    "id",
];

/// Largest accepted canvas side; larger declared sizes fall back to the default.
pub const MAX_CANVAS_SIDE: u32 = 16384;

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

impl CanvasSize {
    /// Default canvas of the keypoint drawing pipeline.
    pub const DRAW_DEFAULT: Self = Self::new(512, 512);
    /// Default canvas of the pose editor.
    pub const EDITOR_DEFAULT: Self = Self::new(512, 768);

    /// Create a new canvas size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::DRAW_DEFAULT
    }
}

/// One person's flat keypoint arrays (`x, y, confidence` triples).
///
/// `pose_keypoints_2d` carries the body (18 points) or the packed 134-point
/// wholebody layout. The named segment arrays are optional and only consulted
/// by the wholebody extractor for sub-ranges the packed array does not reach.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Person {
    /// Body or packed wholebody keypoints.
    pub pose_keypoints_2d: Vec<f32>,
    /// Face keypoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_keypoints_2d: Option<Vec<f32>>,
    /// Foot keypoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foot_keypoints_2d: Option<Vec<f32>>,
    /// Left hand keypoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_left_keypoints_2d: Option<Vec<f32>>,
    /// Right hand keypoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_right_keypoints_2d: Option<Vec<f32>>,
}

impl Person {
    /// Create a person from a flat `pose_keypoints_2d` array.
    #[must_use]
    pub fn new(pose_keypoints_2d: Vec<f32>) -> Self {
        Self {
            pose_keypoints_2d,
            ..Self::default()
        }
    }

    /// Parse a person record. Non-object values yield an empty person.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            pose_keypoints_2d: parse_flat(obj.get("pose_keypoints_2d")).unwrap_or_default(),
            face_keypoints_2d: parse_flat(obj.get("face_keypoints_2d")),
            foot_keypoints_2d: parse_flat(obj.get("foot_keypoints_2d")),
            hand_left_keypoints_2d: parse_flat(obj.get("hand_left_keypoints_2d")),
            hand_right_keypoints_2d: parse_flat(obj.get("hand_right_keypoints_2d")),
        }
    }

    /// Whether a JSON value looks like a person record.
    #[must_use]
    pub fn is_record(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|obj| PERSON_KEYS.iter().any(|key| obj.contains_key(*key)))
    }
}

/// A single frame: canvas size plus people in drawing order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeypointFrame {
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// People in rendering order; later people overdraw earlier ones.
    pub people: Vec<Person>,
}

impl KeypointFrame {
    /// Create a frame with the given size and people.
    #[must_use]
    pub const fn new(size: CanvasSize, people: Vec<Person>) -> Self {
        Self {
            canvas_width: size.width,
            canvas_height: size.height,
            people,
        }
    }

    /// A frame with no people.
    #[must_use]
    pub const fn blank(size: CanvasSize) -> Self {
        Self::new(size, Vec::new())
    }

    /// Canvas size of this frame.
    #[must_use]
    pub const fn size(&self) -> CanvasSize {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// Parse a frame record.
    ///
    /// Non-object values become a blank frame of `default` size; a missing or
    /// non-list `people` entry becomes an empty people list.
    #[must_use]
    pub fn from_value(value: &Value, default: CanvasSize) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::blank(default);
        };
        let size = CanvasSize::new(
            parse_dim(obj.get("canvas_width"), default.width),
            parse_dim(obj.get("canvas_height"), default.height),
        );
        let people = obj
            .get("people")
            .and_then(Value::as_array)
            .map(|people| people.iter().map(Person::from_value).collect())
            .unwrap_or_default();
        Self::new(size, people)
    }
}

/// The three shapes pose data arrives in.
#[derive(Debug, Clone, PartialEq)]
pub enum PoseInput {
    /// One frame object with a `people` list.
    SingleFrame(KeypointFrame),
    /// A list of frame objects.
    FrameList(Vec<KeypointFrame>),
    /// A bare list of person records, treated as one frame.
    PersonList(Vec<Person>),
}

impl PoseInput {
    /// Classify and parse a JSON value.
    ///
    /// # Arguments
    ///
    /// * `value` - Parsed JSON.
    /// * `default` - Canvas size used where a frame declares none.
    #[must_use]
    pub fn from_value(value: &Value, default: CanvasSize) -> Self {
        match value {
            Value::Object(obj) if !obj.contains_key("people") && Person::is_record(value) => {
                Self::PersonList(vec![Person::from_value(value)])
            }
            Value::Object(_) => Self::SingleFrame(KeypointFrame::from_value(value, default)),
            Value::Array(items) if items.first().is_some_and(Person::is_record) => {
                Self::PersonList(items.iter().map(Person::from_value).collect())
            }
            Value::Array(items) => Self::FrameList(
                items
                    .iter()
                    .map(|item| KeypointFrame::from_value(item, default))
                    .collect(),
            ),
            _ => Self::FrameList(Vec::new()),
        }
    }

    /// Parse pose JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON.
    pub fn from_json_str(text: &str, default: CanvasSize) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value, default))
    }

    /// Resolve into the canonical frame list.
    ///
    /// An empty frame list becomes a single blank frame of `default` size.
    #[must_use]
    pub fn into_frames(self, default: CanvasSize) -> Vec<KeypointFrame> {
        let frames = match self {
            Self::SingleFrame(frame) => vec![frame],
            Self::FrameList(frames) => frames,
            Self::PersonList(people) => vec![KeypointFrame::new(default, people)],
        };
        if frames.is_empty() {
            vec![KeypointFrame::blank(default)]
        } else {
            frames
        }
    }
}

/// Select one frame, clamping `index` into range.
///
/// # Returns
///
/// The selected frame (blank default frame if `frames` is empty) and the
/// clamped index.
#[must_use]
pub fn select_frame(frames: &[KeypointFrame], index: usize) -> (KeypointFrame, usize) {
    let Some(last) = frames.len().checked_sub(1) else {
        return (KeypointFrame::blank(CanvasSize::EDITOR_DEFAULT), 0);
    };
    let index = index.min(last);
    (frames[index].clone(), index)
}

/// Replace the frame at `index` (clamped into range) with `replacement`.
///
/// An empty sequence gains `replacement` as its only frame.
#[must_use]
pub fn rewrite_frame(
    mut frames: Vec<KeypointFrame>,
    index: usize,
    replacement: KeypointFrame,
) -> Vec<KeypointFrame> {
    match frames.len().checked_sub(1) {
        Some(last) => frames[index.min(last)] = replacement,
        None => frames.push(replacement),
    }
    frames
}

/// Parse a flat numeric array. `None` when absent or null; empty when malformed.
#[allow(clippy::cast_possible_truncation)]
fn parse_flat(value: Option<&Value>) -> Option<Vec<f32>> {
    match value? {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .iter()
                .map(|v| v.as_f64().map(|f| f as f32))
                .collect::<Option<Vec<f32>>>()
                .unwrap_or_default(),
        ),
        _ => Some(Vec::new()),
    }
}

/// Parse a canvas dimension, falling back to `default` when absent or unusable.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_dim(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(v) if v.is_finite() && v >= 1.0 && v <= f64::from(MAX_CANVAS_SIDE) => v as u32,
        _ => default,
    }
}
