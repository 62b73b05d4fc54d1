// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::ops::Range;

/// OpenPose body skeleton structure (pairs of zero-based keypoint indices)
/// Defines which keypoints connect to form the 17 limbs of the 18-point body
pub const LIMB_SEQ: [[usize; 2]; 17] = [
    [1, 2],   // neck to right shoulder
    [1, 5],   // neck to left shoulder
    [2, 3],   // right shoulder to right elbow
    [3, 4],   // right elbow to right wrist
    [5, 6],   // left shoulder to left elbow
    [6, 7],   // left elbow to left wrist
    [1, 8],   // neck to right hip
    [8, 9],   // right hip to right knee
    [9, 10],  // right knee to right ankle
    [1, 11],  // neck to left hip
    [11, 12], // left hip to left knee
    [12, 13], // left knee to left ankle
    [1, 0],   // neck to nose
    [0, 14],  // nose to right eye
    [14, 16], // right eye to right ear
    [0, 15],  // nose to left eye
    [15, 17], // left eye to left ear
];

/// Hand skeleton structure, relative to the hand's wrist keypoint
/// Five fingers of four edges each, all rooted at the wrist (0)
pub const HAND_EDGES: [[usize; 2]; 20] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 4],
    [0, 5],
    [5, 6],
    [6, 7],
    [7, 8],
    [0, 9],
    [9, 10],
    [10, 11],
    [11, 12],
    [0, 13],
    [13, 14],
    [14, 15],
    [15, 16],
    [0, 17],
    [17, 18],
    [18, 19],
    [19, 20],
];

/// Number of keypoint slots in the body scheme.
pub const BODY_POINTS: usize = 18;

/// Number of keypoint slots in the wholebody scheme.
pub const WHOLEBODY_POINTS: usize = 134;

/// Body segment of the wholebody layout.
pub const BODY_RANGE: Range<usize> = 0..18;
/// Face segment of the wholebody layout.
pub const FACE_RANGE: Range<usize> = 18..24;
/// Feet segment of the wholebody layout.
pub const FEET_RANGE: Range<usize> = 24..92;
/// Left hand segment of the wholebody layout.
pub const LEFT_HAND_RANGE: Range<usize> = 92..113;
/// Right hand segment of the wholebody layout.
pub const RIGHT_HAND_RANGE: Range<usize> = 113..134;

/// All wholebody segments, in layout order.
pub const WHOLEBODY_SEGMENTS: [Range<usize>; 5] = [
    BODY_RANGE,
    FACE_RANGE,
    FEET_RANGE,
    LEFT_HAND_RANGE,
    RIGHT_HAND_RANGE,
];
