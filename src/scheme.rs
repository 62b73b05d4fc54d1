// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Keypoint scheme definitions.
//!
//! A scheme names a keypoint layout and decides how many slots the extractor
//! produces and which renderer pass draws them.

use std::fmt;
use std::str::FromStr;

use crate::visualizer::skeleton::{BODY_POINTS, WHOLEBODY_POINTS};

/// Keypoint layout of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scheme {
    /// 18-slot OpenPose body; the first 18 joints carry 17 limbs.
    Body,
    /// 134-slot layout: body, face, feet, left hand, right hand.
    #[default]
    WholeBody,
}

impl Scheme {
    /// Returns the string representation used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::WholeBody => "wholebody",
        }
    }

    /// Number of keypoint slots the extractor produces for this scheme.
    #[must_use]
    pub const fn num_points(&self) -> usize {
        match self {
            Self::Body => BODY_POINTS,
            Self::WholeBody => WHOLEBODY_POINTS,
        }
    }

    /// Returns whether this scheme carries face, feet and hand segments.
    #[must_use]
    pub const fn has_extremities(&self) -> bool {
        matches!(self, Self::WholeBody)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = SchemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "body" | "body17" | "body18" | "openpose" => Ok(Self::Body),
            "wholebody" | "whole_body" | "whole-body" | "dwpose" => Ok(Self::WholeBody),
            _ => Err(SchemeParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid scheme string.
#[derive(Debug, Clone)]
pub struct SchemeParseError(String);

impl fmt::Display for SchemeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid keypoint scheme '{}', expected one of: body, wholebody",
            self.0
        )
    }
}

impl std::error::Error for SchemeParseError {}
