// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # OpenPose Skeleton Rendering Library
//!
//! Rasterizes 2D human pose keypoints into OpenPose-style skeleton images,
//! the conditioning format used by pose ControlNets. Keypoint sequences in the
//! OpenPose JSON layout go in; dense `[frames, height, width, 3]` pixel
//! batches (or PNG frames) come out.
//!
//! ## Features
//!
//! - **Two Schemes** - 18-point OpenPose body and 134-point wholebody (body, face, feet, hands)
//! - **Resolution Aware** - Stroke widths scale with canvas size, with an optional thick-line tier
//! - **Forgiving Ingress** - Single frames, frame lists and bare person lists, normalized or pixel coordinates
//! - **Backgrounds** - Overlay with alpha blending or mask-paste onto per-frame or broadcast images
//! - **Parallel** - Frames render independently across threads with [rayon](https://docs.rs/rayon)
//! - **Editor Output** - DW-pose style rendering of pose editor JSON
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! openpose-render = "0.1.0"
//! ```
//!
//! ## Quick Start (Library)
//!
//! ```no_run
//! use openpose_render::{DrawConfig, Scheme, render_json};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let json = std::fs::read_to_string("pose.json")?;
//!     let config = DrawConfig::new().with_scheme(Scheme::Body).with_threshold(0.3);
//!
//!     // [frames, height, width, 3], values in [0, 1]
//!     let batch = render_json(&json, &[], &config)?;
//!     println!("Rendered {} frames", batch.shape()[0]);
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Render a keypoint sequence to runs/draw/frame_00000.png, ...
//! openpose-render draw --pose pose.json
//!
//! # Body scheme with thick lines, pasted onto a folder of frames
//! openpose-render draw -p pose.json --scheme body --xinsr -b frames/ --mode mask
//!
//! # DW-pose render of editor JSON plus a combined image
//! openpose-render dwpose -p editor.json --width 1024 --height 1024 -b photo.png
//!
//! # Select frame 3 and replace frame 0
//! openpose-render select -p pose.json --index 3 --rewrite fix.json --rewrite-index 0
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`keypoints`] | Pose data model and input normalization ([`PoseInput`], [`KeypointFrame`]) |
//! | [`extract`] | Keypoint extraction and denormalization |
//! | [`scale`] | Stroke sizing from canvas size |
//! | [`render`] | Body and wholebody skeleton drawing |
//! | [`composite`] | Background resize, mask paste and blending |
//! | [`sequence`] | Frame sequence rendering into dense batches |
//! | [`dwpose`] | DW-pose style editor rendering |
//! | [`config`] | Rendering configuration ([`DrawConfig`]) |
//! | [`error`] | Error types ([`RenderError`], [`Result`]) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod cli;
pub mod composite;
pub mod config;
pub mod draw;
pub mod dwpose;
pub mod error;
pub mod extract;
pub mod io;
pub mod keypoints;
pub mod render;
pub mod scale;
pub mod scheme;
pub mod sequence;
pub mod utils;
pub mod visualizer;

// Re-exports for convenience
pub use config::{CompositeMode, DrawConfig};
pub use dwpose::{render_dw_combined, render_dw_pose};
pub use error::{RenderError, Result};
pub use extract::{ExtractedPose, extract};
pub use keypoints::{CanvasSize, KeypointFrame, Person, PoseInput, rewrite_frame, select_frame};
pub use render::{DrawStats, draw_body, draw_pose, draw_wholebody};
pub use scale::{ScaleRule, StrokeScale, stroke_scale};
pub use scheme::Scheme;
pub use sequence::{render_frame, render_images, render_json, render_sequence};
pub use visualizer::Color;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
