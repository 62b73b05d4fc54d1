// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Static drawing tables: palette and skeleton topology.

/// Color definitions and palettes.
pub mod color;

/// Limb and hand topology, wholebody segment layout.
pub mod skeleton;

pub use color::Color;
