// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! I/O utilities: pose files, background images and saving rendered frames.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::Serialize;

use crate::error::{RenderError, Result};

/// Image extensions picked up when a background path is a directory.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "webp", "tiff"];

/// Find the next available run directory (draw, draw2, draw3, etc.)
#[must_use]
pub fn find_next_run_dir(base: &Path, prefix: &str) -> PathBuf {
    let first = base.join(prefix);
    if !first.exists() {
        return first;
    }

    (2..)
        .map(|i| base.join(format!("{prefix}{i}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(first)
}

/// Load an image from disk as 8-bit RGB.
///
/// # Errors
///
/// Returns [`RenderError::ImageError`] if the file cannot be opened or decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    image::open(path)
        .map(|img| img.to_rgb8())
        .map_err(|e| RenderError::ImageError(format!("{}: {e}", path.display())))
}

/// Load background images.
///
/// A directory expands to its image files in file name order, so a folder of
/// numbered frames becomes a per-frame background batch.
///
/// # Errors
///
/// Returns an error if a directory cannot be listed or an image cannot be
/// decoded.
pub fn load_backgrounds(paths: &[PathBuf]) -> Result<Vec<RgbImage>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = fs::read_dir(path)?
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|p| is_image_file(p))
                .collect();
            entries.sort();
            files.extend(entries);
        } else {
            files.push(path.clone());
        }
    }
    files.iter().map(load_image).collect()
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Read a pose JSON file to a string.
///
/// # Errors
///
/// Returns [`RenderError::IoError`] if the file cannot be read.
pub fn read_pose_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| RenderError::IoError(format!("{}: {e}", path.display())))
}

/// Write a value as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json<P: AsRef<Path>, T: Serialize + ?Sized>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).map_err(|e| RenderError::IoError(format!("{}: {e}", path.display())))
}

/// Saves rendered frames as numbered PNG files.
#[derive(Debug, Clone)]
pub struct FrameWriter {
    save_dir: PathBuf,
}

impl FrameWriter {
    /// Create a new `FrameWriter`.
    ///
    /// # Arguments
    ///
    /// * `save_dir` - Directory to save frames in; created on first save.
    #[must_use]
    pub const fn new(save_dir: PathBuf) -> Self {
        Self { save_dir }
    }

    /// Output directory.
    #[must_use]
    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// Save one frame as `frame_{index:05}.png`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or encoding fails.
    pub fn save(&self, index: usize, frame: &RgbImage) -> Result<PathBuf> {
        self.save_named(&format!("frame_{index:05}.png"), frame)
    }

    /// Save one image under `name` in the output directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or encoding fails.
    pub fn save_named(&self, name: &str, image: &RgbImage) -> Result<PathBuf> {
        if !self.save_dir.exists() {
            fs::create_dir_all(&self.save_dir)
                .map_err(|e| RenderError::IoError(e.to_string()))?;
        }
        let path = self.save_dir.join(name);
        image
            .save(&path)
            .map_err(|e| RenderError::ImageError(e.to_string()))?;
        Ok(path)
    }

    /// Save all frames in order.
    ///
    /// # Errors
    ///
    /// Returns the first saving error.
    pub fn save_all(&self, frames: &[RgbImage]) -> Result<Vec<PathBuf>> {
        frames
            .iter()
            .enumerate()
            .map(|(i, frame)| self.save(i, frame))
            .collect()
    }
}
