// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use crate::cli::args::{DrawArgs, DwPoseArgs, ModeArg, SelectArgs};
use crate::cli::logging::set_verbose;
use crate::dwpose::{render_dw_combined, render_dw_pose};
use crate::io::{FrameWriter, find_next_run_dir, load_backgrounds, read_pose_file, write_json};
use crate::keypoints::{CanvasSize, KeypointFrame, PoseInput, rewrite_frame, select_frame};
use crate::sequence::render_images;
use crate::utils::pluralize;
use crate::{DrawConfig, NAME, VERSION};
use crate::{error, info, section, success, verbose, warn};

/// Parent directory for run outputs.
const RUNS_DIR: &str = "runs";

/// Render a keypoint sequence and save the frames as PNG files.
#[allow(clippy::cast_precision_loss)]
pub fn run_draw(args: &DrawArgs) {
    set_verbose(args.verbose);
    info!("{NAME} {VERSION} 🚀 draw");

    let mut config = DrawConfig::new()
        .with_threshold(args.threshold)
        .with_scale_for_xinsr(args.xinsr)
        .with_scheme(args.scheme)
        .with_draw_all_people(!args.first_only)
        .with_default_canvas(args.width, args.height);
    config = match args.mode {
        ModeArg::Overlay => config.with_overlay(args.alpha),
        ModeArg::Mask => config.with_mask_paste(),
    };

    let text = read_pose_file(&args.pose).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    let frames = match PoseInput::from_json_str(&text, config.default_canvas) {
        Ok(input) => input.into_frames(config.default_canvas),
        Err(e) => {
            warn!("Unreadable pose data in {}, rendering a blank frame: {e}", args.pose.display());
            Vec::new()
        }
    };

    let backgrounds = load_backgrounds(&args.background).unwrap_or_else(|e| {
        warn!("Ignoring backgrounds: {e}");
        Vec::new()
    });

    verbose!(
        "{}, {}, scheme={}, threshold={}, xinsr={}",
        pluralize(frames.len(), "frame"),
        pluralize(backgrounds.len(), "background"),
        config.scheme,
        config.threshold,
        config.scale_for_xinsr
    );

    let start = Instant::now();
    let images = render_images(&frames, &backgrounds, &config).unwrap_or_else(|e| {
        error!("Rendering failed: {e}");
        process::exit(1);
    });
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;
    verbose!(
        "Speed: {:.1}ms per frame",
        elapsed / images.len().max(1) as f64
    );

    let writer = FrameWriter::new(output_dir(args.save_dir.as_deref(), "draw"));
    if let Err(e) = writer.save_all(&images) {
        error!("Saving frames failed: {e}");
        process::exit(1);
    }
    success!(
        "Saved {} to {}",
        pluralize(images.len(), "frame"),
        writer.save_dir().display()
    );
}

/// Render editor pose JSON in DW-pose style, plus the combined image when a
/// background is given.
pub fn run_dwpose(args: &DwPoseArgs) {
    set_verbose(args.verbose);
    info!("{NAME} {VERSION} 🚀 dwpose");

    let text = read_pose_file(&args.pose).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    let pose = render_dw_pose(&text, args.width, args.height, args.xinsr);
    verbose!("Rendered {}x{} DW-pose image", args.width, args.height);

    let writer = FrameWriter::new(output_dir(args.save_dir.as_deref(), "dwpose"));
    let mut saved = vec![writer.save_named("dw_pose.png", &pose)];
    if args.background.is_some() {
        let combined = render_dw_combined(&pose, args.background.as_deref());
        saved.push(writer.save_named("dw_combined.png", &combined));
    }

    for result in saved {
        match result {
            Ok(path) => {
                success!("Saved {}", path.display());
            }
            Err(e) => {
                error!("Saving image failed: {e}");
                process::exit(1);
            }
        }
    }
}

/// Select a frame of a sequence and optionally rewrite another one.
///
/// Writes `selected.json` (the single frame) and `updated.json` (the full,
/// possibly rewritten sequence).
pub fn run_select(args: &SelectArgs) {
    set_verbose(args.verbose);
    info!("{NAME} {VERSION} 🚀 select");

    let default = CanvasSize::EDITOR_DEFAULT;
    let frames = parse_frames(&args.pose, default);
    let (selected, index) = select_frame(&frames, args.index);
    if index != args.index {
        warn!("Frame index {} out of range, using {index}", args.index);
    }
    verbose!(
        "Selected frame {index} of {} with {}",
        frames.len(),
        pluralize(selected.people.len(), "person")
    );

    let updated = match &args.rewrite {
        Some(path) => {
            section!("Rewrite");
            let replacement = parse_frames(path, default)
                .into_iter()
                .next()
                .unwrap_or_else(|| KeypointFrame::blank(default));
            verbose!("Replacing frame {} with {}", args.rewrite_index, path.display());
            rewrite_frame(frames, args.rewrite_index, replacement)
        }
        None => frames,
    };

    let dir = output_dir(args.save_dir.as_deref(), "select");
    for (name, result) in [
        ("selected.json", write_json(dir.join("selected.json"), &selected)),
        ("updated.json", write_json(dir.join("updated.json"), &updated)),
    ] {
        if let Err(e) = result {
            error!("Writing {name} failed: {e}");
            process::exit(1);
        }
    }
    success!("Results saved to {}", dir.display());
}

/// Read and normalize a pose file, exiting on read errors and degrading to
/// an empty sequence on parse errors.
fn parse_frames(path: &Path, default: CanvasSize) -> Vec<KeypointFrame> {
    let text = read_pose_file(path).unwrap_or_else(|e| {
        error!("{e}");
        process::exit(1);
    });
    match PoseInput::from_json_str(&text, default) {
        Ok(input) => input.into_frames(default),
        Err(e) => {
            warn!("Unreadable pose data in {}: {e}", path.display());
            PoseInput::FrameList(Vec::new()).into_frames(default)
        }
    }
}

/// Explicit save directory, or the next free `runs/<prefix>[N]`.
fn output_dir(save_dir: Option<&Path>, prefix: &str) -> PathBuf {
    save_dir.map_or_else(
        || find_next_run_dir(Path::new(RUNS_DIR), prefix),
        Path::to_path_buf,
    )
}
