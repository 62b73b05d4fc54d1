// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::render::DEFAULT_THRESHOLD;
use crate::scheme::Scheme;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Draw Options:
    --pose, -p <POSE>              Pose keypoint JSON file
    --background, -b <BACKGROUND>  Background image(s) or directory of frames
    --scheme <SCHEME>              Keypoint scheme (body, wholebody) [default: wholebody]
    --threshold <THRESHOLD>        Keypoint confidence threshold [default: 0.3]
    --xinsr                        Scale stick width for thick-line ControlNet models
    --first-only                   Draw only the first person of each frame
    --mode <MODE>                  Background mode (overlay, mask) [default: overlay]
    --alpha <ALPHA>                Overlay blend weight [default: 1.0]

Examples:
    openpose-render draw --pose pose.json
    openpose-render draw -p pose.json --scheme body --xinsr
    openpose-render draw -p pose.json -b frames/ --mode mask
    openpose-render dwpose -p editor.json --width 1024 --height 1024 -b photo.png
    openpose-render select -p pose.json --index 3"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a keypoint sequence to skeleton frames
    Draw(DrawArgs),
    /// Render editor pose JSON in DW-pose style
    #[command(name = "dwpose")]
    DwPose(DwPoseArgs),
    /// Select one frame of a sequence, optionally rewriting another
    Select(SelectArgs),
}

/// Background combination mode on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Draw onto the background, blended by `--alpha`
    Overlay,
    /// Paste non-black skeleton pixels onto the background
    Mask,
}

/// Arguments for the draw command.
#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct DrawArgs {
    /// Pose keypoint JSON file
    #[arg(short, long)]
    pub pose: PathBuf,

    /// Background image(s), or a directory of frames
    #[arg(short, long, num_args = 1..)]
    pub background: Vec<PathBuf>,

    /// Keypoint scheme (body, wholebody)
    #[arg(long, default_value_t = Scheme::WholeBody)]
    pub scheme: Scheme,

    /// Keypoint confidence threshold
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Scale stick width for thick-line ControlNet models
    #[arg(long, default_value_t = false)]
    pub xinsr: bool,

    /// Draw only the first person of each frame
    #[arg(long, default_value_t = false)]
    pub first_only: bool,

    /// Background mode
    #[arg(long, value_enum, default_value_t = ModeArg::Overlay)]
    pub mode: ModeArg,

    /// Overlay blend weight of the skeleton
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f32,

    /// Canvas width for frames without a declared size
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Canvas height for frames without a declared size
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Output directory [default: runs/draw, runs/draw2, ...]
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the dwpose command.
#[derive(Args, Debug)]
pub struct DwPoseArgs {
    /// Editor pose JSON file
    #[arg(short, long)]
    pub pose: PathBuf,

    /// Output width
    #[arg(long, default_value_t = 512)]
    pub width: u32,

    /// Output height
    #[arg(long, default_value_t = 512)]
    pub height: u32,

    /// Scale stick width for thick-line ControlNet models
    #[arg(long, default_value_t = false)]
    pub xinsr: bool,

    /// Background image for the combined output
    #[arg(short, long)]
    pub background: Option<PathBuf>,

    /// Output directory [default: runs/dwpose, runs/dwpose2, ...]
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

/// Arguments for the select command.
#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Pose keypoint JSON file
    #[arg(short, long)]
    pub pose: PathBuf,

    /// Index of the frame to select (clamped into range)
    #[arg(long, default_value_t = 0)]
    pub index: usize,

    /// JSON file with a replacement frame
    #[arg(long)]
    pub rewrite: Option<PathBuf>,

    /// Index of the frame to replace (clamped into range)
    #[arg(long, default_value_t = 0)]
    pub rewrite_index: usize,

    /// Output directory [default: runs/select, runs/select2, ...]
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_draw_args_defaults() {
        let args = Cli::parse_from(["app", "draw", "--pose", "pose.json"]);
        match args.command {
            Commands::Draw(draw_args) => {
                assert_eq!(draw_args.pose, PathBuf::from("pose.json"));
                assert!(draw_args.background.is_empty());
                assert_eq!(draw_args.scheme, Scheme::WholeBody);
                assert!((draw_args.threshold - 0.3).abs() < f32::EPSILON);
                assert!(!draw_args.xinsr);
                assert!(!draw_args.first_only);
                assert_eq!(draw_args.mode, ModeArg::Overlay);
                assert!((draw_args.alpha - 1.0).abs() < f32::EPSILON);
                assert_eq!((draw_args.width, draw_args.height), (512, 512));
                assert!(draw_args.verbose);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_draw_args_custom() {
        let args = Cli::parse_from([
            "app",
            "draw",
            "-p",
            "pose.json",
            "-b",
            "a.png",
            "b.png",
            "--scheme",
            "body",
            "--mode",
            "mask",
            "--xinsr",
            "--verbose",
            "false",
        ]);
        match args.command {
            Commands::Draw(draw_args) => {
                assert_eq!(draw_args.background.len(), 2);
                assert_eq!(draw_args.scheme, Scheme::Body);
                assert_eq!(draw_args.mode, ModeArg::Mask);
                assert!(draw_args.xinsr);
                assert!(!draw_args.verbose);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_dwpose_and_select_args() {
        let args = Cli::parse_from(["app", "dwpose", "-p", "e.json", "--width", "1024"]);
        match args.command {
            Commands::DwPose(dw) => {
                assert_eq!((dw.width, dw.height), (1024, 512));
                assert!(dw.background.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }

        let args = Cli::parse_from(["app", "select", "-p", "s.json", "--index", "4"]);
        match args.command {
            Commands::Select(select) => {
                assert_eq!(select.index, 4);
                assert_eq!(select.rewrite_index, 0);
                assert!(select.rewrite.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
