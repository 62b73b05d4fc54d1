// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use clap::Parser;

use openpose_render::cli::args::{Cli, Commands};
use openpose_render::cli::draw::{run_draw, run_dwpose, run_select};

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Draw(args) => run_draw(args),
        Commands::DwPose(args) => run_dwpose(args),
        Commands::Select(args) => run_select(args),
    }
}
