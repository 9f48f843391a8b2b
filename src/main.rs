use clap::{Parser, Subcommand};

mod commands;
mod output;
mod tty;

use commands::{presets, run, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "retoken")]
#[command(version = VERSION)]
#[command(about = "Apply ordered literal replacements across a list of files")]
struct Cli {
    /// Print a JSON envelope instead of status lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply replacement rules to target files
    Run(run::RunArgs),
    /// List built-in presets
    Presets(presets::PresetsArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs { json: cli.json };

    let exit_code = commands::run_command(cli.command, &global);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
