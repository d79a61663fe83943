//! pointer-follower: replay recorded pointer traces through the follower animation

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pointer_follower::commands::replay_file;
use pointer_follower::Settings;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pointer-follower")]
#[command(about = "Elastic pointer-follower animation tools", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded pointer trace and write per-frame transforms
    Replay {
        /// Trace file (JSON)
        input: PathBuf,

        /// Output file for frames (JSON)
        output: PathBuf,

        /// Output frame rate
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
    },

    /// Print the default settings as JSON
    Defaults,
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(Settings::default()),
    }
}

fn main() -> Result<()> {
    pointer_follower::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Replay { input, output, fps } => {
            let settings = load_settings(cli.config.as_deref())?;
            let frames = replay_file(&input, &output, &settings, fps)?;
            println!("Wrote {} frames to {}", frames, output.display());
        }
        Commands::Defaults => {
            let settings = load_settings(cli.config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
