use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

mod cmd;
mod output;

/// kcforge - Keycloak theme build orchestrator
#[derive(Parser)]
#[command(name = "kcforge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the theme jar and the testing container script
  Build {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    project: PathBuf,

    /// Override the build output directory
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Skip the packaging step (still emits themes, manifest and launcher)
    #[arg(long)]
    no_jar: bool,

    /// Suppress the build report
    #[arg(short, long)]
    silent: bool,

    /// Output format for the summary
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
  },

  /// Scaffold a kcforge.toml in a new or existing project
  Init {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    project: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt().with_env_filter(filter).without_time().init();

  match cli.command {
    Commands::Build {
      project,
      build_dir,
      no_jar,
      silent,
      format,
    } => cmd::cmd_build(&project, build_dir, no_jar, silent, format),
    Commands::Init { project } => cmd::cmd_init(&project),
  }
}
