//! Implementation of the `kcforge build` command.
//!
//! Resolves the build configuration for the given project, runs the full
//! pipeline (theme emission, manifest, packaging, artifact splitting,
//! launcher script) and prints the resulting summary.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use kcforge_lib::{BuildOptions, BuildOverrides, pipeline};
use tracing::debug;

use crate::output::{self, OutputFormat};

/// Execute the build command.
pub fn cmd_build(
  project: &Path,
  build_dir: Option<PathBuf>,
  no_jar: bool,
  silent: bool,
  format: OutputFormat,
) -> Result<()> {
  let overrides = BuildOverrides {
    build_dir,
    no_jar,
    silent,
  };

  let options = match BuildOptions::resolve(project, &overrides) {
    Ok(options) => options,
    Err(e) => {
      output::print_error(&e.to_string());
      std::process::exit(1);
    }
  };

  debug!(
    build_dir = %options.build_dir.display(),
    themes = options.theme_names.len(),
    "resolved build configuration"
  );

  if !options.silent && !format.is_json() {
    output::print_info(&format!(
      "Building Keycloak theme '{}' ({} theme name(s))",
      options.first_theme(),
      options.theme_names.len()
    ));
  }

  let started = Instant::now();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let summary = rt
    .block_on(pipeline::run_default(&options))
    .context("Build failed")?;

  if format.is_json() {
    output::print_json(&summary)?;
    return Ok(());
  }

  if !options.silent {
    output::print_success(&format!("Done in {}", output::format_duration(started.elapsed())));
    println!();
    println!("{}", summary.render());
  }

  Ok(())
}
