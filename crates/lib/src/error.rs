//! Error types for the build pipeline.
//!
//! Every variant is fatal: the pipeline stops at the first failure and leaves
//! the build directory in whatever partial state existed at that point. There
//! is no retry and no rollback.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running the build pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
  /// Build configuration was missing or malformed.
  /// Raised before any file I/O happens.
  #[error("invalid build configuration: {0}")]
  Configuration(#[from] ConfigError),

  /// Emitting the files for one theme failed.
  #[error("failed to emit theme '{theme}': {source}")]
  ThemeEmission {
    theme: String,
    #[source]
    source: std::io::Error,
  },

  /// Writing the Maven manifest failed.
  #[error("failed to write manifest {path}: {source}")]
  ManifestWrite {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The external packaging tool exited non-zero (or was killed).
  #[error("packaging command `{command}` failed with exit code {code:?}")]
  PackagingToolFailed { command: String, code: Option<i32> },

  /// The packaging tool exited 0 but did not produce the expected
  /// `original-` prefixed sibling of the primary artifact.
  #[error("packaging tool did not produce expected artifact {path}")]
  PackagingOutputMissing { path: PathBuf },

  /// Renaming the retro-compatibility artifact failed.
  #[error("failed to rename {from} to {to}: {source}")]
  Rename {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Writing the testing container script failed.
  #[error("failed to write testing container script {path}: {source}")]
  LauncherEmission {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Residual I/O error not attributable to a more specific step.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
