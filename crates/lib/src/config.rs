//! Build configuration resolution.
//!
//! Options come from two places: the `kcforge.toml` file at the project root
//! and CLI overrides. They are merged once into an immutable [`BuildOptions`]
//! that the rest of the pipeline only reads. All validation happens here,
//! before the pipeline touches the filesystem.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Basename of the project configuration file.
pub const CONFIG_BASENAME: &str = "kcforge.toml";

/// Default build output directory, relative to the project root.
pub const DEFAULT_BUILD_DIR: &str = "build_keycloak";

/// Default theme resource directory, relative to the project root.
pub const DEFAULT_THEME_SRC_DIR: &str = "theme";

/// Errors raised while resolving or validating build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// The configuration file does not exist.
  #[error("config file not found: {path}")]
  NotFound { path: PathBuf },

  /// The configuration file is not valid TOML (or has the wrong shape).
  #[error("failed to parse {path}: {message}")]
  Parse { path: PathBuf, message: String },

  /// `[theme] names` is empty or missing.
  #[error("at least one theme name must be configured")]
  NoThemes,

  /// A configured theme name is the empty string.
  #[error("theme names must not be empty")]
  EmptyThemeName,

  /// The same theme name appears twice.
  #[error("duplicate theme name: {name}")]
  DuplicateTheme { name: String },

  /// Reading the configuration file failed.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// `[theme]` section of `kcforge.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ThemeSection {
  #[serde(default)]
  names: Vec<String>,
  version: Option<String>,
  src: Option<PathBuf>,
  #[serde(default)]
  extra_properties: Vec<String>,
}

/// `[artifact]` section of `kcforge.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct ArtifactSection {
  group_id: Option<String>,
  artifact_id: Option<String>,
}

/// `[build]` section of `kcforge.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct BuildSection {
  dir: Option<PathBuf>,
}

/// On-disk shape of `kcforge.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
  #[serde(default)]
  theme: ThemeSection,
  #[serde(default)]
  artifact: ArtifactSection,
  #[serde(default)]
  build: BuildSection,
}

/// CLI-level overrides applied on top of the configuration file.
#[derive(Debug, Default, Clone)]
pub struct BuildOverrides {
  /// Override the build output directory.
  pub build_dir: Option<PathBuf>,
  /// Skip the packaging step.
  pub no_jar: bool,
  /// Suppress the CLI's own reporting.
  pub silent: bool,
}

/// Immutable, fully-resolved build configuration.
///
/// Created once per invocation and read-only thereafter.
#[derive(Debug, Clone)]
pub struct BuildOptions {
  /// Ordered, distinct theme names. Never empty.
  pub theme_names: Vec<String>,
  /// Artifact version, used verbatim in the jar filename.
  pub theme_version: String,
  /// Extra `key=value` lines appended to each generated theme.properties.
  pub extra_theme_properties: Vec<String>,
  /// Maven group id.
  pub group_id: String,
  /// Maven artifact id.
  pub artifact_id: String,
  /// Root of the user's project.
  pub project_root: PathBuf,
  /// Directory all generated sources, manifests and artifacts go under.
  pub build_dir: PathBuf,
  /// Directory holding the user's theme resources (may not exist).
  pub theme_src_dir: PathBuf,
  /// Whether to run the packaging tool at all.
  pub create_jar: bool,
  /// Whether the caller should suppress its reporting.
  pub silent: bool,
}

impl BuildOptions {
  /// Resolve options from `<project_root>/kcforge.toml` plus CLI overrides.
  pub fn resolve(project_root: &Path, overrides: &BuildOverrides) -> Result<Self, ConfigError> {
    let project_root = dunce::canonicalize(project_root).unwrap_or_else(|_| project_root.to_path_buf());
    let config_path = project_root.join(CONFIG_BASENAME);

    if !config_path.exists() {
      return Err(ConfigError::NotFound { path: config_path });
    }

    let raw = std::fs::read_to_string(&config_path)?;
    let file: ConfigFile = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
      path: config_path.clone(),
      message: e.to_string(),
    })?;

    debug!(path = %config_path.display(), "loaded config");

    let theme_names = file.theme.names;
    let first_theme = theme_names.first().cloned().unwrap_or_default();

    let artifact_id = file
      .artifact
      .artifact_id
      .unwrap_or_else(|| format!("{first_theme}-keycloak-theme"));
    let group_id = file
      .artifact
      .group_id
      .unwrap_or_else(|| format!("dev.kcforge.{artifact_id}"));

    let build_dir = overrides
      .build_dir
      .clone()
      .or(file.build.dir)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
    let theme_src_dir = file.theme.src.unwrap_or_else(|| PathBuf::from(DEFAULT_THEME_SRC_DIR));

    let options = Self {
      theme_names,
      theme_version: file.theme.version.unwrap_or_else(|| "0.0.0".to_string()),
      extra_theme_properties: file.theme.extra_properties,
      group_id,
      artifact_id,
      build_dir: resolve_against(&project_root, build_dir),
      theme_src_dir: resolve_against(&project_root, theme_src_dir),
      project_root,
      create_jar: !overrides.no_jar,
      silent: overrides.silent,
    };

    options.validate()?;
    Ok(options)
  }

  /// Check the invariants the pipeline relies on.
  ///
  /// Theme names must be present, non-empty and distinct. Order is preserved
  /// as configured; validation never reorders or deduplicates.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.theme_names.is_empty() {
      return Err(ConfigError::NoThemes);
    }

    let mut seen = HashSet::new();
    for name in &self.theme_names {
      if name.is_empty() {
        return Err(ConfigError::EmptyThemeName);
      }
      if !seen.insert(name.as_str()) {
        return Err(ConfigError::DuplicateTheme { name: name.clone() });
      }
    }

    Ok(())
  }

  /// First configured theme name.
  ///
  /// The summary's follow-up instructions reference it.
  pub fn first_theme(&self) -> &str {
    &self.theme_names[0]
  }
}

fn resolve_against(root: &Path, path: PathBuf) -> PathBuf {
  if path.is_absolute() { path } else { root.join(path) }
}
