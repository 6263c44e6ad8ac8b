//! Theme emission.
//!
//! For each configured theme name this writes the Keycloak theme layout under
//! `<build_dir>/src/main/resources/theme/<name>/` so Maven can bundle it:
//! one `theme.properties` per theme type, the user's static resources for the
//! login theme, and the `META-INF/keycloak-themes.json` deployment descriptor
//! Keycloak uses to discover themes inside a provider jar.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::BuildOptions;

/// Theme types emitted for every theme name.
pub const THEME_TYPES: &[&str] = &["login", "account", "email"];

/// Writes the templated source files for one theme into the build directory.
///
/// The pipeline drives one implementation sequentially, once per configured
/// theme name. Implementations write into the shared build directory and must
/// not assume any other ordering guarantee.
pub trait ThemeEmitter {
  fn emit(&self, theme_name: &str, options: &BuildOptions) -> io::Result<()>;
}

/// Production emitter writing the theme layout to disk.
#[derive(Debug, Clone)]
pub struct FsThemeEmitter {
  /// Version of the emitting tool, recorded in the generated properties.
  pub tool_version: String,
}

impl Default for FsThemeEmitter {
  fn default() -> Self {
    Self {
      tool_version: env!("CARGO_PKG_VERSION").to_string(),
    }
  }
}

impl ThemeEmitter for FsThemeEmitter {
  fn emit(&self, theme_name: &str, options: &BuildOptions) -> io::Result<()> {
    info!(theme = %theme_name, "emitting theme");

    let theme_dir = theme_root(&options.build_dir).join(theme_name);

    for theme_type in THEME_TYPES {
      let type_dir = theme_dir.join(theme_type);
      std::fs::create_dir_all(&type_dir)?;
      std::fs::write(
        type_dir.join("theme.properties"),
        theme_properties(theme_type, &self.tool_version, options),
      )?;
    }

    if options.theme_src_dir.is_dir() {
      let resources_dir = theme_dir.join("login").join("resources");
      copy_dir(&options.theme_src_dir, &resources_dir)?;
    } else {
      debug!(path = %options.theme_src_dir.display(), "no theme resource directory, skipping copy");
    }

    // The descriptor lists every configured theme; rewriting it on each emit
    // keeps it consistent whatever theme the loop is currently on.
    write_themes_descriptor(&options.build_dir, &options.theme_names)?;

    Ok(())
  }
}

/// Root of the generated theme tree inside the build directory.
pub fn theme_root(build_dir: &Path) -> PathBuf {
  build_dir.join("src").join("main").join("resources").join("theme")
}

fn theme_properties(theme_type: &str, tool_version: &str, options: &BuildOptions) -> String {
  let mut lines = vec![
    format!("# generated by kcforge {tool_version}"),
    "parent=keycloak".to_string(),
    "import=common/keycloak".to_string(),
  ];

  if theme_type == "login" {
    lines.push("styles=css/login.css".to_string());
  }

  for property in &options.extra_theme_properties {
    lines.push(property.clone());
  }

  let mut out = lines.join("\n");
  out.push('\n');
  out
}

#[derive(Debug, Serialize)]
struct ThemesDescriptor<'a> {
  themes: Vec<ThemeEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ThemeEntry<'a> {
  name: &'a str,
  types: &'a [&'a str],
}

/// Write `META-INF/keycloak-themes.json` listing every configured theme.
fn write_themes_descriptor(build_dir: &Path, theme_names: &[String]) -> io::Result<()> {
  let descriptor = ThemesDescriptor {
    themes: theme_names
      .iter()
      .map(|name| ThemeEntry {
        name,
        types: THEME_TYPES,
      })
      .collect(),
  };

  let meta_inf = build_dir.join("src").join("main").join("resources").join("META-INF");
  std::fs::create_dir_all(&meta_inf)?;

  let json = serde_json::to_string_pretty(&descriptor).map_err(io::Error::other)?;
  std::fs::write(meta_inf.join("keycloak-themes.json"), json)
}

/// Recursively copy `src` into `dst`, creating directories as needed.
fn copy_dir(src: &Path, dst: &Path) -> io::Result<()> {
  for entry in WalkDir::new(src) {
    let entry = entry.map_err(io::Error::other)?;
    let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      std::fs::create_dir_all(&target)?;
    } else {
      if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
      }
      std::fs::copy(entry.path(), &target)?;
    }
  }

  Ok(())
}
