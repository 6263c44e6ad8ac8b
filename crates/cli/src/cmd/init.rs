//! Implementation of the `kcforge init` command.
//!
//! Scaffolds a starter `kcforge.toml` and theme resource directory so a
//! fresh project can run `kcforge build` immediately.

use std::path::Path;

use anyhow::{Context, Result, bail};
use kcforge_lib::config::{CONFIG_BASENAME, DEFAULT_THEME_SRC_DIR};

use crate::output;

const STARTER_CONFIG: &str = r#"[theme]
# Theme names to build, in order. The first one is used in the
# follow-up instructions printed after a build.
names = ["mytheme"]
version = "0.1.0"

# [artifact]
# group-id = "com.example"
# artifact-id = "mytheme-keycloak-theme"

# [build]
# dir = "build_keycloak"
"#;

/// Execute the init command.
pub fn cmd_init(project: &Path) -> Result<()> {
  let config_path = project.join(CONFIG_BASENAME);

  if config_path.exists() {
    bail!("config file already exists: {}", config_path.display());
  }

  std::fs::create_dir_all(project)
    .with_context(|| format!("Failed to create project directory {}", project.display()))?;
  std::fs::write(&config_path, STARTER_CONFIG)
    .with_context(|| format!("Failed to write {}", config_path.display()))?;

  let theme_dir = project.join(DEFAULT_THEME_SRC_DIR).join("css");
  std::fs::create_dir_all(&theme_dir)
    .with_context(|| format!("Failed to create {}", theme_dir.display()))?;
  std::fs::write(theme_dir.join("login.css"), "/* your login theme styles */\n")?;

  output::print_success(&format!("Created {}", config_path.display()));
  output::print_info("Edit the theme names, then run: kcforge build");

  Ok(())
}
