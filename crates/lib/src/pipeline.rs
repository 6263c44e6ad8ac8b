//! The build pipeline orchestrator.
//!
//! Sequences theme emission, manifest generation, packaging, artifact
//! splitting and launcher emission for one resolved configuration. The whole
//! pipeline is fail-fast: the first error aborts it, nothing is retried, and
//! files already written stay on disk exactly as written.
//!
//! Theme emission is deliberately sequential, in configuration order: every
//! emitter call writes into the shared build directory, and interleaved
//! writes would corrupt it. Do not parallelize this loop.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::artifact;
use crate::config::BuildOptions;
use crate::error::BuildError;
use crate::launcher::{self, TESTING_CONTAINER_KEYCLOAK_VERSION};
use crate::packaging::{MavenInvoker, PackagingInvoker};
use crate::pom::generate_pom;
use crate::theme::{FsThemeEmitter, ThemeEmitter};

/// What one pipeline run produced.
///
/// The orchestrator itself never prints; rendering the summary is the
/// caller's concern.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
  /// Whether the packaging step ran and the jar exists.
  pub bundled: bool,
  /// Primary artifact path (computed even when packaging was skipped).
  pub jar_path: PathBuf,
  /// Path of the generated testing container script.
  pub container_script_path: PathBuf,
  /// Project root, used to relativize paths for display.
  pub project_root: PathBuf,
  /// First configured theme name, referenced by the follow-up instructions.
  pub first_theme: String,
  /// Keycloak version the testing container is pinned to.
  pub keycloak_version: String,
}

impl Summary {
  /// Render the human-readable report for this run.
  pub fn render(&self) -> String {
    let jar = display_relative(&self.project_root, &self.jar_path);
    let script = display_relative(&self.project_root, &self.container_script_path);
    let theme = &self.first_theme;

    let mut lines: Vec<String> = Vec::new();

    if self.bundled {
      lines.push(format!("Your Keycloak theme has been generated and bundled into {jar}"));
      lines.push(String::new());
    }

    lines.push(format!(
      "To test the theme locally, spin up a Keycloak {} container with the theme preloaded:",
      self.keycloak_version
    ));
    lines.push(String::new());
    lines.push(format!("    {script}"));
    lines.push(String::new());
    lines.push("Once the container is up and running:".to_string());
    lines.push("- Log into the admin console at http://localhost:8080/admin (username: admin, password: admin)".to_string());
    lines.push("- Create a realm:                      Master -> Add realm -> Name: myrealm".to_string());
    lines.push("- Enable user registration:            Realm settings -> Login tab -> User registration: on".to_string());
    lines.push(format!(
      "- Enable the account theme (optional): Realm settings -> Themes tab -> Account theme: {theme}"
    ));
    lines.push(format!(
      "- Enable the email theme (optional):   Realm settings -> Themes tab -> Email theme: {theme}"
    ));
    lines.push("- Create a client:                     Clients -> Create -> Client ID: myclient".to_string());
    lines.push("                                       Root URL: https://www.keycloak.org/app/".to_string());
    lines.push(
      "                                       Valid redirect URIs: https://www.keycloak.org/app* http://localhost*"
        .to_string(),
    );
    lines.push("                                       Web origins: *".to_string());
    lines.push(format!(
      "                                       Login theme: {theme}"
    ));

    lines.join("\n")
  }
}

/// Run the pipeline with the default collaborators (filesystem theme emitter,
/// Maven packaging).
pub async fn run_default(options: &BuildOptions) -> Result<Summary, BuildError> {
  run(options, &FsThemeEmitter::default(), &MavenInvoker::default()).await
}

/// Run the build pipeline for one resolved configuration.
///
/// Steps, in strict order:
/// 1. validate the options (before any file I/O),
/// 2. emit every theme, sequentially, in configuration order,
/// 3. write `pom.xml`,
/// 4. if packaging is enabled: run the packaging tool, split the retrocompat
///    artifact, write the usage note,
/// 5. write the testing container script (always),
/// 6. return the summary.
pub async fn run(
  options: &BuildOptions,
  emitter: &impl ThemeEmitter,
  invoker: &impl PackagingInvoker,
) -> Result<Summary, BuildError> {
  options.validate()?;

  std::fs::create_dir_all(&options.build_dir)?;

  for theme_name in &options.theme_names {
    emitter
      .emit(theme_name, options)
      .map_err(|source| BuildError::ThemeEmission {
        theme: theme_name.clone(),
        source,
      })?;
  }

  let pom_path = options.build_dir.join("pom.xml");
  std::fs::write(&pom_path, generate_pom(options)).map_err(|source| BuildError::ManifestWrite {
    path: pom_path.clone(),
    source,
  })?;
  debug!(path = %pom_path.display(), "wrote manifest");

  let jar_path = artifact::jar_path(options);

  if options.create_jar {
    invoker.invoke(&options.build_dir).await?;

    let retrocompat_path = artifact::split_retrocompat(&jar_path)?;
    artifact::write_usage_note(&jar_path, &retrocompat_path)?;

    info!(jar = %jar_path.display(), "theme bundled");
  } else {
    debug!("packaging disabled, skipping jar creation");
  }

  let container_script_path =
    launcher::write_container_script(TESTING_CONTAINER_KEYCLOAK_VERSION, &jar_path, options)?;

  Ok(Summary {
    bundled: options.create_jar,
    jar_path,
    container_script_path,
    project_root: options.project_root.clone(),
    first_theme: options.first_theme().to_string(),
    keycloak_version: TESTING_CONTAINER_KEYCLOAK_VERSION.to_string(),
  })
}

fn display_relative(base: &Path, path: &Path) -> String {
  match path.strip_prefix(base) {
    Ok(relative) => format!(".{}{}", std::path::MAIN_SEPARATOR, relative.display()),
    Err(_) => path.display().to_string(),
  }
}
