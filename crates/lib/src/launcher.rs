//! Test-launcher script emission.
//!
//! Writes a self-contained shell script into the build directory that spins
//! up a disposable Keycloak container with the built theme jar preloaded.
//! The script is written unconditionally, even when packaging was skipped:
//! it points at the computed jar path so the user can package later and rerun
//! it unchanged.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildOptions;
use crate::error::BuildError;

/// Fixed basename of the generated script inside the build directory.
pub const CONTAINER_SCRIPT_BASENAME: &str = "start_keycloak_testing_container.sh";

/// Keycloak version the testing container is pinned to.
pub const TESTING_CONTAINER_KEYCLOAK_VERSION: &str = "23.0.0";

/// Name given to the disposable container so reruns replace it.
const CONTAINER_NAME: &str = "kcforge-testing-container";

/// Write the testing container script and return its path.
pub fn write_container_script(
  keycloak_version: &str,
  jar_path: &Path,
  options: &BuildOptions,
) -> Result<PathBuf, BuildError> {
  let script_path = options.build_dir.join(CONTAINER_SCRIPT_BASENAME);
  let script = container_script(keycloak_version, jar_path);

  std::fs::write(&script_path, script).map_err(|source| BuildError::LauncherEmission {
    path: script_path.clone(),
    source,
  })?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    let permissions = std::fs::Permissions::from_mode(0o755);
    std::fs::set_permissions(&script_path, permissions).map_err(|source| BuildError::LauncherEmission {
      path: script_path.clone(),
      source,
    })?;
  }

  info!(path = %script_path.display(), "wrote testing container script");

  Ok(script_path)
}

fn container_script(keycloak_version: &str, jar_path: &Path) -> String {
  let jar = jar_path.display();

  format!(
    r#"#!/usr/bin/env bash

docker rm -f {CONTAINER_NAME} 2>/dev/null || true

docker run \
    -p 8080:8080 \
    --name {CONTAINER_NAME} \
    -e KEYCLOAK_ADMIN=admin \
    -e KEYCLOAK_ADMIN_PASSWORD=admin \
    -v "{jar}":/opt/keycloak/providers/keycloak-theme.jar \
    quay.io/keycloak/keycloak:{keycloak_version} \
    start-dev
"#
  )
}
