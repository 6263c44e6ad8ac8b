//! Artifact path computation and retro-compatibility splitting.
//!
//! A successful packaging run leaves two jars in `<build_dir>/target/`: the
//! shaded jar at the primary path and an `original-` prefixed sibling. The
//! splitter renames the sibling to `retrocompat-` (a move, never a copy; the
//! primary is never touched) and documents the split in a usage note next to
//! the artifacts.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::BuildOptions;
use crate::error::BuildError;

/// Prefix the packaging tool gives the un-shaded sibling artifact.
pub const ORIGINAL_PREFIX: &str = "original-";

/// Prefix given to the backward-compatible artifact after the split.
pub const RETROCOMPAT_PREFIX: &str = "retrocompat-";

/// Basename of the usage note written next to the artifacts.
pub const USAGE_NOTE_BASENAME: &str = "README.md";

/// Primary artifact path: `<build_dir>/target/<artifact_id>-<version>.jar`.
///
/// Derived from the same options used to drive packaging, so the invocation
/// and the path can never disagree on the version.
pub fn jar_path(options: &BuildOptions) -> PathBuf {
  options
    .build_dir
    .join("target")
    .join(format!("{}-{}.jar", options.artifact_id, options.theme_version))
}

/// Retrocompat sibling of a primary artifact path.
pub fn retrocompat_jar_path(jar_path: &Path) -> PathBuf {
  sibling_with_prefix(jar_path, RETROCOMPAT_PREFIX)
}

/// Rename the packaging tool's `original-` output to its `retrocompat-` name.
///
/// Returns the retrocompat path. Fails with
/// [`BuildError::PackagingOutputMissing`] when the `original-` file is absent:
/// that means the packaging tool broke its dual-output contract, and
/// proceeding silently would ship a build with no backward-compatible jar.
/// Rerunning against the same broken output fails identically.
pub fn split_retrocompat(jar_path: &Path) -> Result<PathBuf, BuildError> {
  let original = sibling_with_prefix(jar_path, ORIGINAL_PREFIX);
  let retrocompat = retrocompat_jar_path(jar_path);

  if !original.exists() {
    return Err(BuildError::PackagingOutputMissing { path: original });
  }

  std::fs::rename(&original, &retrocompat).map_err(|source| BuildError::Rename {
    from: original,
    to: retrocompat.clone(),
    source,
  })?;

  info!(path = %retrocompat.display(), "split retrocompat artifact");

  Ok(retrocompat)
}

/// Write the usage note describing which jar targets which Keycloak version.
///
/// Written to `README.md` in the artifact directory, overwriting any previous
/// run's note. Both paths appear verbatim.
pub fn write_usage_note(jar_path: &Path, retrocompat_path: &Path) -> Result<PathBuf, BuildError> {
  let note_path = jar_path
    .parent()
    .unwrap_or_else(|| Path::new("."))
    .join(USAGE_NOTE_BASENAME);

  let note = format!(
    "- The {} is to be used in Keycloak 23 and up.\n\
     - The {} is to be used in Keycloak 22 and below.\n\
     \x20 Note that Keycloak 22 is only supported for login and email themes but not for account themes.\n",
    jar_path.display(),
    retrocompat_path.display()
  );

  std::fs::write(&note_path, note)?;

  Ok(note_path)
}

fn sibling_with_prefix(path: &Path, prefix: &str) -> PathBuf {
  let basename = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default();
  path
    .parent()
    .unwrap_or_else(|| Path::new("."))
    .join(format!("{prefix}{basename}"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn test_options(build_dir: &Path) -> BuildOptions {
    BuildOptions {
      theme_names: vec!["vault".to_string()],
      theme_version: "1.2.3".to_string(),
      extra_theme_properties: vec![],
      group_id: "com.acme".to_string(),
      artifact_id: "acme".to_string(),
      project_root: build_dir.parent().unwrap_or(build_dir).to_path_buf(),
      build_dir: build_dir.to_path_buf(),
      theme_src_dir: PathBuf::from("/nonexistent"),
      create_jar: true,
      silent: false,
    }
  }

  #[test]
  fn jar_path_is_exactly_target_id_version() {
    let options = test_options(Path::new("/tmp/b"));

    assert_eq!(jar_path(&options), PathBuf::from("/tmp/b/target/acme-1.2.3.jar"));
  }

  #[test]
  fn split_moves_original_to_retrocompat() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    std::fs::create_dir_all(&target).unwrap();

    let jar = target.join("acme-1.2.3.jar");
    let original = target.join("original-acme-1.2.3.jar");
    std::fs::write(&jar, b"shaded bytes").unwrap();
    std::fs::write(&original, b"original bytes").unwrap();

    let retrocompat = split_retrocompat(&jar).unwrap();

    assert_eq!(retrocompat, target.join("retrocompat-acme-1.2.3.jar"));
    assert!(!original.exists(), "original must be moved, not copied");
    assert_eq!(std::fs::read(&retrocompat).unwrap(), b"original bytes");
    // The primary artifact is never renamed.
    assert_eq!(std::fs::read(&jar).unwrap(), b"shaded bytes");
  }

  #[test]
  fn split_fails_when_original_is_missing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    std::fs::create_dir_all(&target).unwrap();

    let jar = target.join("acme-1.2.3.jar");
    std::fs::write(&jar, b"shaded bytes").unwrap();

    let err = split_retrocompat(&jar).unwrap_err();
    assert!(matches!(err, BuildError::PackagingOutputMissing { .. }));

    // Rerunning against the same broken output fails identically.
    let err = split_retrocompat(&jar).unwrap_err();
    assert!(matches!(err, BuildError::PackagingOutputMissing { .. }));
  }

  #[test]
  fn usage_note_names_both_paths_verbatim() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    std::fs::create_dir_all(&target).unwrap();

    let jar = target.join("acme-1.2.3.jar");
    let retrocompat = target.join("retrocompat-acme-1.2.3.jar");

    let note_path = write_usage_note(&jar, &retrocompat).unwrap();

    assert_eq!(note_path, target.join("README.md"));
    let note = std::fs::read_to_string(&note_path).unwrap();
    assert!(note.contains(&jar.display().to_string()));
    assert!(note.contains(&retrocompat.display().to_string()));
    assert!(note.contains("Keycloak 22 is only supported for login and email themes"));
  }

  #[test]
  fn usage_note_is_overwritten_not_appended() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("target");
    std::fs::create_dir_all(&target).unwrap();

    let jar = target.join("acme-1.2.3.jar");
    let retrocompat = target.join("retrocompat-acme-1.2.3.jar");

    write_usage_note(&jar, &retrocompat).unwrap();
    let first = std::fs::read_to_string(target.join("README.md")).unwrap();
    write_usage_note(&jar, &retrocompat).unwrap();
    let second = std::fs::read_to_string(target.join("README.md")).unwrap();

    assert_eq!(first, second);
  }
}
