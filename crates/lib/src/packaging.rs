//! Packaging tool invocation.
//!
//! The packaging step is a one-shot, blocking subprocess: the pipeline
//! suspends until the external tool exits and only the exit status decides
//! success. There is no retry and no timeout; callers wanting bounded
//! execution wrap the invocation with an external deadline.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::BuildError;

/// Default packaging command.
pub const DEFAULT_PACKAGING_COMMAND: &str = "mvn clean install";

/// Runs the external packaging tool against the build directory.
///
/// `invoke` must not return until the tool has exited. A non-zero exit is
/// fatal for the whole pipeline.
pub trait PackagingInvoker {
  fn invoke(&self, build_dir: &Path) -> impl Future<Output = Result<(), BuildError>>;
}

/// Production invoker running Maven through the platform shell.
#[derive(Debug, Clone)]
pub struct MavenInvoker {
  /// Command line handed to the shell, working directory = build directory.
  pub command: String,
}

impl Default for MavenInvoker {
  fn default() -> Self {
    Self {
      command: DEFAULT_PACKAGING_COMMAND.to_string(),
    }
  }
}

impl PackagingInvoker for MavenInvoker {
  async fn invoke(&self, build_dir: &Path) -> Result<(), BuildError> {
    info!(cmd = %self.command, cwd = %build_dir.display(), "running packaging tool");

    let (shell, shell_arg) = shell_command();

    let output = Command::new(shell)
      .arg(shell_arg)
      .arg(&self.command)
      .current_dir(build_dir)
      .output()
      .await?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      let stdout = String::from_utf8_lossy(&output.stdout);

      if !stderr.is_empty() {
        debug!(stderr = %stderr, "packaging tool stderr");
      }
      if !stdout.is_empty() {
        debug!(stdout = %stdout, "packaging tool stdout");
      }

      return Err(BuildError::PackagingToolFailed {
        command: self.command.clone(),
        code: output.status.code(),
      });
    }

    Ok(())
  }
}

/// Shell and argument used to run the packaging command line.
fn shell_command() -> (&'static str, &'static str) {
  #[cfg(unix)]
  {
    ("/bin/sh", "-c")
  }

  #[cfg(windows)]
  {
    ("cmd.exe", "/C")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[tokio::test]
  #[cfg(unix)]
  async fn successful_command_is_ok() {
    let temp = TempDir::new().unwrap();
    let invoker = MavenInvoker {
      command: "true".to_string(),
    };

    invoker.invoke(temp.path()).await.unwrap();
  }

  #[tokio::test]
  async fn failing_command_surfaces_exit_code() {
    let temp = TempDir::new().unwrap();
    let invoker = MavenInvoker {
      command: "exit 7".to_string(),
    };

    let err = invoker.invoke(temp.path()).await.unwrap_err();

    assert!(matches!(
      err,
      BuildError::PackagingToolFailed { code: Some(7), .. }
    ));
  }

  #[tokio::test]
  #[cfg(unix)]
  async fn command_runs_in_the_build_directory() {
    let temp = TempDir::new().unwrap();
    let invoker = MavenInvoker {
      command: "touch cwd_marker".to_string(),
    };

    invoker.invoke(temp.path()).await.unwrap();

    assert!(temp.path().join("cwd_marker").exists());
  }
}
