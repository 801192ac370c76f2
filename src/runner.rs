use crate::error::{LauncherError, Result};
use crate::storage::{is_file, Launcher};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use tokio::process::Command;
use tracing::info;

type ExitFuture = Pin<Box<dyn Future<Output = Result<Option<i32>>> + Send>>;

/// Which client build sits in the application directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// The primary launcher executable is present; address blocks are
    /// written into the settings file.
    Legacy,
    Modern,
}

impl InstallMode {
    pub async fn detect(launcher: &Launcher) -> Self {
        if is_file(&launcher.primary_executable_path()).await {
            InstallMode::Legacy
        } else {
            InstallMode::Modern
        }
    }
}

/// A started client. Awaiting [`GameProcess::wait`] yields its exit code.
pub struct GameProcess {
    pub executable: PathBuf,
    pub pid: Option<u32>,
    exit: ExitFuture,
}

impl GameProcess {
    pub fn new<F>(executable: PathBuf, pid: Option<u32>, exit: F) -> Self
    where
        F: Future<Output = Result<Option<i32>>> + Send + 'static,
    {
        Self {
            executable,
            pid,
            exit: Box::pin(exit),
        }
    }

    pub async fn wait(self) -> Result<Option<i32>> {
        self.exit.await
    }
}

impl std::fmt::Debug for GameProcess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameProcess")
            .field("executable", &self.executable)
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
pub trait ProcessSpawner: Send + Sync {
    async fn spawn(&self, executable: &Path, work_dir: &Path) -> Result<GameProcess>;
}

#[derive(Debug, Clone, Default)]
pub struct TokioSpawner;

#[async_trait::async_trait]
impl ProcessSpawner for TokioSpawner {
    async fn spawn(&self, executable: &Path, work_dir: &Path) -> Result<GameProcess> {
        let mut child = Command::new(executable)
            .current_dir(work_dir)
            .spawn()
            .map_err(|err| {
                LauncherError::Launch(format!("failed to start '{}': {err}", executable.display()))
            })?;
        let pid = child.id();
        let shown = executable.display().to_string();
        Ok(GameProcess::new(executable.to_path_buf(), pid, async move {
            child
                .wait()
                .await
                .map(|status| status.code())
                .map_err(|err| LauncherError::Launch(format!("failed to wait for '{shown}': {err}")))
        }))
    }
}

/// The primary executable when present, else the fallback one.
pub async fn resolve_executable(launcher: &Launcher) -> Result<PathBuf> {
    let primary = launcher.primary_executable_path();
    if is_file(&primary).await {
        return Ok(primary);
    }
    let fallback = launcher.fallback_executable_path();
    if is_file(&fallback).await {
        return Ok(fallback);
    }
    Err(LauncherError::ExecutableMissing {
        primary: launcher.layout().primary_executable.clone(),
        fallback: launcher.layout().fallback_executable.clone(),
    })
}

pub async fn launch(launcher: &Launcher, spawner: &dyn ProcessSpawner) -> Result<GameProcess> {
    let executable = resolve_executable(launcher).await?;
    let process = spawner.spawn(&executable, launcher.dir()).await?;
    info!(executable = %executable.display(), pid = ?process.pid, "launched client");
    Ok(process)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Layout;

    #[tokio::test]
    async fn primary_executable_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let launcher = Launcher::new(dir.path(), Layout::default());
        std::fs::write(launcher.fallback_executable_path(), b"").expect("fallback");

        assert_eq!(
            resolve_executable(&launcher).await.expect("fallback found"),
            launcher.fallback_executable_path()
        );
        assert_eq!(InstallMode::detect(&launcher).await, InstallMode::Modern);

        std::fs::write(launcher.primary_executable_path(), b"").expect("primary");
        assert_eq!(
            resolve_executable(&launcher).await.expect("primary found"),
            launcher.primary_executable_path()
        );
        assert_eq!(InstallMode::detect(&launcher).await, InstallMode::Legacy);
    }

    #[tokio::test]
    async fn missing_executables_are_reported_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let launcher = Launcher::new(dir.path(), Layout::default());

        match resolve_executable(&launcher).await {
            Err(LauncherError::ExecutableMissing { primary, fallback }) => {
                assert_eq!(primary, "run.exe");
                assert_eq!(fallback, "WorldsPlayer.exe");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
