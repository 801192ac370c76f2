use crate::error::{LauncherError, Result};
use crate::storage::Launcher;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCleanOutcome {
    Missing,
    AlreadyEmpty,
    Cleaned(usize),
}

/// Number of entries in the cache folder, `None` when there is no folder.
pub async fn cache_entry_count(launcher: &Launcher) -> Result<Option<usize>> {
    let dir = launcher.cache_path();
    if !is_dir(&dir).await {
        return Ok(None);
    }
    let mut entries = tokio::fs::read_dir(&dir)
        .await
        .map_err(|err| LauncherError::from_io(&dir, err))?;
    let mut count = 0;
    while entries
        .next_entry()
        .await
        .map_err(|err| LauncherError::from_io(&dir, err))?
        .is_some()
    {
        count += 1;
    }
    Ok(Some(count))
}

/// Deletes everything inside the cache folder, keeping the folder itself.
pub async fn clean_cache(launcher: &Launcher) -> Result<CacheCleanOutcome> {
    let dir = launcher.cache_path();
    if !is_dir(&dir).await {
        return Ok(CacheCleanOutcome::Missing);
    }

    let mut entries = tokio::fs::read_dir(&dir)
        .await
        .map_err(|err| LauncherError::from_io(&dir, err))?;
    let mut removed = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|err| LauncherError::from_io(&dir, err))?
    {
        let path = entry.path();
        let metadata = tokio::fs::symlink_metadata(&path)
            .await
            .map_err(|err| LauncherError::from_io(&path, err))?;
        let result = if metadata.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };
        result.map_err(|err| LauncherError::from_io(&path, err))?;
        removed += 1;
    }

    if removed == 0 {
        return Ok(CacheCleanOutcome::AlreadyEmpty);
    }
    info!(removed, dir = %dir.display(), "cleaned cache");
    Ok(CacheCleanOutcome::Cleaned(removed))
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false)
}
