use crate::error::{LauncherError, Result};
use std::path::{Path, PathBuf};

const DEFAULT_SETTINGS_TEMPLATE: &str = include_str!("../assets/worlds.default.ini");
const DEFAULT_OVERRIDE_TEMPLATE: &str = include_str!("../assets/override.default.ini");

/// File names and default contents of one launcher installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub settings_file: String,
    pub override_file: String,
    pub catalog_file: String,
    pub primary_executable: String,
    pub fallback_executable: String,
    pub cache_dir: String,
    pub settings_template: String,
    pub override_template: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            settings_file: "worlds.ini".to_string(),
            override_file: "override.ini".to_string(),
            catalog_file: "worldsserverselection.json".to_string(),
            primary_executable: "run.exe".to_string(),
            fallback_executable: "WorldsPlayer.exe".to_string(),
            cache_dir: "cachedir".to_string(),
            settings_template: DEFAULT_SETTINGS_TEMPLATE.to_string(),
            override_template: DEFAULT_OVERRIDE_TEMPLATE.to_string(),
        }
    }
}

/// An application directory together with the layout of the files in it.
#[derive(Debug, Clone)]
pub struct Launcher {
    dir: PathBuf,
    layout: Layout,
}

impl Launcher {
    pub fn new(dir: impl Into<PathBuf>, layout: Layout) -> Self {
        Self {
            dir: dir.into(),
            layout,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(&self.layout.settings_file)
    }

    pub fn override_path(&self) -> PathBuf {
        self.dir.join(&self.layout.override_file)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(&self.layout.catalog_file)
    }

    pub fn primary_executable_path(&self) -> PathBuf {
        self.dir.join(&self.layout.primary_executable)
    }

    pub fn fallback_executable_path(&self) -> PathBuf {
        self.dir.join(&self.layout.fallback_executable)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.dir.join(&self.layout.cache_dir)
    }
}

/// Directory the launcher works in: `WORLDS_LAUNCHER_DIR`, else the folder of
/// the running executable, else the current directory.
pub fn app_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WORLDS_LAUNCHER_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    if let Some(parent) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        return parent;
    }
    PathBuf::from(".")
}

pub async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false)
}

/// Reads a whole text file; `Ok(None)` when it does not exist.
pub async fn read_optional(path: &Path) -> Result<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(LauncherError::from_io(path, err)),
    }
}

pub async fn read_required(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|err| LauncherError::from_io(path, err))
}

pub async fn write_text(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|err| LauncherError::from_io(path, err))
}
