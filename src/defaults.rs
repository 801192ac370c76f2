use crate::error::{LauncherError, Result};
use crate::storage::{is_file, write_text, Launcher};
use std::path::PathBuf;
use tracing::{info, warn};

/// One of the two INI files the launcher can recreate from its template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultFile {
    Settings,
    Override,
}

impl DefaultFile {
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "settings" => Some(DefaultFile::Settings),
            "override" => Some(DefaultFile::Override),
            _ => None,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            DefaultFile::Settings => "settings",
            DefaultFile::Override => "override",
        }
    }

    pub fn path(self, launcher: &Launcher) -> PathBuf {
        match self {
            DefaultFile::Settings => launcher.settings_path(),
            DefaultFile::Override => launcher.override_path(),
        }
    }

    pub fn template(self, launcher: &Launcher) -> &str {
        match self {
            DefaultFile::Settings => &launcher.layout().settings_template,
            DefaultFile::Override => &launcher.layout().override_template,
        }
    }
}

/// Writes the template for `kind`. An existing file is only replaced when
/// `overwrite` is set, i.e. the user confirmed it.
pub async fn write_default_file(
    launcher: &Launcher,
    kind: DefaultFile,
    overwrite: bool,
) -> Result<PathBuf> {
    let path = kind.path(launcher);
    if !overwrite && is_file(&path).await {
        warn!(path = %path.display(), "refusing to overwrite without confirmation");
        return Err(LauncherError::FileExists { path });
    }
    write_text(&path, kind.template(launcher)).await?;
    info!(path = %path.display(), "wrote default file");
    Ok(path)
}
