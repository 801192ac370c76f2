use crate::detect::detect_current_server;
use crate::error::Result;
use crate::models::Catalog;
use crate::settings::{SettingsPatcher, KNOWN_FLAGS};
use crate::storage::{is_file, Launcher};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FlagStatus {
    pub label: &'static str,
    pub key: &'static str,
    pub active: bool,
}

/// What the indicators show. Flags read as inactive and `avatars` is empty
/// while the settings file is missing.
#[derive(Debug, Clone, Serialize)]
pub struct LauncherStatus {
    pub settings_exists: bool,
    pub override_exists: bool,
    pub flags: Vec<FlagStatus>,
    pub avatars: Option<i64>,
    pub current_server: Option<String>,
}

pub async fn launcher_status(launcher: &Launcher, catalog: &Catalog) -> Result<LauncherStatus> {
    let patcher = SettingsPatcher::new(launcher.settings_path());
    let settings_exists = patcher.exists().await;
    let override_exists = is_file(&launcher.override_path()).await;

    let mut flags = Vec::with_capacity(KNOWN_FLAGS.len());
    for flag in KNOWN_FLAGS.iter() {
        let active = settings_exists && patcher.flag_active(flag).await?;
        flags.push(FlagStatus {
            label: flag.label,
            key: flag.key,
            active,
        });
    }

    let avatars = if settings_exists {
        Some(patcher.avatars().await?)
    } else {
        None
    };

    Ok(LauncherStatus {
        settings_exists,
        override_exists,
        flags,
        avatars,
        current_server: detect_current_server(launcher, catalog).await,
    })
}
