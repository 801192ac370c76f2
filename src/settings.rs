//! Flag and integer access to the player settings file (`worlds.ini`).

use crate::error::{LauncherError, Result};
use crate::ini::{IniLines, MissingSection};
use crate::storage::{read_optional, read_required, write_text};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Section that receives keys missing from the settings file.
pub const SETTINGS_SECTION: &str = "Gamma";

pub const AVATARS_KEY: &str = "avatars";
pub const DEFAULT_AVATARS: i64 = 16;
/// Accepted by the max players field; the file itself takes any integer.
pub const AVATARS_RANGE: RangeInclusive<i64> = 1..=256;

/// A boolean switch the launcher exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub label: &'static str,
    pub key: &'static str,
    pub write_key: &'static str,
    /// Active means `=0` instead of `=1`.
    pub inverted: bool,
    pub default_active: bool,
}

pub static KNOWN_FLAGS: [FlagSpec; 5] = [
    FlagSpec {
        label: "MULTIRUN",
        key: "multirun",
        write_key: "multirun",
        inverted: false,
        default_active: false,
    },
    FlagSpec {
        label: "CHATBOX",
        key: "classicchatbox",
        write_key: "classicchatbox",
        inverted: false,
        default_active: false,
    },
    FlagSpec {
        label: "SHAPER",
        key: "disableshaper",
        write_key: "disableshaper",
        inverted: true,
        default_active: true,
    },
    FlagSpec {
        label: "PERMIT ANY AVATARS",
        key: "permitanyavatar",
        write_key: "permitAnyAvatar",
        inverted: false,
        default_active: false,
    },
    FlagSpec {
        label: "ALLOW OBSCENITIES",
        key: "allowobscenities",
        write_key: "allowObscenities",
        inverted: false,
        default_active: false,
    },
];

pub fn find_flag(key: &str) -> Option<&'static FlagSpec> {
    KNOWN_FLAGS
        .iter()
        .find(|flag| flag.key.eq_ignore_ascii_case(key))
}

pub fn flag_state(doc: &IniLines, key: &str, inverted: bool, default_active: bool) -> bool {
    let Some(index) = doc.find_key_unscoped(key) else {
        return default_active;
    };
    let line = doc.line(index).unwrap_or_default().trim().to_lowercase();
    if inverted {
        line.ends_with("=0")
    } else {
        line.ends_with("=1")
    }
}

/// Literal that flips a flag from `active`.
pub fn toggled_literal(active: bool, inverted: bool) -> &'static str {
    if active != inverted {
        "0"
    } else {
        "1"
    }
}

pub fn integer_value(doc: &IniLines, key: &str, default: i64) -> i64 {
    let Some(raw) = doc.value_unscoped(key) else {
        return default;
    };
    let raw = raw.split('=').next().unwrap_or_default().trim();
    match raw.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            debug!(key, raw, default, "unparsable integer setting, using default");
            default
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsPatcher {
    path: PathBuf,
}

impl SettingsPatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        crate::storage::is_file(&self.path).await
    }

    async fn load(&self) -> Result<Option<IniLines>> {
        Ok(read_optional(&self.path)
            .await?
            .map(|text| IniLines::parse(&text)))
    }

    async fn load_required(&self) -> Result<IniLines> {
        let text = read_required(&self.path).await?;
        Ok(IniLines::parse(&text))
    }

    async fn store(&self, doc: &IniLines) -> Result<()> {
        write_text(&self.path, &doc.render()).await
    }

    pub async fn read_boolean_flag(
        &self,
        key: &str,
        inverted: bool,
        default_active: bool,
    ) -> Result<bool> {
        Ok(match self.load().await? {
            Some(doc) => flag_state(&doc, key, inverted, default_active),
            None => default_active,
        })
    }

    /// Flips a flag and returns its new state as read back from the patched
    /// content.
    pub async fn toggle_boolean_flag(
        &self,
        key: &str,
        write_key: &str,
        inverted: bool,
        default_active: bool,
    ) -> Result<bool> {
        let mut doc = self.load_required().await?;
        let active = flag_state(&doc, key, inverted, default_active);
        let literal = toggled_literal(active, inverted);
        upsert_setting(&mut doc, write_key, literal);
        self.store(&doc).await?;
        info!(key = write_key, value = literal, path = %self.path.display(), "toggled setting");
        Ok(flag_state(&doc, key, inverted, default_active))
    }

    pub async fn toggle_flag(&self, flag: &FlagSpec) -> Result<bool> {
        self.toggle_boolean_flag(flag.key, flag.write_key, flag.inverted, flag.default_active)
            .await
    }

    pub async fn flag_active(&self, flag: &FlagSpec) -> Result<bool> {
        self.read_boolean_flag(flag.key, flag.inverted, flag.default_active)
            .await
    }

    pub async fn read_integer_value(&self, key: &str, default: i64) -> Result<i64> {
        Ok(match self.load().await? {
            Some(doc) => integer_value(&doc, key, default),
            None => default,
        })
    }

    pub async fn write_integer_value(&self, key: &str, value: i64) -> Result<()> {
        let mut doc = self.load_required().await?;
        upsert_setting(&mut doc, key, &value.to_string());
        self.store(&doc).await?;
        info!(key, value, path = %self.path.display(), "wrote setting");
        Ok(())
    }

    pub async fn avatars(&self) -> Result<i64> {
        self.read_integer_value(AVATARS_KEY, DEFAULT_AVATARS).await
    }

    /// Writes the max players value after checking it against
    /// [`AVATARS_RANGE`].
    pub async fn set_avatars(&self, value: i64) -> Result<()> {
        if !AVATARS_RANGE.contains(&value) {
            return Err(LauncherError::InvalidValue(format!(
                "Please enter a number between {} and {}",
                AVATARS_RANGE.start(),
                AVATARS_RANGE.end()
            )));
        }
        self.write_integer_value(AVATARS_KEY, value).await
    }
}

fn upsert_setting(doc: &mut IniLines, key: &str, value: &str) {
    doc.upsert(
        key,
        &format!("{key}={value}"),
        SETTINGS_SECTION,
        MissingSection::Prepend,
    );
}
