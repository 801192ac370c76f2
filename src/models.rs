use crate::error::{LauncherError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Update channel that leaves upgrade/script lines untouched.
pub const UPDATE_NOTHING: &str = "Nothing";
/// Update channel that deletes every upgrade/script line.
pub const UPDATE_REMOVE: &str = "Remove";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub address: String,
    pub world_server: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upgrade_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_server: Option<String>,
}

/// The `worldsserverselection.json` document. Maps keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub server_selection: IndexMap<String, ServerEntry>,
    #[serde(default)]
    pub updating_server: IndexMap<String, UpdateEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerProfile {
    pub name: String,
    pub address: String,
    pub world_server: String,
}

/// How a chosen update channel rewrites the settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    Keep,
    Remove,
    Apply {
        upgrade_server: Option<String>,
        script_server: Option<String>,
    },
}

impl Catalog {
    pub fn server(&self, name: &str) -> Option<ServerProfile> {
        self.server_selection
            .get(name)
            .map(|entry| ServerProfile {
                name: name.to_string(),
                address: entry.address.clone(),
                world_server: entry.world_server.clone(),
            })
    }

    pub fn server_profiles(&self) -> impl Iterator<Item = ServerProfile> + '_ {
        self.server_selection
            .iter()
            .map(|(name, entry)| ServerProfile {
                name: name.clone(),
                address: entry.address.clone(),
                world_server: entry.world_server.clone(),
            })
    }

    /// Every known server address, used to prune address sections.
    pub fn addresses(&self) -> Vec<String> {
        self.server_selection
            .values()
            .map(|entry| entry.address.clone())
            .collect()
    }

    pub fn require_server(&self, name: &str) -> Result<ServerProfile> {
        self.server(name)
            .ok_or_else(|| LauncherError::UnknownServer(name.to_string()))
    }

    /// Resolves an update channel name. An empty name behaves like `Nothing`.
    pub fn update_action(&self, name: &str) -> Result<UpdateAction> {
        if name.is_empty() || name == UPDATE_NOTHING {
            return Ok(UpdateAction::Keep);
        }
        if name == UPDATE_REMOVE {
            return Ok(UpdateAction::Remove);
        }
        let entry = self
            .updating_server
            .get(name)
            .ok_or_else(|| LauncherError::UnknownUpdateChannel(name.to_string()))?;
        Ok(UpdateAction::Apply {
            upgrade_server: non_empty(entry.upgrade_server.as_deref()),
            script_server: non_empty(entry.script_server.as_deref()),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
