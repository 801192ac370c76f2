use crate::error::{LauncherError, Result};
use crate::models::{Catalog, ServerEntry, UpdateEntry, UPDATE_NOTHING, UPDATE_REMOVE};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;
use tracing::info;

const DEFAULT_CATALOG: &str = include_str!("../assets/worldsserverselection.default.json");

pub fn default_catalog() -> Result<Catalog> {
    serde_json::from_str(DEFAULT_CATALOG)
        .map_err(|err| LauncherError::CatalogLoad(format!("failed to parse built-in catalog: {err}")))
}

/// Reads the catalog, writing the built-in one first when the file is absent.
pub async fn load_or_create(path: &Path) -> Result<Catalog> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
            LauncherError::CatalogLoad(format!("failed to parse '{}': {err}", path.display()))
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let catalog = default_catalog()?;
            save_catalog(path, &catalog).await?;
            info!(path = %path.display(), "created default server catalog");
            Ok(catalog)
        }
        Err(err) => Err(LauncherError::CatalogLoad(format!(
            "failed to read '{}': {err}",
            path.display()
        ))),
    }
}

pub async fn save_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let data = to_pretty_json(catalog)?;

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, data)
        .await
        .map_err(|err| LauncherError::CatalogLoad(format!("failed to write temp catalog: {err}")))?;

    if tokio::fs::metadata(path).await.is_ok() {
        tokio::fs::remove_file(path)
            .await
            .map_err(|err| LauncherError::CatalogLoad(format!("failed to remove old catalog: {err}")))?;
    }

    tokio::fs::rename(&tmp_path, path)
        .await
        .map_err(|err| LauncherError::CatalogLoad(format!("failed to move catalog into place: {err}")))
}

fn to_pretty_json(catalog: &Catalog) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    catalog
        .serialize(&mut serializer)
        .map_err(|err| LauncherError::CatalogLoad(format!("failed to serialize catalog: {err}")))?;
    Ok(buffer)
}

/// A server entered by the user, with an update channel of the same name.
#[derive(Debug, Clone, Default)]
pub struct NewServer {
    pub name: String,
    pub address: String,
    pub world_server: String,
    pub upgrade_server: Option<String>,
    pub script_server: Option<String>,
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[[^\[\]]+\]$").expect("address regex"))
}

fn line_re(key: &str) -> Regex {
    Regex::new(&format!(r"(?i)^{key}=\S")).expect("line regex")
}

impl NewServer {
    /// Trims every field and turns empty optional lines into `None`.
    pub fn normalized(self) -> Self {
        let optional = |value: Option<String>| {
            value
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
        };
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            world_server: self.world_server.trim().to_string(),
            upgrade_server: optional(self.upgrade_server),
            script_server: optional(self.script_server),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || self.address.is_empty() || self.world_server.is_empty() {
            return Err(LauncherError::InvalidServer(
                "Server Name, Address, and WorldServer fields are mandatory".to_string(),
            ));
        }
        if self.name == UPDATE_NOTHING || self.name == UPDATE_REMOVE {
            return Err(LauncherError::InvalidServer(format!(
                "'{}' is a reserved update channel name",
                self.name
            )));
        }
        if !address_re().is_match(&self.address) {
            return Err(LauncherError::InvalidServer(format!(
                "address must look like [host:port], got '{}'",
                self.address
            )));
        }
        if !line_re("worldserver").is_match(&self.world_server) {
            return Err(LauncherError::InvalidServer(
                "WorldServer line must start with WorldServer=".to_string(),
            ));
        }
        if let Some(line) = &self.upgrade_server {
            if !line_re("upgradeserver").is_match(line) {
                return Err(LauncherError::InvalidServer(
                    "UpgradeServer line must start with upgradeServer=".to_string(),
                ));
            }
        }
        if let Some(line) = &self.script_server {
            if !line_re("scriptserver").is_match(line) {
                return Err(LauncherError::InvalidServer(
                    "ScriptServer line must start with scriptServer=".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Inserts or overwrites the server and its update channel.
pub fn add_server(catalog: &mut Catalog, server: NewServer) -> Result<()> {
    let server = server.normalized();
    server.validate()?;

    catalog.server_selection.insert(
        server.name.clone(),
        ServerEntry {
            address: server.address,
            world_server: server.world_server,
        },
    );
    catalog.updating_server.insert(
        server.name,
        UpdateEntry {
            upgrade_server: server.upgrade_server,
            script_server: server.script_server,
        },
    );
    Ok(())
}

pub async fn add_server_to_file(path: &Path, server: NewServer) -> Result<Catalog> {
    let mut catalog = load_or_create(path).await?;
    let name = server.name.trim().to_string();
    add_server(&mut catalog, server)?;
    save_catalog(path, &catalog).await?;
    info!(server = %name, "added server to catalog");
    Ok(catalog)
}
