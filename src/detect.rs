use crate::models::Catalog;
use crate::storage::Launcher;

/// First server (catalog order) whose address appears in the settings text
/// and whose WorldServer line appears in the override text.
pub fn detect_in(catalog: &Catalog, settings_text: &str, override_text: &str) -> Option<String> {
    catalog
        .server_selection
        .iter()
        .find(|(_, entry)| {
            settings_text.contains(entry.address.trim())
                && override_text.contains(entry.world_server.trim())
        })
        .map(|(name, _)| name.clone())
}

/// Same as [`detect_in`] over the files on disk; `None` when either file
/// cannot be read.
pub async fn detect_current_server(launcher: &Launcher, catalog: &Catalog) -> Option<String> {
    let settings_text = tokio::fs::read_to_string(launcher.settings_path()).await.ok()?;
    let override_text = tokio::fs::read_to_string(launcher.override_path()).await.ok()?;
    detect_in(catalog, &settings_text, &override_text)
}
