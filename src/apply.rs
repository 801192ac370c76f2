//! Reconciles both INI files with a chosen server and update channel.

use crate::catalog::load_or_create;
use crate::error::{LauncherError, Result};
use crate::ini::{key_matches, IniLines, LineEdit, MissingSection};
use crate::models::{Catalog, ServerProfile, UpdateAction};
use crate::runner::{launch, GameProcess, InstallMode, ProcessSpawner};
use crate::storage::{is_file, read_required, write_text, Launcher};
use tracing::info;

pub const RUNTIME_SECTION: &str = "Runtime";
pub const INSTALLED_WORLDS_SECTION: &str = "InstalledWorlds";

const WORLD_SERVER_KEY: &str = "worldserver";
const UPGRADE_SERVER_KEY: &str = "upgradeserver";
const SCRIPT_SERVER_KEY: &str = "scriptserver";

/// Points the override file at the server's `WorldServer=` endpoint.
pub fn patch_override(doc: &mut IniLines, world_server: &str) {
    doc.upsert(
        WORLD_SERVER_KEY,
        world_server.trim(),
        RUNTIME_SECTION,
        MissingSection::Append,
    );
}

/// Removes the address section of every server the catalog knows about.
pub fn prune_server_sections(doc: &mut IniLines, catalog: &Catalog) -> usize {
    doc.remove_sections(&catalog.addresses())
}

/// Adds the address block after the `[InstalledWorlds]` section, or at the
/// end of the file when that section is missing.
pub fn insert_address_block(doc: &mut IniLines, address: &str) {
    let address = address.trim();
    match doc.first_header(INSTALLED_WORLDS_SECTION) {
        Some(header) => {
            let end = doc.section_end(header);
            doc.insert(end, "");
            doc.insert(end + 1, address);
        }
        None => {
            doc.push("");
            doc.push(address);
        }
    }
}

/// Rewrites `upgradeServer=` / `scriptServer=` lines for an update channel.
///
/// With `Apply`, a matched line is replaced by the channel's line, or
/// dropped when the channel does not define that line. Lines the channel
/// defines but the file lacks are appended at the end.
pub fn apply_update_action(doc: &mut IniLines, action: &UpdateAction) {
    match action {
        UpdateAction::Keep => {}
        UpdateAction::Remove => doc.edit_lines(|line| {
            if key_matches(line, UPGRADE_SERVER_KEY) || key_matches(line, SCRIPT_SERVER_KEY) {
                LineEdit::Drop
            } else {
                LineEdit::Keep
            }
        }),
        UpdateAction::Apply {
            upgrade_server,
            script_server,
        } => {
            let mut found_upgrade = false;
            let mut found_script = false;
            doc.edit_lines(|line| {
                if key_matches(line, UPGRADE_SERVER_KEY) {
                    found_upgrade = true;
                    replacement(upgrade_server)
                } else if key_matches(line, SCRIPT_SERVER_KEY) {
                    found_script = true;
                    replacement(script_server)
                } else {
                    LineEdit::Keep
                }
            });
            if let (false, Some(line)) = (found_upgrade, upgrade_server) {
                doc.push(line);
            }
            if let (false, Some(line)) = (found_script, script_server) {
                doc.push(line);
            }
        }
    }
}

fn replacement(line: &Option<String>) -> LineEdit {
    match line {
        Some(line) => LineEdit::Replace(line.clone()),
        None => LineEdit::Drop,
    }
}

/// Settings file side of a server selection.
pub fn patch_settings(
    doc: &mut IniLines,
    catalog: &Catalog,
    server: &ServerProfile,
    action: &UpdateAction,
    mode: InstallMode,
) {
    prune_server_sections(doc, catalog);
    if mode == InstallMode::Legacy {
        insert_address_block(doc, &server.address);
    }
    apply_update_action(doc, action);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedSelection {
    pub server: String,
    pub mode: InstallMode,
}

/// Patches both files for `server_name` / `update_name`. Nothing is written
/// unless both files exist and both names resolve.
pub async fn apply_selection(
    launcher: &Launcher,
    catalog: &Catalog,
    server_name: &str,
    update_name: &str,
) -> Result<AppliedSelection> {
    let settings_path = launcher.settings_path();
    let override_path = launcher.override_path();
    for path in [&settings_path, &override_path] {
        if !is_file(path).await {
            return Err(LauncherError::FileMissing { path: path.clone() });
        }
    }

    let server = catalog.require_server(server_name)?;
    let action = catalog.update_action(update_name)?;
    let mode = InstallMode::detect(launcher).await;

    let mut override_doc = IniLines::parse(&read_required(&override_path).await?);
    let mut settings_doc = IniLines::parse(&read_required(&settings_path).await?);

    patch_override(&mut override_doc, &server.world_server);
    patch_settings(&mut settings_doc, catalog, &server, &action, mode);

    write_text(&override_path, &override_doc.render()).await?;
    write_text(&settings_path, &settings_doc.render()).await?;
    info!(server = %server.name, update = update_name, ?mode, "applied server selection");

    Ok(AppliedSelection {
        server: server.name,
        mode,
    })
}

/// Loads the catalog, applies the selection and starts the client.
pub async fn apply_and_launch(
    launcher: &Launcher,
    server_name: &str,
    update_name: &str,
    spawner: &dyn ProcessSpawner,
) -> Result<GameProcess> {
    let catalog = load_or_create(&launcher.catalog_path()).await?;
    apply_selection(launcher, &catalog, server_name, update_name).await?;
    launch(launcher, spawner).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(text: &str, action: UpdateAction) -> String {
        let mut doc = IniLines::parse(text);
        apply_update_action(&mut doc, &action);
        doc.render()
    }

    #[test]
    fn keep_leaves_lines_alone() {
        let text = "[Gamma]\nupgradeServer=a\nscriptServer=b\n";
        assert_eq!(apply(text, UpdateAction::Keep), text);
    }

    #[test]
    fn remove_drops_both_keys_in_any_case() {
        let text = "[Gamma]\nUPGRADESERVER=a\nmultirun=1\nScriptServer=b\n";
        assert_eq!(apply(text, UpdateAction::Remove), "[Gamma]\nmultirun=1\n");
    }

    #[test]
    fn apply_replaces_in_place_and_appends_missing() {
        let text = "[Gamma]\nupgradeServer=old\nmultirun=1\n[InstalledWorlds]\n";
        let action = UpdateAction::Apply {
            upgrade_server: Some("upgradeServer=new".to_string()),
            script_server: Some("scriptServer=new".to_string()),
        };
        assert_eq!(
            apply(text, action),
            "[Gamma]\nupgradeServer=new\nmultirun=1\n[InstalledWorlds]\nscriptServer=new\n"
        );
    }

    #[test]
    fn apply_drops_matched_line_the_channel_lacks() {
        let text = "[Gamma]\nupgradeServer=old\nscriptServer=old\n";
        let action = UpdateAction::Apply {
            upgrade_server: Some("upgradeServer=http://us1.worlds.net/3DCDup".to_string()),
            script_server: None,
        };
        assert_eq!(
            apply(text, action),
            "[Gamma]\nupgradeServer=http://us1.worlds.net/3DCDup\n"
        );
    }

    #[test]
    fn address_block_lands_after_installed_worlds() {
        let mut doc = IniLines::parse("[Gamma]\na=1\n[InstalledWorlds]\nMaxInstalledWorlds=49\n[Other]\nb=2\n");
        insert_address_block(&mut doc, "[test.3dcd.com:6650]");
        assert_eq!(
            doc.render(),
            "[Gamma]\na=1\n[InstalledWorlds]\nMaxInstalledWorlds=49\n\n[test.3dcd.com:6650]\n[Other]\nb=2\n"
        );
    }

    #[test]
    fn address_block_appends_without_installed_worlds() {
        let mut doc = IniLines::parse("[Gamma]\na=1");
        insert_address_block(&mut doc, "[worlio.com:6650]");
        assert_eq!(doc.render(), "[Gamma]\na=1\n\n[worlio.com:6650]\n");
    }

    #[test]
    fn override_inserts_after_runtime_header() {
        let mut doc = IniLines::parse("[Install]\ndisplayName=worlds\n[Runtime]\nnoimpchange=1\n");
        patch_override(&mut doc, "WorldServer=worldserver://worlio.com:6650/");
        assert_eq!(
            doc.render(),
            "[Install]\ndisplayName=worlds\n[Runtime]\nWorldServer=worldserver://worlio.com:6650/\nnoimpchange=1\n"
        );
    }
}
