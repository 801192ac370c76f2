use std::path::{Path, PathBuf};
use std::sync::Mutex;
use worlds_launcher::{
    apply::{apply_and_launch, apply_selection},
    catalog::default_catalog,
    defaults::{write_default_file, DefaultFile},
    detect::detect_current_server,
    error::{LauncherError, Result},
    models::{Catalog, ServerEntry},
    runner::{GameProcess, InstallMode, ProcessSpawner},
    storage::{Launcher, Layout},
};

const OFFICIAL_WORLD_SERVER: &str = "WorldServer=worldserver://http://us1.worlds.net/3DCDup";

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}")).expect("fixture missing")
}

async fn default_install() -> (tempfile::TempDir, Launcher) {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = Launcher::new(dir.path(), Layout::default());
    write_default_file(&launcher, DefaultFile::Settings, false)
        .await
        .expect("default settings");
    write_default_file(&launcher, DefaultFile::Override, false)
        .await
        .expect("default override");
    (dir, launcher)
}

fn read(path: PathBuf) -> String {
    std::fs::read_to_string(path).expect("read file")
}

#[derive(Default)]
struct RecordingSpawner {
    spawned: Mutex<Vec<(PathBuf, PathBuf)>>,
}

#[async_trait::async_trait]
impl ProcessSpawner for RecordingSpawner {
    async fn spawn(&self, executable: &Path, work_dir: &Path) -> Result<GameProcess> {
        self.spawned
            .lock()
            .expect("spawn log")
            .push((executable.to_path_buf(), work_dir.to_path_buf()));
        Ok(GameProcess::new(executable.to_path_buf(), Some(42), async { Ok(Some(0)) }))
    }
}

#[tokio::test]
async fn official_with_remove_from_default_files() {
    let (_dir, launcher) = default_install().await;
    let catalog = default_catalog().expect("catalog");

    let applied = apply_selection(&launcher, &catalog, "Official", "Remove")
        .await
        .expect("apply");
    assert_eq!(applied.mode, InstallMode::Modern);

    let layout = Layout::default();
    let expected_override = layout.override_template.replace(
        "WorldServer=worldserver://test.libreworlds.org:32147\n",
        &format!("{OFFICIAL_WORLD_SERVER}\n"),
    );
    assert_eq!(read(launcher.override_path()), expected_override);
    assert!(expected_override.contains(&format!("[Runtime]\n{OFFICIAL_WORLD_SERVER}\n")));

    let settings = read(launcher.settings_path());
    let expected_settings = layout
        .settings_template
        .replace("upgradeServer=http://upgrade.libreworlds.org/3DCDup\n", "")
        .replace("[test.libreworlds.org:32147]\nhandshakeID=1119430730\n", "");
    assert_eq!(settings, expected_settings);
    assert!(!settings.to_lowercase().contains("upgradeserver="));
    assert!(!settings.contains("[test.libreworlds.org:32147]"));
}

#[tokio::test]
async fn only_known_address_sections_are_pruned() {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = Launcher::new(dir.path(), Layout::default());
    std::fs::write(launcher.settings_path(), read_fixture("worlds_sections.ini")).expect("settings");
    std::fs::write(launcher.override_path(), read_fixture("override_runtime.ini")).expect("override");

    let mut catalog = Catalog::default();
    for (name, address) in [("A", "[a:1]"), ("C", "[c:3]")] {
        catalog.server_selection.insert(
            name.to_string(),
            ServerEntry {
                address: address.to_string(),
                world_server: format!("WorldServer=worldserver://{name}"),
            },
        );
    }

    apply_selection(&launcher, &catalog, "A", "Nothing")
        .await
        .expect("apply");

    assert_eq!(
        read(launcher.settings_path()),
        "[Gamma]\nmultirun=1\nupgradeServer=http://upgrade.libreworlds.org/3DCDup\n\
         scriptServer=http://script.libreworlds.org\n[InstalledWorlds]\nMaxInstalledWorlds=49\n\n\
         [b:2]\nhandshakeID=2\n\n"
    );
    assert!(read(launcher.override_path()).contains("[Runtime]\nWorldServer=worldserver://A\nnoimpchange=1\n"));
}

#[tokio::test]
async fn legacy_install_gets_address_block_after_installed_worlds() {
    let (_dir, launcher) = default_install().await;
    std::fs::write(launcher.primary_executable_path(), b"").expect("run.exe");
    let catalog = default_catalog().expect("catalog");

    let applied = apply_selection(&launcher, &catalog, "Official", "LibreWorlds")
        .await
        .expect("apply");
    assert_eq!(applied.mode, InstallMode::Legacy);

    let settings = read(launcher.settings_path());
    assert!(settings.contains("upgradeServer=http://upgrade.libreworlds.org/3DCDup\nLogFile=Gamma.Log\n"));
    assert!(settings.ends_with(
        "[InstalledWorlds]\nMaxInstalledWorlds=49\n\n\n[test.3dcd.com:6650]\nscriptServer=http://script.libreworlds.org\n"
    ));
    assert!(!settings.contains("[test.libreworlds.org:32147]"));

    assert_eq!(
        detect_current_server(&launcher, &catalog).await.as_deref(),
        Some("Official")
    );
}

#[tokio::test]
async fn channel_without_script_server_drops_existing_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = Launcher::new(dir.path(), Layout::default());
    std::fs::write(launcher.settings_path(), read_fixture("worlds_sections.ini")).expect("settings");
    std::fs::write(launcher.override_path(), read_fixture("override_runtime.ini")).expect("override");
    let catalog = default_catalog().expect("catalog");

    apply_selection(&launcher, &catalog, "Worlio", "Official")
        .await
        .expect("apply");

    let settings = read(launcher.settings_path());
    assert!(settings.starts_with("[Gamma]\nmultirun=1\nupgradeServer=http://us1.worlds.net/3DCDup\n[InstalledWorlds]\n"));
    assert!(!settings.to_lowercase().contains("scriptserver="));
}

#[tokio::test]
async fn override_without_runtime_section_gets_one_appended() {
    let (_dir, launcher) = default_install().await;
    std::fs::write(launcher.override_path(), "[Install]\ndisplayName=worlds\n").expect("override");
    let catalog = default_catalog().expect("catalog");

    apply_selection(&launcher, &catalog, "Worlio", "Nothing")
        .await
        .expect("apply");

    assert_eq!(
        read(launcher.override_path()),
        "[Install]\ndisplayName=worlds\n\n[Runtime]\nWorldServer=worldserver://worlio.com:6650/\n"
    );
}

#[tokio::test]
async fn nothing_is_written_when_a_file_is_missing() {
    let (_dir, launcher) = default_install().await;
    std::fs::remove_file(launcher.override_path()).expect("remove override");
    let before = read(launcher.settings_path());
    let catalog = default_catalog().expect("catalog");

    let err = apply_selection(&launcher, &catalog, "Official", "Remove")
        .await
        .expect_err("override missing");

    assert!(matches!(err, LauncherError::FileMissing { ref path } if path == &launcher.override_path()));
    assert_eq!(read(launcher.settings_path()), before);
}

#[tokio::test]
async fn unknown_names_leave_files_untouched() {
    let (_dir, launcher) = default_install().await;
    let catalog = default_catalog().expect("catalog");
    let settings = read(launcher.settings_path());
    let override_text = read(launcher.override_path());

    let err = apply_selection(&launcher, &catalog, "Nowhere", "Remove")
        .await
        .expect_err("unknown server");
    assert!(matches!(err, LauncherError::UnknownServer(_)));

    let err = apply_selection(&launcher, &catalog, "Official", "Nightly")
        .await
        .expect_err("unknown channel");
    assert!(matches!(err, LauncherError::UnknownUpdateChannel(_)));

    assert_eq!(read(launcher.settings_path()), settings);
    assert_eq!(read(launcher.override_path()), override_text);
}

#[tokio::test]
async fn launch_prefers_fallback_when_primary_is_absent() {
    let (_dir, launcher) = default_install().await;
    std::fs::write(launcher.fallback_executable_path(), b"").expect("player exe");
    let spawner = RecordingSpawner::default();

    let process = apply_and_launch(&launcher, "Worlio", "Worlio", &spawner)
        .await
        .expect("launch");

    assert_eq!(process.executable, launcher.fallback_executable_path());
    assert_eq!(process.wait().await.expect("exit"), Some(0));
    assert_eq!(
        spawner.spawned.lock().expect("spawn log").as_slice(),
        &[(launcher.fallback_executable_path(), launcher.dir().to_path_buf())]
    );
    assert!(launcher.catalog_path().exists());
    assert!(read(launcher.settings_path()).contains("ScriptServer=http://files.worlio.com/cgi-bin/\n"));
}

#[tokio::test]
async fn launch_without_executables_fails_after_patching() {
    let (_dir, launcher) = default_install().await;
    let spawner = RecordingSpawner::default();

    let err = apply_and_launch(&launcher, "Official", "Nothing", &spawner)
        .await
        .expect_err("no executable");

    assert!(matches!(err, LauncherError::ExecutableMissing { .. }));
    assert!(read(launcher.override_path()).contains(OFFICIAL_WORLD_SERVER));
    assert!(spawner.spawned.lock().expect("spawn log").is_empty());
}
