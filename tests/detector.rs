use worlds_launcher::{
    catalog::default_catalog,
    detect::{detect_current_server, detect_in},
    storage::{Launcher, Layout},
};

#[test]
fn both_halves_must_match() {
    let catalog = default_catalog().expect("catalog");
    let layout = Layout::default();

    assert_eq!(
        detect_in(&catalog, &layout.settings_template, &layout.override_template).as_deref(),
        Some("LibreWorlds")
    );

    let settings = layout
        .settings_template
        .replace("[test.libreworlds.org:32147]", "[elsewhere:1]");
    assert_eq!(detect_in(&catalog, &settings, &layout.override_template), None);

    let override_text = layout
        .override_template
        .replace("test.libreworlds.org:32147", "elsewhere:1");
    assert_eq!(detect_in(&catalog, &layout.settings_template, &override_text), None);
}

#[test]
fn first_catalog_entry_wins() {
    let catalog = default_catalog().expect("catalog");
    let settings = "[test.3dcd.com:6650]\n[worlio.com:6650]\n";
    let override_text = "[Runtime]\nWorldServer=worldserver://worlio.com:6650/\n\
                         WorldServer=worldserver://http://us1.worlds.net/3DCDup\n";

    assert_eq!(detect_in(&catalog, settings, override_text).as_deref(), Some("Official"));
}

#[tokio::test]
async fn missing_file_means_no_server() {
    let dir = tempfile::tempdir().expect("tempdir");
    let launcher = Launcher::new(dir.path(), Layout::default());
    let catalog = default_catalog().expect("catalog");
    std::fs::write(launcher.settings_path(), &launcher.layout().settings_template).expect("settings");

    assert_eq!(detect_current_server(&launcher, &catalog).await, None);

    std::fs::write(launcher.override_path(), &launcher.layout().override_template).expect("override");
    assert_eq!(
        detect_current_server(&launcher, &catalog).await.as_deref(),
        Some("LibreWorlds")
    );
}
