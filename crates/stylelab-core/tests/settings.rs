//! Integration tests for settings load/save

use stylelab_core::datadir::DataDir;
use stylelab_core::settings::Settings;
use stylelab_testkit::TempDataDir;

#[tokio::test]
async fn test_load_without_file_is_all_defaults() {
    let fixture = TempDataDir::new();
    let data_dir = DataDir::new(fixture.path());

    let settings = Settings::load(&data_dir).await;
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn test_load_malformed_file_is_all_defaults() {
    let fixture = TempDataDir::new();
    fixture.write_file("settings.toml", "not toml at all [[[\n");
    let data_dir = DataDir::new(fixture.path());

    let settings = Settings::load(&data_dir).await;
    assert_eq!(settings, Settings::default());
}

#[tokio::test]
async fn test_load_defaults_wrong_typed_field_and_keeps_valid_ones() {
    let fixture = TempDataDir::new();
    fixture.write_file(
        "settings.toml",
        "auto_hide_title_bar = \"yes\"\neditor_font = \"Iosevka\"\n",
    );
    let data_dir = DataDir::new(fixture.path());

    let settings = Settings::load(&data_dir).await;
    assert_eq!(
        settings.auto_hide_title_bar,
        Settings::default().auto_hide_title_bar
    );
    assert_eq!(settings.editor_font, "Iosevka");
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let fixture = TempDataDir::new();
    let data_dir = DataDir::new(fixture.path());

    let settings = Settings {
        auto_update_app: false,
        auto_hide_title_bar: true,
        editor_font: "Iosevka".to_string(),
        editor_font_size: 18,
        global_css: "body { background: #222; }".to_string(),
    };
    settings.save(&data_dir).await;

    let loaded = Settings::load(&data_dir).await;
    assert_eq!(loaded, settings);
}

#[tokio::test]
async fn test_save_creates_data_directory() {
    let fixture = TempDataDir::new();
    let root = fixture.missing_subdir("fresh-profile");
    let data_dir = DataDir::new(&root);

    Settings::default().save(&data_dir).await;
    assert!(root.join("settings.toml").exists());
}
