use std::fs;
use tempfile::TempDir;

use release_pilot::config::{load_config, Config};

#[test]
fn test_defaults_when_no_file() {
    // Point at a path that cannot exist so the defaults path is exercised
    let config = Config::default();
    assert_eq!(config.release.mainline, "main");
    assert_eq!(config.release.remote, "origin");
    assert_eq!(config.release.host_command, "gh");
    assert_eq!(config.release.version_file, "Cargo.toml");
    assert_eq!(
        config.release.labels,
        vec!["release".to_string(), "automated".to_string()]
    );
    assert!(config.behavior.require_approval);
}

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("releasepilot.toml");
    fs::write(
        &path,
        r#"
        [package]
        name = "widget"

        [build]
        command = "make"
        args = ["dist"]

        [release]
        mainline = "trunk"
        labels = ["ship-it", "bot"]

        [index]
        publish_command = "uploader"
        token_command = "token-minter"

        [behavior]
        require_approval = false
        "#,
    )
    .unwrap();

    let config = load_config(path.to_str()).unwrap();
    assert_eq!(config.package.name, "widget");
    assert_eq!(config.build.command, "make");
    assert_eq!(config.build.args, vec!["dist".to_string()]);
    assert_eq!(config.release.mainline, "trunk");
    assert_eq!(config.release.labels.len(), 2);
    assert_eq!(config.index.publish_command, "uploader");
    assert_eq!(config.index.token_command.as_deref(), Some("token-minter"));
    assert!(!config.behavior.require_approval);

    // Unspecified values fall back to defaults
    assert_eq!(config.release.remote, "origin");
    assert_eq!(config.build.source_archive, "dist/{name}-{version}.tar.gz");
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(load_config(path.to_str()).is_err());
}

#[test]
fn test_load_malformed_file_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "release = \"not a table\"").unwrap();

    let err = load_config(path.to_str()).unwrap_err();
    assert_eq!(err.exit_code(), 14);
}

#[test]
fn test_template_expansion_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("releasepilot.toml");
    fs::write(
        &path,
        r#"
        [package]
        name = "widget"

        [build]
        source_archive = "out/{name}_{version}.src.tgz"
        "#,
    )
    .unwrap();

    let config = load_config(path.to_str()).unwrap();
    assert_eq!(
        config.expand_template(&config.build.source_archive, "3.1.0"),
        "out/widget_3.1.0.src.tgz"
    );
}
