//! Integration tests for layered Settings loading.
//!
//! These tests run without a global config (temp directories only), so they
//! test local config merging with compiled defaults.

use std::fs;

use tempfile::TempDir;

use kinseed::application::ApplicationError;
use kinseed::config::{RawSettings, Settings};

#[test]
fn given_local_config_with_round_cap_when_load_then_overrides_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kinseed.toml");
    fs::write(&path, "[coalesce]\nmax_rounds = 250\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.coalesce.max_rounds, 250);
    assert_eq!(settings.depth_offset_start, 1, "unspecified keys keep defaults");
}

#[test]
fn given_local_config_with_start_depth_when_load_then_overrides_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kinseed.toml");
    fs::write(&path, "depth_offset_start = 0\n").unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.depth_offset_start, 0);
    assert_eq!(settings.coalesce.max_rounds, 100);
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_malformed_local_config_when_load_then_config_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kinseed.toml");
    fs::write(&path, "depth_offset_start = \"deep\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("kinseed.toml"), "{err}");
}

#[test]
fn given_zero_round_cap_in_local_config_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("kinseed.toml");
    fs::write(&path, "[coalesce]\nmax_rounds = 0\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_effective_settings_when_exported_then_toml_round_trips() {
    let settings = Settings {
        depth_offset_start: 3,
        ..Settings::default()
    };

    let toml_text = settings.to_toml().expect("serialize");
    let raw: RawSettings = toml::from_str(&toml_text).expect("parse");

    assert_eq!(raw.depth_offset_start, Some(3));
    assert_eq!(raw.coalesce.max_rounds, Some(100));
    assert!(toml_text.contains("[coalesce]"));
}

#[test]
fn given_template_when_read_then_documents_every_setting() {
    let template = Settings::template();

    assert!(template.contains("depth_offset_start"));
    assert!(template.contains("max_rounds"));
    assert!(template.contains("KINSEED_"));
}
