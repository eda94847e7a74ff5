//! Config and asset loading against real files.

use std::fs;

use ringrunner_sim::assets::{AssetError, AssetManifest, AssetSource, AssetState, DirectoryAssets};
use ringrunner_sim::config::{ConfigError, GameConfig};
use ringrunner_sim::core::constants::{FRAME_DURATION, SHIP_SPEED, SPACE_SPEED};
use ringrunner_sim::core::enums::ModelId;

// ---- Config ----

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.sim.seed, 42);
    assert_eq!(config.sim.ship_speed, SHIP_SPEED);
    assert_eq!(config.sim.space_speed, SPACE_SPEED);
    assert_eq!(config.sim.frame_rate, 60);
    assert_eq!(config.sim.frame_duration(), FRAME_DURATION);
    assert!(config.features.scoring);
    assert_eq!(config.narrative.milestone_interval, 20);
    assert_eq!(config.narrative.char_delay_ms, 50);
    assert_eq!(config.narrative.lines.len(), 6);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = GameConfig::from_toml_str(
        r#"
        [sim]
        seed = 9

        [features]
        scoring = false
        "#,
    )
    .unwrap();

    assert_eq!(config.sim.seed, 9);
    assert_eq!(config.sim.space_speed, SPACE_SPEED);
    assert!(!config.features.scoring);
    assert_eq!(config.narrative, GameConfig::default().narrative);
}

#[test]
fn test_frame_rate_from_toml() {
    let config = GameConfig::from_toml_str("[sim]\nframe_rate = 30\n").unwrap();
    assert_eq!(config.sim.frame_rate, 30);
    assert_eq!(config.sim.frame_duration().as_nanos(), 1_000_000_000 / 30);
}

#[test]
fn test_degenerate_narrative_still_indexes() {
    let config = GameConfig::from_toml_str(
        r#"
        [narrative]
        lines = []
        milestone_interval = 0
        "#,
    )
    .unwrap();

    let sequence = config.narrative.sequence();
    assert_eq!(sequence.interval(), 1);
    assert_eq!(sequence.index_for_score(100), 0);
    assert_eq!(sequence.line(3), "");
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ringrunner.toml");
    fs::write(
        &path,
        r#"
        [narrative]
        milestone_interval = 5
        lines = ["a", "b"]
        "#,
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    assert_eq!(config.narrative.milestone_interval, 5);
    let sequence = config.narrative.sequence();
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.index_for_score(12), 1);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_bad_toml_is_parse_error() {
    let err = GameConfig::from_toml_str("[sim]\nseed = \"many\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_load_or_default_without_path() {
    let config = GameConfig::load_or_default(None).unwrap();
    assert_eq!(config, GameConfig::default());
}

// ---- Assets ----

#[test]
fn test_directory_assets_partial() {
    let dir = tempfile::tempdir().unwrap();
    let ship_dir = dir.path().join("spaceship2");
    fs::create_dir_all(&ship_dir).unwrap();
    fs::write(ship_dir.join("scene.gltf"), b"{}").unwrap();

    let manifest = AssetManifest::resolve(&DirectoryAssets::new(dir.path()));

    assert!(manifest.is_settled());
    assert!(manifest.is_loaded(ModelId::Spaceship));
    assert!(!manifest.is_loaded(ModelId::Asteroid));
    assert!(matches!(
        manifest.state(ModelId::Explosion),
        AssetState::Failed(_)
    ));
    match manifest.state(ModelId::Spaceship) {
        AssetState::Loaded(info) => assert_eq!(info.bytes, 2),
        other => panic!("expected loaded ship, got {other:?}"),
    }
}

#[test]
fn test_directory_assets_missing_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DirectoryAssets::new(dir.path());
    let err = source.load(ModelId::Asteroid).unwrap_err();

    assert!(matches!(err, AssetError::Missing { model: ModelId::Asteroid, .. }));
    assert!(err.to_string().contains("scene.gltf"));
}

#[test]
fn test_builtin_manifest_loads_everything() {
    let manifest = AssetManifest::builtin();
    for id in ModelId::ALL {
        assert!(manifest.is_loaded(id));
    }
}

#[test]
fn test_failed_model_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let mut manifest = AssetManifest::resolve(&DirectoryAssets::new(dir.path()));
    assert!(!manifest.is_loaded(ModelId::Spaceship));

    // Even a source that would now succeed does not revive it.
    manifest.load_pending(&ringrunner_sim::assets::BuiltinAssets);
    assert!(!manifest.is_loaded(ModelId::Spaceship));
}
