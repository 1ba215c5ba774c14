//! Configuration file integration tests.

use std::path::PathBuf;

use spritestage::engine::Engine;
use spritestage::error::EngineError;
use spritestage::resources::engineconfig::EngineConfig;

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "spritestage-{}-{name}.ini",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn partial_file_keeps_defaults() {
    let path = temp_config(
        "partial",
        "[canvas]\nwidth = 160\nheight = 144\n\n[display]\nauto_scale = false\nscale = 2.5\n",
    );
    let mut config = EngineConfig::with_path(&path);
    config.load_from_file().unwrap();

    assert_eq!(config.canvas_size(), (160, 144));
    assert!(!config.auto_scale);
    assert_eq!(config.scale, 2.5);
    assert_eq!(config.window_size(), EngineConfig::new().window_size());
    assert_eq!(config.target_fps, EngineConfig::new().target_fps);

    let engine = Engine::from_config(&config).unwrap();
    assert_eq!(engine.display_scale().scale, 2.5);
    assert_eq!(engine.canvas().height(), 144);

    std::fs::remove_file(path).ok();
}

#[test]
fn save_then_load_keeps_values() {
    let path = temp_config("saved", "");
    let mut config = EngineConfig::with_path(&path);
    config.canvas_width = 256;
    config.window_height = 720;
    config.origin_x = 12.0;
    config.auto_scale = false;
    config.save_to_file().unwrap();

    let mut loaded = EngineConfig::with_path(&path);
    loaded.load_from_file().unwrap();
    assert_eq!(loaded, config);

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_file_is_an_error() {
    let mut config = EngineConfig::with_path("/nonexistent/spritestage/config.ini");
    assert!(matches!(
        config.load_from_file(),
        Err(EngineError::ConfigLoad(_))
    ));
    assert_eq!(config, EngineConfig::with_path("/nonexistent/spritestage/config.ini"));
}

#[test]
fn zero_sized_canvas_in_config_is_rejected() {
    let path = temp_config("zero", "[canvas]\nwidth = 0\n");
    let mut config = EngineConfig::with_path(&path);
    config.load_from_file().unwrap();
    assert!(matches!(
        Engine::from_config(&config),
        Err(EngineError::InvalidCanvas { width: 0, .. })
    ));
    std::fs::remove_file(path).ok();
}
