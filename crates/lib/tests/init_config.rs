//! Integration test: `init_config_dir` writes a default config that `load_config` reads back.

use inbox::config::load_config;
use inbox::init::init_config_dir;
use std::path::PathBuf;

fn temp_config_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("testinbox-init-test-{}", uuid::Uuid::new_v4()))
        .join("config.json")
}

#[test]
fn init_writes_loadable_defaults() {
    let path = temp_config_path();
    let dir = init_config_dir(&path).expect("init");
    assert_eq!(Some(dir.as_path()), path.parent());
    assert!(path.exists());

    let (config, _) = load_config(Some(path)).expect("load");
    assert_eq!(config.feed.capacity, 25);
    assert_eq!(config.feed.url, "ws://127.0.0.1:8080/ws");
    assert!(config.reconnect.enabled);
}

#[test]
fn init_keeps_existing_config() {
    let path = temp_config_path();
    std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    std::fs::write(&path, r#"{"feed":{"capacity":5}}"#).expect("write");

    init_config_dir(&path).expect("init");

    let (config, _) = load_config(Some(path)).expect("load");
    assert_eq!(config.feed.capacity, 5);
}
