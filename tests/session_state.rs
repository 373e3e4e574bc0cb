//! Disk round-trips for the persisted session and the client config.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use taskdeck::api::{Session, SessionStore};
use taskdeck::model::ClientConfig;

fn sample_session() -> Session {
    serde_json::from_value(serde_json::json!({
        "token": "d3adb33f",
        "csrf": "c5rf",
        "user": {
            "id": 7,
            "username": "nkhan",
            "email": "noor@example.com",
            "first_name": "Noor",
            "last_name": "Khan",
            "role": "admin",
        },
    }))
    .unwrap()
}

#[test]
fn session_survives_a_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path());

    store.save(&sample_session()).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded.token, "d3adb33f");
    assert_eq!(loaded.csrf.as_deref(), Some("c5rf"));
    assert_eq!(loaded.user.display_name(), "Noor Khan");
    assert!(loaded.user.is_admin());
}

#[test]
fn save_overwrites_the_previous_session() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path());

    store.save(&sample_session()).unwrap();
    let mut second = sample_session();
    second.token = "fresh".into();
    store.save(&second).unwrap();

    assert_eq!(store.load().unwrap().token, "fresh");
}

#[test]
fn logout_then_load_reads_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path());
    store.save(&sample_session()).unwrap();
    store.clear().unwrap();
    assert!(store.load().is_none());
}

#[test]
fn corrupt_session_file_reads_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::at(dir.path());
    fs::write(dir.path().join("session.json"), "%%%").unwrap();
    assert!(store.load().is_none());
}

#[test]
fn config_file_round_trips_through_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r##"
[server]
url = "https://boards.example.com"
timeout_secs = 30

[ui]
show_key_hints = true

[ui.colors]
highlight = "#AA00FF"
"##,
    )
    .unwrap();

    let config = ClientConfig::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.server.url, "https://boards.example.com");
    assert_eq!(config.server.timeout_secs, 30);
    assert!(config.ui.show_key_hints);
    assert_eq!(config.ui.colors.get("highlight").unwrap(), "#AA00FF");
}

#[test]
fn missing_config_is_all_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.server.url, "http://localhost:8000");
    assert!(!config.ui.show_key_hints);
}
