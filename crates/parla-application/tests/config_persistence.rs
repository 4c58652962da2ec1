mod common;

use std::sync::Arc;

use common::{MockTransport, ok_json};
use parla_application::{ChatClient, ConfigStore, LoadOutcome};
use parla_core::ParlaError;
use parla_core::config::{CONFIG_STORAGE_KEY, ClientConfig, ConfigUpdate};
use parla_infrastructure::FileConfigRepository;
use serde_json::json;
use tempfile::TempDir;

fn repository(dir: &TempDir) -> Arc<FileConfigRepository> {
    Arc::new(FileConfigRepository::in_dir(
        dir.path().to_path_buf(),
        CONFIG_STORAGE_KEY,
    ))
}

#[test]
fn test_save_then_load_in_fresh_store_round_trips() {
    let dir = TempDir::new().unwrap();

    let store = ConfigStore::new(repository(&dir));
    store.update(ConfigUpdate::ChatEndpoint("http://agent:9000/q".to_string()));
    store.update(ConfigUpdate::MemoryEndpoint("http://agent:9000/mem".to_string()));
    store.update(ConfigUpdate::ResponseField(String::new()));
    store.update(ConfigUpdate::Provider("openai".to_string()));
    store.update(ConfigUpdate::Model("gpt-4o-mini".to_string()));
    store.update(ConfigUpdate::MaxSteps(42));
    store.update(ConfigUpdate::Temperature(0.7));
    store.update(ConfigUpdate::UserId("alice".to_string()));
    store.save().unwrap();
    let saved = store.snapshot();

    let fresh = ConfigStore::new(repository(&dir));
    assert_eq!(fresh.load(), LoadOutcome::Restored);
    assert_eq!(fresh.snapshot(), saved);
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("chatbotConfig.json"), "{ not json").unwrap();

    let store = ConfigStore::new(repository(&dir));
    let outcome = store.load();

    assert!(matches!(outcome, LoadOutcome::KeptDefaults(_)));
    assert_eq!(store.snapshot(), ClientConfig::default());
}

#[test]
fn test_legacy_server_url_is_restored_as_chat_endpoint() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("chatbotConfig.json"),
        json!({ "serverUrl": "http://old-host/api/v1/query", "model": "m" }).to_string(),
    )
    .unwrap();

    let store = ConfigStore::new(repository(&dir));
    store.load();

    let config = store.snapshot();
    assert_eq!(config.chat_endpoint, "http://old-host/api/v1/query");
    assert_eq!(config.model, "m");
}

#[tokio::test]
async fn test_client_uses_restored_configuration() {
    let dir = TempDir::new().unwrap();
    let seed = ConfigStore::new(repository(&dir));
    seed.update(ConfigUpdate::ChatEndpoint("http://restored/query".to_string()));
    seed.save().unwrap();

    let transport = MockTransport::with_outcomes(vec![ok_json(json!({ "output": "hi" }))]);
    let client = ChatClient::new(transport.clone(), repository(&dir));

    client.conversation().submit("hello").await;

    assert_eq!(transport.requests()[0].url, "http://restored/query");
}

#[test]
fn test_non_finite_temperature_is_not_saved_over_good_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::new(repository(&dir));
    store.update(ConfigUpdate::UserId("alice".to_string()));
    store.save().unwrap();

    store.update(ConfigUpdate::Temperature(f64::NAN));
    let err = store.save().unwrap_err();
    assert!(matches!(err, ParlaError::Config(_)));

    let fresh = ConfigStore::new(repository(&dir));
    assert_eq!(fresh.load(), LoadOutcome::Restored);
    assert_eq!(fresh.snapshot().user_id, "alice");
    assert_eq!(fresh.snapshot().temperature, 0.1);
}

#[test]
fn test_null_fields_fall_back_per_field() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("chatbotConfig.json"),
        json!({
            "serverUrl": "http://old-host/api/v1/query",
            "maxSteps": null,
            "temperature": null,
            "userId": "alice"
        })
        .to_string(),
    )
    .unwrap();

    let store = ConfigStore::new(repository(&dir));
    assert_eq!(store.load(), LoadOutcome::Restored);

    let config = store.snapshot();
    assert_eq!(config.chat_endpoint, "http://old-host/api/v1/query");
    assert_eq!(config.user_id, "alice");
    assert_eq!(config.max_steps, 15);
    assert_eq!(config.temperature, 0.1);
}
