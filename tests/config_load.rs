// tests/config_load.rs
// Config tests mutate process env, so they run serialized.

use std::env;
use std::fs;
use std::path::PathBuf;

use serial_test::serial;

use content_insights_agent::config::AgentConfig;

fn write_temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("insights-{name}-{}.json", std::process::id()));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
#[serial]
fn loads_full_config() {
    let path = write_temp_config(
        "full",
        r#"{
            "model": {
                "model": "llama-3.1-70b-versatile",
                "api_url": "https://api.groq.com/openai/v1",
                "api_key": "sk-test",
                "temperature": 0.0,
                "timeout_secs": 60
            },
            "dashboard": {
                "endpoint_url": "https://example.test/cache",
                "timeout_secs": 5
            }
        }"#,
    );

    let cfg = AgentConfig::load_from_file(&path).expect("config should load");
    assert_eq!(cfg.model.model, "llama-3.1-70b-versatile");
    assert_eq!(cfg.model.api_key, "sk-test");
    assert_eq!(cfg.dashboard.endpoint_url, "https://example.test/cache");
    assert_eq!(cfg.dashboard.timeout_secs, 5);

    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn defaults_fill_missing_sections() {
    let path = write_temp_config(
        "defaults",
        r#"{ "model": { "model": "local", "api_url": "http://localhost:11434/v1" } }"#,
    );

    let cfg = AgentConfig::load_from_file(&path).expect("config should load");
    assert_eq!(cfg.model.api_key, "");
    assert_eq!(cfg.model.temperature, 0.0);
    assert_eq!(cfg.model.timeout_secs, 120);
    assert!(cfg.dashboard.endpoint_url.contains("dashboard_cache"));
    assert_eq!(cfg.dashboard.timeout_secs, 10);

    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn env_sentinel_resolves_from_environment() {
    let prev = env::var("OPENAI_API_KEY").ok();
    env::set_var("OPENAI_API_KEY", "sk-from-env");

    let path = write_temp_config(
        "env",
        r#"{ "model": { "model": "gpt-4o-mini", "api_url": "https://api.openai.com/v1", "api_key": "ENV" } }"#,
    );

    let cfg = AgentConfig::load_from_file(&path).expect("config should load");
    assert_eq!(cfg.model.api_key, "sk-from-env");

    match prev {
        Some(v) => env::set_var("OPENAI_API_KEY", v),
        None => env::remove_var("OPENAI_API_KEY"),
    }
    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn env_sentinel_without_env_var_is_an_error() {
    let prev = env::var("OPENAI_API_KEY").ok();
    env::remove_var("OPENAI_API_KEY");

    let path = write_temp_config(
        "env-missing",
        r#"{ "model": { "model": "gpt-4o-mini", "api_url": "https://api.openai.com/v1", "api_key": "ENV" } }"#,
    );

    let err = AgentConfig::load_from_file(&path).expect_err("missing key must fail");
    assert!(err.to_string().contains("OPENAI_API_KEY"));

    if let Some(v) = prev {
        env::set_var("OPENAI_API_KEY", v);
    }
    let _ = fs::remove_file(path);
}

#[test]
#[serial]
fn out_of_range_temperature_is_reset() {
    let path = write_temp_config(
        "temp",
        r#"{ "model": { "model": "local", "api_url": "http://localhost/v1", "temperature": 9.5 } }"#,
    );

    let cfg = AgentConfig::load_from_file(&path).expect("config should load");
    assert_eq!(cfg.model.temperature, 0.0);

    let _ = fs::remove_file(path);
}
