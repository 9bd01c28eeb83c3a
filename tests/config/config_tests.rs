// Config tests - TOML loading, environment lookup and factory integration

use celeste_docintel_core::config::loader::load_settings_with;
use celeste_docintel_core::{
    ClientOptions, ConfigError, ErrorKind, Settings, create_doc_client,
};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp config");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn literal_key_in_file_is_enough_for_the_factory() {
    let file = write_config(
        r#"
[google]
api_key = "file-key"
model = "gemini-2.5-flash"
timeout_secs = 45
"#,
    );

    let settings = Settings::load(Some(file.path())).expect("settings");
    assert_eq!(settings.google.api_key(), Some("file-key"));
    assert_eq!(settings.google.timeout, Some(Duration::from_secs(45)));

    let client = create_doc_client("google", &settings, ClientOptions::default()).expect("client");
    assert_eq!(client.model(), "gemini-2.5-flash");
}

#[test]
fn key_comes_from_the_named_variable() {
    let file = write_config(
        r#"
[google]
api_key_env = "DOCINTEL_TEST_KEY"
"#,
    );

    let settings = load_settings_with(file.path(), |name| {
        (name == "DOCINTEL_TEST_KEY").then(|| "env-key".to_string())
    })
    .expect("settings");

    assert_eq!(settings.google.api_key(), Some("env-key"));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");

    let err = load_settings_with(&path, no_env).expect_err("must fail");

    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn malformed_toml_is_parse_error() {
    let file = write_config("[google\napi_key = ");

    let err = load_settings_with(file.path(), no_env).expect_err("must fail");

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn unknown_fields_are_rejected() {
    let file = write_config(
        r#"
[google]
api_key = "k"
temperature = 0.2
"#,
    );

    let err = load_settings_with(file.path(), no_env).expect_err("must fail");

    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn invalid_endpoint_is_reported_with_field() {
    let file = write_config(
        r#"
[google]
endpoint = "generativelanguage.googleapis.com"
"#,
    );

    let err = load_settings_with(file.path(), no_env).expect_err("must fail");

    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, "google.endpoint"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn lookup_without_key_leaves_factory_unconfigured() {
    let settings = Settings::from_lookup(no_env).expect("settings");
    assert_eq!(settings.google.api_key(), None);
    assert_eq!(settings.google.api_key_env, "GOOGLE_API_KEY");

    let err = create_doc_client("google", &settings, ClientOptions::default())
        .err()
        .expect("must fail");
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("GOOGLE_API_KEY"));
}

#[test]
fn lookup_reads_endpoint_and_model_overrides() {
    let settings = Settings::from_lookup(|name| match name {
        "GOOGLE_API_KEY" => Some("key".to_string()),
        "GOOGLE_API_ENDPOINT" => Some("http://localhost:8080".to_string()),
        "GOOGLE_MODEL" => Some("gemini-2.0-flash".to_string()),
        _ => None,
    })
    .expect("settings");

    assert_eq!(settings.google.endpoint, "http://localhost:8080");
    let client = create_doc_client("google", &settings, ClientOptions::default()).expect("client");
    assert_eq!(client.model(), "gemini-2.0-flash");
}

#[test]
fn environment_values_are_validated_like_the_file() {
    let err = Settings::from_lookup(|name| match name {
        "GOOGLE_API_KEY" => Some("key".to_string()),
        "GOOGLE_API_ENDPOINT" => Some("ftp://example.com".to_string()),
        _ => None,
    })
    .expect_err("must fail");
    assert!(matches!(err, ConfigError::InvalidValue { .. }));

    let err = Settings::from_lookup(|name| match name {
        "GOOGLE_API_KEY" => Some("key".to_string()),
        "GOOGLE_TIMEOUT_SECS" => Some("0".to_string()),
        _ => None,
    })
    .expect_err("must fail");
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}
