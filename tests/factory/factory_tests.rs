// Factory tests - provider resolution and configuration validation order

#[path = "../support/mod.rs"]
mod support;

use celeste_docintel_core::{
    ClientOptions, DocClientFactory, ErrorKind, Provider, ProviderSettings, RequestOptions, Settings,
    create_doc_client, supported_providers,
};
use std::sync::Arc;
use support::{ScriptedTransport, full_response, settings_with_key};

#[test]
fn creates_client_for_every_supported_provider() {
    let settings = settings_with_key("test-key");
    for provider in supported_providers() {
        let client = create_doc_client(provider.as_str(), &settings, ClientOptions::default())
            .expect("client for supported provider");
        assert_eq!(client.provider(), provider);
    }
}

#[test]
fn provider_aliases_resolve_to_google() {
    let settings = settings_with_key("test-key");
    for name in ["google", "Google", "gemini", "google-ai"] {
        let client = create_doc_client(name, &settings, ClientOptions::default())
            .expect("alias should resolve");
        assert_eq!(client.provider(), Provider::Google);
    }
}

#[test]
fn unknown_provider_fails_with_unsupported_provider() {
    let settings = settings_with_key("test-key");
    for name in ["openai", "anthropic", "", "goggle"] {
        let err = create_doc_client(name, &settings, ClientOptions::default())
            .err()
            .expect("unknown provider must fail");
        assert_eq!(err.kind(), ErrorKind::UnsupportedProvider, "provider {name:?}");
    }
}

#[test]
fn provider_is_validated_before_configuration() {
    let err = create_doc_client("openai", &Settings::default(), ClientOptions::default())
        .err()
        .expect("must fail");
    assert_eq!(err.kind(), ErrorKind::UnsupportedProvider);
}

#[test]
fn missing_api_key_fails_before_any_transport_call() {
    let spy = Arc::new(ScriptedTransport::new());
    let options = ClientOptions::default().with_transport(spy.clone());

    let err = create_doc_client("google", &Settings::default(), options)
        .err()
        .expect("missing key must fail");

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(spy.calls(), 0);
}

#[test]
fn blank_api_key_counts_as_missing() {
    let spy = Arc::new(ScriptedTransport::new());
    let options = ClientOptions::default().with_transport(spy.clone());

    let err = create_doc_client("google", &settings_with_key("   "), options)
        .err()
        .expect("blank key must fail");

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(spy.calls(), 0);
}

#[test]
fn api_key_is_checked_before_model() {
    let options = ClientOptions::default().with_model("not-a-model");
    let err = create_doc_client("google", &Settings::default(), options)
        .err()
        .expect("must fail");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn unknown_model_is_rejected() {
    let options = ClientOptions::default().with_model("gpt-4.1-mini");
    let err = create_doc_client("google", &settings_with_key("test-key"), options)
        .err()
        .expect("must fail");
    assert_eq!(err.kind(), ErrorKind::UnsupportedModel);
}

#[test]
fn explicit_model_is_forwarded() {
    let options = ClientOptions::default().with_model("gemini-2.5-pro");
    let client = DocClientFactory::create(Provider::Google, &settings_with_key("k"), options)
        .expect("client");
    assert_eq!(client.model(), "gemini-2.5-pro");
}

#[test]
fn settings_model_applies_when_options_name_none() {
    let settings = Settings::default().with_provider(
        Provider::Google,
        ProviderSettings::google()
            .with_api_key("k")
            .with_model("gemini-2.5-flash"),
    );

    let client = create_doc_client("google", &settings, ClientOptions::default()).expect("client");
    assert_eq!(client.model(), "gemini-2.5-flash");

    let client = create_doc_client(
        "google",
        &settings,
        ClientOptions::default().with_model("gemini-2.5-pro"),
    )
    .expect("client");
    assert_eq!(client.model(), "gemini-2.5-pro");
}

#[tokio::test]
async fn clients_with_different_credentials_coexist() {
    let first = Arc::new(ScriptedTransport::new().with_response(full_response("one", 1, 1, 2)));
    let second = Arc::new(ScriptedTransport::new().with_response(full_response("two", 1, 1, 2)));

    let client_a = create_doc_client(
        "google",
        &settings_with_key("key-a"),
        ClientOptions::default().with_transport(first.clone()),
    )
    .expect("client a");
    let client_b = create_doc_client(
        "google",
        &settings_with_key("key-b"),
        ClientOptions::default().with_transport(second.clone()),
    )
    .expect("client b");

    let (a, b) = tokio::join!(
        client_a.generate_content("hi", &[], RequestOptions::default()),
        client_b.generate_content("hi", &[], RequestOptions::default()),
    );
    assert_eq!(a.expect("a").text, "one");
    assert_eq!(b.expect("b").text, "two");

    let key_of = |transport: &ScriptedTransport| {
        transport.requests()[0]
            .headers
            .iter()
            .find(|(name, _)| name == "x-goog-api-key")
            .map(|(_, value)| value.clone())
    };
    assert_eq!(key_of(first.as_ref()).as_deref(), Some("key-a"));
    assert_eq!(key_of(second.as_ref()).as_deref(), Some("key-b"));
}
