use std::time::Duration;

use lingo::translate::{TranslateError, TranslationClient};
use lingo_api::v1::Language;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

fn client(server: &MockServer) -> TranslationClient {
    TranslationClient::new(format!("{}/get", server.uri()), Duration::from_secs(5)).unwrap()
}

fn translated(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "responseData": { "translatedText": text, "match": 0.98 },
        "responseStatus": 200,
    }))
}

#[tokio::test]
async fn sends_text_and_langpair() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("q", "Buy milk & eggs"))
        .and(query_param("langpair", "en|es"))
        .respond_with(translated("Comprar leche y huevos"))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .translate("Buy milk & eggs", Language::Spanish)
        .await
        .unwrap();

    assert_eq!(text, "Comprar leche y huevos");
}

#[tokio::test]
async fn logical_failure_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responseData": { "translatedText": "INVALID LANGUAGE PAIR SPECIFIED" },
            "responseStatus": 403,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .translate("Hello", Language::German)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::Status(status) if status == 403));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server)
        .translate("Hello", Language::French)
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::Malformed));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    // nothing listens on port 1
    let client = TranslationClient::new("http://127.0.0.1:1/get", Duration::from_secs(5)).unwrap();
    let err = client.translate("Hello", Language::Italian).await.unwrap_err();

    assert!(matches!(err, TranslateError::Request(_)));
}

#[tokio::test]
async fn slow_service_times_out_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(translated("Hallo").set_delay(Duration::from_secs(2)))
        .expect(1)
        .mount(&server)
        .await;

    let client =
        TranslationClient::new(format!("{}/get", server.uri()), Duration::from_millis(200)).unwrap();
    let err = client.translate("Hello", Language::Dutch).await.unwrap_err();

    assert!(matches!(err, TranslateError::Request(_)));
}
