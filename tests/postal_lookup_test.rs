mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{send, setup_app_with_lookup};
use sebo::brasil_api::{BrasilApiClient, PostalLookup};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> BrasilApiClient {
    BrasilApiClient::new(server.uri(), Duration::from_millis(300)).expect("client")
}

#[tokio::test]
async fn test_found_address() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/01310100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "01310100",
            "state": "SP",
            "city": "São Paulo",
            "neighborhood": "Bela Vista",
            "street": "Avenida Paulista",
            "service": "open-cep"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).lookup("01310-100").await;
    assert_eq!(
        outcome,
        PostalLookup::Found {
            cep: "01310100".to_string(),
            estado: "SP".to_string(),
            cidade: "São Paulo".to_string(),
            bairro: Some("Bela Vista".to_string()),
            rua: Some("Avenida Paulista".to_string()),
        }
    );
}

#[tokio::test]
async fn test_unknown_code_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/99999999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Todos os serviços de CEP retornaram erro.",
            "type": "service_error"
        })))
        .mount(&server)
        .await;

    let outcome = client(&server).lookup("99999999").await;
    assert_eq!(
        outcome,
        PostalLookup::InvalidCode {
            cep: "99999999".to_string()
        }
    );
}

#[tokio::test]
async fn test_erro_marker_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "erro": true })))
        .mount(&server)
        .await;

    let outcome = client(&server).lookup("00000000").await;
    assert!(matches!(outcome, PostalLookup::InvalidCode { .. }));
}

#[tokio::test]
async fn test_server_error_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let outcome = client(&server).lookup("40070110").await;
    assert_eq!(
        outcome,
        PostalLookup::Unreachable {
            cep: "40070110".to_string()
        }
    );
}

#[tokio::test]
async fn test_throttled_service_is_unreachable() {
    for code in [408, 429] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(code))
            .mount(&server)
            .await;

        let outcome = client(&server).lookup("01310100").await;
        assert_eq!(
            outcome,
            PostalLookup::Unreachable {
                cep: "01310100".to_string()
            },
            "status {}",
            code
        );
    }
}

#[tokio::test]
async fn test_unexpected_body_is_unreachable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>manutenção</html>"))
        .mount(&server)
        .await;

    let outcome = client(&server).lookup("40070110").await;
    assert!(matches!(outcome, PostalLookup::Unreachable { .. }));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "cep": "40070110", "state": "BA", "city": "Salvador" }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let outcome = client(&server).lookup("40070110").await;
    assert!(matches!(outcome, PostalLookup::Unreachable { .. }));
}

#[tokio::test]
async fn test_malformed_code_skips_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let lookup = client(&server);
    for raw in ["abc", "1234", "123456789"] {
        assert_eq!(
            lookup.lookup(raw).await,
            PostalLookup::InvalidCode {
                cep: raw.to_string()
            }
        );
    }
}

#[tokio::test]
async fn test_lookup_endpoint_always_answers_200() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/40070110"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cep": "40070110",
            "state": "BA",
            "city": "Salvador",
            "neighborhood": "Centro",
            "street": ""
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/11111111"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (app, _db) = setup_app_with_lookup(&server.uri()).await;

    let (status, body) = send(&app, "GET", "/cep/40070-110", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "found",
            "cep": "40070110",
            "estado": "BA",
            "cidade": "Salvador",
            "bairro": "Centro",
            "rua": null
        })
    );

    let (status, body) = send(&app, "GET", "/cep/11111111", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "unreachable", "cep": "11111111" }));

    let (status, body) = send(&app, "GET", "/cep/xyz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "invalid_code");
}
