//! Integration tests for `HalClient` against a mock HTTP server.

use hal_client::client::{ContentTypePolicy, ResponseParseBehavior};
use hal_client::{ClientConfig, HalClient, HalError, HalRequest};
use http::header::{HeaderValue, ACCEPT};
use http::{Method, StatusCode};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::io::Write;
use url::Url;

const HAL: &str = "application/hal+json";

const ORDER: &str = r#"{
    "_links": { "self": { "href": "/orders/123" } },
    "total": 30.00,
    "status": "shipped"
}"#;

fn config_for(server: &ServerGuard) -> ClientConfig {
    ClientConfig::default().with_base_url(Url::parse(&server.url()).unwrap())
}

fn client_for(server: &ServerGuard) -> HalClient {
    HalClient::with_config(config_for(server)).unwrap()
}

#[tokio::test]
async fn test_get_parses_hal_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/orders/123")
        .match_header("accept", HAL)
        .with_status(200)
        .with_header("content-type", "application/hal+json; charset=utf-8")
        .with_body(ORDER)
        .expect(1)
        .create_async()
        .await;

    let response = client_for(&server).get("/orders/123").await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.is_hal);
    assert_eq!(response.resource.status(), StatusCode::OK);
    assert_eq!(response.resource.state_value("total").unwrap().raw(), "30.00");
    assert_eq!(
        response.resource.link("self").unwrap().href().unwrap().as_str(),
        "/orders/123"
    );
}

#[tokio::test]
async fn test_accept_header_overrides_defaults() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .match_header("accept", HAL)
        .match_header("x-api-key", "k1")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let config = config_for(&server)
        .with_default_header(ACCEPT, HeaderValue::from_static("text/html"))
        .with_default_header(
            http::header::HeaderName::from_static("x-api-key"),
            HeaderValue::from_static("k1"),
        );
    let client = HalClient::with_config(config).unwrap();

    client.get("/").await.unwrap();
    let request = HalRequest::get("/").with_header(ACCEPT, HeaderValue::from_static("text/plain"));
    client.send(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(client.config().default_headers[ACCEPT], "text/html");
}

#[tokio::test]
async fn test_no_content_yields_empty_resource() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/orders/123")
        .with_status(204)
        .create_async()
        .await;

    let response = client_for(&server).delete("/orders/123").await.unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.resource.is_empty());
    assert_eq!(response.resource.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_empty_hal_body_yields_empty_resource() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/empty")
        .with_status(200)
        .with_header("content-type", HAL)
        .create_async()
        .await;

    let response = client_for(&server).get("/empty").await.unwrap();
    assert!(response.resource.is_empty());
}

#[tokio::test]
async fn test_empty_accepted_without_content_type() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/orders")
        .with_status(202)
        .create_async()
        .await;

    let response = client_for(&server)
        .post("/orders", &json!({ "total": 30 }))
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert!(!response.is_hal);
    assert!(response.resource.is_empty());
    assert_eq!(response.resource.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_post_sends_json_and_follows_see_other() {
    let mut server = Server::new_async().await;
    let create = server
        .mock("POST", "/orders")
        .match_header("accept", HAL)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "currency": "USD", "total": 30 })))
        .with_status(303)
        .with_header("location", "/orders/123")
        .expect(1)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/orders/123")
        .match_header("accept", HAL)
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body(ORDER)
        .expect(1)
        .create_async()
        .await;

    let body = json!({ "currency": "USD", "total": 30 });
    let response = client_for(&server).post("/orders", &body).await.unwrap();

    create.assert_async().await;
    fetch.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.resource.state_value("status").unwrap().raw(), "shipped");
}

#[tokio::test]
async fn test_temporary_redirect_followed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/old")
        .with_status(307)
        .with_header("location", "/new")
        .create_async()
        .await;
    let target = server
        .mock("GET", "/new")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body(ORDER)
        .expect(1)
        .create_async()
        .await;

    let response = client_for(&server).get("/old").await.unwrap();

    target.assert_async().await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_redirect_not_followed_when_disabled() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/old")
        .with_status(302)
        .with_header("location", "/new")
        .create_async()
        .await;
    let target = server.mock("GET", "/new").expect(0).create_async().await;

    let config = config_for(&server)
        .with_auto_follow_redirects(false)
        .with_throw_on_error(false);
    let client = HalClient::with_config(config).unwrap();
    let response = client.get("/old").await.unwrap();

    target.assert_async().await;
    assert_eq!(response.status, StatusCode::FOUND);
    assert!(response.resource.is_empty());
}

#[tokio::test]
async fn test_redirect_limit() {
    let mut server = Server::new_async().await;
    let loop_mock = server
        .mock("GET", "/loop")
        .with_status(302)
        .with_header("location", "/loop")
        .expect(3)
        .create_async()
        .await;

    let config = config_for(&server).with_max_redirects(2);
    let client = HalClient::with_config(config).unwrap();
    let err = client.get("/loop").await.unwrap_err();

    loop_mock.assert_async().await;
    assert!(matches!(err, HalError::RedirectLimitExceeded(2)));
}

#[tokio::test]
async fn test_redirect_without_location() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/gone").with_status(303).create_async().await;

    let err = client_for(&server).get("/gone").await.unwrap_err();
    assert!(matches!(err, HalError::MissingLocation(StatusCode::SEE_OTHER)));
}

#[tokio::test]
async fn test_error_carries_parsed_resource() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/orders/999")
        .with_status(404)
        .with_header("content-type", HAL)
        .with_body(r#"{"message": "order 999 not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server).get("/orders/999").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(!err.is_retryable());
    match err {
        HalError::Request {
            status,
            reason,
            resource,
        } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(reason, "Not Found");
            let resource = resource.unwrap();
            assert_eq!(resource.status(), StatusCode::NOT_FOUND);
            assert_eq!(
                resource.state_value("message").unwrap().raw(),
                "order 999 not found"
            );
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_hal_body_has_no_resource() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/broken")
        .with_status(503)
        .with_header("content-type", "text/html")
        .with_body("<h1>Service Unavailable</h1>")
        .create_async()
        .await;

    let err = client_for(&server).get("/broken").await.unwrap_err();

    assert!(err.is_retryable());
    assert!(err.resource().is_none());
    assert!(matches!(
        err,
        HalError::Request { status: StatusCode::SERVICE_UNAVAILABLE, .. }
    ));
}

#[tokio::test]
async fn test_unparseable_error_payload_has_no_resource() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/bad")
        .with_status(500)
        .with_header("content-type", HAL)
        .with_body("{not json")
        .create_async()
        .await;

    let err = client_for(&server).get("/bad").await.unwrap_err();
    assert!(matches!(
        err,
        HalError::Request { status: StatusCode::INTERNAL_SERVER_ERROR, resource: None, .. }
    ));
}

#[tokio::test]
async fn test_unparseable_success_payload_fails() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/bad")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body("[1, 2, 3]")
        .create_async()
        .await;

    let err = client_for(&server).get("/bad").await.unwrap_err();
    assert!(matches!(err, HalError::Format(_)));
}

#[tokio::test]
async fn test_error_returned_when_not_throwing() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/orders/123")
        .with_status(409)
        .with_header("content-type", HAL)
        .with_body(r#"{"message": "conflict"}"#)
        .create_async()
        .await;

    let config = config_for(&server).with_throw_on_error(false);
    let client = HalClient::with_config(config).unwrap();
    let response = client
        .put("/orders/123", &json!({ "status": "cancelled" }))
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.reason(), "Conflict");
    assert_eq!(response.resource.state_value("message").unwrap().raw(), "conflict");
}

#[tokio::test]
async fn test_success_only_skips_error_bodies() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/invalid")
        .with_status(400)
        .with_header("content-type", HAL)
        .with_body(r#"{"message": "bad request"}"#)
        .create_async()
        .await;

    let config = config_for(&server).with_parse_behavior(ResponseParseBehavior::SuccessOnly);
    let client = HalClient::with_config(config).unwrap();
    let err = client.get("/invalid").await.unwrap_err();

    assert!(matches!(
        err,
        HalError::Request { status: StatusCode::BAD_REQUEST, resource: None, .. }
    ));
}

#[tokio::test]
async fn test_strict_rejects_non_hal_success() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plain")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ORDER)
        .create_async()
        .await;

    let err = client_for(&server).get("/plain").await.unwrap_err();
    match err {
        HalError::UnsupportedContentType {
            status,
            content_type,
        } => {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(content_type.as_deref(), Some("application/json"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_lenient_returns_empty_resource() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/plain")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("hello")
        .create_async()
        .await;

    let config = config_for(&server).with_content_type_policy(ContentTypePolicy::Lenient);
    let client = HalClient::with_config(config).unwrap();
    let response = client.get("/plain").await.unwrap();

    assert!(!response.is_hal);
    assert!(response.resource.is_empty());
    assert_eq!(&response.body[..], b"hello");
}

#[tokio::test]
async fn test_response_size_limit() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/big")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body(ORDER)
        .create_async()
        .await;

    let config = config_for(&server).with_max_response_bytes(16);
    let client = HalClient::with_config(config).unwrap();
    let err = client.get("/big").await.unwrap_err();

    assert!(matches!(err, HalError::ResponseTooLarge { limit: 16, .. }));
}

#[tokio::test]
async fn test_response_size_limit_stops_chunked_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/stream")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_chunked_body(|w| {
            w.write_all(b"{\"items\": [")?;
            for _ in 0..256 {
                w.write_all(&[b' '; 1024])?;
            }
            w.write_all(b"]}")
        })
        .create_async()
        .await;

    let config = config_for(&server).with_max_response_bytes(4096);
    let client = HalClient::with_config(config).unwrap();
    let err = client.get("/stream").await.unwrap_err();

    match err {
        HalError::ResponseTooLarge { limit, actual } => {
            assert_eq!(limit, 4096);
            assert!(actual > limit);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_request_header_values_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/tagged")
        .match_request(|request| {
            let tags: Vec<_> = request
                .header("x-tag")
                .into_iter()
                .filter_map(|value| value.to_str().ok())
                .collect();
            tags == ["a", "b"]
        })
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let config = config_for(&server).with_default_header(
        http::header::HeaderName::from_static("x-tag"),
        HeaderValue::from_static("default"),
    );
    let client = HalClient::with_config(config).unwrap();
    let mut request = HalRequest::get("/tagged");
    request.headers.append("x-tag", HeaderValue::from_static("a"));
    request.headers.append("x-tag", HeaderValue::from_static("b"));
    client.send(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_root_and_absolute_uri() {
    let mut server = Server::new_async().await;
    let root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body(r#"{"_links": {"orders": {"href": "/orders"}}}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let fetched = client.get_root().await.unwrap();
    assert!(fetched.link("orders").is_some());

    let absolute = format!("{}/", server.url());
    let response = HalClient::new().unwrap().get(&absolute).await.unwrap();
    assert!(response.resource.link("orders").is_some());

    root.assert_async().await;
}

#[tokio::test]
async fn test_custom_method_via_send() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", "/orders/123")
        .match_header("accept", HAL)
        .match_body("status=shipped")
        .with_status(200)
        .with_header("content-type", HAL)
        .with_body(ORDER)
        .expect(1)
        .create_async()
        .await;

    let request = HalRequest::new(Method::PATCH, "/orders/123").with_body("status=shipped");
    client_for(&server).send(request).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let mut server = Server::new_async().await;
    for id in 0..4 {
        server
            .mock("GET", format!("/orders/{}", id).as_str())
            .match_header("accept", HAL)
            .with_status(200)
            .with_header("content-type", HAL)
            .with_body(format!(r#"{{"id": {}}}"#, id))
            .create_async()
            .await;
    }

    let client = client_for(&server);
    let requests = (0..4).map(|id| {
        let client = client.clone();
        async move { client.get(&format!("/orders/{}", id)).await }
    });
    let responses = futures::future::join_all(requests).await;

    for (id, response) in responses.into_iter().enumerate() {
        let response = response.unwrap();
        assert_eq!(response.resource.state_value("id").unwrap().raw(), id.to_string());
    }
}
