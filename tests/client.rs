//
//  confluence-client
//  tests/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end client behavior against a local mock gateway.

use confluence_client::api::confluence::{BodyFormat, GetContentParams};
use confluence_client::api::{ApiError, Args, ConfluenceClient};
use confluence_client::auth::AuthCredential;
use mockito::{Matcher, Server};
use serde_json::json;

const DISCOVERY: &str = "/oauth/token/accessible-resources";

fn client_for(server: &Server) -> ConfluenceClient {
    ConfluenceClient::new(AuthCredential::bearer("test-token"))
        .unwrap()
        .with_gateway(server.url())
}

fn resources(id: &str) -> String {
    json!([
        {"id": id, "name": "acme", "url": "https://acme.atlassian.net", "scopes": ["read:page:confluence"]},
        {"id": "other", "name": "second", "url": "https://second.atlassian.net", "scopes": []}
    ])
    .to_string()
}

#[tokio::test]
async fn test_discovery_runs_once_and_first_resource_wins() {
    let mut server = Server::new_async().await;
    let discovery = server
        .mock("GET", DISCOVERY)
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(resources("abc123"))
        .expect(1)
        .create_async()
        .await;
    let page = server
        .mock("GET", "/ex/confluence/abc123/api/v2/pages/123")
        .match_query(Matcher::UrlEncoded("body-format".into(), "storage".into()))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(r#"{"id": "123", "title": "Runbook"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let args = Args::new().set("id", "123").set("body_format", "storage");
    let first = client.invoke("get_page_by_id", args.clone()).await.unwrap();
    let second = client.invoke("get_page_by_id", args).await.unwrap();

    assert_eq!(first["title"], "Runbook");
    assert_eq!(first, second);
    assert_eq!(
        client.cached_api_root().unwrap().as_str(),
        format!("{}/ex/confluence/abc123/api/v2", server.url())
    );
    discovery.assert_async().await;
    page.assert_async().await;
}

#[tokio::test]
async fn test_typed_get_page() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DISCOVERY)
        .with_status(200)
        .with_body(resources("abc123"))
        .create_async()
        .await;
    server
        .mock("GET", "/ex/confluence/abc123/api/v2/pages/42")
        .match_query(Matcher::UrlEncoded("body-format".into(), "storage".into()))
        .with_status(200)
        .with_body(
            json!({
                "id": "42",
                "status": "current",
                "title": "Architecture",
                "spaceId": "65538",
                "body": {"storage": {"representation": "storage", "value": "<p>hi</p>"}},
                "_links": {"webui": "/spaces/ENG/pages/42"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let params = GetContentParams {
        body_format: Some(BodyFormat::Storage),
        ..Default::default()
    };
    let page = client.get_page("42", &params).await.unwrap();
    assert_eq!(page.id, "42");
    assert_eq!(page.title.as_deref(), Some("Architecture"));
    assert_eq!(page.space_id.as_deref(), Some("65538"));
}

#[tokio::test]
async fn test_body_and_query_are_sent() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DISCOVERY)
        .with_status(200)
        .with_body(resources("abc123"))
        .create_async()
        .await;
    let create = server
        .mock("POST", "/ex/confluence/abc123/api/v2/pages")
        .match_query(Matcher::UrlEncoded("root-level".into(), "true".into()))
        .match_body(Matcher::Json(json!({
            "spaceId": "65538",
            "title": "Notes",
            "body": {"representation": "storage", "value": "<p>x</p>"}
        })))
        .with_status(200)
        .with_body(r#"{"id": "7"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let args = Args::new()
        .set("spaceId", "65538")
        .set("title", "Notes")
        .set("body", json!({"representation": "storage", "value": "<p>x</p>"}))
        .set("root_level", true);
    let created = client.invoke("create_page", args).await.unwrap();

    assert_eq!(created["id"], "7");
    create.assert_async().await;
}

#[tokio::test]
async fn test_empty_resource_list_is_configuration_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DISCOVERY)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.api_root().await.unwrap_err();
    assert!(matches!(err, ApiError::Configuration(ref msg) if msg == "no accessible resources"));
    assert!(client.cached_api_root().is_none());
}

#[tokio::test]
async fn test_resource_without_id_is_configuration_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DISCOVERY)
        .with_status(200)
        .with_body(r#"[{"name": "acme"}]"#)
        .create_async()
        .await;

    let err = client_for(&server).api_root().await.unwrap_err();
    assert!(matches!(err, ApiError::Configuration(ref msg) if msg == "resource id missing"));
}

#[tokio::test]
async fn test_discovery_failure_is_http_error_and_not_cached() {
    let mut server = Server::new_async().await;
    let unauthorized = server
        .mock("GET", DISCOVERY)
        .with_status(401)
        .with_body(r#"{"code": 401, "message": "Unauthorized"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    for _ in 0..2 {
        let err = client
            .invoke("get_spaces", Args::new())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }
    unauthorized.assert_async().await;
}

#[tokio::test]
async fn test_api_error_keeps_status_and_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", DISCOVERY)
        .with_status(200)
        .with_body(resources("abc123"))
        .create_async()
        .await;
    server
        .mock("GET", "/ex/confluence/abc123/api/v2/pages/404")
        .with_status(404)
        .with_body(r#"{"errors": [{"status": 404, "title": "Not Found"}]}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client
        .invoke("get_page_by_id", Args::new().set("id", "404"))
        .await
        .unwrap_err();
    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Not Found"));
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_override_skips_discovery() {
    let mut server = Server::new_async().await;
    let discovery = server
        .mock("GET", DISCOVERY)
        .expect(0)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/fixed/api/v2/pages/9")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server).with_api_root(format!("{}/fixed/api/v2", server.url()));
    let result = client
        .invoke("delete_page", Args::new().set("id", "9"))
        .await
        .unwrap();

    assert!(result.is_null());
    discovery.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_override_after_discovery_redirects_later_calls() {
    let mut server = Server::new_async().await;
    let discovery = server
        .mock("GET", DISCOVERY)
        .with_status(200)
        .with_body(resources("abc123"))
        .expect(1)
        .create_async()
        .await;
    let discovered = server
        .mock("GET", "/ex/confluence/abc123/api/v2/spaces")
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .expect(1)
        .create_async()
        .await;
    let overridden = server
        .mock("GET", "/other/api/v2/spaces")
        .with_status(200)
        .with_body(r#"{"results": [{"id": "7"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    client.invoke("get_spaces", Args::new()).await.unwrap();
    client.set_api_root(format!("{}/other/api/v2", server.url()));
    let second = client.invoke("get_spaces", Args::new()).await.unwrap();

    assert_eq!(second["results"][0]["id"], "7");
    assert_eq!(
        client.cached_api_root().unwrap().as_str(),
        format!("{}/other/api/v2", server.url())
    );
    discovery.assert_async().await;
    discovered.assert_async().await;
    overridden.assert_async().await;
}

#[tokio::test]
async fn test_missing_path_parameter_sends_nothing() {
    let mut server = Server::new_async().await;
    let discovery = server
        .mock("GET", DISCOVERY)
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .invoke("get_page_by_id", Args::new().set("body_format", "storage"))
        .await
        .unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("id"));
    discovery.assert_async().await;
}
