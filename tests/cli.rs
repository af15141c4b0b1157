//
//  confluence-client
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Runs the `cfl` binary end to end.

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `cfl` command isolated from the caller's environment and config file.
fn cfl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cfl").unwrap();
    cmd.env("CFL_CONFIG", home.path().join("config.toml"))
        .env_remove("CONFLUENCE_ACCESS_TOKEN")
        .env_remove("CFL_API_ROOT")
        .env_remove("CFL_GATEWAY_URL")
        .env_remove("CFL_LOG");
    cmd
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cfl version "));
}

#[test]
fn test_ops_list_json() {
    let home = TempDir::new().unwrap();
    let output = cfl(&home)
        .args(["ops", "list", "--tag", "space", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let ops: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = ops
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|op| op["name"].as_str())
        .collect();
    assert!(names.contains(&"get_spaces"));
    assert!(!names.contains(&"get_pages"));
}

#[test]
fn test_ops_show() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["ops", "show", "get_pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/pages"))
        .stdout(predicate::str::contains("body-format"));
}

#[test]
fn test_ops_show_unknown() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["ops", "show", "get_repositories"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown operation 'get_repositories'"));
}

#[test]
fn test_call_without_token_is_auth_error() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["call", "get_spaces"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("CONFLUENCE_ACCESS_TOKEN"));
}

#[test]
fn test_call_missing_path_parameter_is_usage_error() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["--token", "t", "--api-root", "http://127.0.0.1:1/api/v2"])
        .args(["call", "get_page_by_id"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing required parameter 'id'"));
}

#[test]
fn test_resolve_against_gateway() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let discovery = server
        .mock("GET", "/oauth/token/accessible-resources")
        .match_header("authorization", "Bearer secret")
        .with_status(200)
        .with_body(r#"[{"id": "abc123", "name": "acme", "url": "https://acme.atlassian.net", "scopes": []}]"#)
        .create();

    cfl(&home)
        .args(["--gateway-url", &server.url(), "resolve"])
        .env("CONFLUENCE_ACCESS_TOKEN", "secret")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}/ex/confluence/abc123/api/v2\n",
            server.url()
        )));
    discovery.assert();
}

#[test]
fn test_call_not_found_exit_code() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/wiki/api/v2/pages/1")
        .with_status(404)
        .with_body(r#"{"errors": [{"title": "Not Found"}]}"#)
        .create();

    cfl(&home)
        .args(["--token", "t", "--api-root", &format!("{}/wiki/api/v2", server.url())])
        .args(["call", "get_page_by_id", "-a", "id=1"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("HTTP 404"));
}

#[test]
fn test_call_paginate() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/v2/spaces")
        .match_query(Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"results": [{"id": "1"}], "_links": {"next": "/wiki/api/v2/spaces?cursor=next-1"}}"#)
        .create();
    server
        .mock("GET", "/api/v2/spaces")
        .match_query(Matcher::UrlEncoded("cursor".into(), "next-1".into()))
        .with_status(200)
        .with_body(r#"{"results": [{"id": "2"}], "_links": {}}"#)
        .create();

    let output = cfl(&home)
        .args(["--token", "t", "--api-root", &format!("{}/api/v2", server.url())])
        .args(["call", "get_spaces", "--paginate", "--compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let collected: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        collected,
        serde_json::json!({"results": [{"id": "1"}, {"id": "2"}], "pages": 2, "truncated": false})
    );
}

#[test]
fn test_config_set_get_unset() {
    let home = TempDir::new().unwrap();

    cfl(&home)
        .args(["config", "set", "api.api_root", "https://example.test/api/v2"])
        .assert()
        .success();
    cfl(&home)
        .args(["config", "get", "api.api_root"])
        .assert()
        .success()
        .stdout("https://example.test/api/v2\n");

    cfl(&home)
        .args(["config", "unset", "api.api_root"])
        .assert()
        .success();
    cfl(&home)
        .args(["config", "get", "api.api_root"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_config_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    cfl(&home)
        .args(["config", "set", "core.editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Valid keys"));
}
