// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for failure handling: backend errors, bad input, bad config.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Answers a single request and hands back its request line.
fn serve_once(status_line: &'static str, body: &'static str) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let head = read_head(&mut stream);
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        head.lines().next().unwrap_or_default().to_string()
    });
    (format!("http://{addr}"), handle)
}

fn read_head(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A local address with nothing listening on it.
fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn remote_tree_success() {
    let ws = Workspace::new();
    let (server, handle) = serve_once("200 OK", r#"{"AAH-1": {"type": "Epic", "status": "Open", "summary": "Platform"}}"#);

    ws.tix()
        .args(["tree", "project=AAH", "--server", &server])
        .assert()
        .success()
        .stdout(predicate::str::contains("[AAH-1] Platform"));

    assert_eq!(
        handle.join().unwrap(),
        "GET /api/tickets_tree?project=AAH&closed=true HTTP/1.1"
    );
}

#[test]
fn remote_output_file_replaces_loading_state() {
    let ws = Workspace::new();
    let (server, handle) = serve_once("200 OK", r#"{"2024-01-01": 3}"#);

    ws.tix()
        .args(["burndown", "--server", &server, "-o", "burndown.html"])
        .assert()
        .success();
    handle.join().unwrap();

    let html = ws.read("burndown.html");
    assert!(html.starts_with("<div id=\"burndown-chart\"><h1>BURNDOWN</h1>"));
    assert!(!html.contains("spinner"));
}

#[test]
fn server_error_switches_to_error_state() {
    let ws = Workspace::new();
    let (server, handle) = serve_once("500 Internal Server Error", r#"{"error": "boom"}"#);

    ws.tix()
        .args(["tree", "--server", &server])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::starts_with(
            "<div id=\"tree\" class=\"error\">failed to load: ",
        ))
        .stdout(predicate::str::contains("returned HTTP 500"))
        .stderr(predicate::str::contains("error: "));
    handle.join().unwrap();
}

#[test]
fn server_error_written_to_output_file() {
    let ws = Workspace::new();
    let (server, handle) = serve_once("404 Not Found", "{}");

    ws.tix()
        .args(["churn", "--server", &server, "-o", "churn.html"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
    handle.join().unwrap();

    let html = ws.read("churn.html");
    assert!(html.starts_with("<div id=\"churn-chart\" class=\"error\">failed to load: "));
    assert!(html.contains("returned HTTP 404"));
}

#[test]
fn unreachable_server_is_error_state() {
    let ws = Workspace::new();

    ws.tix()
        .args(["subtree", "AAH-1", "--server", &closed_port()])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "<div id=\"tree\" class=\"error\">failed to load: request failed",
        ))
        .stderr(predicate::str::contains("error: request failed"));
}

#[test]
fn non_object_tree_response_is_error_state() {
    let ws = Workspace::new();
    ws.write("tree.json", "[1, 2, 3]");

    ws.tix()
        .args(["tree", "--input", "tree.json"])
        .assert()
        .failure()
        .stdout(
            "<div id=\"tree\" class=\"error\">failed to load: expected a JSON object of issues keyed by issue key</div>\n",
        );
}

#[test]
fn invalid_json_is_error_state() {
    let ws = Workspace::new();
    ws.write("tree.json", "{not json");

    ws.tix()
        .args(["tree", "--input", "tree.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("class=\"error\">failed to load: json error"));
}

#[test]
fn invalid_records_are_quarantined_not_fatal() {
    let ws = Workspace::new();
    ws.write(
        "tree.json",
        r#"{"AAH-1": {"type": "Epic", "status": "Open", "summary": "Kept"}, "AAH-2": "garbage"}"#,
    );

    ws.tix()
        .args(["tree", "--input", "tree.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[AAH-1] Kept"))
        .stdout(predicate::str::contains("AAH-2").not())
        .stderr(predicate::str::contains("quarantined issue record"));
}

#[test]
fn missing_input_file_is_error_state() {
    let ws = Workspace::new();

    ws.tix()
        .args(["burndown", "--input", "nope.json"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "<div id=\"burndown-chart\" class=\"error\">failed to load: io error",
        ));
}

#[test]
fn invalid_server_url_fails_before_rendering() {
    let ws = Workspace::new();

    ws.tix()
        .args(["tree", "--server", "not a url"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: invalid server url 'not a url'"));
}

#[test]
fn broken_config_fails_before_rendering() {
    let ws = Workspace::new();
    ws.write(".tix/config.toml", "timeout_secs = \"soon\"\n");
    ws.write("tree.json", TREE_JSON);

    ws.tix()
        .args(["tree", "--input", "tree.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("error: config error"));
}

#[test]
fn missing_explicit_config_is_error() {
    let ws = Workspace::new();
    ws.write("tree.json", TREE_JSON);

    ws.tix()
        .args(["--config", "absent.toml", "tree", "--input", "tree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: "));
}

#[test]
fn zero_timeout_rejected() {
    let ws = Workspace::new();
    ws.write(".tix/config.toml", "timeout_secs = 0\n");

    ws.tix()
        .args(["query"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));
}
