// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the chart commands: `burndown`, `fix-burndown`, `churn`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

mod common;

use common::*;
use serde_json::Value;

/// Pulls the chart config out of the bootstrap script.
fn chart_config(html: &str) -> Value {
    let start = html.find(".getContext(\"2d\"), ").unwrap() + ".getContext(\"2d\"), ".len();
    let end = html.rfind(");</script>").unwrap();
    serde_json::from_str(&html[start..end]).unwrap()
}

fn stdout_of(ws: &Workspace, args: &[&str]) -> String {
    let output = ws.tix().args(args).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn burndown_fragment() {
    let ws = Workspace::new();
    ws.write("burndown.json", BURNDOWN_JSON);

    let html = stdout_of(&ws, &["burndown", "--input", "burndown.json"]);

    assert!(html.starts_with(
        "<div id=\"burndown-chart\"><h1>BURNDOWN</h1><canvas id=\"lineChart\"></canvas><script>"
    ));
    let config = chart_config(&html);
    assert_eq!(config["type"], "line");
    assert_eq!(
        config["data"]["labels"],
        serde_json::json!(["2024-01-01", "2024-01-08", "2024-01-15"])
    );
    assert_eq!(config["data"]["datasets"][0]["label"], "backlog count");
    assert_eq!(config["data"]["datasets"][0]["data"], serde_json::json!([12, 9, 4]));
    assert_eq!(config["data"]["datasets"][0]["fill"], false);
    assert_eq!(config["data"]["datasets"][0]["tension"], 0.1);
}

#[test]
fn burndown_by_category() {
    let ws = Workspace::new();
    ws.write(
        "burndown.json",
        r#"{
            "backlog": {"2023-01-31T00:00:00.000Z": 10.0, "2023-02-28T00:00:00.000Z": 8.0},
            "moved_in": {"2023-01-31T00:00:00.000Z": null, "2023-02-28T00:00:00.000Z": 1.0},
            "opened": {"2023-01-31T00:00:00.000Z": 3.0}
        }"#,
    );

    let html = stdout_of(&ws, &["burndown", "--input", "burndown.json"]);

    assert!(html.starts_with("<div id=\"burndown-chart\"><h1>BURNDOWN</h1>"));
    let config = chart_config(&html);
    let datasets = config["data"]["datasets"].as_array().unwrap();
    let labels: Vec<&str> = datasets.iter().map(|d| d["label"].as_str().unwrap()).collect();
    assert_eq!(labels, vec!["backlog count", "moved_in", "opened"]);
    assert_eq!(datasets[0]["data"], serde_json::json!([10, 8]));
    assert_eq!(datasets[1]["data"], serde_json::json!([0, 1]));
    assert_eq!(datasets[2]["data"], serde_json::json!([3, 0]));
}

#[test]
fn churn_accepts_float_counts() {
    let ws = Workspace::new();
    ws.write("churn.json", r#"{"status": {"2023-01-31T00:00:00.000": 1.0, "2023-02-28T00:00:00.000": null}}"#);

    let html = stdout_of(&ws, &["churn", "--input", "churn.json"]);

    let config = chart_config(&html);
    assert_eq!(config["data"]["datasets"][0]["data"], serde_json::json!([1, 0]));
}

#[test]
fn fix_burndown_iso_labels_are_timed() {
    let ws = Workspace::new();
    ws.write("fix.json", r#"{"2.4": {"2023-01-31T00:00:00.000Z": 5.0}}"#);

    let html = stdout_of(&ws, &["fix-burndown", "--input", "fix.json"]);

    let config = chart_config(&html);
    assert_eq!(config["data"]["datasets"][0]["data"][0]["x"], 1_675_123_200_000_i64);
    assert_eq!(config["data"]["datasets"][0]["data"][0]["y"], 5);
}

#[test]
fn fix_burndown_fills_gaps_with_zero() {
    let ws = Workspace::new();
    ws.write("fix.json", FIX_BURNDOWN_JSON);

    let html = stdout_of(
        &ws,
        &["fix-burndown", "project=AAH&version=2.4&version=2.5", "--input", "fix.json"],
    );

    assert!(html.contains("<h1>AAH BURNDOWN</h1>"));
    let config = chart_config(&html);
    assert_eq!(config["data"]["labels"], serde_json::json!(["2024-01-01", "2024-02-01"]));
    let datasets = config["data"]["datasets"].as_array().unwrap();
    assert_eq!(datasets.len(), 2);
    assert_eq!(datasets[0]["label"], "Version 2.4");
    assert_eq!(datasets[1]["label"], "Version 2.5");
    let ys = |idx: usize| -> Vec<i64> {
        datasets[idx]["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["y"].as_i64().unwrap())
            .collect()
    };
    assert_eq!(ys(0), vec![5, 3]);
    assert_eq!(ys(1), vec![0, 8]);
    assert_eq!(datasets[0]["data"][0]["x"], 1_704_067_200_000_i64);
    assert_eq!(config["options"]["scales"]["x"]["time"]["unit"], "month");
}

#[test]
fn fix_burndown_colors_are_stable() {
    let ws = Workspace::new();
    ws.write("fix.json", FIX_BURNDOWN_JSON);

    let first = stdout_of(&ws, &["fix-burndown", "--input", "fix.json"]);
    let second = stdout_of(&ws, &["fix-burndown", "--input", "fix.json"]);

    assert_eq!(first, second);
}

#[test]
fn churn_fragment_uses_all_dates() {
    let ws = Workspace::new();
    ws.write("churn.json", CHURN_JSON);

    let output = ws
        .tix()
        .args(["churn", "project=AAH&project=AAP&field=status", "--input", "churn.json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let html = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();

    assert!(stderr.contains("url: ?project=AAH&project=AAP&field=status&showclosed=1"));
    assert!(html.starts_with(
        "<div id=\"churn-chart\"><h1>AAH/AAP CHURN</h1><canvas id=\"barChart\"></canvas>"
    ));
    let config = chart_config(&html);
    assert_eq!(config["type"], "bar");
    assert_eq!(config["data"]["labels"], serde_json::json!(["2024-01-01", "2024-01-02"]));
    assert_eq!(config["data"]["datasets"][0]["label"], "closed");
    assert_eq!(config["data"]["datasets"][0]["data"], serde_json::json!([0, 1]));
    assert_eq!(config["data"]["datasets"][1]["label"], "opened");
    assert_eq!(config["data"]["datasets"][1]["data"], serde_json::json!([2, 0]));
}

#[test]
fn chart_output_file() {
    let ws = Workspace::new();
    ws.write("burndown.json", BURNDOWN_JSON);

    ws.tix()
        .args(["burndown", "--input", "burndown.json", "--output", "chart.html"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(ws.read("chart.html").starts_with("<div id=\"burndown-chart\">"));
}

#[test]
fn chart_malformed_response_is_error_state() {
    let ws = Workspace::new();
    ws.write("burndown.json", r#"{"2024-01-01": "many"}"#);

    ws.tix()
        .args(["burndown", "--input", "burndown.json"])
        .assert()
        .failure()
        .stdout(predicate::str::starts_with(
            "<div id=\"burndown-chart\" class=\"error\">failed to load: ",
        ))
        .stderr(predicate::str::contains("error: json error"));
}
