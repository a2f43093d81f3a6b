// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Downloading rendered labels from a host report endpoint.

use std::time::{Duration, Instant};

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;

use zebra_print_client::label::fetch_label;
use zebra_print_core::error::ZebraPrintError;

const LABEL: &str = "^XA^FO50,50^FDSKU-1042^FS^XZ";

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A report endpoint that only answers clients asking for text.
fn report_app() -> Router {
    Router::new()
        .route(
            "/report/label",
            get(|headers: HeaderMap| async move {
                let accept = headers
                    .get(header::ACCEPT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                if accept.contains("text/plain") {
                    (StatusCode::OK, LABEL)
                } else {
                    (StatusCode::NOT_ACCEPTABLE, "")
                }
            }),
        )
        .route(
            "/report/missing",
            get(|| async { (StatusCode::NOT_FOUND, "no such report") }),
        )
        .route(
            "/report/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "render failed") }),
        )
        .route(
            "/report/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                LABEL
            }),
        )
}

#[tokio::test]
async fn downloads_label_text() {
    let base = spawn(report_app()).await;
    let client = reqwest::Client::new();

    let body = fetch_label(&client, &format!("{base}/report/label"), Duration::from_secs(2))
        .await
        .unwrap();
    assert_eq!(body, LABEL);
}

#[tokio::test]
async fn error_status_is_label_fetch_error() {
    let base = spawn(report_app()).await;
    let client = reqwest::Client::new();

    for path in ["missing", "broken"] {
        let url = format!("{base}/report/{path}");
        let err = fetch_label(&client, &url, Duration::from_secs(2))
            .await
            .unwrap_err();
        match err {
            ZebraPrintError::LabelFetch(detail) => assert!(detail.contains(&url), "{detail}"),
            other => panic!("expected LabelFetch, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn slow_report_times_out() {
    let base = spawn(report_app()).await;
    let client = reqwest::Client::new();

    let started = Instant::now();
    let err = fetch_label(&client, &format!("{base}/report/slow"), Duration::from_millis(200))
        .await
        .unwrap_err();
    assert!(matches!(err, ZebraPrintError::LabelFetch(_)), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}
