// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Prometheus scrape endpoint.
//!
//! [`ServeSink`] keeps the latest snapshot in memory and the HTTP server
//! renders it on every `GET /metrics`.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use fg_core::{exposition, MetricsSnapshot};

use crate::error::Result;
use crate::sink::SnapshotSink;

/// Content type of the Prometheus text format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Most recent snapshot, shared between the pass loop and the server.
pub type SharedSnapshot = Arc<RwLock<Option<MetricsSnapshot>>>;

/// Sink that replaces the served snapshot after each pass.
pub struct ServeSink {
    latest: SharedSnapshot,
}

impl ServeSink {
    pub fn new(latest: SharedSnapshot) -> Self {
        ServeSink { latest }
    }
}

impl SnapshotSink for ServeSink {
    fn name(&self) -> &str {
        "serve"
    }

    fn publish(&mut self, snapshot: &MetricsSnapshot) -> Result<()> {
        let mut slot = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(snapshot.clone());
        Ok(())
    }
}

/// Routes for the scrape endpoint.
pub fn router(latest: SharedSnapshot) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .with_state(latest)
}

async fn metrics(State(latest): State<SharedSnapshot>) -> Response {
    let body = {
        let slot = latest.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(exposition::render)
    };
    match body {
        Some(body) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "no snapshot yet\n").into_response(),
    }
}

/// Serves `/metrics` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, latest: SharedSnapshot, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("serving metrics on http://{addr}/metrics");
    }
    axum::serve(listener, router(latest))
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
#[path = "serve_tests.rs"]
mod tests;
