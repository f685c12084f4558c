//! REST implementation of [`ForumSource`].
//!
//! `RestForumClient` wraps a `reqwest::Client` and translates each trait
//! method into one GET against the forum API. Every call is attempted once;
//! the configured timeout bounds it.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use fc_domain::config::ForumConfig;
use fc_domain::error::{Error, Result};
use fc_domain::trace::TraceEvent;

use crate::provider::ForumSource;
use crate::types::{ForumMessage, ForumSubthread};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client for the forum service.
///
/// Created once at startup and shared; the underlying `reqwest::Client`
/// keeps a connection pool.
#[derive(Debug, Clone)]
pub struct RestForumClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestForumClient {
    /// Build a client from the `[forum]` config section.
    pub fn new(cfg: &ForumConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_owned(),
            api_key: cfg.api_key.clone(),
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        let mut rb = rb
            .header("X-Client-Type", "forumchat")
            .header("X-Trace-Id", Uuid::new_v4().to_string());
        if let Some(ref key) = self.api_key {
            rb = rb.header("X-Api-Key", key);
        }
        rb
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode a JSON array. A `null` body reads as empty.
    async fn get_list<T: DeserializeOwned>(&self, endpoint: &str, path: &str) -> Result<Vec<T>> {
        let start = Instant::now();
        let result = self.decorate(self.http.get(self.url(path))).send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::ForumCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::ForumCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Auth(format!(
                "{endpoint} auth failed ({}): {body}",
                status.as_u16()
            )));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http(format!(
                "{endpoint} returned {}: {body}",
                status.as_u16()
            )));
        }

        let body = resp.text().await.map_err(from_reqwest)?;
        let parsed: Option<Vec<T>> = serde_json::from_str(&body)?;
        Ok(parsed.unwrap_or_default())
    }
}

fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl ForumSource for RestForumClient {
    async fn subthread_messages(&self, subthread_id: &str) -> Result<Vec<ForumMessage>> {
        self.get_list(
            "GET /subthreads/{id}/messages",
            &format!("/subthreads/{subthread_id}/messages"),
        )
        .await
    }

    async fn thread_subthreads(&self, thread_id: &str) -> Result<Vec<ForumSubthread>> {
        self.get_list(
            "GET /threads/{id}/subthreads",
            &format!("/threads/{thread_id}/subthreads?includeMessages=false"),
        )
        .await
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
