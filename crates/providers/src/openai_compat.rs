//! OpenAI-compatible adapter.
//!
//! Works with OpenAI, Azure deployments behind a compatible gateway, Ollama,
//! vLLM, LM Studio, and any other endpoint that follows the chat completions
//! contract.

use std::time::{Duration, Instant};

use crate::traits::{CompletionProvider, CompletionRequest, CompletionResponse};
use crate::util::{from_reqwest, resolve_api_key};
use fc_domain::config::LlmConfig;
use fc_domain::error::{Error, Result};
use fc_domain::trace::TraceEvent;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A completion provider for any OpenAI-compatible API endpoint.
pub struct OpenAiCompatProvider {
    id: String,
    base_url: String,
    api_key: String,
    auth_header: String,
    auth_prefix: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a provider from the `[llm]` config section.
    ///
    /// Fails when no API key can be resolved.
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        let api_key = resolve_api_key(&cfg.auth)?;

        let auth_header = cfg
            .auth
            .header
            .clone()
            .unwrap_or_else(|| "Authorization".into());
        let auth_prefix = cfg.auth.prefix.clone().unwrap_or_else(|| "Bearer ".into());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: cfg.id.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_header,
            auth_prefix,
            client,
        })
    }

    fn authed_post(&self, url: &str) -> reqwest::RequestBuilder {
        let header_value = format!("{}{}", self.auth_prefix, self.api_key);
        self.client
            .post(url)
            .header(&self.auth_header, header_value)
            .header("Content-Type", "application/json")
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(provider = %self.id, url = %url, model = %req.model, "completion request");

        let started = Instant::now();
        let resp = self
            .authed_post(&url)
            .json(req)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_str(&resp_text).map_err(|e| Error::Provider {
                provider: self.id.clone(),
                message: format!("malformed completion response: {e}"),
            })?;

        TraceEvent::LlmRequest {
            provider: self.id.clone(),
            model: parsed.model.clone().unwrap_or_else(|| req.model.clone()),
            messages: req.messages.len(),
            duration_ms: started.elapsed().as_millis() as u64,
            prompt_tokens: parsed.usage.map(|u| u.prompt_tokens),
            completion_tokens: parsed.usage.map(|u| u.completion_tokens),
        }
        .emit();

        Ok(parsed)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
