use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::{AnswerProvider, ProviderDirectory};
use crate::domain::{DomainError, Provider, ProviderAnswer, ProviderRequest};

/// Environment variable read by [`HttpAnswerProvider::configured_address`].
pub const PROVIDER_ADDRESS_ENV: &str = "RELAY_PROVIDER_ADDRESS";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SEND_PATH: &str = "/send";
const LIST_PATH: &str = "/list";

#[derive(Deserialize)]
struct ListResponse {
    providers: Vec<Provider>,
}

/// HTTP client for the answer-provider service.
///
/// The service exposes `POST {base}/send` and `GET {base}/list`. Every
/// request is bounded by the configured timeout; a timeout is reported as
/// [`DomainError::UpstreamUnavailable`] like any other transport failure.
///
/// An empty base address is accepted at construction time (it is the
/// configuration default) and fails each call instead.
pub struct HttpAnswerProvider {
    client: reqwest::Client,
    /// Base address with trailing slashes removed.
    base_url: String,
}

impl HttpAnswerProvider {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            base_url: base.trim().trim_end_matches('/').to_string(),
        }
    }

    /// Address from `RELAY_PROVIDER_ADDRESS`, or empty when unset.
    pub fn configured_address() -> String {
        std::env::var(PROVIDER_ADDRESS_ENV).unwrap_or_default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<String, DomainError> {
        if self.base_url.is_empty() {
            return Err(DomainError::upstream_unavailable(
                "answer provider address is not configured",
            ));
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    fn transport_error(url: &str, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::upstream_unavailable(format!("request to {url} timed out"))
        } else {
            DomainError::upstream_unavailable(format!("request to {url} failed: {e}"))
        }
    }

    /// Checks the status and reads the body, keeping the two failure kinds apart.
    async fn read_body(url: &str, response: reqwest::Response) -> Result<String, DomainError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Answer provider at {url} returned {status}: {body}");
            return Err(DomainError::upstream_unavailable(format!(
                "{url} returned {status}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Self::transport_error(url, e))
    }
}

#[async_trait]
impl AnswerProvider for HttpAnswerProvider {
    async fn send(&self, request: &ProviderRequest) -> Result<ProviderAnswer, DomainError> {
        let url = self.endpoint(SEND_PATH)?;
        debug!(
            "Sending query to provider '{}' ({} history turns)",
            request.answer_provider,
            request.history.len()
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let body = Self::read_body(&url, response).await?;
        serde_json::from_str::<ProviderAnswer>(&body).map_err(|e| {
            DomainError::upstream_malformed(format!("failed to parse {url} response: {e}"))
        })
    }
}

#[async_trait]
impl ProviderDirectory for HttpAnswerProvider {
    async fn list_providers(&self) -> Result<Vec<Provider>, DomainError> {
        let url = self.endpoint(LIST_PATH)?;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_error(&url, e))?;

        let body = Self::read_body(&url, response).await?;
        let list: ListResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::upstream_malformed(format!("failed to parse {url} response: {e}"))
        })?;

        debug!("Provider service lists {} providers", list.providers.len());
        Ok(list.providers)
    }
}
