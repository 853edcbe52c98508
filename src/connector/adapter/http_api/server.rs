use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::application::LegacyRelayRequest;
use crate::connector::api::Container;
use crate::domain::{DomainError, RelayRequest};

use super::dto::{
    LegacySendMessageBody, LegacySendMessageInput, LegacySendMessageOutput, ProvidersOutput,
    SendMessageBody, SendMessageInput, SendMessageOutput,
};
use super::error::ApiError;

/// Header carrying the acting user's id, set by the host application.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Environment fallback for the bearer token.
pub const API_TOKEN_ENV: &str = "RELAY_API_TOKEN";

/// HTTP front of the relay.
///
/// Routes:
/// - `POST /send_message` relays through a content field and records the interaction
/// - `POST /send_message_legacy` relays to a provider chosen by hash, unrecorded
/// - `GET /providers` lists the provider service's providers
/// - `GET /health` liveness, never authenticated
#[derive(Clone)]
pub struct RelayHttpServer {
    container: Arc<Container>,
    api_token: Option<Arc<str>>,
}

impl RelayHttpServer {
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            container,
            api_token: None,
        }
    }

    /// Requires `Authorization: Bearer <token>` on every route but `/health`.
    /// An empty token disables the check.
    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Arc::from);
        self
    }

    pub fn router(self) -> Router {
        Router::new()
            .route("/send_message", post(send_message))
            .route("/send_message_legacy", post(send_message_legacy))
            .route("/providers", get(list_providers))
            .route("/health", get(health))
            .with_state(self)
    }

    /// Serves until Ctrl-C.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        if let Ok(addr) = listener.local_addr() {
            info!(
                "Relay listening on http://{} (auth {})",
                addr,
                if self.api_token.is_some() { "on" } else { "off" }
            );
        }
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutting down");
            })
            .await
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), DomainError> {
        let Some(expected) = self.api_token.as_deref() else {
            return Ok(());
        };

        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim);

        match presented {
            Some(token) if tokens_match(token, expected) => Ok(()),
            Some(_) => Err(DomainError::unauthorized("invalid bearer token")),
            None => Err(DomainError::unauthorized("missing bearer token")),
        }
    }
}

/// Compares fixed-size digests of both tokens so the comparison time does
/// not depend on where they first differ.
fn tokens_match(presented: &str, expected: &str) -> bool {
    use sha2::{Digest, Sha256};
    let a = Sha256::digest(presented.as_bytes());
    let b = Sha256::digest(expected.as_bytes());
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn acting_user(headers: &HeaderMap) -> Result<i64, DomainError> {
    let raw = headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| DomainError::invalid_input(format!("{USER_ID_HEADER} header is required")))?;

    raw.to_str()
        .ok()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .ok_or_else(|| DomainError::invalid_input(format!("{USER_ID_HEADER} must be an integer")))
}

fn decode_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, DomainError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| DomainError::invalid_input(rejection.body_text()))
}

async fn send_message(
    State(server): State<RelayHttpServer>,
    headers: HeaderMap,
    payload: Result<Json<SendMessageInput>, JsonRejection>,
) -> Result<Json<SendMessageOutput>, ApiError> {
    server.authorize(&headers)?;
    let user_id = acting_user(&headers)?;
    let input = decode_body(payload)?;
    debug!(
        "send_message field={:?} parent={:?} user={}",
        input.field_id, input.parent_rid, user_id
    );

    let request =
        RelayRequest::new(input.query, input.field_id, user_id)?.with_parent(input.parent_rid);
    let outcome = server.container.relay_use_case().execute(request).await?;

    Ok(Json(SendMessageOutput {
        output: SendMessageBody {
            answer: outcome.answer,
            contexts: outcome.contexts,
            interaction_id: outcome.interaction_id,
        },
    }))
}

async fn send_message_legacy(
    State(server): State<RelayHttpServer>,
    headers: HeaderMap,
    payload: Result<Json<LegacySendMessageInput>, JsonRejection>,
) -> Result<Json<LegacySendMessageOutput>, ApiError> {
    server.authorize(&headers)?;
    let input = decode_body(payload)?;

    let outcome = server
        .container
        .legacy_relay_use_case()
        .execute(LegacyRelayRequest {
            query: input.query,
            provider_hash: input.provider_hash,
            history: input.history,
            field_id: input.field_id,
        })
        .await?;

    Ok(Json(LegacySendMessageOutput {
        output: LegacySendMessageBody {
            answer: outcome.answer,
            contexts: outcome.contexts,
        },
    }))
}

async fn list_providers(
    State(server): State<RelayHttpServer>,
    headers: HeaderMap,
) -> Result<Json<ProvidersOutput>, ApiError> {
    server.authorize(&headers)?;
    let providers = server.container.list_providers_use_case().execute().await?;
    Ok(Json(ProvidersOutput { providers }))
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}
