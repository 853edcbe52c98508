//! Shared helpers: a local stand-in for the answer-provider service.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// How the fake service answers `POST /send`.
#[derive(Clone)]
pub enum Behavior {
    /// `{"text": <answer>}` plus an extra member the relay must ignore.
    Answer(&'static str),
    /// Empty body with the given status.
    Status(u16),
    /// 200 with a body that is not a provider answer.
    Garbage,
    /// Sleeps before answering.
    Slow(Duration),
}

#[derive(Clone)]
struct FakeState {
    behavior: Behavior,
    received: Arc<Mutex<Vec<Value>>>,
}

pub struct FakeProvider {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl FakeProvider {
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn send(State(state): State<FakeState>, Json(body): Json<Value>) -> Response {
    state.received.lock().unwrap().push(body);
    match state.behavior {
        Behavior::Answer(text) => Json(json!({ "text": text, "model": "fake" })).into_response(),
        Behavior::Status(code) => StatusCode::from_u16(code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            .into_response(),
        Behavior::Garbage => (StatusCode::OK, "<html>not json</html>").into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!({ "text": "too late" })).into_response()
        }
    }
}

async fn list() -> Json<Value> {
    Json(json!({
        "providers": [
            { "name": "tutor", "default_system_prompt": "You are a tutor." },
            { "name": "grader", "default_system_prompt": "You grade answers." }
        ]
    }))
}

pub async fn spawn_fake_provider(behavior: Behavior) -> FakeProvider {
    let received = Arc::new(Mutex::new(Vec::new()));
    let state = FakeState {
        behavior,
        received: received.clone(),
    };
    let app = Router::new()
        .route("/send", post(send))
        .route("/list", get(list))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind fake provider");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake provider");
    });

    FakeProvider { addr, received }
}
