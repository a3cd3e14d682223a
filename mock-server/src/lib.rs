use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Credentials accepted by `POST /login`.
pub const VALID_USER: &str = "a";
pub const VALID_PASSWORD: &str = "secret";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct Login {
    pub u: String,
    pub p: String,
}

#[derive(Clone, Default)]
pub struct AppState {
    users: Arc<RwLock<HashMap<u64, User>>>,
    next_id: Arc<AtomicU64>,
    sessions: Arc<RwLock<HashSet<String>>>,
}

pub fn app() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .route("/users", post(create_user))
        .route("/users/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/echo", any(echo))
        .route("/plain", get(|| async { "pong" }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .with_state(AppState::default())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn login(State(state): State<AppState>, Json(input): Json<Login>) -> Response {
    if input.u != VALID_USER || input.p != VALID_PASSWORD {
        tracing::info!(user = %input.u, "rejected login");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "bad credentials"})),
        )
            .into_response();
    }
    let token = Uuid::new_v4().to_string();
    state.sessions.write().await.insert(token.clone());
    tracing::info!(user = %input.u, "issued session token");
    Json(json!({ "token": token })).into_response()
}

async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let Some(token) = token else {
        return (StatusCode::UNAUTHORIZED, "missing bearer token").into_response();
    };
    if !state.sessions.read().await.contains(token) {
        return (StatusCode::UNAUTHORIZED, "invalid bearer token").into_response();
    }
    Json(json!({ "token": token })).into_response()
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let user = User {
        id: state.next_id.fetch_add(1, Ordering::Relaxed) + 1,
        name: input.name,
    };
    state.users.write().await.insert(user.id, user.clone());
    (StatusCode::CREATED, Json(user))
}

fn user_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"detail": "user not found"}))).into_response()
}

async fn get_user(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let users = state.users.read().await;
    match users.get(&id) {
        Some(user) => Json(user.clone()).into_response(),
        None => user_not_found(),
    }
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateUser>,
) -> Response {
    let mut users = state.users.write().await;
    let Some(user) = users.get_mut(&id) else {
        return user_not_found();
    };
    if let Some(name) = input.name {
        user.name = name;
    }
    Json(user.clone()).into_response()
}

async fn delete_user(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    match state.users.write().await.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => user_not_found(),
    }
}

/// Describe the received request: method, lowercased headers, body text.
async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Value> {
    let headers: Map<String, Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), Value::String(v.to_string())))
        })
        .collect();
    let body = if body.is_empty() {
        Value::Null
    } else {
        Value::String(String::from_utf8_lossy(&body).into_owned())
    };
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}
