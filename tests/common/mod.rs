// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{Method, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use custom_leaderboards::config::{Config, EditPolicy};
use custom_leaderboards::db::RealtimeDb;
use custom_leaderboards::routes::create_router;
use custom_leaderboards::AppState;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIREBASE_DATABASE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIREBASE_DATABASE_EMULATOR_HOST not set");
            return;
        }
    };
}

// ─── Fake Realtime Database ──────────────────────────────────

/// A request the fake database received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    /// Raw query string, if any
    pub query: Option<String>,
}

#[allow(dead_code)]
impl Recorded {
    /// Whether the query string carries `name=value`.
    pub fn has_param(&self, name: &str, value: &str) -> bool {
        self.query.as_deref().is_some_and(|query| {
            query.split('&').any(|pair| {
                pair.split_once('=').is_some_and(|(k, v)| {
                    k == name && urlencoding::decode(v).is_ok_and(|v| v == value)
                })
            })
        })
    }
}

/// In-process stand-in for the Realtime Database REST API.
///
/// Keeps the JSON tree in memory and implements GET (with
/// `orderBy`/`equalTo`), PUT, PATCH and POST the way the real service does.
#[derive(Clone, Default)]
pub struct FakeRtdb {
    tree: Arc<Mutex<Value>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
    next_push_id: Arc<AtomicU64>,
    failure: Arc<Mutex<Option<StatusCode>>>,
}

#[allow(dead_code)]
impl FakeRtdb {
    /// Start serving on an ephemeral port. Returns the fake and its base URL.
    pub async fn spawn() -> (Self, String) {
        let fake = Self::default();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake database");
        let addr = listener.local_addr().expect("fake database address");

        let app = Router::new().fallback(handle).with_state(fake.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake database server");
        });

        (fake, format!("http://{}", addr))
    }

    /// Value stored at `path` (slash separated), `Null` when absent.
    pub fn get(&self, path: &str) -> Value {
        let tree = self.tree.lock().unwrap();
        get_at(&tree, &split(path)).clone()
    }

    /// Store `value` at `path` directly, bypassing HTTP.
    pub fn seed(&self, path: &str, value: Value) {
        let mut tree = self.tree.lock().unwrap();
        set_at(&mut tree, &split(path), value);
    }

    /// Answer every following request with `status`.
    pub fn fail_with(&self, status: StatusCode) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests that would have changed the tree.
    pub fn writes(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != Method::GET)
            .collect()
    }
}

fn split(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn get_at<'a>(tree: &'a Value, segments: &[String]) -> &'a Value {
    static NULL: Value = Value::Null;
    let mut node = tree;
    for seg in segments {
        node = match node {
            Value::Object(map) => map.get(seg).unwrap_or(&NULL),
            Value::Array(items) => seg
                .parse::<usize>()
                .ok()
                .and_then(|i| items.get(i))
                .unwrap_or(&NULL),
            _ => &NULL,
        };
    }
    node
}

/// Store `value` at `segments`, then drop empty containers the way the
/// real service does: writing `[]` or `{}` deletes the location.
fn set_at(tree: &mut Value, segments: &[String], value: Value) {
    place(tree, segments, value);
    *tree = prune(std::mem::take(tree));
}

fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let kept: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, prune(v)))
                .filter(|(_, v)| !v.is_null())
                .collect();
            if kept.is_empty() {
                Value::Null
            } else {
                Value::Object(kept)
            }
        }
        Value::Array(items) if items.is_empty() => Value::Null,
        Value::Array(items) => Value::Array(items.into_iter().map(prune).collect()),
        other => other,
    }
}

fn place(tree: &mut Value, segments: &[String], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        *tree = value;
        return;
    };

    let mut node = tree;
    for seg in parents {
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        node = node
            .as_object_mut()
            .unwrap()
            .entry(seg.clone())
            .or_insert(Value::Null);
    }

    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let map = node.as_object_mut().unwrap();
    if value.is_null() {
        map.remove(last);
    } else {
        map.insert(last.clone(), value);
    }
}

async fn handle(
    State(fake): State<FakeRtdb>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let raw_path = uri.path();
    fake.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: raw_path.to_string(),
        query: uri.query().map(str::to_string),
    });

    if let Some(status) = *fake.failure.lock().unwrap() {
        return (status, Json(json!({"error": "injected failure"}))).into_response();
    }

    let Some(trimmed) = raw_path.strip_suffix(".json") else {
        return (StatusCode::BAD_REQUEST, "path must end in .json").into_response();
    };
    let segments: Vec<String> = split(trimmed)
        .iter()
        .map(|s| urlencoding::decode(s).unwrap().into_owned())
        .collect();

    let parsed_body = || -> Result<Value, Response> {
        serde_json::from_slice(&body)
            .map_err(|_| (StatusCode::BAD_REQUEST, "invalid JSON").into_response())
    };

    let mut tree = fake.tree.lock().unwrap();
    match method {
        Method::GET => {
            let node = get_at(&tree, &segments).clone();
            match (params.get("orderBy"), params.get("equalTo")) {
                (Some(order_by), Some(equal_to)) => {
                    let child: String = serde_json::from_str(order_by).unwrap();
                    let wanted: Value = serde_json::from_str(equal_to).unwrap();
                    let matches: Map<String, Value> = node
                        .as_object()
                        .map(|children| {
                            children
                                .iter()
                                .filter(|(_, v)| v.get(&child) == Some(&wanted))
                                .map(|(k, v)| (k.clone(), v.clone()))
                                .collect()
                        })
                        .unwrap_or_default();
                    Json(Value::Object(matches)).into_response()
                }
                _ => Json(node).into_response(),
            }
        }
        Method::PUT => match parsed_body() {
            Ok(value) => {
                set_at(&mut tree, &segments, value.clone());
                Json(value).into_response()
            }
            Err(resp) => resp,
        },
        Method::PATCH => match parsed_body() {
            Ok(Value::Object(children)) => {
                for (k, v) in &children {
                    let mut path = segments.clone();
                    path.push(k.clone());
                    set_at(&mut tree, &path, v.clone());
                }
                Json(Value::Object(children)).into_response()
            }
            Ok(_) => (StatusCode::BAD_REQUEST, "PATCH body must be an object").into_response(),
            Err(resp) => resp,
        },
        Method::POST => match parsed_body() {
            Ok(value) => {
                let n = fake.next_push_id.fetch_add(1, Ordering::SeqCst);
                let id = format!("-Nfake{:08}", n);
                let mut path = segments.clone();
                path.push(id.clone());
                set_at(&mut tree, &path, value);
                Json(json!({ "name": id })).into_response()
            }
            Err(resp) => resp,
        },
        _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
    }
}

// ─── App Helpers ─────────────────────────────────────────────

/// App state wired to a running fake database.
#[allow(dead_code)]
pub async fn test_state(edit_policy: EditPolicy) -> (Arc<AppState>, FakeRtdb) {
    let (fake, base_url) = FakeRtdb::spawn().await;
    let config = Config {
        edit_policy,
        ..Config::test_default()
    };
    let state = Arc::new(AppState::new(config, RealtimeDb::with_base_url(base_url)));
    (state, fake)
}

/// Database client sending `auth` with every request to a running fake.
#[allow(dead_code)]
pub async fn authed_db(auth: &str) -> (RealtimeDb, FakeRtdb) {
    let (fake, base_url) = FakeRtdb::spawn().await;
    (RealtimeDb::with_auth(base_url, Some(auth.to_string())), fake)
}

/// Create a test app backed by the fake database.
#[allow(dead_code)]
pub async fn create_test_app(edit_policy: EditPolicy) -> (Router, Arc<AppState>, FakeRtdb) {
    let (state, fake) = test_state(edit_policy).await;
    (create_router(state.clone()), state, fake)
}

/// Create a test app with an offline database.
#[allow(dead_code)]
pub fn create_offline_app() -> Router {
    let state = Arc::new(AppState::new(Config::test_default(), RealtimeDb::new_mock()));
    create_router(state)
}

/// Send a request and decode the JSON response (`Null` for an empty body).
#[allow(dead_code)]
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
