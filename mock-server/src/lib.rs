use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

pub const SEEDED_POSTS: i64 = 100;
const POSTS_PER_USER: i64 = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

/// What `GET /posts` answers with.
#[derive(Clone, Debug, Default)]
pub enum ListBehavior {
    #[default]
    Seeded,
    /// Reply 200 with this exact body, valid JSON or not.
    Raw(String),
}

#[derive(Clone, Debug)]
pub struct Scenario {
    pub list: ListBehavior,
    /// Status for `POST /posts`. Anything but 201 skips the echo.
    pub create_status: StatusCode,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            list: ListBehavior::Seeded,
            create_status: StatusCode::CREATED,
        }
    }
}

/// A `POST /posts` request as the server saw it.
#[derive(Clone, Debug)]
pub struct ReceivedPost {
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl ReceivedPost {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

struct Inner {
    posts: Vec<Post>,
    scenario: Scenario,
    received: RwLock<Vec<ReceivedPost>>,
}

#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Scenario::default())
    }
}

impl AppState {
    pub fn new(scenario: Scenario) -> Self {
        Self {
            inner: Arc::new(Inner {
                posts: seed_posts(),
                scenario,
                received: RwLock::new(Vec::new()),
            }),
        }
    }

    pub async fn received(&self) -> Vec<ReceivedPost> {
        self.inner.received.read().await.clone()
    }

    /// Must not be called from inside an async context.
    pub fn received_blocking(&self) -> Vec<ReceivedPost> {
        self.inner.received.blocking_read().clone()
    }

    fn next_id(&self) -> i64 {
        self.inner.posts.len() as i64 + 1
    }
}

/// 100 deterministic posts, 10 per user.
pub fn seed_posts() -> Vec<Post> {
    (1..=SEEDED_POSTS)
        .map(|id| Post {
            user_id: (id - 1) / POSTS_PER_USER + 1,
            id,
            title: format!("post {id} title"),
            body: format!("post {id} body"),
        })
        .collect()
}

pub fn app() -> Router {
    app_with(AppState::default())
}

pub fn app_with(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", get(get_post))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, AppState::default()).await
}

pub async fn run_with(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(state)).await
}

/// Serve `state` on a random local port from a background thread with its own
/// runtime. Returns the bound address.
pub fn spawn_background(state: AppState) -> Result<SocketAddr, std::io::Error> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::spawn(move || {
        let result = rt.block_on(async {
            let listener = TcpListener::from_std(std_listener)?;
            run_with(listener, state).await
        });
        if let Err(err) = result {
            tracing::error!(%err, "mock server stopped");
        }
    });
    Ok(addr)
}

async fn list_posts(State(state): State<AppState>) -> Response {
    match &state.inner.scenario.list {
        ListBehavior::Seeded => Json(state.inner.posts.clone()).into_response(),
        ListBehavior::Raw(body) => {
            ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
    }
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, StatusCode> {
    state
        .inner
        .posts
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Echo the posted object back with a fresh id, like the real service does.
/// Nothing is stored, so every create gets the same id.
async fn create_post(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let received = ReceivedPost {
        headers: headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect(),
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    state.inner.received.write().await.push(received);

    let status = state.inner.scenario.create_status;
    if status != StatusCode::CREATED {
        tracing::debug!(%status, "scripted create failure");
        return (status, "scripted failure").into_response();
    }

    let mut object = if body.is_empty() {
        Map::new()
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(Value::Object(map)) => map,
            _ => return (StatusCode::BAD_REQUEST, "body must be a JSON object").into_response(),
        }
    };
    object.insert("id".to_string(), Value::from(state.next_id()));
    (StatusCode::CREATED, Json(Value::Object(object))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_camel_case() {
        let post = Post {
            user_id: 1,
            id: 2,
            title: "Test".to_string(),
            body: "Body".to_string(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 1);
        assert_eq!(json["id"], 2);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["body"], "Body");
    }

    #[test]
    fn seed_has_ten_posts_per_user() {
        let posts = seed_posts();
        assert_eq!(posts.len(), 100);
        assert_eq!(posts[0].id, 1);
        assert_eq!(posts[0].user_id, 1);
        assert_eq!(posts[9].user_id, 1);
        assert_eq!(posts[10].user_id, 2);
        assert_eq!(posts[99].user_id, 10);
    }

    #[test]
    fn next_id_follows_seed() {
        assert_eq!(AppState::default().next_id(), 101);
    }

    #[test]
    fn received_post_header_lookup_ignores_case() {
        let received = ReceivedPost {
            headers: vec![("x-my-header".to_string(), "my value".to_string())],
            body: String::new(),
        };
        assert_eq!(received.header("X-My-Header"), Some("my value"));
        assert_eq!(received.header("content-type"), None);
    }
}
