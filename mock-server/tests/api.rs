use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, AppState, ListBehavior, Post, Scenario};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn list_posts_returns_seed() {
    let resp = app().oneshot(get("/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 100);
    assert_eq!(posts[0].title, "post 1 title");
}

#[tokio::test]
async fn list_posts_raw_body_is_served_verbatim() {
    let state = AppState::new(Scenario {
        list: ListBehavior::Raw("not json".to_string()),
        ..Scenario::default()
    });
    let resp = app_with(state).oneshot(get("/posts")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, "not json");
}

// --- get ---

#[tokio::test]
async fn get_post_found() {
    let resp = app().oneshot(get("/posts/11")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 11);
    assert_eq!(post.user_id, 2);
}

#[tokio::test]
async fn get_post_not_found() {
    let resp = app().oneshot(get("/posts/1000")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_post_bad_id_returns_400() {
    let resp = app().oneshot(get("/posts/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- create ---

#[tokio::test]
async fn create_post_echoes_with_new_id() {
    let resp = app()
        .oneshot(json_request(
            "/posts",
            r#"{"userId":1,"id":1,"title":"New Post","body":"New Post Body"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Post = body_json(resp).await;
    assert_eq!(post.id, 101);
    assert_eq!(post.title, "New Post");
    assert_eq!(post.body, "New Post Body");
}

#[tokio::test]
async fn create_post_empty_body_returns_only_id() {
    let resp = app().oneshot(json_request("/posts", "")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let value: serde_json::Value = body_json(resp).await;
    assert_eq!(value, serde_json::json!({ "id": 101 }));
}

#[tokio::test]
async fn create_post_malformed_json_returns_400() {
    let resp = app().oneshot(json_request("/posts", "[1, 2")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_post_scripted_status() {
    let state = AppState::new(Scenario {
        create_status: StatusCode::INTERNAL_SERVER_ERROR,
        ..Scenario::default()
    });
    let resp = app_with(state)
        .oneshot(json_request("/posts", r#"{"title":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn create_post_records_headers_and_body() {
    let state = AppState::default();
    let request = Request::builder()
        .method("POST")
        .uri("/posts")
        .header(http::header::CONTENT_TYPE, "application/json")
        .header("X-My-Header", "my value")
        .body(r#"{"title":"x"}"#.to_string())
        .unwrap();
    let resp = app_with(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let received = state.received().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].header("x-my-header"), Some("my value"));
    assert_eq!(received[0].header("content-type"), Some("application/json"));
    assert_eq!(received[0].body, r#"{"title":"x"}"#);
}

#[tokio::test]
async fn creates_are_not_persisted() {
    use tower::Service;

    let mut app = app().into_service();

    for _ in 0..2 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("/posts", r#"{"title":"again"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: serde_json::Value = body_json(resp).await;
        assert_eq!(post["id"], 101);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/posts"))
        .await
        .unwrap();
    let posts: Vec<Post> = body_json(resp).await;
    assert_eq!(posts.len(), 100);
}
