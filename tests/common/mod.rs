//! Test helpers for integration tests.
//!
//! Provides a mock StudyLog backend (application API and user directory on
//! one listener) served by axum on an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use studylog::config::ApiConfig;
use studylog::{ApiClient, UserClient};

/// Backend contents plus a log of received requests.
#[derive(Default)]
pub struct MockState {
    pub boards: Vec<Value>,
    pub posts: Vec<Value>,
    pub comments: Vec<Value>,
    pub users: Vec<Value>,
    pub requests: Vec<String>,
}

type Shared = Arc<Mutex<MockState>>;

/// Running mock backend.
pub struct MockBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl MockBackend {
    /// Start a backend with boards `rust` (1) and `java` (2), `posts` posts
    /// (odd ids in board 1, even ids in board 2) and two users:
    /// `kim@example.com` (user, id 1) and `admin@example.com` (admin, id 2).
    pub async fn start(posts: i64) -> Self {
        let mut state = MockState {
            boards: vec![
                json!({"bId": 1, "category": "rust"}),
                json!({"bId": 2, "category": "java"}),
            ],
            users: vec![
                json!({"id": 1, "name": "kim", "email": "kim@example.com", "password": "pw1234", "role": "user"}),
                json!({"id": "2", "name": "admin", "email": "admin@example.com", "password": "root", "role": "admin"}),
            ],
            ..MockState::default()
        };
        state.posts = (1..=posts)
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("post {id}"),
                    "content": format!("content of post {id}"),
                    "nickname": "kim",
                    "authorId": 1,
                    "boardId": if id % 2 == 0 { 2 } else { 1 },
                    "createdAt": "2025-03-01T09:30:00",
                    "viewCount": 0
                })
            })
            .collect();

        let state = Arc::new(Mutex::new(state));
        let router = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock backend");
        });

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// API configuration pointing both backends at this server.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.url(),
            user_base_url: self.url(),
            ..ApiConfig::default()
        }
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(&self.api_config()).expect("api client")
    }

    pub fn user_client(&self) -> UserClient {
        UserClient::new(&self.api_config()).expect("user client")
    }

    /// Requests received so far, as `METHOD /path?query`.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Number of requests starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.requests().iter().filter(|r| r.starts_with(prefix)).count()
    }

    pub fn boards(&self) -> Vec<Value> {
        self.state.lock().unwrap().boards.clone()
    }

    pub fn comments(&self) -> Vec<Value> {
        self.state.lock().unwrap().comments.clone()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/boards/:id", axum::routing::put(update_board).delete(delete_board))
        .route("/api/boards/posts/paged", get(paged_posts))
        .route("/api/boards/posts/by-board/:id", get(posts_by_board))
        .route("/api/boards/posts/:id/view", get(view_post))
        .route("/api/boards/posts/:id", get(get_post).put(update_post))
        .route("/api/boards/posts/create/:board_id", axum::routing::post(create_post))
        .route("/api/boards/comments", get(list_comments))
        .route("/api/boards/comments/:post_id", axum::routing::post(create_comment))
        .route("/posts", get(all_posts))
        .route("/comments", get(all_comments))
        .route("/users", get(find_users).post(create_user))
        .route("/users/:id", get(get_user))
        .layer(middleware::from_fn_with_state(Arc::clone(&state), log_request))
        .with_state(state)
}

async fn log_request(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let uri = request.uri();
    let line = match uri.query() {
        Some(query) => format!("{} {}?{}", request.method(), uri.path(), query),
        None => format!("{} {}", request.method(), uri.path()),
    };
    state.lock().unwrap().requests.push(line);
    next.run(request).await
}

fn next_id(items: &[Value], key: &str) -> i64 {
    items
        .iter()
        .filter_map(|item| item[key].as_i64())
        .max()
        .unwrap_or(0)
        + 1
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"message": "not found"}))).into_response()
}

async fn list_boards(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().boards.clone()))
}

async fn create_board(State(state): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let board = json!({"bId": next_id(&state.boards, "bId"), "category": body["category"]});
    state.boards.push(board.clone());
    Json(board)
}

async fn update_board(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match state.boards.iter_mut().find(|b| b["bId"] == id) {
        Some(board) => {
            board["category"] = body["category"].clone();
            Json(board.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_board(State(state): State<Shared>, Path(id): Path<i64>) -> StatusCode {
    let mut state = state.lock().unwrap();
    let before = state.boards.len();
    state.boards.retain(|b| b["bId"] != id);
    if state.boards.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

fn page_of(posts: Vec<Value>, query: &HashMap<String, String>) -> Json<Value> {
    let page: usize = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = query
        .get("size")
        .and_then(|s| s.parse().ok())
        .unwrap_or(10)
        .max(1);
    let total_pages = posts.len().div_ceil(size);
    let total_elements = posts.len();
    let content: Vec<Value> = posts.into_iter().skip(page * size).take(size).collect();
    Json(json!({
        "content": content,
        "number": page,
        "size": size,
        "totalPages": total_pages,
        "totalElements": total_elements,
    }))
}

async fn paged_posts(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let posts = state.lock().unwrap().posts.clone();
    page_of(posts, &query)
}

async fn posts_by_board(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let posts: Vec<Value> = state
        .lock()
        .unwrap()
        .posts
        .iter()
        .filter(|p| p["boardId"] == id)
        .cloned()
        .collect();
    page_of(posts, &query)
}

async fn view_post(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    match state.posts.iter_mut().find(|p| p["id"] == id) {
        Some(post) => {
            let views = post["viewCount"].as_i64().unwrap_or(0) + 1;
            post["viewCount"] = json!(views);
            Json(post.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn get_post(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.posts.iter().find(|p| p["id"] == id) {
        Some(post) => Json(post.clone()).into_response(),
        None => not_found(),
    }
}

async fn update_post(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    match state.posts.iter_mut().find(|p| p["id"] == id) {
        Some(post) => {
            post["title"] = body["title"].clone();
            post["content"] = body["content"].clone();
            post["updatedAt"] = json!("2025-03-02T10:00:00");
            Json(post.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn create_post(
    State(state): State<Shared>,
    Path(board_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let post = json!({
        "id": next_id(&state.posts, "id"),
        "title": body["title"],
        "content": body["content"],
        "nickname": body["nickname"],
        "authorId": body["authorId"],
        "boardId": board_id,
        "createdAt": "2025-03-02T09:00:00",
        "viewCount": 0
    });
    state.posts.push(post.clone());
    Json(post)
}

async fn list_comments(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let post_id: i64 = query.get("postId").and_then(|p| p.parse().ok()).unwrap_or(-1);
    let comments: Vec<Value> = state
        .lock()
        .unwrap()
        .comments
        .iter()
        .filter(|c| c["postId"] == post_id)
        .cloned()
        .collect();
    Json(Value::Array(comments))
}

async fn create_comment(
    State(state): State<Shared>,
    Path(post_id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    let author = state
        .users
        .iter()
        .find(|u| u["id"].to_string().trim_matches('"') == body["authorId"].to_string())
        .map(|u| u["name"].clone())
        .unwrap_or(Value::Null);
    let comment = json!({
        "cId": next_id(&state.comments, "cId"),
        "postId": post_id,
        "authorId": body["authorId"],
        "author": author,
        "content": body["content"],
        "createdAt": "2025-03-02T11:00:00"
    });
    state.comments.push(comment.clone());
    Json(comment)
}

/// The unfiltered listing names the author `author`, like the json-server data.
async fn all_posts(State(state): State<Shared>) -> Json<Value> {
    let posts: Vec<Value> = state
        .lock()
        .unwrap()
        .posts
        .iter()
        .map(|p| {
            let mut post = p.clone();
            if let Some(map) = post.as_object_mut() {
                if let Some(name) = map.remove("nickname") {
                    map.insert("author".to_string(), name);
                }
            }
            post
        })
        .collect();
    Json(Value::Array(posts))
}

async fn all_comments(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(state.lock().unwrap().comments.clone()))
}

async fn find_users(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let users: Vec<Value> = state
        .lock()
        .unwrap()
        .users
        .iter()
        .filter(|u| query.get("email").map_or(true, |e| u["email"] == e.as_str()))
        .cloned()
        .collect();
    Json(Value::Array(users))
}

async fn get_user(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    let found = state
        .users
        .iter()
        .find(|u| u["id"].to_string().trim_matches('"') == id);
    match found {
        Some(user) => Json(user.clone()).into_response(),
        None => not_found(),
    }
}

async fn create_user(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let mut user = body;
    user["id"] = json!(format!("u{}", state.users.len() + 1));
    state.users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}
