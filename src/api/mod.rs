//! REST access to the StudyLog backends.
//!
//! Two collaborators sit behind traits so views can be driven against any
//! implementation:
//! - [`BoardApi`]: the application backend (boards, posts, comments)
//! - [`UserDirectory`]: the mock user directory standing in for auth

mod client;
mod users;

#[cfg(test)]
pub(crate) mod fake;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::auth::{NewUser, User};
use crate::board::{Board, Comment, NewComment, NewPost, Post, PostPage, PostUpdate};
use crate::config::ApiConfig;
use crate::{Result, StudylogError};

pub use client::ApiClient;
pub use users::UserClient;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("StudyLog/", env!("CARGO_PKG_VERSION"));

/// Application backend operations.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// `GET /api/boards`
    async fn list_boards(&self) -> Result<Vec<Board>>;

    /// `POST /api/boards`
    async fn create_board(&self, category: &str) -> Result<Board>;

    /// `PUT /api/boards/{id}`
    async fn update_board(&self, id: i64, category: &str) -> Result<Board>;

    /// `DELETE /api/boards/{id}`
    async fn delete_board(&self, id: i64) -> Result<()>;

    /// One page of posts, across all boards or restricted to one board.
    ///
    /// `GET /api/boards/posts/paged` or `GET /api/boards/posts/by-board/{id}`.
    async fn list_posts(&self, board_id: Option<i64>, page: u32, size: u32) -> Result<PostPage>;

    /// `GET /api/boards/posts/{id}/view` (increments the view count)
    async fn view_post(&self, id: i64) -> Result<Post>;

    /// `GET /api/boards/posts/{id}`
    async fn get_post(&self, id: i64) -> Result<Post>;

    /// `POST /api/boards/posts/create/{board_id}`
    async fn create_post(&self, board_id: i64, post: &NewPost) -> Result<Post>;

    /// `PUT /api/boards/posts/{id}`
    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Post>;

    /// `GET /api/boards/comments?postId=`
    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>>;

    /// `POST /api/boards/comments/{post_id}`
    async fn create_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment>;

    /// `GET /posts` (unfiltered)
    async fn list_all_posts(&self) -> Result<Vec<Post>>;

    /// `GET /comments` (unfiltered)
    async fn list_all_comments(&self) -> Result<Vec<Comment>>;
}

/// Mock user directory operations.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `GET /users?email=`
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>>;

    /// `GET /users/{id}`
    async fn get_user(&self, id: &str) -> Result<User>;

    /// `POST /users`
    async fn create_user(&self, user: &NewUser) -> Result<User>;
}

/// Build the shared HTTP client from configuration.
pub(crate) fn build_http_client(config: &ApiConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| StudylogError::Http(format!("failed to create HTTP client: {e}")))
}

/// Join a base URL and an absolute path without losing any base path prefix.
pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// Turn a non-success response into [`StudylogError::Status`].
pub(crate) fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    debug!("{} answered {}", response.url(), status);
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(StudylogError::NotFound(response.url().path().to_string()));
    }
    Err(StudylogError::Status {
        status: status.as_u16(),
        url: response.url().to_string(),
    })
}
