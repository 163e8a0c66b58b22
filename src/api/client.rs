//! HTTP client for the application backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::{build_http_client, check_status, endpoint, BoardApi};
use crate::board::{Board, BoardCategory, Comment, NewComment, NewPost, Post, PostPage, PostUpdate};
use crate::config::ApiConfig;
use crate::Result;

/// [`BoardApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured application backend.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    /// Create a client for an explicit base URL, sharing an existing HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn send_json<B, T>(&self, method: reqwest::Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let response = self.client.request(method, &url).json(body).send().await?;
        Ok(check_status(response)?.json().await?)
    }
}

#[async_trait]
impl BoardApi for ApiClient {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        self.get_json("/api/boards", &[]).await
    }

    async fn create_board(&self, category: &str) -> Result<Board> {
        self.send_json(reqwest::Method::POST, "/api/boards", &BoardCategory::new(category))
            .await
    }

    async fn update_board(&self, id: i64, category: &str) -> Result<Board> {
        self.send_json(
            reqwest::Method::PUT,
            &format!("/api/boards/{id}"),
            &BoardCategory::new(category),
        )
        .await
    }

    async fn delete_board(&self, id: i64) -> Result<()> {
        let url = self.url(&format!("/api/boards/{id}"));
        debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_status(response)?;
        Ok(())
    }

    async fn list_posts(&self, board_id: Option<i64>, page: u32, size: u32) -> Result<PostPage> {
        let path = match board_id {
            Some(id) => format!("/api/boards/posts/by-board/{id}"),
            None => "/api/boards/posts/paged".to_string(),
        };
        self.get_json(&path, &[("page", page.to_string()), ("size", size.to_string())])
            .await
    }

    async fn view_post(&self, id: i64) -> Result<Post> {
        self.get_json(&format!("/api/boards/posts/{id}/view"), &[])
            .await
    }

    async fn get_post(&self, id: i64) -> Result<Post> {
        self.get_json(&format!("/api/boards/posts/{id}"), &[]).await
    }

    async fn create_post(&self, board_id: i64, post: &NewPost) -> Result<Post> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/boards/posts/create/{board_id}"),
            post,
        )
        .await
    }

    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Post> {
        self.send_json(reqwest::Method::PUT, &format!("/api/boards/posts/{id}"), update)
            .await
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.get_json("/api/boards/comments", &[("postId", post_id.to_string())])
            .await
    }

    async fn create_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment> {
        self.send_json(
            reqwest::Method::POST,
            &format!("/api/boards/comments/{post_id}"),
            comment,
        )
        .await
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>> {
        self.get_json("/posts", &[]).await
    }

    async fn list_all_comments(&self) -> Result<Vec<Comment>> {
        self.get_json("/comments", &[]).await
    }
}
