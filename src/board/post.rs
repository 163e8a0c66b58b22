//! Post and comment models for StudyLog.

use serde::{Deserialize, Serialize};

/// Post as served by the application backend.
///
/// The paged endpoints return `nickname`; the unfiltered `/posts` listing
/// used by my-page returns `author`. Both map to `author_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    #[serde(default)]
    pub title: String,
    /// Post body.
    #[serde(default)]
    pub content: String,
    /// Author display name.
    #[serde(rename = "nickname", alias = "author", default)]
    pub author_name: String,
    /// Author user ID.
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Board the post belongs to.
    #[serde(default)]
    pub board_id: Option<i64>,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// View count.
    #[serde(default)]
    pub view_count: i64,
}

/// One page of posts (`Page<PostResponseDto>` envelope).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    /// Posts on this page.
    #[serde(default)]
    pub content: Vec<Post>,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
}

impl PostPage {
    /// Create a page envelope.
    pub fn new(content: Vec<Post>, number: u32, total_pages: u32) -> Self {
        Self {
            content,
            number,
            total_pages,
        }
    }

    /// Check if this is the last available page.
    pub fn is_last(&self) -> bool {
        self.number + 1 >= self.total_pages
    }
}

/// Data for creating a new post in a board.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Author user ID.
    pub author_id: i64,
    /// Author display name.
    pub nickname: String,
}

impl NewPost {
    /// Create a new post with required fields.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: i64,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author_id,
            nickname: nickname.into(),
        }
    }
}

/// Data for updating an existing post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostUpdate {
    /// New title.
    pub title: String,
    /// New body.
    pub content: String,
}

/// Comment as served by the application backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment ID (absent from the backend's response DTO).
    #[serde(rename = "cId", alias = "id", default)]
    pub id: Option<i64>,
    /// Parent post ID.
    #[serde(default)]
    pub post_id: Option<i64>,
    /// Author user ID.
    #[serde(default)]
    pub author_id: Option<i64>,
    /// Author display name (only present in the unfiltered `/comments` listing).
    #[serde(default)]
    pub author: Option<String>,
    /// Comment body.
    #[serde(default)]
    pub content: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
}

/// Request body for submitting a comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Author user ID.
    pub author_id: i64,
    /// Comment body.
    pub content: String,
}
