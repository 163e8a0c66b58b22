//! Board module for StudyLog.
//!
//! Wire models for boards, posts and comments as served by the
//! application backend.

mod post;
mod types;

pub use post::{Comment, NewComment, NewPost, Post, PostPage, PostUpdate};
pub use types::{Board, BoardCategory};
