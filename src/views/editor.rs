//! Post create and edit forms.

use tracing::{error, info};

use crate::api::BoardApi;
use crate::board::{NewPost, Post, PostUpdate};
use crate::route::Location;
use crate::session::SessionStore;
use crate::{Result, StudylogError};

fn require_fields(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(StudylogError::Validation("title is empty".to_string()));
    }
    if content.trim().is_empty() {
        return Err(StudylogError::Validation("content is empty".to_string()));
    }
    Ok(())
}

/// Create a post in `board_id` as the logged-in user.
///
/// Returns the location of the new post.
pub async fn create<A: BoardApi + ?Sized>(
    api: &A,
    board_id: i64,
    title: &str,
    content: &str,
    session: &SessionStore,
) -> Result<Location> {
    let user = session.current().ok_or(StudylogError::LoginRequired)?;
    let author_id = user.numeric_id().ok_or(StudylogError::LoginRequired)?;
    require_fields(title, content)?;

    let new_post = NewPost::new(title.trim(), content, author_id, user.name.clone());
    let created = api.create_post(board_id, &new_post).await.map_err(|e| {
        error!("Failed to create post in board {}: {}", board_id, e);
        e
    })?;

    info!("Post {} created in board {}", created.id, board_id);
    Ok(Location::new(format!("/posts/{}", created.id)))
}

/// Edit form for an existing post. Admin only.
pub struct PostEditor<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    post: Post,
}

impl<'a, A: BoardApi + ?Sized> PostEditor<'a, A> {
    /// Load the post without counting a view.
    pub async fn load_for_edit(api: &'a A, id: i64, session: &SessionStore) -> Result<Self> {
        if !session.is_admin() {
            return Err(StudylogError::LoginRequired);
        }
        let post = api.get_post(id).await?;
        Ok(Self { api, post })
    }

    /// Post as last loaded or saved.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Store new title and content; returns the post's detail location.
    pub async fn save(&mut self, title: &str, content: &str) -> Result<Location> {
        require_fields(title, content)?;

        let update = PostUpdate {
            title: title.trim().to_string(),
            content: content.to_string(),
        };
        let id = self.post.id;
        self.post = self.api.update_post(id, &update).await.map_err(|e| {
            error!("Failed to update post {}: {}", id, e);
            e
        })?;

        Ok(Location::new(format!("/posts/{id}")))
    }
}
