//! Post detail with comments.

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::api::BoardApi;
use crate::board::{Comment, NewComment, Post};
use crate::route::Location;
use crate::session::SessionStore;
use crate::{Result, StudylogError};

/// Detail view of one post.
pub struct PostDetailView<'a, A: BoardApi + ?Sized> {
    api: &'a A,
    post_id: i64,
    return_page: u32,
    post: Option<Post>,
    comments: Vec<Comment>,
    draft: String,
    is_admin: bool,
    cancel: CancellationToken,
}

impl<'a, A: BoardApi + ?Sized> PostDetailView<'a, A> {
    /// Create a view for `post_id`; `return_page` is the list page to go back to.
    pub fn new(api: &'a A, post_id: i64, return_page: u32) -> Self {
        Self {
            api,
            post_id,
            return_page,
            post: None,
            comments: Vec::new(),
            draft: String::new(),
            is_admin: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Post, once loaded.
    pub fn post(&self) -> Option<&Post> {
        self.post.as_ref()
    }

    /// Comments of the post.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comment draft.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replace the comment draft.
    pub fn set_draft(&mut self, content: impl Into<String>) {
        self.draft = content.into();
    }

    /// Token that discards in-flight responses once cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop committing responses for this view.
    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    /// Fetch the post (counting a view) and its comments.
    ///
    /// Returns whether the results were committed. Failures are logged.
    pub async fn load(&mut self, session: &SessionStore) -> bool {
        self.is_admin = session.is_admin();

        let fetched = async {
            let post = self.api.view_post(self.post_id).await?;
            let comments = self.api.list_comments(self.post_id).await?;
            Ok::<_, StudylogError>((post, comments))
        }
        .await;

        match fetched {
            Ok(_) if self.cancel.is_cancelled() => {
                debug!("Post {} unmounted before load finished", self.post_id);
                false
            }
            Ok((post, comments)) => {
                self.post = Some(post);
                self.comments = comments;
                true
            }
            Err(e) => {
                error!("Failed to load post {}: {}", self.post_id, e);
                false
            }
        }
    }

    /// Submit the draft as a comment, then reload the comment list.
    ///
    /// Empty drafts and missing sessions are rejected before any request.
    /// Returns `Ok(false)` if the request failed; the failure is logged.
    pub async fn submit_comment(&mut self, session: &SessionStore) -> Result<bool> {
        if self.draft.trim().is_empty() {
            return Err(StudylogError::Validation("comment is empty".to_string()));
        }
        let author_id = session
            .current()
            .and_then(|user| user.numeric_id())
            .ok_or(StudylogError::LoginRequired)?;

        let comment = NewComment {
            author_id,
            content: self.draft.clone(),
        };

        let refreshed = async {
            self.api.create_comment(self.post_id, &comment).await?;
            self.api.list_comments(self.post_id).await
        }
        .await;

        match refreshed {
            Ok(comments) => {
                self.draft.clear();
                if !self.cancel.is_cancelled() {
                    self.comments = comments;
                }
                Ok(true)
            }
            Err(e) => {
                error!("Failed to submit comment on post {}: {}", self.post_id, e);
                Ok(false)
            }
        }
    }

    /// Back to the list page the post was opened from.
    pub fn back_location(&self) -> Location {
        Location::new("/board").with_query("page", self.return_page.to_string())
    }

    /// Edit page, offered to admins only.
    pub fn edit_location(&self) -> Option<Location> {
        self.is_admin
            .then(|| Location::new(format!("/post/edit/{}", self.post_id)))
    }
}
