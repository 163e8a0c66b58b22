//! My-page: profile plus the user's own posts and comments.
//!
//! The backend has no per-author query, so both collections are fetched
//! whole and filtered by the profile's display name.

use tracing::{debug, error};

use crate::api::{BoardApi, UserDirectory};
use crate::auth::User;
use crate::board::{Comment, Post};
use crate::route::Location;
use crate::session::SessionStore;
use crate::{Result, StudylogError};

/// Everything the my-page shows.
#[derive(Debug, Clone)]
pub struct MyPage {
    pub profile: User,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl MyPage {
    /// Fetch the profile of the logged-in user, then their posts and comments.
    pub async fn load<A, D>(api: &A, directory: &D, session: &SessionStore) -> Result<Self>
    where
        A: BoardApi + ?Sized,
        D: UserDirectory + ?Sized,
    {
        let user_id = session
            .current()
            .map(|user| user.id.clone())
            .ok_or(StudylogError::LoginRequired)?;

        let profile = directory.get_user(&user_id).await.map_err(|e| {
            error!("Failed to load profile {}: {}", user_id, e);
            e
        })?;

        let (posts, comments) =
            futures::try_join!(api.list_all_posts(), api.list_all_comments()).map_err(|e| {
                error!("Failed to load activity for {}: {}", profile.name, e);
                e
            })?;

        let posts: Vec<Post> = posts
            .into_iter()
            .filter(|p| p.author_name == profile.name)
            .collect();
        let comments: Vec<Comment> = comments
            .into_iter()
            .filter(|c| c.author.as_deref() == Some(profile.name.as_str()))
            .collect();
        debug!(
            "My-page for {}: {} posts, {} comments",
            profile.name,
            posts.len(),
            comments.len()
        );

        Ok(Self {
            profile,
            posts,
            comments,
        })
    }
}

/// Link target of a post entry.
pub fn post_location(post: &Post) -> Location {
    Location::new(format!("/posts/{}", post.id))
}

/// Link target of a comment entry: the post it belongs to.
pub fn comment_location(comment: &Comment) -> Option<Location> {
    comment
        .post_id
        .map(|id| Location::new(format!("/posts/{id}")))
}
