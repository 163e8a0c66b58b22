//! In-memory backends for unit tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BoardApi, UserDirectory};
use crate::auth::{NewUser, User};
use crate::board::{Board, Comment, NewComment, NewPost, Post, PostPage, PostUpdate};
use crate::{Result, StudylogError};

/// Build a post with predictable fields.
pub(crate) fn post(id: i64, board_id: i64, author: &str) -> Post {
    Post {
        id,
        title: format!("post {id}"),
        content: format!("content of post {id}"),
        author_name: author.to_string(),
        author_id: Some(1),
        board_id: Some(board_id),
        created_at: "2025-03-01T09:30:00".to_string(),
        updated_at: None,
        view_count: 0,
    }
}

#[derive(Default)]
pub(crate) struct FakeBoardApi {
    pub boards: Mutex<Vec<Board>>,
    pub posts: Mutex<Vec<Post>>,
    pub comments: Mutex<Vec<Comment>>,
    pub calls: Mutex<Vec<String>>,
    pub failing: AtomicBool,
}

impl FakeBoardApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with `count` posts spread over boards 1 and 2.
    pub fn with_posts(count: i64) -> Self {
        let api = Self::new();
        *api.posts.lock().unwrap() = (1..=count)
            .map(|id| post(id, if id % 2 == 0 { 2 } else { 1 }, "kim"))
            .collect();
        *api.boards.lock().unwrap() = vec![Board::new(1, "rust"), Board::new(2, "java")];
        api
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StudylogError::Http("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BoardApi for FakeBoardApi {
    async fn list_boards(&self) -> Result<Vec<Board>> {
        self.record("GET /api/boards".to_string())?;
        Ok(self.boards.lock().unwrap().clone())
    }

    async fn create_board(&self, category: &str) -> Result<Board> {
        self.record(format!("POST /api/boards {category}"))?;
        let mut boards = self.boards.lock().unwrap();
        let id = boards.iter().filter_map(|b| b.id).max().unwrap_or(0) + 1;
        let board = Board::new(id, category);
        boards.push(board.clone());
        Ok(board)
    }

    async fn update_board(&self, id: i64, category: &str) -> Result<Board> {
        self.record(format!("PUT /api/boards/{id} {category}"))?;
        let mut boards = self.boards.lock().unwrap();
        let board = boards
            .iter_mut()
            .find(|b| b.id == Some(id))
            .ok_or_else(|| StudylogError::NotFound("board".to_string()))?;
        board.category = category.to_string();
        Ok(board.clone())
    }

    async fn delete_board(&self, id: i64) -> Result<()> {
        self.record(format!("DELETE /api/boards/{id}"))?;
        self.boards.lock().unwrap().retain(|b| b.id != Some(id));
        Ok(())
    }

    async fn list_posts(&self, board_id: Option<i64>, page: u32, size: u32) -> Result<PostPage> {
        self.record(format!("GET posts board={board_id:?} page={page} size={size}"))?;
        let posts: Vec<Post> = self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| board_id.is_none() || p.board_id == board_id)
            .cloned()
            .collect();
        let size = size.max(1) as usize;
        let total_pages = posts.len().div_ceil(size) as u32;
        let content = posts
            .into_iter()
            .skip(page as usize * size)
            .take(size)
            .collect();
        Ok(PostPage::new(content, page, total_pages))
    }

    async fn view_post(&self, id: i64) -> Result<Post> {
        self.record(format!("GET /api/boards/posts/{id}/view"))?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StudylogError::NotFound("post".to_string()))?;
        post.view_count += 1;
        Ok(post.clone())
    }

    async fn get_post(&self, id: i64) -> Result<Post> {
        self.record(format!("GET /api/boards/posts/{id}"))?;
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StudylogError::NotFound("post".to_string()))
    }

    async fn create_post(&self, board_id: i64, new_post: &NewPost) -> Result<Post> {
        self.record(format!("POST /api/boards/posts/create/{board_id}"))?;
        let mut posts = self.posts.lock().unwrap();
        let id = posts.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let mut created = post(id, board_id, &new_post.nickname);
        created.title = new_post.title.clone();
        created.content = new_post.content.clone();
        created.author_id = Some(new_post.author_id);
        posts.push(created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: i64, update: &PostUpdate) -> Result<Post> {
        self.record(format!("PUT /api/boards/posts/{id}"))?;
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StudylogError::NotFound("post".to_string()))?;
        post.title = update.title.clone();
        post.content = update.content.clone();
        Ok(post.clone())
    }

    async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        self.record(format!("GET /api/boards/comments?postId={post_id}"))?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.post_id == Some(post_id))
            .cloned()
            .collect())
    }

    async fn create_comment(&self, post_id: i64, comment: &NewComment) -> Result<Comment> {
        self.record(format!("POST /api/boards/comments/{post_id}"))?;
        let created = Comment {
            id: None,
            post_id: Some(post_id),
            author_id: Some(comment.author_id),
            author: None,
            content: comment.content.clone(),
            created_at: "2025-03-01T10:00:00".to_string(),
        };
        self.comments.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_all_posts(&self) -> Result<Vec<Post>> {
        self.record("GET /posts".to_string())?;
        Ok(self.posts.lock().unwrap().clone())
    }

    async fn list_all_comments(&self) -> Result<Vec<Comment>> {
        self.record("GET /comments".to_string())?;
        Ok(self.comments.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub(crate) struct FakeUserDirectory {
    pub users: Mutex<Vec<User>>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeUserDirectory {
    pub fn with_user(id: &str, name: &str, email: &str, password: &str, role: &str) -> Self {
        let directory = Self::default();
        directory.users.lock().unwrap().push(User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            password: Some(password.to_string()),
        });
        directory
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>> {
        self.calls.lock().unwrap().push(format!("GET /users?email={email}"));
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        self.calls.lock().unwrap().push(format!("GET /users/{id}"));
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| StudylogError::NotFound("user".to_string()))
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.calls.lock().unwrap().push("POST /users".to_string());
        let mut users = self.users.lock().unwrap();
        let created = User {
            id: (users.len() + 1).to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            password: Some(user.password.clone()),
        };
        users.push(created.clone());
        Ok(created)
    }
}
