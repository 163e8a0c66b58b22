//! StudyLog - a community board for study notes.
//!
//! A terminal client for the StudyLog backends: boards, paginated and
//! infinite post listings, post detail with comments, board management,
//! a mock-directory login and a my-page.

pub mod api;
pub mod app;
pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod error;
pub mod i18n;
pub mod listing;
pub mod logging;
pub mod route;
pub mod session;
pub mod views;

pub use api::{ApiClient, BoardApi, UserClient, UserDirectory};
pub use app::{Application, Console, ScreenResult};
pub use auth::{login, logout, register, LoginError, RegistrationError, RegistrationForm, User};
pub use board::{Board, Comment, Post, PostPage};
pub use config::Config;
pub use error::{Result, StudylogError};
pub use listing::{ListingState, PageButton, PageGroup, PostListView, ViewType};
pub use route::{Location, Route};
pub use session::{SessionStore, SessionUser};
