//! Authentication module for StudyLog.
//!
//! Login and registration run against the mock user directory by plain
//! comparison; the resulting "session" is the user record kept by
//! [`SessionStore`](crate::session::SessionStore).

mod login;
mod registration;
mod user;

pub use login::{login, logout, LoginError};
pub use registration::{register, RegistrationError, RegistrationForm};
pub use user::{NewUser, User, ADMIN_ROLE, DEFAULT_ROLE};
