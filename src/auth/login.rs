//! Login and logout.

use thiserror::Error;
use tracing::{error, info};

use crate::api::UserDirectory;
use crate::auth::User;
use crate::session::{SessionStore, SessionUser};
use crate::StudylogError;

/// Login-specific errors.
#[derive(Error, Debug)]
pub enum LoginError {
    /// No user with this email.
    #[error("email not found")]
    EmailNotFound,

    /// The password does not match.
    #[error("password mismatch")]
    PasswordMismatch,

    /// The directory could not be queried or the session could not be written.
    #[error("login failed: {0}")]
    Request(#[from] StudylogError),
}

impl LoginError {
    /// i18n key of the message shown under the form.
    pub fn message_key(&self) -> &'static str {
        match self {
            LoginError::EmailNotFound => "auth.email_not_found",
            LoginError::PasswordMismatch => "auth.password_mismatch",
            LoginError::Request(_) => "auth.login_failed",
        }
    }
}

/// Check credentials against the directory and start a session.
///
/// On success the session record is persisted and the caller navigates home.
pub async fn login<D: UserDirectory + ?Sized>(
    directory: &D,
    session: &mut SessionStore,
    email: &str,
    password: &str,
) -> Result<User, LoginError> {
    let users = directory.find_by_email(email).await.map_err(|e| {
        error!("Login lookup failed: {}", e);
        LoginError::Request(e)
    })?;

    let Some(user) = users.into_iter().next() else {
        return Err(LoginError::EmailNotFound);
    };

    if user.password.as_deref() != Some(password) {
        return Err(LoginError::PasswordMismatch);
    }

    session.set(SessionUser::from(&user))?;
    info!("User {} logged in", user.email);
    Ok(user)
}

/// End the current session.
pub fn logout(session: &mut SessionStore) -> crate::Result<()> {
    session.clear()
}
