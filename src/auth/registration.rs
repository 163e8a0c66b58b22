//! User registration for StudyLog.

use thiserror::Error;
use tracing::{error, info};

use crate::api::UserDirectory;
use crate::auth::{NewUser, User, DEFAULT_ROLE};
use crate::StudylogError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// A required field is empty.
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Email already registered.
    #[error("email already exists")]
    EmailTaken,

    /// Directory request failed.
    #[error("registration failed: {0}")]
    Request(#[from] StudylogError),
}

impl RegistrationError {
    /// i18n key of the message shown to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            RegistrationError::EmptyField(_) => "auth.field_required",
            RegistrationError::PasswordMismatch => "auth.password_confirm_mismatch",
            RegistrationError::EmailTaken => "auth.email_taken",
            RegistrationError::Request(_) => "auth.register_failed",
        }
    }

    /// Whether the error is shown inline under the form rather than as an alert.
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            RegistrationError::EmptyField(_) | RegistrationError::PasswordMismatch
        )
    }
}

/// Registration form contents.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password confirmation (never sent).
    pub confirm_password: String,
    /// Display name.
    pub name: String,
    /// Role, "user" unless set otherwise.
    pub role: String,
}

impl RegistrationForm {
    /// Create a form with the default role.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            name: name.into(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    /// Client-side checks; no network access.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        for (name, value) in [
            ("email", &self.email),
            ("password", &self.password),
            ("confirm_password", &self.confirm_password),
            ("name", &self.name),
        ] {
            if value.trim().is_empty() {
                return Err(RegistrationError::EmptyField(name));
            }
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(())
    }

    fn into_new_user(self) -> NewUser {
        NewUser {
            email: self.email,
            password: self.password,
            name: self.name,
            role: self.role,
        }
    }
}

/// Register a new user.
///
/// Validates the form, refuses an email that is already present, then creates
/// the user. The caller navigates to the login page on success.
pub async fn register<D: UserDirectory + ?Sized>(
    directory: &D,
    form: RegistrationForm,
) -> Result<User, RegistrationError> {
    form.validate()?;

    let existing = directory.find_by_email(&form.email).await.map_err(|e| {
        error!("Registration lookup failed: {}", e);
        RegistrationError::Request(e)
    })?;
    if !existing.is_empty() {
        return Err(RegistrationError::EmailTaken);
    }

    let user = directory
        .create_user(&form.into_new_user())
        .await
        .map_err(|e| {
            error!("Registration failed: {}", e);
            RegistrationError::Request(e)
        })?;

    info!("Registered user {}", user.email);
    Ok(user)
}
