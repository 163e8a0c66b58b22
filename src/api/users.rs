//! HTTP client for the mock user directory.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{build_http_client, check_status, endpoint, UserDirectory};
use crate::auth::{NewUser, User};
use crate::config::ApiConfig;
use crate::Result;

/// [`UserDirectory`] over HTTP.
#[derive(Debug, Clone)]
pub struct UserClient {
    client: Client,
    base_url: String,
}

impl UserClient {
    /// Create a client for the configured user directory.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.user_base_url.clone(),
        })
    }

    /// Create a client for an explicit base URL, sharing an existing HTTP client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl UserDirectory for UserClient {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>> {
        let url = endpoint(&self.base_url, "/users");
        debug!("GET {} email={}", url, email);
        let response = self
            .client
            .get(&url)
            .query(&[("email", email)])
            .send()
            .await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn get_user(&self, id: &str) -> Result<User> {
        let url = endpoint(
            &self.base_url,
            &format!("/users/{}", urlencoding::encode(id)),
        );
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Ok(check_status(response)?.json().await?)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User> {
        let url = endpoint(&self.base_url, "/users");
        debug!("POST {}", url);
        let response = self.client.post(&url).json(user).send().await?;
        Ok(check_status(response)?.json().await?)
    }
}
