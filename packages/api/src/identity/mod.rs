//! Resolution of the calling user.
//!
//! Authentication itself lives in an external identity service; this module
//! only exchanges a bearer token for the user it belongs to and caches that
//! answer for a short window.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::error::ApiError;

pub mod cache;

#[derive(Clone, Debug, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Outcome of token resolution for a request. Handlers decide whether an
/// anonymous caller is acceptable; the middleware never rejects by itself.
#[derive(Clone, Debug)]
pub enum CurrentUser {
    User(UserInfo),
    Anonymous,
}

impl CurrentUser {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            CurrentUser::User(info) => Some(&info.sub),
            CurrentUser::Anonymous => None,
        }
    }

    pub fn require(&self) -> Result<&UserInfo, ApiError> {
        match self {
            CurrentUser::User(info) => Ok(info),
            CurrentUser::Anonymous => Err(ApiError::UNAUTHORIZED),
        }
    }
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("identity provider returned {0}")]
    Status(StatusCode),
}

pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        IdentityClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Asks the identity service who the token belongs to.
    pub async fn user_info(&self, token: &str) -> Result<UserInfo, IdentityError> {
        let response = self
            .http
            .get(format!("{}/userinfo", self.base_url))
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(IdentityError::Status(status));
        }
        Ok(response.json::<UserInfo>().await?)
    }
}
