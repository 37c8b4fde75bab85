use std::time::Duration;

use http::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, warn};
use url::Url;

use crate::state::AppState;

/// Author record as served by the authors service.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub biography: Option<String>,
    pub nationality: Option<String>,
}

/// Outcome of an existence lookup. A missing author is a negative result,
/// not an error.
#[derive(Debug)]
pub enum AuthorLookup {
    Found(AuthorSnapshot),
    NotFound,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthorsClientError {
    #[error("Authors service unavailable: {0}")]
    Unavailable(reqwest::Error),

    #[error("Authors service returned status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("Authors service returned invalid body: {0}")]
    InvalidBody(reqwest::Error),
}

/// Client for the authors service existence check. One blocking round trip per
/// lookup - no retry, no cache.
#[derive(Debug, Clone)]
pub struct AuthorsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AuthorsClient {
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Invalid authors service URL: {base_url}");
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(AuthorsClient { http, base_url })
    }

    pub async fn get_author(&self, author_id: i64) -> Result<AuthorLookup, AuthorsClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .expect("base URL checked in constructor")
            .extend(["authors", &author_id.to_string()]);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(AuthorsClientError::Unavailable)?;

        match response.status() {
            StatusCode::OK => {
                let author: AuthorSnapshot = response
                    .json()
                    .await
                    .map_err(AuthorsClientError::InvalidBody)?;
                debug!("Author {author_id} found in authors service");
                Ok(AuthorLookup::Found(author))
            }
            StatusCode::NOT_FOUND => {
                warn!("Author {author_id} not found in authors service");
                Ok(AuthorLookup::NotFound)
            }
            status => {
                error!("Error calling authors service: {status}");
                Err(AuthorsClientError::UnexpectedStatus(status))
            }
        }
    }
}

impl axum::extract::FromRequestParts<AppState> for AuthorsClient {
    type Rejection = StatusCode;

    fn from_request_parts(
        _parts: &mut http::request::Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        futures::future::ready(
            state
                .authors_client()
                .cloned()
                .ok_or(StatusCode::INTERNAL_SERVER_ERROR),
        )
    }
}
