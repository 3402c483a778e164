//! Thin async client for the city finder REST API.

use cityfinder_core::City;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 404 for an exact-id lookup.
    #[error("no city with id {0}")]
    NotFound(i64),
    /// Any other non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: String },
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub struct CityFinderClient {
    base_url: String,
    http: reqwest::Client,
}

impl CityFinderClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http: reqwest::Client::new() }
    }

    /// Exact lookup: `GET /city/{id}`.
    pub async fn get_by_id(&self, id: i64) -> Result<City, ClientError> {
        let url = format!("{}/city/{}", self.base_url, id);
        let resp = self.http.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(id));
        }
        let resp = check_status(resp, &url)?;
        Ok(resp.json().await?)
    }

    /// Name search: `GET /city?query=...`. The server caps the result list
    /// at 100 entries and answers blank queries with an empty list.
    pub async fn find_by_name(&self, query: &str) -> Result<Vec<City>, ClientError> {
        let url = format!("{}/city", self.base_url);
        let resp = self.http.get(&url).query(&[("query", query)]).send().await?;
        let resp = check_status(resp, &url)?;
        Ok(resp.json().await?)
    }
}

fn check_status(resp: reqwest::Response, url: &str) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status { status, url: url.to_owned() });
    }
    Ok(resp)
}
