//! The data source contract.
//!
//! Whatever supplies library records (a local server, a remote API, test
//! fixtures) implements [`Fetcher`]. Transport details stay on the other side
//! of the trait; this side only builds requests and decodes typed records.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Method {
    Get,
    /// Requests carry a body by default.
    #[default]
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, Method::Get)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(url, Method::Post)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(url, Method::Put)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Serialize `props` as the JSON body and set the content type.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, props: &T) -> Result<Self, SourceError> {
        self.body = Some(serde_json::to_vec(props)?);
        Ok(self.header("Content-Type", "application/json"))
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("malformed payload: {0}")]
    Decode(#[from] serde_json::Error),
}

pub trait Fetcher {
    /// Perform the request and return the raw response body.
    fn fetch(&self, request: &FetchRequest) -> Result<Vec<u8>, SourceError>;
}

/// Fetch and decode a JSON response.
pub fn fetch_json<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    request: &FetchRequest,
) -> Result<T, SourceError> {
    let body = fetcher.fetch(request)?;
    Ok(serde_json::from_slice(&body)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Records<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

/// Fetch a collection of records, either a bare JSON array or `{"data": [...]}`.
pub fn fetch_records<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    request: &FetchRequest,
) -> Result<Vec<T>, SourceError> {
    let records = match fetch_json::<Records<T>>(fetcher, request)? {
        Records::Bare(items) | Records::Wrapped { data: items } => items,
    };
    log::debug!("fetched {} records from {}", records.len(), request.url);
    Ok(records)
}
