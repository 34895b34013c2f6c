//! HTTP client for a remote `pokedex serve`.
//!
//! Listing errors surface as [`ClientError`]. Creation never errors: every
//! response, or the lack of one, maps onto a [`CreateOutcome`], so a `400`
//! with a violation array is told apart from a transport failure here and
//! nowhere else.

use pokedexapp::model::{CreateOutcome, NewRecord, PageResponse, Record, Violation};
use pokedexapp::query::PageQuery;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    records_url: Url,
}

impl HttpClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base = Url::parse(base)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let records_url = base.join("api/records")?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("pokedex/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, records_url })
    }

    pub async fn list_page(&self, query: &PageQuery) -> Result<PageResponse, ClientError> {
        debug!(url = %self.records_url, ?query, "fetching page");
        let response = self
            .http
            .get(self.records_url.clone())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }
        Ok(response.json().await?)
    }

    pub async fn create_record(&self, candidate: &NewRecord) -> CreateOutcome {
        match self.try_create(candidate).await {
            Ok(outcome) => outcome,
            Err(e) => CreateOutcome::Failed(e.to_string()),
        }
    }

    async fn try_create(&self, candidate: &NewRecord) -> Result<CreateOutcome, ClientError> {
        let response = self
            .http
            .post(self.records_url.clone())
            .json(candidate)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let record: Record = response.json().await?;
            return Ok(CreateOutcome::Created(record));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::BAD_REQUEST {
            if let Ok(violations) = serde_json::from_str::<Vec<Violation>>(&body) {
                return Ok(CreateOutcome::Invalid(violations));
            }
        }
        Err(ClientError::Status { status, body })
    }
}
