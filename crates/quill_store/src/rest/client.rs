//! HTTP plumbing shared by the REST stores.

use derive_getters::Getters;
use quill_error::{HttpError, JsonError, QuillError, QuillResult, StoreError, StoreErrorKind};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct RestConfig {
    /// Project URL, e.g. `https://example.supabase.co`
    base_url: String,
    /// Public API key sent as the `apikey` header
    api_key: String,
    /// User session token; falls back to the API key when absent
    #[builder(default)]
    access_token: Option<String>,
    /// Request timeout
    #[builder(default = "Duration::from_secs(30)")]
    timeout: Duration,
}

impl RestConfig {
    /// Creates a new config builder.
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::default()
    }
}

/// Thin client over the backend's REST interface.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    config: RestConfig,
}

impl RestClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns an `HttpError` if the underlying HTTP client cannot be built.
    pub fn new(config: RestConfig) -> QuillResult<Self> {
        let http = Client::builder()
            .timeout(*config.timeout())
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;
        debug!(base_url = %config.base_url(), "Creating REST store client");
        Ok(Self { http, config })
    }

    /// URL of a table endpoint.
    pub fn table_url(&self, table: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url().trim_end_matches('/'),
            table
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .config
            .access_token()
            .as_deref()
            .unwrap_or(self.config.api_key());
        request
            .header("apikey", self.config.api_key())
            .bearer_auth(token)
    }

    /// Select rows matching a PostgREST query.
    #[instrument(skip(self, query))]
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> QuillResult<Vec<T>> {
        let request = self.http.get(self.table_url(table)).query(query);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Insert one row and return the stored representation.
    #[instrument(skip(self, body))]
    pub async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> QuillResult<Vec<T>> {
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Patch rows matching a query and return their stored representation.
    #[instrument(skip(self, query, body))]
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> QuillResult<Vec<T>> {
        let request = self
            .http
            .patch(self.table_url(table))
            .query(query)
            .header("Prefer", "return=representation")
            .json(body);
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    /// Delete rows matching a query.
    #[instrument(skip(self, query))]
    pub async fn delete(&self, table: &str, query: &[(&str, String)]) -> QuillResult<()> {
        let request = self.http.delete(self.table_url(table)).query(query);
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> QuillResult<Response> {
        let response = self.authorize(request).send().await.map_err(|e| {
            error!(error = ?e, "Store request failed");
            if e.is_connect() || e.is_timeout() {
                QuillError::from(StoreError::new(StoreErrorKind::Unavailable(e.to_string())))
            } else {
                QuillError::from(HttpError::new(format!("Store request failed: {}", e)))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        error!(status = %status, body = %message, "Store returned error");
        let kind = match status {
            StatusCode::NOT_FOUND => StoreErrorKind::NotFound(message),
            StatusCode::CONFLICT => StoreErrorKind::Conflict(message),
            _ => StoreErrorKind::Request {
                status: status.as_u16(),
                message,
            },
        };
        Err(StoreError::new(kind).into())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> QuillResult<Vec<T>> {
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| JsonError::new(format!("Failed to decode store response: {}", e)).into())
    }
}

/// PostgREST equality filter value.
pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// PostgREST membership filter value with quoted items.
pub(crate) fn in_list<I, D>(values: I) -> String
where
    I: IntoIterator<Item = D>,
    D: std::fmt::Display,
{
    let quoted: Vec<String> = values
        .into_iter()
        .map(|v| format!("\"{}\"", v))
        .collect();
    format!("in.({})", quoted.join(","))
}
