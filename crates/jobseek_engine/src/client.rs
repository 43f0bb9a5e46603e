use std::time::Duration;

use futures_util::StreamExt;
use jobseek_logging::seek_debug;
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::types::{Envelope, RecommendationsData};
use crate::{EngineError, FailureKind, FetchError, ListingsPage, WireListing};

const LISTINGS_PATH: &str = "jobs";
const RECOMMENDATIONS_PATH: &str = "jobs/recommendations";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Root of the REST API, e.g. `https://example.com/api/`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001/api/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Read-only collaborator serving listing pages and recommendations.
#[async_trait::async_trait]
pub trait ListingsApi: Send + Sync {
    async fn fetch_listings(&self, params: &[(String, String)]) -> Result<ListingsPage, FetchError>;

    async fn fetch_recommendations(
        &self,
        limit: u32,
        token: &str,
    ) -> Result<Vec<WireListing>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestListingsApi {
    settings: ApiSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestListingsApi {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        // `Url::join` drops the last segment unless the base ends with a slash.
        let mut raw = settings.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw).map_err(|source| EngineError::BaseUrl {
            url: settings.base_url.clone(),
            source,
        })?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    fn endpoint(&self, path: &str, params: &[(String, String)]) -> Result<Url, FetchError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        token: Option<&str>,
    ) -> Result<T, FetchError> {
        seek_debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        if !envelope.success {
            return Err(FetchError::new(
                FailureKind::Api,
                envelope
                    .message
                    .unwrap_or_else(|| "request was not successful".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| FetchError::new(FailureKind::Decode, "response has no data"))
    }
}

#[async_trait::async_trait]
impl ListingsApi for ReqwestListingsApi {
    async fn fetch_listings(
        &self,
        params: &[(String, String)],
    ) -> Result<ListingsPage, FetchError> {
        let url = self.endpoint(LISTINGS_PATH, params)?;
        self.get_json(url, None).await
    }

    async fn fetch_recommendations(
        &self,
        limit: u32,
        token: &str,
    ) -> Result<Vec<WireListing>, FetchError> {
        let url = self.endpoint(
            RECOMMENDATIONS_PATH,
            &[("limit".to_string(), limit.to_string())],
        )?;
        let data: RecommendationsData = self.get_json(url, Some(token)).await?;
        Ok(data.recommendations)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
