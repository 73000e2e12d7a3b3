use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::errors::{ApiError, AppError};
use crate::opensubtitles::models::{
    DownloadRequest, DownloadResponse, LoginRequest, LoginResponse, LogoutResponse, SearchParams,
    SearchResponse, Subtitle,
};
use crate::opensubtitles::SubtitleCatalog;

/// Default API host of the public catalog
pub const API_HOST: &str = "api.opensubtitles.com";

/// Session client for the OpenSubtitles REST API
///
/// Holds at most one authentication token. The API host is mutable session
/// state: a login response may carry an alternate host, after which every
/// subsequent request goes there. The client performs no retries, no
/// backoff, and no reauthentication; any non-2xx response is a hard failure
/// for that operation.
pub struct OpenSubtitlesClient {
    /// HTTP client for API requests
    client: Client,
    /// URL scheme, https outside of tests
    scheme: String,
    /// Current API host, may change after login
    api_host: String,
    /// Caller-supplied application identifier sent as User-Agent
    user_agent: String,
    /// API key for the catalog
    api_key: String,
    /// Bearer token, present between login and logout
    token: Option<String>,
}

impl OpenSubtitlesClient {
    /// Create a client against the public catalog
    pub fn new(app_name: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder().build().unwrap_or_default(),
            scheme: "https".to_string(),
            api_host: API_HOST.to_string(),
            user_agent: app_name.into(),
            api_key: api_key.into(),
            token: None,
        }
    }

    /// Create a client against a custom base URL (for testing)
    pub fn with_base_url(
        base_url: &str,
        app_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let url = Url::parse(base_url)
            .map_err(|e| ApiError::ConnectionError(format!("invalid base URL: {}", e)))?;
        let host = url
            .host_str()
            .ok_or_else(|| ApiError::ConnectionError("base URL has no host".to_string()))?;
        let api_host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        Ok(Self {
            client: Client::builder().build().unwrap_or_default(),
            scheme: url.scheme().to_string(),
            api_host,
            user_agent: app_name.into(),
            api_key: api_key.into(),
            token: None,
        })
    }

    /// The host requests are currently sent to
    pub fn host(&self) -> &str {
        &self.api_host
    }

    /// Whether a session token is held
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, entity_path: &str) -> String {
        format!("{}://{}/api/v1/{}", self.scheme, self.api_host, entity_path)
    }

    /// Attach the fixed header set: content negotiation, application
    /// identifier, API key, and the bearer token once authenticated
    fn apply_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("User-Agent", &self.user_agent)
            .header("Api-Key", &self.api_key);

        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Fire a request and decode the JSON body, mapping failures onto the
    /// error taxonomy
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ApiError::RequestFailed {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::ParseError(e.to_string()))
    }

    /// Fetch a single result page
    async fn search_page(&self, params: &SearchParams) -> Result<SearchResponse, ApiError> {
        let request = self
            .apply_headers(self.client.get(self.endpoint("subtitles")))
            .query(params);
        self.execute(request).await
    }
}

#[async_trait]
impl SubtitleCatalog for OpenSubtitlesClient {
    async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let request = self
            .apply_headers(self.client.post(self.endpoint("login")))
            .json(&body);
        let response: LoginResponse = self.execute(request).await?;

        // The catalog may redirect the whole session to a region host.
        if let Some(base_url) = &response.base_url {
            debug!("switching API host to {}", base_url);
            self.api_host = base_url.clone();
        }
        self.token = Some(response.token.clone());

        Ok(response)
    }

    async fn search(&self, params: SearchParams) -> Result<Vec<Subtitle>, ApiError> {
        let mut items: Vec<Subtitle> = Vec::new();
        let mut page = 1;
        let mut total_pages: Option<u32> = None;

        loop {
            let response = self.search_page(&params.clone().page(page)).await?;

            // The first page's total_pages is authoritative for the whole
            // scan; a result set mutating mid-scan does not move the end.
            let total = *total_pages.get_or_insert(response.total_pages);

            items.extend(response.data);

            if page >= total {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    async fn get_download_link(&self, file_id: u64) -> Result<DownloadResponse, ApiError> {
        let request = self
            .apply_headers(self.client.post(self.endpoint("download")))
            .json(&DownloadRequest::new(file_id));
        self.execute(request).await
    }

    async fn logout(&mut self) -> Result<LogoutResponse, ApiError> {
        let request = self.apply_headers(self.client.delete(self.endpoint("logout")));
        let response: LogoutResponse = self.execute(request).await?;

        self.token = None;
        Ok(response)
    }

    async fn download_to(&self, url: &str, dest: &Path) -> Result<u64, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status_code: status.as_u16(),
                message: status.to_string(),
            }
            .into());
        }

        // Stream chunk by chunk; the body is never held in memory whole.
        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk: bytes::Bytes = chunk.map_err(|e| ApiError::ConnectionError(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
