//! JSON-over-HTTP client shared by every service module.
//!
//! Success bodies are parsed into the requested type. Non-2xx responses are
//! mapped to [`ApiError::Http`] carrying the backend's `detail` message (or a
//! generic status message). Transport failures come back as
//! [`ApiError::Network`] untouched. Nothing is retried or cached.

use crate::config::{ApiConfig, ServiceFamily};
use crate::domain::errors::ApiError;
use crate::domain::reference::ExportedFile;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Absolute URL for `path` under the family's base URL.
    pub fn url(&self, family: ServiceFamily, path: &str) -> String {
        format!("{}{}", self.config.base_url(family), path)
    }

    /// GET `path` with optional query parameters; `None` values are not sent.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        family: ServiceFamily,
        path: &str,
        query: &[(&str, Option<String>)],
    ) -> Result<T, ApiError> {
        let url = self.url(family, path);
        let params = present_params(query);
        let request = self.client.get(&url).query(&params);
        self.send_json(&url, request).await
    }

    pub async fn post_json<B, T>(
        &self,
        family: ServiceFamily,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(family, path);
        let request = self.client.post(&url).json(body);
        self.send_json(&url, request).await
    }

    /// Same as [`post_json`](Self::post_json) but attaches the configured
    /// API key as `X-API-Key`. Without a key the request goes out bare.
    pub async fn post_json_authenticated<B, T>(
        &self,
        family: ServiceFamily,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(family, path);
        let request = self.with_api_key(self.client.post(&url).json(body));
        self.send_json(&url, request).await
    }

    /// POST without a body and return the raw response bytes.
    ///
    /// The filename comes from `Content-Disposition` when the backend sends
    /// one, otherwise `fallback_name` is used.
    pub async fn post_for_file(
        &self,
        family: ServiceFamily,
        path: &str,
        fallback_name: &str,
    ) -> Result<ExportedFile, ApiError> {
        let url = self.url(family, path);
        let response = self.send(&url, self.client.post(&url)).await?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| fallback_name.to_string());

        let bytes = response.bytes().await.inspect_err(|e| {
            error!("Failed to read body from {}: {}", url, e);
        })?;

        debug!("Downloaded {} ({} bytes) from {}", filename, bytes.len(), url);
        Ok(ExportedFile {
            filename,
            bytes: bytes.to_vec(),
        })
    }

    fn with_api_key(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(url, request).await?;

        let body = response.bytes().await.inspect_err(|e| {
            error!("Failed to read body from {}: {}", url, e);
        })?;

        serde_json::from_slice(&body).map_err(|source| {
            error!("Failed to decode response from {}: {}", url, source);
            ApiError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }

    /// Sends the request and turns non-2xx statuses into [`ApiError::Http`].
    async fn send(&self, url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        debug!("Requesting {}", url);

        let response = request.send().await.inspect_err(|e| {
            error!("Request to {} failed: {}", url, e);
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // An unreadable error body still maps to the generic status message.
        let body = response.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        let err = ApiError::from_error_body(status.as_u16(), &body);
        error!("Request to {} failed with status {}: {}", url, status, err);
        Err(err)
    }
}

fn present_params<'a>(query: &'a [(&'a str, Option<String>)]) -> Vec<(&'a str, &'a str)> {
    query
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (*key, v)))
        .collect()
}

/// Percent-encodes a value for use as a single path segment.
pub fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn filename_from_disposition(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_params_are_dropped() {
        let query = [
            ("interval", Some("24".to_string())),
            ("from", None),
            ("till", None),
            ("limit", Some("100".to_string())),
        ];
        let params = present_params(&query);
        assert_eq!(params, vec![("interval", "24"), ("limit", "100")]);
    }

    #[test]
    fn test_url_joins_family_base() {
        let mut config = ApiConfig::with_base_url("http://localhost:8000/");
        config.set_base_url(ServiceFamily::Backtest, "http://backtest:9000");
        let client = ApiClient::new(config).unwrap();

        assert_eq!(
            client.url(ServiceFamily::Valuation, "/api/bond/valuate"),
            "http://localhost:8000/api/bond/valuate"
        );
        assert_eq!(
            client.url(ServiceFamily::Backtest, "/api/backtest/run"),
            "http://backtest:9000/api/backtest/run"
        );
    }

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("SBMX"), "SBMX");
        assert_eq!(encode_path_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="registry.parquet""#),
            Some("registry.parquet".to_string())
        );
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition(r#"attachment; filename="""#), None);
    }
}
