use thiserror::Error;

/// Errors surfaced by the backend API client.
///
/// `Http` displays as the bare message so callers can show it to the user
/// as-is: either the backend's `detail` string or `HTTP error <status>`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// HTTP status of the failed response, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Builds the error for a non-2xx response from its raw body.
    ///
    /// Uses the `detail` field of a JSON error payload when there is one,
    /// otherwise falls back to a generic status message.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|value| match value.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            });

        ApiError::Http {
            status,
            message: detail.unwrap_or_else(|| format!("HTTP error {}", status)),
        }
    }
}

/// Errors from the local key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage contents are not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}
