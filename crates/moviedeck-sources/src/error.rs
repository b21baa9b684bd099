use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no API key configured (set TMDB_API_KEY or run `moviedeck config api-key`)")]
    MissingApiKey,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// True for 404 responses (unknown movie id, unknown genre, ...)
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Status { status: 404, .. })
    }

    /// True for 401 responses, i.e. a missing or rejected API key
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CatalogError::Status { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> CatalogError {
        CatalogError::Status {
            endpoint: "/movie/1".to_string(),
            status,
            body: String::new(),
        }
    }

    #[test]
    fn test_status_classification() {
        assert!(status(401).is_unauthorized());
        assert!(!status(401).is_not_found());
        assert!(status(404).is_not_found());
        assert!(!status(500).is_unauthorized());
        assert!(!CatalogError::MissingApiKey.is_unauthorized());
    }
}
