use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures raised while talking to a content source or shaping its answers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure, timeout, or a non-success HTTP status.
    #[error("request {request} failed: {source}")]
    Network {
        request: String,
        #[source]
        source: BoxError,
    },

    #[error("unexpected response shape from {request}: {source}")]
    Decode {
        request: String,
        #[source]
        source: serde_json::Error,
    },

    /// A batch-by-key response had no entry for a requested key.
    #[error("no canonical {resource} record for `{key}`")]
    MissingCanonicalRecord { resource: &'static str, key: String },
}

impl FetchError {
    pub fn network(request: impl ToString, source: impl Into<BoxError>) -> Self {
        FetchError::Network {
            request: request.to_string(),
            source: source.into(),
        }
    }

    pub fn decode(request: impl ToString, source: serde_json::Error) -> Self {
        FetchError::Decode {
            request: request.to_string(),
            source,
        }
    }
}

/// A homepage build that failed because one of its sections did.
#[derive(Debug, Error)]
#[error("homepage section `{section}` failed")]
pub struct AggregationError {
    pub section: &'static str,
    #[source]
    pub source: FetchError,
}
