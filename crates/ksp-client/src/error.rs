use thiserror::Error;

#[derive(Debug, Error)]
pub enum KspError {
    /// A required key is absent from the raw mapping being parsed.
    #[error("missing field `{field}` while parsing {entity}")]
    MissingField { field: String, entity: &'static str },

    /// A required key is present but its value cannot be coerced to the
    /// expected type. `null` in a required position lands here too.
    #[error("invalid value {value} for field `{field}` while parsing {entity}")]
    InvalidField {
        field: String,
        value: serde_json::Value,
        entity: &'static str,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl KspError {
    /// Returns `true` for the two model-level parse failures.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            KspError::MissingField { .. } | KspError::InvalidField { .. }
        )
    }
}
