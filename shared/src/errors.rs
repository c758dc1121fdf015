use thiserror::Error;

/// Every failure the API layer can surface to a caller.
///
/// The set is closed: transport, HTTP and decoding failures as well as
/// upstream-reported causes all end up in exactly one of these variants.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("The URL for the request was invalid: {0}")]
    InvalidRequest(String),

    /// `None` when no credential is configured locally, `Some(cause)` when the
    /// stats API rejected it.
    #[error("{}", credential_message(.0))]
    CredentialMissing(Option<String>),

    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Forbidden: check that your API key is valid and has the required permissions.")]
    Forbidden,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Server returned an error: HTTP {0}.")]
    HttpStatus(u16),

    /// `path` is the dotted field path where decoding stopped, `.` for the root.
    #[error("Failed to process data from {endpoint} at `{path}`: {source}")]
    Decode {
        endpoint: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Player '{0}' could not be found.")]
    NotFound(String),

    #[error("Stats API error: {0}")]
    Upstream(String),
}

fn credential_message(cause: &Option<String>) -> String {
    match cause {
        Some(cause) => format!("Stats API rejected the API key: {cause}"),
        None => "API key is not set. Please configure one first.".to_string(),
    }
}

impl ApiError {
    /// Map a non-2xx HTTP status to its error variant.
    pub fn from_status(status: u16) -> Self {
        match status {
            403 => Self::Forbidden,
            429 => Self::RateLimited,
            code => Self::HttpStatus(code),
        }
    }

    /// Classify the free-text `cause` of a `success: false` stats response.
    ///
    /// Matching is a case-insensitive substring test against upstream wording,
    /// so a change of wording upstream degrades to [`ApiError::Upstream`].
    pub fn from_cause(cause: &str, query: &str) -> Self {
        let lowered = cause.to_lowercase();

        if lowered.contains("api key") {
            Self::CredentialMissing(Some(cause.to_string()))
        } else if lowered.contains("does not exist") || lowered.contains("not found") {
            Self::NotFound(query.to_string())
        } else {
            Self::Upstream(cause.to_string())
        }
    }

    /// HTTP status code carried by the error, if it came from a non-2xx response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Forbidden => Some(403),
            Self::RateLimited => Some(429),
            Self::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }

    /// Field path of the payload where decoding stopped.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Decode { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Line of the payload where decoding stopped.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Decode { source, .. } => Some(source.line()),
            _ => None,
        }
    }

    /// Column of the payload where decoding stopped.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Decode { source, .. } => Some(source.column()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A call to the upstream APIs either succeeds with `T` or fails with an [`ApiError`].
pub type ApiResponse<T> = Result<T, ApiError>;
