use hystats_shared::errors::{ApiError, ApiResponse};
use serde::de::DeserializeOwned;

/// `{ success, <payload>, cause }` wrapper shared by every stats API response.
pub trait Envelope {
    type Payload;

    fn into_parts(self) -> (bool, Option<Self::Payload>, Option<String>);
}

/// Decode a raw body, keeping the failing field path and location for
/// diagnostics.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &'static str, raw: &[u8]) -> ApiResponse<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(raw);

    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        decode_error(endpoint, path, err.into_inner())
    })?;
    // Trailing garbage after the document.
    deserializer
        .end()
        .map_err(|source| decode_error(endpoint, ".".to_string(), source))?;

    Ok(value)
}

fn decode_error(endpoint: &'static str, path: String, source: serde_json::Error) -> ApiError {
    tracing::debug!(
        endpoint,
        path = %path,
        line = source.line(),
        column = source.column(),
        category = ?source.classify(),
        "decoding error: {}",
        source
    );
    ApiError::Decode {
        endpoint,
        path,
        source,
    }
}

/// Unwrap an envelope. `Ok(None)` means the upstream succeeded without a
/// payload; what that means is up to the caller.
pub(crate) fn open<E: Envelope>(envelope: E, query: &str) -> ApiResponse<Option<E::Payload>> {
    let (success, payload, cause) = envelope.into_parts();
    if success {
        return Ok(payload);
    }

    Err(match cause {
        Some(cause) => ApiError::from_cause(&cause, query),
        None => ApiError::Upstream(
            "Unknown error from the stats API. Success was false but no cause was provided."
                .to_string(),
        ),
    })
}
