use std::{fmt::Debug, sync::Arc};

use bytes::Bytes;
use hystats_shared::{
    CredentialStore,
    errors::{ApiError, ApiResponse},
    identifier::{DisplayName, IdentityKey},
};
use reqwest::{StatusCode, Url, header::HeaderValue};
use serde::Deserialize;

use super::{config::ClientConfig, envelope::decode, metrics::RequestMetrics};

/// Shared transport for the identity and stats APIs.
#[derive(Debug)]
pub struct ApiClientBase {
    pub client: reqwest::Client,
    config: ClientConfig,
    /// Read on every stats request.
    credentials: Arc<dyn CredentialStore>,
    pub metrics: Arc<RequestMetrics>,
}

impl ApiClientBase {
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> ApiResponse<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            client,
            config,
            credentials,
            metrics: RequestMetrics::new("hypixel"),
        })
    }

    const API_KEY_HEADER: &'static str = "API-Key";

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn has_credential(&self) -> bool {
        self.credentials.has_credential()
    }

    fn credential(&self) -> ApiResponse<HeaderValue> {
        let credential = self
            .credentials
            .get_credential()
            .filter(|c| !c.trim().is_empty())
            .ok_or(ApiError::CredentialMissing(None))?;

        HeaderValue::from_str(&credential).map_err(|_| {
            ApiError::InvalidRequest("the API key contains characters not allowed in a header".into())
        })
    }

    /// Authenticated GET against the stats API returning the raw 2xx body.
    pub async fn request(&self, path: String) -> ApiResponse<Bytes> {
        // No credential, no request.
        let credential = self.credential()?;
        let url = parse_url(&path)?;
        self.metrics.inc();

        let res = self
            .client
            .get(url)
            .header(Self::API_KEY_HEADER, credential)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!("[STATS API] HTTP error {} body: {}", status, body);
            return Err(ApiError::from_status(status.as_u16()));
        }

        res.bytes().await.map_err(ApiError::Transport)
    }

    /// Resolve a display name through the identity API. One attempt, no retry.
    pub async fn get_identity_by_name(
        &self,
        route: &str,
        name: &DisplayName,
    ) -> ApiResponse<IdentityKey> {
        tracing::trace!("[IDENTITY API] get_identity_by_name {}", name);

        let path = format!(
            "{}/users/profiles/minecraft/{}",
            route,
            urlencoding::encode(name.as_str())
        );
        let url = parse_url(&path)?;
        self.metrics.inc();

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        match res.status() {
            StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Err(ApiError::NotFound(name.to_string())),
            status if status.is_success() => {
                let raw = res.bytes().await.map_err(ApiError::Transport)?;
                let profile: IdentityProfileDto = decode("identity profile", &raw)?;
                Ok(profile.id)
            }
            status => Err(ApiError::from_status(status.as_u16())),
        }
    }
}

fn parse_url(path: &str) -> ApiResponse<Url> {
    Url::parse(path).map_err(|e| ApiError::InvalidRequest(format!("{path}: {e}")))
}

/// Representation of the identity API profile response.
#[derive(Deserialize, Debug)]
pub struct IdentityProfileDto {
    pub id: IdentityKey,
    pub name: String,
}
