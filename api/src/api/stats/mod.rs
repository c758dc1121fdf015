use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use hystats_shared::{
    CredentialStore,
    errors::{ApiError, ApiResponse},
    identifier::{DisplayName, IdentityKey},
    player::Player,
    session::{RecentGame, Session},
    traits::api::{ApiRequest, HypixelApiFull, IdentityApi, StatsApi},
};

use super::{
    client::ApiClientBase,
    config::ClientConfig,
    envelope::{decode, open},
    metrics::RequestMetrics,
};

pub mod player;
pub mod recent_games;
pub mod status;

use player::PlayerResponseDto;
use recent_games::RecentGamesResponseDto;
use status::StatusResponseDto;

/// High level client implementing the identity and stats operations.
///
/// Every call is a single independent request, so one client can be shared
/// across tasks and calls can run concurrently.
#[derive(Debug)]
pub struct HypixelApiClient(ApiClientBase);

impl HypixelApiClient {
    /// Create a new API client reading its credential from `credentials`.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> ApiResponse<Self> {
        Ok(Self(ApiClientBase::new(config, credentials)?))
    }

    pub fn metrics(&self) -> &Arc<RequestMetrics> {
        &self.0.metrics
    }
}

fn query_term(key: &IdentityKey) -> String {
    format!("UUID: {key}")
}

#[async_trait]
impl ApiRequest for HypixelApiClient {
    async fn request(&self, path: String) -> Result<Bytes, ApiError> {
        self.0.request(path).await
    }
}

#[async_trait]
impl IdentityApi for HypixelApiClient {
    fn identity_route(&self) -> &str {
        &self.0.config().identity_base_url
    }

    async fn resolve_identity(&self, name: &DisplayName) -> ApiResponse<IdentityKey> {
        self.0.get_identity_by_name(self.identity_route(), name).await
    }
}

#[async_trait]
impl StatsApi for HypixelApiClient {
    fn stats_route(&self) -> &str {
        &self.0.config().stats_base_url
    }

    fn has_credential(&self) -> bool {
        self.0.has_credential()
    }

    async fn fetch_profile(&self, key: &IdentityKey) -> ApiResponse<Player> {
        tracing::trace!("[STATS API] fetch_profile {}", key);

        let path = format!("{}/player?uuid={}", self.stats_route(), key);
        let raw = self.request(path).await?;
        let response: PlayerResponseDto = decode(player::ENDPOINT, &raw)?;

        // A successful response without a player means the key has no profile.
        open(response, &query_term(key))?
            .map(Player::from)
            .ok_or_else(|| ApiError::NotFound(query_term(key)))
    }

    async fn fetch_status(&self, key: &IdentityKey) -> ApiResponse<Session> {
        tracing::trace!("[STATS API] fetch_status {}", key);

        let path = format!("{}/status?uuid={}", self.stats_route(), key);
        let raw = self.request(path).await?;
        let response: StatusResponseDto = decode(status::ENDPOINT, &raw)?;

        Ok(open(response, &query_term(key))?.unwrap_or_else(Session::offline))
    }

    async fn fetch_recent_games(&self, key: &IdentityKey) -> ApiResponse<Vec<RecentGame>> {
        tracing::trace!("[STATS API] fetch_recent_games {}", key);

        let path = format!("{}/recentgames?uuid={}", self.stats_route(), key);
        let raw = self.request(path).await?;
        let response: RecentGamesResponseDto = decode(recent_games::ENDPOINT, &raw)?;

        Ok(open(response, &query_term(key))?.unwrap_or_default())
    }
}

impl HypixelApiFull for HypixelApiClient {}
