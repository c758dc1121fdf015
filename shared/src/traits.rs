use async_trait::async_trait;
use std::fmt::Debug;

pub mod api {
    use bytes::Bytes;

    use crate::{
        errors::{ApiError, ApiResponse},
        identifier::{DisplayName, Identifier, IdentityKey},
        player::Player,
        session::{RecentGame, Session},
    };

    use super::*;

    /// Trait implemented by structures capable of performing authenticated raw
    /// requests against the stats API.
    #[async_trait]
    pub trait ApiRequest: Send + Sync + Debug {
        async fn request(&self, path: String) -> Result<Bytes, ApiError>;
    }

    /// Display name to identity key resolution.
    #[async_trait]
    pub trait IdentityApi: Send + Sync + Debug {
        fn identity_route(&self) -> &str;

        async fn resolve_identity(&self, name: &DisplayName) -> ApiResponse<IdentityKey>;
    }

    /// The three stats API operations, keyed by a resolved identity.
    #[async_trait]
    pub trait StatsApi: ApiRequest {
        fn stats_route(&self) -> &str;

        /// Whether a credential is available for the next request.
        fn has_credential(&self) -> bool;

        async fn fetch_profile(&self, key: &IdentityKey) -> ApiResponse<Player>;

        /// Never fails for an existing account: a missing session is offline.
        async fn fetch_status(&self, key: &IdentityKey) -> ApiResponse<Session>;

        /// Most recent first, possibly empty.
        async fn fetch_recent_games(&self, key: &IdentityKey) -> ApiResponse<Vec<RecentGame>>;
    }

    /// Everything needed to go from a search string to a profile.
    #[async_trait]
    pub trait HypixelApiFull: IdentityApi + StatsApi {
        /// Classify `raw` and resolve it to an identity key when needed.
        async fn resolve(&self, raw: &str) -> ApiResponse<IdentityKey> {
            match Identifier::classify(raw) {
                Identifier::Key(key) => {
                    tracing::debug!("'{}' looks like an identity key", raw);
                    Ok(key)
                }
                Identifier::Name(name) => {
                    tracing::debug!("'{}' looks like a display name, resolving", raw);
                    self.resolve_identity(&name).await
                }
                Identifier::Unrecognized(raw) => {
                    tracing::debug!("'{}' is neither a display name nor an identity key", raw);
                    Err(ApiError::NotFound(raw))
                }
            }
        }

        /// Search entry point: trimmed input, credential checked before any
        /// request, not-found errors reported with the search term.
        async fn lookup_player(&self, raw: &str) -> ApiResponse<Player> {
            let query = raw.trim();
            if query.is_empty() {
                return Err(ApiError::InvalidRequest(
                    "Please enter a player name or UUID.".to_string(),
                ));
            }
            if !self.has_credential() {
                return Err(ApiError::CredentialMissing(None));
            }

            let key = self.resolve(query).await?;
            self.fetch_profile(&key).await.map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::NotFound(query.to_string()),
                other => other,
            })
        }
    }
}
