pub mod client;
pub mod config;
pub mod envelope;
pub mod metrics;
pub mod stats;
pub mod types {
    pub use super::client::IdentityProfileDto;
    pub use super::stats::player::{PlayerDto, PlayerResponseDto, SocialMediaDto};
    pub use super::stats::recent_games::RecentGamesResponseDto;
    pub use super::stats::status::StatusResponseDto;
}
pub use stats::HypixelApiClient;
