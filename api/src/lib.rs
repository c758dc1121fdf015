//! Client for the Hypixel stats API, fronted by the Mojang identity API.
//!
//! The library offers typed wrappers around the profile, status and recent
//! games endpoints and normalizes their payloads into the domain model of
//! `hystats-shared`.

pub mod api;
pub mod types;

pub use api::{HypixelApiClient, config::ClientConfig, metrics::RequestMetrics};
