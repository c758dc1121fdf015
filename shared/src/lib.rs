//! Domain model shared by the hystats crates.
//!
//! Holds the identifier rules, the normalized player, session and recent game
//! records, the pure derivation rules computed on them and the error taxonomy
//! returned by every API operation.

pub mod credentials;
pub mod errors;
pub mod identifier;
pub mod lenient;
pub mod player;
pub mod session;
pub mod stats;
pub mod traits;

pub use credentials::{CredentialStore, MemoryCredentialStore};
pub use errors::{ApiError, ApiResponse};
pub use identifier::{DisplayName, Identifier, IdentityKey};
pub use player::{network_level, Player};
pub use session::{RecentGame, Session};
pub use stats::{GameStatsContainer, Ratio};
