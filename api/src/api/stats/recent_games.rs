use hystats_shared::RecentGame;
use serde::Deserialize;

use crate::api::envelope::Envelope;

pub(crate) const ENDPOINT: &str = "recentgames";

/// Representation of the `/recentgames` response.
#[derive(Deserialize, Debug)]
pub struct RecentGamesResponseDto {
    pub success: bool,
    pub games: Option<Vec<RecentGame>>,
    pub uuid: Option<String>,
    pub cause: Option<String>,
}

impl Envelope for RecentGamesResponseDto {
    type Payload = Vec<RecentGame>;

    fn into_parts(self) -> (bool, Option<Vec<RecentGame>>, Option<String>) {
        (self.success, self.games, self.cause)
    }
}
