use std::collections::BTreeMap;

use hystats_shared::{GameStatsContainer, IdentityKey, Player, lenient::optional_count};
use serde::{Deserialize, Deserializer};

use crate::api::envelope::Envelope;

pub(crate) const ENDPOINT: &str = "player";

/// Representation of the `/player` response.
#[derive(Deserialize, Debug)]
pub struct PlayerResponseDto {
    pub success: bool,
    pub player: Option<PlayerDto>,
    pub cause: Option<String>,
}

impl Envelope for PlayerResponseDto {
    type Payload = PlayerDto;

    fn into_parts(self) -> (bool, Option<PlayerDto>, Option<String>) {
        (self.success, self.player, self.cause)
    }
}

/// Representation of the player record. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    pub uuid: IdentityKey,
    pub displayname: String,
    pub rank: Option<String>,
    pub package_rank: Option<String>,
    pub new_package_rank: Option<String>,
    pub monthly_package_rank: Option<String>,
    pub rank_plus_color: Option<String>,
    pub prefix: Option<String>,
    #[serde(default, deserialize_with = "optional_count")]
    pub first_login: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub last_login: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub last_logout: Option<i64>,
    pub network_exp: Option<f64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub karma: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub achievement_points: Option<i64>,
    #[serde(default, deserialize_with = "strings_only")]
    pub achievements_one_time: Option<Vec<String>>,
    pub social_media: Option<SocialMediaDto>,
    pub stats: Option<GameStatsContainer>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SocialMediaDto {
    pub links: Option<BTreeMap<String, String>>,
}

/// The one-time achievement list occasionally holds non string entries, keep
/// the identifiers and drop the rest.
fn strings_only<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|values| {
        values
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect()
    }))
}

impl From<PlayerDto> for Player {
    fn from(value: PlayerDto) -> Self {
        Self {
            identity_key: value.uuid,
            display_name: value.displayname,
            rank: value.rank,
            package_rank: value.package_rank,
            new_package_rank: value.new_package_rank,
            monthly_package_rank: value.monthly_package_rank,
            rank_plus_color: value.rank_plus_color,
            prefix: value.prefix,
            first_login: value.first_login,
            last_login: value.last_login,
            last_logout: value.last_logout,
            network_exp: value.network_exp,
            karma: value.karma,
            achievement_points: value.achievement_points,
            achievements_one_time: value.achievements_one_time,
            social_links: value.social_media.and_then(|s| s.links),
            stats: value.stats,
        }
    }
}
