use std::fmt;

use serde::Deserialize;

use crate::lenient::optional_count;

/// Ratio of two raw counters as displayed to players.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    Value(f64),
    /// Denominator was zero or missing, the numerator is shown as is.
    RawCount(i64),
    Unavailable,
}

impl Ratio {
    pub fn of(numerator: Option<i64>, denominator: Option<i64>) -> Self {
        match (numerator, denominator) {
            (Some(num), Some(den)) if den > 0 => Self::Value(num as f64 / den as f64),
            (Some(num), _) => Self::RawCount(num),
            (None, _) => Self::Unavailable,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::RawCount(n) => Some(*n as f64),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v:.2}"),
            Self::RawCount(n) => write!(f, "{n}"),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Per game statistics. Only games the player has played are present.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GameStatsContainer {
    #[serde(rename = "Bedwars")]
    pub bedwars: Option<BedwarsStats>,
    #[serde(rename = "SkyWars")]
    pub sky_wars: Option<SkyWarsStats>,
    #[serde(rename = "MurderMystery")]
    pub murder_mystery: Option<MurderMysteryStats>,
    #[serde(rename = "Duels")]
    pub duels: Option<DuelsStats>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BedwarsStats {
    #[serde(rename = "wins_bedwars", default, deserialize_with = "optional_count")]
    pub wins: Option<i64>,
    #[serde(rename = "losses_bedwars", default, deserialize_with = "optional_count")]
    pub losses: Option<i64>,
    #[serde(rename = "kills_bedwars", default, deserialize_with = "optional_count")]
    pub kills: Option<i64>,
    #[serde(rename = "deaths_bedwars", default, deserialize_with = "optional_count")]
    pub deaths: Option<i64>,
    #[serde(rename = "final_kills_bedwars", default, deserialize_with = "optional_count")]
    pub final_kills: Option<i64>,
    #[serde(rename = "final_deaths_bedwars", default, deserialize_with = "optional_count")]
    pub final_deaths: Option<i64>,
    #[serde(rename = "beds_broken_bedwars", default, deserialize_with = "optional_count")]
    pub beds_broken: Option<i64>,
    #[serde(rename = "beds_lost_bedwars", default, deserialize_with = "optional_count")]
    pub beds_lost: Option<i64>,
    #[serde(rename = "games_played_bedwars", default, deserialize_with = "optional_count")]
    pub games_played: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub experience: Option<i64>,
}

impl BedwarsStats {
    pub fn win_loss_ratio(&self) -> Ratio {
        Ratio::of(self.wins, self.losses)
    }

    pub fn kill_death_ratio(&self) -> Ratio {
        Ratio::of(self.kills, self.deaths)
    }

    pub fn final_kill_death_ratio(&self) -> Ratio {
        Ratio::of(self.final_kills, self.final_deaths)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SkyWarsStats {
    #[serde(default, deserialize_with = "optional_count")]
    pub wins: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub losses: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub kills: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub deaths: Option<i64>,
    #[serde(rename = "games_played_skywars", default, deserialize_with = "optional_count")]
    pub games_played: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub experience: Option<i64>,
    pub level_formatted: Option<String>,
}

impl SkyWarsStats {
    pub fn win_loss_ratio(&self) -> Ratio {
        Ratio::of(self.wins, self.losses)
    }

    pub fn kill_death_ratio(&self) -> Ratio {
        Ratio::of(self.kills, self.deaths)
    }

    /// Formatted level when the API provides one, raw experience otherwise.
    pub fn level_label(&self) -> String {
        self.level_formatted
            .clone()
            .or_else(|| self.experience.map(|xp| xp.to_string()))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MurderMysteryStats {
    #[serde(default, deserialize_with = "optional_count")]
    pub wins: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub games: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub kills: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub deaths: Option<i64>,
}

impl MurderMysteryStats {
    pub fn kill_death_ratio(&self) -> Ratio {
        Ratio::of(self.kills, self.deaths)
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DuelsStats {
    #[serde(default, deserialize_with = "optional_count")]
    pub wins: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub losses: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub kills: Option<i64>,
    #[serde(default, deserialize_with = "optional_count")]
    pub deaths: Option<i64>,
    #[serde(rename = "games_played_duels", default, deserialize_with = "optional_count")]
    pub games_played: Option<i64>,
}

impl DuelsStats {
    pub fn win_loss_ratio(&self) -> Ratio {
        Ratio::of(self.wins, self.losses)
    }

    pub fn kill_death_ratio(&self) -> Ratio {
        Ratio::of(self.kills, self.deaths)
    }
}
