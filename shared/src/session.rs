use serde::Deserialize;

/// Point in time online status of a player.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub online: bool,
    pub game_type: Option<String>,
    pub mode: Option<String>,
    pub map: Option<String>,
}

impl Session {
    pub fn offline() -> Self {
        Self::default()
    }

    /// Short status line, e.g. `Online - Bedwars Eight One`.
    pub fn summary(&self) -> String {
        if !self.online {
            return "Offline".to_string();
        }

        let mut parts = Vec::new();
        if let Some(game_type) = &self.game_type {
            parts.push(sanitize_game_name(game_type));
        }

        let in_lobby_game = self
            .game_type
            .as_ref()
            .is_some_and(|g| g.to_lowercase().contains("lobby"));
        if let Some(mode) = &self.mode {
            if !mode.eq_ignore_ascii_case("lobby") && !in_lobby_game {
                parts.push(sanitize_game_name(mode));
            }
        }

        if parts.is_empty() {
            "Online - In Lobby".to_string()
        } else {
            format!("Online - {}", parts.join(" "))
        }
    }
}

/// A past match from the recent activity endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    /// Start time, epoch milliseconds.
    #[serde(deserialize_with = "crate::lenient::count")]
    pub date: i64,
    pub game_type: Option<String>,
    pub mode: Option<String>,
    pub map: Option<String>,
    /// End time, epoch milliseconds. Absent while the game is running.
    #[serde(default, deserialize_with = "crate::lenient::optional_count")]
    pub ended: Option<i64>,
}

impl RecentGame {
    pub fn is_ongoing(&self) -> bool {
        self.ended.is_none()
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.ended.map(|ended| ended - self.date)
    }
}

/// Turn an upstream identifier such as `TNTGAMES` or `BEDWARS_EIGHT_ONE` into
/// a readable name.
pub fn sanitize_game_name(raw: &str) -> String {
    raw.replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
        .replace("Tnt", "TNT")
        .replace("UhC", "UHC")
        .replace("Mvp", "MVP")
        .replace("Vip", "VIP")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
