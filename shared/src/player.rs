use std::collections::BTreeMap;

use crate::{identifier::IdentityKey, stats::GameStatsContainer};

/// Label shown for the top subscription tier.
pub const SUPERSTAR_LABEL: &str = "MVP++";
/// Colour name forced by the top subscription tier.
pub const SUPERSTAR_COLOR: &str = "GOLD";
pub const NON_RANKED_LABEL: &str = "Non-Ranked";

const SUPERSTAR: &str = "SUPERSTAR";
const NONE_SENTINEL: &str = "NONE";
const NORMAL_SENTINEL: &str = "NORMAL";
const COLOR_CODE_MARKER: char = '§';

/// Normalized player profile built from a successful profile fetch.
///
/// Everything except the identity key and the display name is optional since
/// the stats API omits fields which were never set.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub identity_key: IdentityKey,
    pub display_name: String,
    pub rank: Option<String>,
    pub package_rank: Option<String>,
    pub new_package_rank: Option<String>,
    pub monthly_package_rank: Option<String>,
    pub rank_plus_color: Option<String>,
    pub prefix: Option<String>,
    /// Epoch milliseconds.
    pub first_login: Option<i64>,
    pub last_login: Option<i64>,
    pub last_logout: Option<i64>,
    pub network_exp: Option<f64>,
    pub karma: Option<i64>,
    pub achievement_points: Option<i64>,
    pub achievements_one_time: Option<Vec<String>>,
    /// Platform name to handle or URL.
    pub social_links: Option<BTreeMap<String, String>>,
    pub stats: Option<GameStatsContainer>,
}

impl Player {
    /// Profile with only the mandatory fields set.
    pub fn new(identity_key: IdentityKey, display_name: impl Into<String>) -> Self {
        Self {
            identity_key,
            display_name: display_name.into(),
            rank: None,
            package_rank: None,
            new_package_rank: None,
            monthly_package_rank: None,
            rank_plus_color: None,
            prefix: None,
            first_login: None,
            last_login: None,
            last_logout: None,
            network_exp: None,
            karma: None,
            achievement_points: None,
            achievements_one_time: None,
            social_links: None,
            stats: None,
        }
    }

    /// Rank label to display, resolving the overlapping rank systems.
    ///
    /// Precedence: chat prefix, subscription tier, upgraded package rank,
    /// legacy package rank, staff rank, then [`NON_RANKED_LABEL`].
    pub fn effective_rank(&self) -> String {
        if let Some(prefix) = self.prefix.as_deref() {
            let stripped = strip_color_codes(prefix);
            // A colour-only prefix falls through so the label is never empty.
            if !stripped.trim().is_empty() {
                return stripped;
            }
        }

        if self.monthly_package_rank.as_deref() == Some(SUPERSTAR) {
            return SUPERSTAR_LABEL.to_string();
        }

        if let Some(rank) = set_value(&self.new_package_rank, NONE_SENTINEL) {
            return rank
                .replace("_PLUS", "+")
                .replace(SUPERSTAR, SUPERSTAR_LABEL)
                .replace("VIP_PLUS", "VIP+")
                .replace("MVP_PLUS", "MVP+");
        }

        if let Some(rank) = set_value(&self.package_rank, NONE_SENTINEL) {
            return rank
                .replace("_PLUS", "+")
                .replace("VIP_PLUS", "VIP+")
                .replace("MVP_PLUS", "MVP+");
        }

        if let Some(rank) = set_value(&self.rank, NORMAL_SENTINEL) {
            return rank.to_string();
        }

        NON_RANKED_LABEL.to_string()
    }

    pub fn rank_color(&self) -> Option<&str> {
        if self.monthly_package_rank.as_deref() == Some(SUPERSTAR) {
            return Some(SUPERSTAR_COLOR);
        }
        self.rank_plus_color.as_deref()
    }

    pub fn network_level(&self) -> f64 {
        network_level(self.network_exp)
    }
}

fn set_value<'a>(field: &'a Option<String>, sentinel: &str) -> Option<&'a str> {
    field.as_deref().filter(|value| *value != sentinel)
}

/// Remove `§x` formatting codes from a chat string.
pub fn strip_color_codes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c == COLOR_CODE_MARKER {
            match chars.peek() {
                Some(&next) if next != '\n' => {
                    chars.next();
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }

    out
}

/// Network level reached with `exp` cumulative experience.
///
/// Inverse of the leveling curve where level `n` costs
/// `10000 + (n - 1) * 2500` experience. Missing or non positive experience is
/// level 1.
pub fn network_level(exp: Option<f64>) -> f64 {
    const BASE: f64 = 10_000.0;
    const GROWTH: f64 = 2_500.0;

    let exp = match exp {
        Some(exp) if exp > 0.0 => exp,
        _ => return 1.0,
    };

    let reverse_pq_prefix = -(BASE - 0.5 * GROWTH) / GROWTH;
    let reverse_const = reverse_pq_prefix * reverse_pq_prefix;
    let growth_divides_2 = 2.0 / GROWTH;

    let level = (1.0 + reverse_pq_prefix + (reverse_const + growth_divides_2 * exp).sqrt()).floor();
    level.max(1.0)
}
