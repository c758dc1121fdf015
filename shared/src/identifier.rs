use std::fmt;

use serde::Deserialize;
use uuid::Uuid;

/// Stable 32 hex character account identifier, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct IdentityKey(String);

impl IdentityKey {
    pub const LEN: usize = 32;

    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() == Self::LEN && raw.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(Self(raw.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        // Always 32 hex digits, so this cannot fail.
        Uuid::parse_str(&self.0).unwrap_or_default()
    }

    /// Dashed 8-4-4-4-12 representation.
    pub fn hyphenated(&self) -> String {
        self.to_uuid().hyphenated().to_string()
    }
}

impl TryFrom<String> for IdentityKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("`{value}` is not a 32 character hex identity key"))
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human chosen player name as accepted by the identity API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 16;

    pub fn parse(raw: &str) -> Option<Self> {
        let len = raw.chars().count();
        let valid_chars = raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

        if (Self::MIN_LEN..=Self::MAX_LEN).contains(&len) && valid_chars {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of classifying a raw search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Key(IdentityKey),
    Name(DisplayName),
    /// Neither format matched. Callers must fail fast instead of resolving.
    Unrecognized(String),
}

impl Identifier {
    /// Classify without any network access. Identity keys take precedence.
    pub fn classify(raw: &str) -> Self {
        if let Some(key) = IdentityKey::parse(raw) {
            return Self::Key(key);
        }
        match DisplayName::parse(raw) {
            Some(name) => Self::Name(name),
            None => Self::Unrecognized(raw.to_string()),
        }
    }
}
