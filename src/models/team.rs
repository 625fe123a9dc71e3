//! Team (country or club) and its display glyph.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in groups, matches and lookups).
pub type TeamId = Uuid;

/// Flag used when the user does not supply one.
pub const DEFAULT_FLAG: &str = "🏳️";

/// Whether a team represents a country or a club.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamKind {
    #[default]
    Country,
    Club,
}

/// What is shown next to a team name: a short emoji/text glyph or an image.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Glyph {
    Emoji { value: String },
    Image { url: String },
}

impl Glyph {
    /// Classify raw flag input once, at creation time.
    ///
    /// `http://`, `https://` and `data:` references are images; anything else is
    /// kept as text. Blank input becomes [`DEFAULT_FLAG`].
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Glyph::Emoji {
                value: DEFAULT_FLAG.to_string(),
            };
        }
        let is_image = ["http://", "https://", "data:"]
            .iter()
            .any(|prefix| raw.starts_with(prefix));
        if is_image {
            Glyph::Image {
                url: raw.to_string(),
            }
        } else {
            Glyph::Emoji {
                value: raw.to_string(),
            }
        }
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Glyph::parse("")
    }
}

/// A team taking part in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub flag: Glyph,
    pub kind: TeamKind,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>, flag: Glyph, kind: TeamKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            flag,
            kind,
        }
    }

    /// Shorthand for a country team with the default flag.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Glyph::default(), TeamKind::Country)
    }
}
