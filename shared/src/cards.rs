//! Card identifiers, wire card records, and localized card text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::DEFAULT_LOCALE;

/// Placeholder shown when no displayable text exists for a card.
pub const MISSING_TEXT: &str = "???";

/// Which side of the table a card belongs to.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    /// Response card played by non-judge players.
    White,
    /// The round's fill-in-the-blank prompt card.
    Black,
}

/// Opaque card identifier as it appears on the wire.
///
/// Two conventions are layered on top of the raw string: identifiers starting
/// with `b_` are black (prompt) cards, and identifiers matching the
/// `custom:` form carry their own free text instead of referring to the
/// catalog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        CardId(id.into())
    }

    /// Encode a free-text card for submission.
    pub fn custom(text: &str) -> Self {
        CardId(format!("custom: {text}"))
    }

    /// Color implied by the `b_` prefix convention.
    pub fn color(&self) -> CardColor {
        if self.0.starts_with("b_") {
            CardColor::Black
        } else {
            CardColor::White
        }
    }

    /// Parse the `custom:` free-text convention.
    ///
    /// Accepts optional surrounding whitespace (including leading newlines),
    /// the literal `custom:` (case-sensitive), optional whitespace, then the
    /// remainder of that line with trailing whitespace stripped. Returns
    /// `None` for ordinary catalog identifiers. An empty remainder is
    /// `Some("")`; displaying it as a placeholder is the resolver's job.
    pub fn custom_text(&self) -> Option<&str> {
        let rest = self.0.trim_start().strip_prefix("custom:")?;
        let rest = rest.trim_start_matches([' ', '\t']);
        let line = rest.split('\n').next().unwrap_or("");
        Some(line.trim_end())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId(s.to_string())
    }
}

/// Locale tag → display text, with graceful fallback.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalizedText(pub BTreeMap<String, String>);

impl LocalizedText {
    /// Single-locale text under the default locale. Used for synthesized
    /// free-text cards.
    pub fn single(text: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(DEFAULT_LOCALE.to_string(), text.into());
        LocalizedText(map)
    }

    /// Resolve text for `locale`: exact tag, then the bare language (tag up
    /// to the first `-`), then the default locale, then any entry at all.
    pub fn get(&self, locale: &str) -> &str {
        if let Some(text) = self.0.get(locale) {
            return text;
        }
        if let Some((lang, _)) = locale.split_once('-') {
            if let Some(text) = self.0.get(lang) {
                return text;
            }
        }
        if let Some(text) = self.0.get(DEFAULT_LOCALE) {
            return text;
        }
        self.0.values().next().map(String::as_str).unwrap_or(MISSING_TEXT)
    }
}

/// Card record inside an `s_allcards` pack.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardData {
    pub id: CardId,
    #[serde(default)]
    pub content: LocalizedText,
    /// Pick count; only meaningful for black cards.
    #[serde(default = "default_blanks")]
    pub blanks: u32,
}

fn default_blanks() -> u32 {
    1
}

/// One card pack as delivered by `s_allcards`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PackData {
    pub id: String,
    pub name: String,
    /// Ribbon accent color for the pack; defaults to black.
    #[serde(default = "default_accent")]
    pub accent: String,
    pub cards: Vec<CardData>,
}

fn default_accent() -> String {
    "black".to_string()
}
