//! Card catalog and played-identifier resolution.

use std::collections::HashMap;

use punchline_shared::cards::MISSING_TEXT;
use punchline_shared::{CardColor, CardId, LocalizedText, PackData};

/// A displayable card. Either catalog-backed (looked up by id) or synthesized
/// from a `custom:` identifier (always white, single-locale content).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: CardId,
    pub color: CardColor,
    pub content: LocalizedText,
    /// Pick count; meaningful only for black cards.
    pub blanks: u32,
    /// Pack id, for the ribbon; `None` for synthesized cards.
    pub pack: Option<String>,
}

impl Card {
    pub fn content_for(&self, locale: &str) -> &str {
        self.content.get(locale)
    }
}

/// Pack metadata, keyed by pack id alongside the card maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackInfo {
    pub id: String,
    pub name: String,
    pub accent: String,
}

/// Lookup tables for all known cards and packs.
///
/// Immutable between catalog messages: `s_allcards` replaces everything
/// wholesale, there is no partial update path.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    white: HashMap<CardId, Card>,
    black: HashMap<CardId, Card>,
    packs: HashMap<String, PackInfo>,
}

impl Catalog {
    /// Rebuild the whole catalog from an `s_allcards` pack list.
    pub fn load(&mut self, packs: Vec<PackData>) {
        self.white.clear();
        self.black.clear();
        self.packs.clear();

        for pack in packs {
            self.packs.insert(
                pack.id.clone(),
                PackInfo {
                    id: pack.id.clone(),
                    name: pack.name,
                    accent: pack.accent,
                },
            );
            for data in pack.cards {
                let color = data.id.color();
                let card = Card {
                    id: data.id.clone(),
                    color,
                    content: data.content,
                    blanks: data.blanks,
                    pack: Some(pack.id.clone()),
                };
                match color {
                    CardColor::Black => self.black.insert(data.id, card),
                    CardColor::White => self.white.insert(data.id, card),
                };
            }
        }
    }

    /// Resolve a played-card identifier to a displayable card.
    ///
    /// `custom:` identifiers are self-contained and never touch the catalog;
    /// an empty capture displays as a placeholder. Ordinary identifiers look
    /// up the white map and resolve to `None` when absent (the render layer
    /// shows its own placeholder for those).
    pub fn resolve(&self, id: &CardId) -> Option<Card> {
        if let Some(text) = id.custom_text() {
            let content = if text.is_empty() { MISSING_TEXT } else { text };
            return Some(Card {
                id: id.clone(),
                color: CardColor::White,
                content: LocalizedText::single(content),
                blanks: 1,
                pack: None,
            });
        }
        self.white.get(id).cloned()
    }

    pub fn white_card(&self, id: &CardId) -> Option<&Card> {
        self.white.get(id)
    }

    pub fn black_card(&self, id: &CardId) -> Option<&Card> {
        self.black.get(id)
    }

    pub fn pack(&self, id: &str) -> Option<&PackInfo> {
        self.packs.get(id)
    }

    pub fn white_count(&self) -> usize {
        self.white.len()
    }

    pub fn black_count(&self) -> usize {
        self.black.len()
    }
}
