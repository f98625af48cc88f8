//! Wire protocol for the punchline party card game.
//!
//! Everything the client and server exchange over the persistent JSON channel
//! lives here: message envelopes, card and pack records, player identities,
//! game stages and end-of-game results. The crate has no game logic of its
//! own; the client engine (`punchline-client`) folds these messages into its
//! session model.

pub mod cards;
pub mod game;
pub mod messages;
pub mod player;

pub use cards::{CardColor, CardData, CardId, LocalizedText, PackData};
pub use game::{GameResults, Stage, Trophy, TrophyWinner};
pub use messages::{ClientMsg, ServerMsg, UserInfo};
pub use player::{PlayerId, PlayerPublic};

/// Locale used when no better match exists in a localized string table.
pub const DEFAULT_LOCALE: &str = "en";
