//! Game stages and end-of-game results.

use serde::{Deserialize, Serialize};

use crate::cards::LocalizedText;
use crate::player::PlayerId;

/// Stage of the current game, as pushed by `s_gamestate`.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    GameStarting,
    Playing,
    Judging,
    RoundEnd,
    GameEnd,
}

/// One end-of-game trophy award.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trophy {
    pub id: String,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub desc: LocalizedText,
}

/// Trophies awarded to a single player.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrophyWinner {
    pub id: PlayerId,
    #[serde(default)]
    pub trophies: Vec<Trophy>,
}

/// Final results, present in `s_gamestate` only at game end.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResults {
    #[serde(default)]
    pub winners: Vec<PlayerId>,
    #[serde(default)]
    pub trophy_winners: Vec<TrophyWinner>,
}
