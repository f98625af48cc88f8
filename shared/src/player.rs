//! Player identities and the public roster record.

use serde::{Deserialize, Serialize};

/// Server-assigned player identifier.
///
/// The server uses `-1` (or omits the field) where no player applies, e.g.
/// `winning_player` outside round end. [`PlayerId::from_raw`] normalizes that
/// sentinel away so the rest of the client can work with `Option<PlayerId>`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub i64);

impl PlayerId {
    /// Convert a raw wire value to a real id, dropping the `-1` sentinel.
    pub fn from_raw(raw: i64) -> Option<PlayerId> {
        (raw >= 0).then_some(PlayerId(raw))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Public view of one player, as carried by `s_players`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPublic {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_normalization() {
        assert_eq!(PlayerId::from_raw(-1), None);
        assert_eq!(PlayerId::from_raw(0), Some(PlayerId(0)));
        assert_eq!(PlayerId::from_raw(7), Some(PlayerId(7)));
    }
}
