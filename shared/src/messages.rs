//! Client-server message envelopes.
//!
//! Every message is a JSON object tagged by its `msg` field; server kinds are
//! prefixed `s_`, client kinds `c_`. Inbound kinds the client does not know
//! deserialize to [`ServerMsg::Unknown`] and are ignored rather than treated
//! as errors.

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, PackData};
use crate::game::{GameResults, Stage};
use crate::player::{PlayerId, PlayerPublic};

fn no_player() -> i64 {
    -1
}

/// Messages pushed by the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "msg")]
pub enum ServerMsg {
    /// Wholesale replacement of the card catalog and pack metadata.
    #[serde(rename = "s_allcards")]
    AllCards { packs: Vec<PackData> },

    /// Full snapshot of the authoritative game state. Never a delta; the
    /// client overwrites everything this carries.
    #[serde(rename = "s_gamestate")]
    GameState {
        #[serde(default)]
        round: u32,
        #[serde(default)]
        stage: Stage,
        /// Raw judge id; `-1` while no judge is assigned.
        #[serde(default = "no_player")]
        judge: i64,
        #[serde(default)]
        pending_players: Vec<PlayerId>,
        #[serde(default)]
        black_card: Option<CardId>,
        #[serde(default)]
        plays: Vec<Vec<CardId>>,
        /// Raw winning player id; `-1` outside round end.
        #[serde(default = "no_player")]
        winning_player: i64,
        /// Raw index into `plays`; `-1` outside round end.
        #[serde(default = "no_player")]
        winning_play: i64,
        #[serde(default)]
        game_results: Option<GameResults>,
    },

    /// Full roster replacement.
    #[serde(rename = "s_players")]
    Players { players: Vec<PlayerPublic> },

    /// The local player's server-assigned identity.
    #[serde(rename = "s_clientinfo")]
    ClientInfo {
        player_id: PlayerId,
        #[serde(default)]
        player_name: String,
    },

    /// The local player's hand and free-text slot count.
    #[serde(rename = "s_hand")]
    Hand {
        #[serde(default)]
        hand: Vec<CardId>,
        #[serde(default)]
        blanks: u32,
    },

    /// Confirmation of the identifiers the local player has committed this
    /// round.
    #[serde(rename = "s_cardsplayed")]
    CardsPlayed {
        #[serde(default)]
        selection: Vec<CardId>,
    },

    /// The server refused an action. Display-only; nothing is rolled back.
    #[serde(rename = "s_rejectclient")]
    RejectClient {
        #[serde(default)]
        reason: String,
        #[serde(default)]
        desc: String,
    },

    /// Any message kind this client does not understand.
    #[serde(other)]
    Unknown,
}

/// Requested profile fields inside `c_updateinfo`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub name: String,
}

/// Messages the client sends.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "msg")]
pub enum ClientMsg {
    /// Submit the local play for the round, in selection order.
    #[serde(rename = "c_playcards")]
    PlayCards { cards: Vec<CardId> },

    /// Judge's pick of the winning play.
    #[serde(rename = "c_judgecards")]
    JudgeCards { play_index: usize },

    /// Request a profile change.
    #[serde(rename = "c_updateinfo")]
    UpdateInfo { userinfo: UserInfo },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_allcards() {
        let raw = json!({
            "msg": "s_allcards",
            "packs": [{
                "id": "base",
                "name": "Base Pack",
                "accent": "gold",
                "cards": [
                    {"id": "w_1", "content": {"en": "A white card"}},
                    {"id": "b_1", "content": {"en": "A prompt with ____."}, "blanks": 2}
                ]
            }]
        });
        let msg: ServerMsg = serde_json::from_value(raw).unwrap();
        match msg {
            ServerMsg::AllCards { packs } => {
                assert_eq!(packs.len(), 1);
                assert_eq!(packs[0].cards.len(), 2);
                assert_eq!(packs[0].cards[0].blanks, 1);
                assert_eq!(packs[0].cards[1].blanks, 2);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn parses_gamestate_with_sentinels() {
        let raw = json!({
            "msg": "s_gamestate",
            "round": 3,
            "stage": "playing",
            "judge": 2,
            "pending_players": [1, 4],
            "black_card": "b_77",
            "plays": [["w_1", "custom: hi"]],
            "winning_player": -1,
            "winning_play": -1
        });
        let msg: ServerMsg = serde_json::from_value(raw).unwrap();
        match msg {
            ServerMsg::GameState {
                round,
                stage,
                judge,
                pending_players,
                black_card,
                winning_player,
                game_results,
                ..
            } => {
                assert_eq!(round, 3);
                assert_eq!(stage, Stage::Playing);
                assert_eq!(PlayerId::from_raw(judge), Some(PlayerId(2)));
                assert_eq!(pending_players, vec![PlayerId(1), PlayerId(4)]);
                assert_eq!(black_card, Some(CardId::from("b_77")));
                assert_eq!(PlayerId::from_raw(winning_player), None);
                assert!(game_results.is_none());
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn parses_game_results() {
        let raw = json!({
            "msg": "s_gamestate",
            "round": 9,
            "stage": "game_end",
            "judge": -1,
            "pending_players": [],
            "plays": [],
            "game_results": {
                "winners": [2],
                "trophy_winners": [
                    {"id": 2, "trophies": [{"id": "t_comedian", "name": {"en": "Comedian"}, "desc": {"en": "Funniest plays"}}]}
                ]
            }
        });
        let msg: ServerMsg = serde_json::from_value(raw).unwrap();
        match msg {
            ServerMsg::GameState { game_results, .. } => {
                let results = game_results.unwrap();
                assert_eq!(results.winners, vec![PlayerId(2)]);
                assert_eq!(results.trophy_winners[0].trophies[0].id, "t_comedian");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_tolerated() {
        let msg: ServerMsg =
            serde_json::from_value(json!({"msg": "s_shinynewthing", "payload": 42})).unwrap();
        assert!(matches!(msg, ServerMsg::Unknown));
    }

    #[test]
    fn outbound_wire_shape() {
        let play = ClientMsg::PlayCards {
            cards: vec![CardId::from("w_1"), CardId::custom("hello")],
        };
        let v = serde_json::to_value(&play).unwrap();
        assert_eq!(v["msg"], "c_playcards");
        assert_eq!(v["cards"][1], "custom: hello");

        let pick = ClientMsg::JudgeCards { play_index: 2 };
        let v = serde_json::to_value(&pick).unwrap();
        assert_eq!(v["msg"], "c_judgecards");
        assert_eq!(v["play_index"], 2);

        let info = ClientMsg::UpdateInfo {
            userinfo: UserInfo { name: "Ann".into() },
        };
        let v = serde_json::to_value(&info).unwrap();
        assert_eq!(v["msg"], "c_updateinfo");
        assert_eq!(v["userinfo"]["name"], "Ann");
    }
}
