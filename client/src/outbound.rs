//! Builders for outbound intent messages.

use thiserror::Error;
use tracing::debug;

use punchline_shared::{ClientMsg, UserInfo};

use crate::events::SessionEvent;
use crate::selection::SelectionEntry;
use crate::session::Session;

/// Failure to turn local state into an outbound message. Nothing here is
/// fatal; the host surfaces it and the user tries again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutboundError {
    /// A selection entry points at a blank slot that no longer exists. The
    /// selection engine keeps indexes in range, so this is defensive.
    #[error("blank slot {index} is out of range (have {available})")]
    BlankOutOfRange { index: usize, available: usize },
    /// The judge has not picked a play yet.
    #[error("no play selected")]
    NoPlaySelected,
}

impl Session {
    /// Build the `c_playcards` submission from the current selection, in
    /// selection order: hand entries carry their catalog id, blank entries
    /// the `custom:` encoding of the slot's stored (already trimmed) text.
    ///
    /// On success the selection is cleared optimistically, the server's
    /// confirmation arrives separately as `s_cardsplayed`, and the returned
    /// event reports the clear.
    pub fn build_play_submission(
        &mut self,
    ) -> Result<(ClientMsg, SessionEvent), OutboundError> {
        let mut cards = Vec::with_capacity(self.selection.len());
        for entry in self.selection.entries() {
            match entry {
                SelectionEntry::Card(id) => cards.push(id.clone()),
                SelectionEntry::Blank(index) => {
                    let text = self.blank_texts.get(*index).ok_or(
                        OutboundError::BlankOutOfRange {
                            index: *index,
                            available: self.num_blanks,
                        },
                    )?;
                    cards.push(punchline_shared::CardId::custom(text));
                }
            }
        }
        debug!(cards = cards.len(), "built play submission");
        self.selection.clear();
        Ok((ClientMsg::PlayCards { cards }, SessionEvent::SelectionChanged))
    }

    /// Build the judge's `c_judgecards` pick from the tentative selection.
    pub fn build_judge_pick(&self) -> Result<ClientMsg, OutboundError> {
        let play_index = self.selected_play.ok_or(OutboundError::NoPlaySelected)?;
        Ok(ClientMsg::JudgeCards { play_index })
    }

    /// Build a `c_updateinfo` profile change request.
    pub fn build_profile_update(&self, name: &str) -> ClientMsg {
        ClientMsg::UpdateInfo {
            userinfo: UserInfo {
                name: name.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchline_shared::cards::{CardData, PackData};
    use punchline_shared::{CardId, LocalizedText, ServerMsg, Stage};

    fn playing_session(blanks: u32) -> Session {
        let mut session = Session::new();
        session.apply(ServerMsg::AllCards {
            packs: vec![PackData {
                id: "base".into(),
                name: "Base".into(),
                accent: "black".into(),
                cards: vec![
                    CardData {
                        id: CardId::from("b_1"),
                        content: LocalizedText::single("____"),
                        blanks,
                    },
                    CardData {
                        id: CardId::from("w_1"),
                        content: LocalizedText::single("a card"),
                        blanks: 1,
                    },
                ],
            }],
        });
        session.apply(ServerMsg::GameState {
            round: 1,
            stage: Stage::Playing,
            judge: 9,
            pending_players: vec![],
            black_card: Some(CardId::from("b_1")),
            plays: vec![],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        });
        session
    }

    #[test]
    fn play_submission_maps_selection_in_order() {
        let mut session = playing_session(2);
        session.apply(ServerMsg::Hand {
            hand: vec![CardId::from("w_1")],
            blanks: 1,
        });
        session.set_blank_text(0, "  hello  ");
        session.toggle_card(CardId::from("w_1"));
        session.toggle_blank(0);

        let (msg, event) = session.build_play_submission().unwrap();
        assert_eq!(event, SessionEvent::SelectionChanged);
        match msg {
            ClientMsg::PlayCards { cards } => {
                assert_eq!(cards[0], CardId::from("w_1"));
                assert_eq!(cards[1], CardId::from("custom: hello"));
            }
            other => panic!("wrong message: {other:?}"),
        }
        // Cleared optimistically, before any server confirmation.
        assert!(session.selection.is_empty());
    }

    #[test]
    fn custom_submission_round_trips_through_resolver() {
        let mut session = playing_session(1);
        session.apply(ServerMsg::Hand {
            hand: vec![],
            blanks: 1,
        });
        session.set_blank_text(0, "hello");
        session.toggle_blank(0);

        let (msg, _) = session.build_play_submission().unwrap();
        let cards = match msg {
            ClientMsg::PlayCards { cards } => cards,
            other => panic!("wrong message: {other:?}"),
        };
        let card = session.catalog.resolve(&cards[0]).unwrap();
        assert_eq!(card.content_for("en"), "hello");
    }

    #[test]
    fn stale_blank_entry_is_rejected_before_send() {
        let mut session = playing_session(1);
        session.apply(ServerMsg::Hand {
            hand: vec![],
            blanks: 2,
        });
        session.toggle_blank(1);
        // The message handlers keep blank indexes in range, so force the
        // inconsistent state directly to exercise the guard.
        session.blank_texts.truncate(1);
        session.num_blanks = 1;

        let err = session.build_play_submission().unwrap_err();
        assert_eq!(
            err,
            OutboundError::BlankOutOfRange {
                index: 1,
                available: 1
            }
        );
        // A failed build leaves the selection alone.
        assert_eq!(session.selection.len(), 1);
    }

    #[test]
    fn judge_pick_wraps_selected_index() {
        let mut session = Session::new();
        assert_eq!(
            session.build_judge_pick().unwrap_err(),
            OutboundError::NoPlaySelected
        );

        session.apply(ServerMsg::ClientInfo {
            player_id: punchline_shared::PlayerId(1),
            player_name: "You".into(),
        });
        session.apply(ServerMsg::GameState {
            round: 1,
            stage: Stage::Judging,
            judge: 1,
            pending_players: vec![],
            black_card: None,
            plays: vec![vec![CardId::from("w_1")], vec![CardId::from("w_2")]],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        });
        session.select_play(1);
        assert_eq!(
            session.build_judge_pick().unwrap(),
            ClientMsg::JudgeCards { play_index: 1 }
        );
    }

    #[test]
    fn profile_update_wraps_requested_name() {
        let session = Session::new();
        assert_eq!(
            session.build_profile_update("Dana"),
            ClientMsg::UpdateInfo {
                userinfo: UserInfo {
                    name: "Dana".into()
                }
            }
        );
    }
}
