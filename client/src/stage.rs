//! Stage transitions, judge-role derivation, and the derived status line.

use punchline_shared::{CardId, GameResults, PlayerId, Stage};

use crate::events::SessionEvent;
use crate::session::Session;

/// Status summary for the status bar, derived from the session. The render
/// layer owns turning these into (localized) strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    WaitingForPlayers,
    Round(u32),
    /// Judging and the local player is the judge.
    ChooseBestPlay,
    /// Judging and somebody else is the judge.
    JudgeDeciding,
    YouWinRound,
    RoundWonBy(PlayerId),
    /// Round ended but the winner is gone from the roster.
    NobodyWinsRound,
    GameOver,
}

impl Session {
    /// Fold an `s_gamestate` snapshot. The message is a full snapshot, never
    /// a delta: every authoritative field is overwritten. Round and stage
    /// edges are detected against the previous values before overwriting;
    /// both may fire from a single snapshot.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn apply_game_state(
        &mut self,
        round: u32,
        stage: Stage,
        judge: i64,
        pending_players: Vec<PlayerId>,
        black_card: Option<CardId>,
        plays: Vec<Vec<CardId>>,
        winning_player: i64,
        winning_play: i64,
        game_results: Option<GameResults>,
        events: &mut Vec<SessionEvent>,
    ) {
        let round_changed = self.round != round;
        let stage_changed = self.stage != stage;

        self.round = round;
        self.stage = stage;
        self.pending_players = pending_players;
        self.judge_id = PlayerId::from_raw(judge);
        self.round_plays = plays;
        self.winning_player = PlayerId::from_raw(winning_player);
        self.winning_play = (winning_play >= 0).then_some(winning_play as usize);
        self.game_results = game_results;
        self.is_waiting_on_player = match self.local_player_id {
            Some(id) => self.pending_players.contains(&id),
            None => false,
        };

        self.update_black_card(black_card);
        // A new prompt may shrink the pick count under an existing
        // selection; evict oldest entries so the capacity bound holds after
        // every message.
        if self.selection.truncate_front(self.selection_capacity()) {
            events.push(SessionEvent::SelectionChanged);
        }
        self.refresh_judge_role();

        if round_changed {
            events.push(SessionEvent::RoundChanged);
        }
        if stage_changed {
            events.push(SessionEvent::StageChanged(stage));
        }
    }

    /// Derive the sticky judge flag from the latest snapshot.
    ///
    /// Deliberately asymmetric, matching the original client: acquiring the
    /// role resets the judge's pick selection, retaining it across repeated
    /// snapshots resets nothing, and the role is cleared only when a snapshot
    /// names a different judge.
    fn refresh_judge_role(&mut self) {
        let self_is_judge = matches!(
            (self.judge_id, self.local_player_id),
            (Some(judge), Some(me)) if judge == me
        );
        if !self.is_judge {
            if self_is_judge {
                self.is_judge = true;
                self.selected_play = None;
            }
        } else if !self_is_judge {
            self.is_judge = false;
        }
    }

    /// The status line implied by the current session state.
    pub fn status(&self) -> Status {
        match self.stage {
            Stage::GameStarting => Status::WaitingForPlayers,
            Stage::Playing => Status::Round(self.round),
            Stage::Judging => {
                if self.is_judge {
                    Status::ChooseBestPlay
                } else {
                    Status::JudgeDeciding
                }
            }
            Stage::RoundEnd => match self.winning_player {
                Some(winner) if self.local_player_id == Some(winner) => Status::YouWinRound,
                Some(winner) if self.player(winner).is_some() => Status::RoundWonBy(winner),
                _ => Status::NobodyWinsRound,
            },
            Stage::GameEnd => Status::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use punchline_shared::{PlayerPublic, ServerMsg};

    fn snapshot(round: u32, stage: Stage, judge: i64) -> ServerMsg {
        ServerMsg::GameState {
            round,
            stage,
            judge,
            pending_players: vec![],
            black_card: None,
            plays: vec![],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        }
    }

    fn session_as(id: i64) -> Session {
        let mut session = Session::new();
        session.apply(ServerMsg::ClientInfo {
            player_id: PlayerId(id),
            player_name: "You".into(),
        });
        session
    }

    #[test]
    fn round_and_stage_edges_fire_together() {
        let mut session = session_as(1);
        let events = session.apply(snapshot(1, Stage::Playing, 2));
        assert!(events.contains(&SessionEvent::RoundChanged));
        assert!(events.contains(&SessionEvent::StageChanged(Stage::Playing)));

        // Stage-only change.
        let events = session.apply(snapshot(1, Stage::Judging, 2));
        assert!(!events.contains(&SessionEvent::RoundChanged));
        assert!(events.contains(&SessionEvent::StageChanged(Stage::Judging)));
    }

    #[test]
    fn identical_snapshot_is_idempotent() {
        let mut session = session_as(1);
        session.apply(snapshot(2, Stage::Playing, 2));
        let before_judge = session.is_judge;
        let before_round = session.round;

        let events = session.apply(snapshot(2, Stage::Playing, 2));
        assert!(events.is_empty());
        assert_eq!(session.is_judge, before_judge);
        assert_eq!(session.round, before_round);
    }

    #[test]
    fn judge_acquisition_resets_pick_selection() {
        let mut session = session_as(1);
        session.apply(snapshot(1, Stage::Playing, 1));
        assert!(session.is_judge);
        assert_eq!(session.selected_play, None);
    }

    #[test]
    fn judge_retention_preserves_pick_selection() {
        let mut session = session_as(1);
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
        assert!(session.is_judge);
        session.select_play(1);
        assert_eq!(session.selected_play, Some(1));

        // Same judge again, twice: the in-progress pick survives.
        for _ in 0..2 {
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
            assert!(session.is_judge);
            assert_eq!(session.selected_play, Some(1));
        }
    }

    #[test]
    fn judge_role_clears_on_contradicting_snapshot() {
        let mut session = session_as(1);
        session.apply(snapshot(1, Stage::Playing, 1));
        assert!(session.is_judge);

        session.apply(snapshot(2, Stage::Playing, 2));
        assert!(!session.is_judge);
    }

    #[test]
    fn no_judge_role_without_identity() {
        let mut session = Session::new();
        // judge = -1 and no local id must not make us judge.
        session.apply(snapshot(1, Stage::Playing, -1));
        assert!(!session.is_judge);
    }

    #[test]
    fn waiting_flag_tracks_pending_membership() {
        let mut session = session_as(5);
        session.apply(ServerMsg::GameState {
            round: 1,
            stage: Stage::Playing,
            judge: 2,
            pending_players: vec![PlayerId(5), PlayerId(6)],
            black_card: None,
            plays: vec![],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        });
        assert!(session.is_waiting_on_player);

        session.apply(ServerMsg::GameState {
            round: 1,
            stage: Stage::Playing,
            judge: 2,
            pending_players: vec![PlayerId(6)],
            black_card: None,
            plays: vec![],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        });
        assert!(!session.is_waiting_on_player);
    }

    #[test]
    fn judge_pick_requires_judging_stage() {
        let mut session = session_as(1);
        session.apply(ServerMsg::GameState {
            round: 1,
            stage: Stage::Playing,
            judge: 1,
            pending_players: vec![],
            black_card: None,
            plays: vec![vec![CardId::from("w_1")]],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        });
        assert!(session.select_play(0).is_none());

        session.apply(ServerMsg::GameState {
            round: 1,
            stage: Stage::Judging,
            judge: 1,
            pending_players: vec![],
            black_card: None,
            plays: vec![vec![CardId::from("w_1")]],
            winning_player: -1,
            winning_play: -1,
            game_results: None,
        });
        assert_eq!(session.select_play(0), Some(SessionEvent::JudgePickChanged));
        assert!(session.select_play(7).is_none());
    }

    #[test]
    fn status_round_end_variants() {
        let mut session = session_as(1);
        session.apply(ServerMsg::Players {
            players: vec![
                PlayerPublic {
                    id: PlayerId(1),
                    name: "You".into(),
                    score: 0,
                },
                PlayerPublic {
                    id: PlayerId(2),
                    name: "Ben".into(),
                    score: 3,
                },
            ],
        });

        let round_end = |winner: i64| ServerMsg::GameState {
            round: 4,
            stage: Stage::RoundEnd,
            judge: 2,
            pending_players: vec![],
            black_card: None,
            plays: vec![],
            winning_player: winner,
            winning_play: -1,
            game_results: None,
        };

        let mut s = session.clone();
        s.apply(round_end(1));
        assert_eq!(s.status(), Status::YouWinRound);

        let mut s = session.clone();
        s.apply(round_end(2));
        assert_eq!(s.status(), Status::RoundWonBy(PlayerId(2)));

        // Winner no longer in the roster.
        let mut s = session.clone();
        s.apply(round_end(9));
        assert_eq!(s.status(), Status::NobodyWinsRound);

        session.apply(snapshot(1, Stage::GameStarting, -1));
        assert_eq!(session.status(), Status::WaitingForPlayers);
    }
}
