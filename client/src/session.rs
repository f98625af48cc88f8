//! The session model and the inbound message router.

use tracing::{debug, warn};

use punchline_shared::{
    CardId, GameResults, PlayerId, PlayerPublic, ServerMsg, Stage, Trophy,
};

use crate::catalog::{Card, Catalog};
use crate::events::SessionEvent;
use crate::selection::{Selection, SelectionEntry};

/// Derived roster row for the player list.
#[derive(Clone, Copy, Debug)]
pub struct RosterEntry<'a> {
    pub player: &'a PlayerPublic,
    pub is_judge: bool,
    pub is_you: bool,
    pub is_pending: bool,
}

/// The whole client-side session: one mutable value owned by the host,
/// mirroring authoritative server state plus the local player's tentative
/// inputs.
///
/// Fields are public for the render layer to read; all mutation goes through
/// [`Session::apply`] and the local interaction methods, which keep the
/// cross-field invariants intact (selection capacity, blank text sizing,
/// sticky judge role).
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub catalog: Catalog,

    /// Assigned once by `s_clientinfo`; immutable afterward.
    pub local_player_id: Option<PlayerId>,
    pub local_player_name: String,
    pub score: i32,

    /// Replaced wholesale by each `s_players`. Ranking is derived, never
    /// stored.
    pub roster: Vec<PlayerPublic>,

    pub round: u32,
    pub stage: Stage,
    pub judge_id: Option<PlayerId>,
    /// Derived, sticky judge flag; see the stage module for the asymmetry.
    pub is_judge: bool,
    pub pending_players: Vec<PlayerId>,
    pub is_waiting_on_player: bool,

    /// Catalog ids of white cards currently held.
    pub hand: Vec<CardId>,
    pub num_blanks: usize,
    /// Always the same length as `num_blanks`; texts are stored trimmed.
    pub blank_texts: Vec<String>,

    pub selection: Selection,
    /// Server-confirmed identifiers committed this round.
    pub played_cards: Vec<CardId>,

    pub current_black_card: Option<Card>,
    pub round_plays: Vec<Vec<CardId>>,
    pub winning_player: Option<PlayerId>,
    pub winning_play: Option<usize>,
    /// The judge's tentative pick among `round_plays`.
    pub selected_play: Option<usize>,
    pub game_results: Option<GameResults>,

    /// Last server rejection, for display. Not cleared automatically.
    pub last_reject_reason: String,
    pub last_reject_desc: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the display name from external storage at startup.
    pub fn seed_local_name(&mut self, name: impl Into<String>) -> Option<SessionEvent> {
        self.set_local_name(name.into(), false)
    }

    /// Change the display name. `persist` tells the host whether to write the
    /// name back to its store; server echoes pass `false`.
    pub fn set_local_name(&mut self, name: String, persist: bool) -> Option<SessionEvent> {
        if name == self.local_player_name {
            return None;
        }
        self.local_player_name = name;
        Some(SessionEvent::NameChanged { persist })
    }

    /// Fold one inbound message into the session. Synchronous and
    /// run-to-completion: by the time this returns, every derived field is
    /// consistent and the returned events describe what changed.
    pub fn apply(&mut self, msg: ServerMsg) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match msg {
            ServerMsg::AllCards { packs } => {
                debug!(packs = packs.len(), "replacing card catalog");
                self.catalog.load(packs);
            }
            ServerMsg::GameState {
                round,
                stage,
                judge,
                pending_players,
                black_card,
                plays,
                winning_player,
                winning_play,
                game_results,
            } => {
                self.apply_game_state(
                    round,
                    stage,
                    judge,
                    pending_players,
                    black_card,
                    plays,
                    winning_player,
                    winning_play,
                    game_results,
                    &mut events,
                );
            }
            ServerMsg::Players { players } => {
                self.apply_players(players, &mut events);
            }
            ServerMsg::ClientInfo {
                player_id,
                player_name,
            } => {
                match self.local_player_id {
                    None => self.local_player_id = Some(player_id),
                    Some(existing) if existing != player_id => {
                        warn!(%existing, %player_id, "ignoring changed local player id");
                    }
                    Some(_) => {}
                }
                // The render layer repaints the score field once identity is
                // known, even though this message carries no score.
                events.push(SessionEvent::ScoreChanged);
                if let Some(event) = self.set_local_name(player_name, false) {
                    events.push(event);
                }
            }
            ServerMsg::Hand { hand, blanks } => {
                debug!(cards = hand.len(), blanks, "hand replaced");
                self.hand = hand;
                self.resize_blank_texts(blanks as usize);
                // A shrinking blank count may leave selected blank slots
                // pointing past the end; drop those entries.
                if self.selection.retain_valid_blanks(self.num_blanks) {
                    events.push(SessionEvent::SelectionChanged);
                }
            }
            ServerMsg::CardsPlayed { selection } => {
                self.played_cards = selection;
                events.push(SessionEvent::PlayedCardsChanged);
            }
            ServerMsg::RejectClient { reason, desc } => {
                warn!(%reason, "rejected by server");
                self.last_reject_reason = reason;
                self.last_reject_desc = desc;
                events.push(SessionEvent::Rejected);
            }
            ServerMsg::Unknown => {}
        }
        events
    }

    fn apply_players(&mut self, players: Vec<PlayerPublic>, events: &mut Vec<SessionEvent>) {
        self.roster = players;
        if let Some(id) = self.local_player_id {
            if let Some(me) = self.roster.iter().find(|p| p.id == id) {
                if me.score != self.score {
                    self.score = me.score;
                    events.push(SessionEvent::ScoreChanged);
                }
            }
        }
        events.push(SessionEvent::RosterChanged);
    }

    /// Resize `blank_texts` to `blanks`, preserving existing entries by
    /// position: extra slots get empty strings, excess slots are truncated
    /// from the end.
    fn resize_blank_texts(&mut self, blanks: usize) {
        self.num_blanks = blanks;
        self.blank_texts.resize(blanks, String::new());
    }

    /// Replace the prompt card only when its id actually changed.
    pub(crate) fn update_black_card(&mut self, id: Option<CardId>) {
        if self.current_black_card.as_ref().map(|c| &c.id) == id.as_ref() {
            return;
        }
        self.current_black_card = id.and_then(|id| self.catalog.black_card(&id).cloned());
    }

    /// Pick count of the current prompt; 0 with no prompt on the table.
    pub fn selection_capacity(&self) -> usize {
        self.current_black_card
            .as_ref()
            .map(|c| c.blanks as usize)
            .unwrap_or(0)
    }

    /// Toggle a hand card in the tentative selection.
    pub fn toggle_card(&mut self, id: CardId) -> Option<SessionEvent> {
        self.toggle_entry(SelectionEntry::Card(id))
    }

    /// Toggle a blank slot in the tentative selection. Out-of-range indexes
    /// are ignored.
    pub fn toggle_blank(&mut self, index: usize) -> Option<SessionEvent> {
        if index >= self.num_blanks {
            return None;
        }
        self.toggle_entry(SelectionEntry::Blank(index))
    }

    fn toggle_entry(&mut self, entry: SelectionEntry) -> Option<SessionEvent> {
        let capacity = self.selection_capacity();
        self.selection
            .toggle(entry, capacity)
            .then_some(SessionEvent::SelectionChanged)
    }

    /// Store a blank slot's text, trimmed at storage time.
    pub fn set_blank_text(&mut self, index: usize, text: &str) {
        if let Some(slot) = self.blank_texts.get_mut(index) {
            *slot = text.trim().to_string();
        }
    }

    /// Whether the selection exactly fills the prompt and may be submitted.
    pub fn can_submit_play(&self) -> bool {
        self.current_black_card.is_some() && self.selection.len() == self.selection_capacity()
    }

    /// Whether the local player may pick a winning play right now.
    pub fn can_judge(&self) -> bool {
        self.is_judge && self.stage == Stage::Judging
    }

    /// Judge's tentative pick of a play. Ignored outside judging or for
    /// non-judges.
    pub fn select_play(&mut self, index: usize) -> Option<SessionEvent> {
        if !self.can_judge() || index >= self.round_plays.len() {
            return None;
        }
        self.selected_play = Some(index);
        Some(SessionEvent::JudgePickChanged)
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerPublic> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Roster sorted by score descending. Recomputed on demand, never stored.
    pub fn ranked_players(&self) -> Vec<&PlayerPublic> {
        let mut ranked: Vec<&PlayerPublic> = self.roster.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Ranked roster annotated with the flags the player list renders.
    pub fn roster_entries(&self) -> Vec<RosterEntry<'_>> {
        self.ranked_players()
            .into_iter()
            .map(|player| RosterEntry {
                player,
                is_judge: self.judge_id == Some(player.id),
                is_you: self.local_player_id == Some(player.id),
                is_pending: self.pending_players.contains(&player.id),
            })
            .collect()
    }

    /// The plays that are meaningful to show in the current stage: the local
    /// player's own confirmed play while playing, every play while judging,
    /// only the winning play at round end.
    pub fn visible_plays(&self) -> Vec<&[CardId]> {
        match self.stage {
            Stage::Playing if !self.is_judge && !self.played_cards.is_empty() => {
                vec![self.played_cards.as_slice()]
            }
            Stage::Judging => self.round_plays.iter().map(Vec::as_slice).collect(),
            Stage::RoundEnd => self
                .winning_play
                .and_then(|i| self.round_plays.get(i))
                .map(|play| vec![play.as_slice()])
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Resolve the hand to displayable cards, silently skipping ids missing
    /// from the catalog.
    pub fn hand_cards(&self) -> Vec<&Card> {
        self.hand
            .iter()
            .filter_map(|id| self.catalog.white_card(id))
            .collect()
    }

    /// Whether `id` is among the overall winners (game end only).
    pub fn is_winner(&self, id: PlayerId) -> bool {
        self.game_results
            .as_ref()
            .is_some_and(|r| r.winners.contains(&id))
    }

    /// Trophies awarded to `id` (game end only).
    pub fn trophies_for(&self, id: PlayerId) -> &[Trophy] {
        self.game_results
            .as_ref()
            .and_then(|r| r.trophy_winners.iter().find(|tw| tw.id == id))
            .map(|tw| tw.trophies.as_slice())
            .unwrap_or(&[])
    }

    /// The local player's trophies (game end only).
    pub fn local_trophies(&self) -> &[Trophy] {
        self.local_player_id
            .map(|id| self.trophies_for(id))
            .unwrap_or(&[])
    }
}
