//! Notifications emitted toward the render layer.

use punchline_shared::Stage;

/// Something the render layer may want to react to.
///
/// [`crate::Session::apply`] and the local mutation methods return these in
/// emission order; handlers run to completion before the next message is
/// dispatched, so the session is never observed half-updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The round number changed with the latest snapshot.
    RoundChanged,
    /// The stage changed with the latest snapshot.
    StageChanged(Stage),
    /// The local player's score changed.
    ScoreChanged,
    /// The tentative selection changed (toggle or post-submission clear).
    SelectionChanged,
    /// The roster was replaced.
    RosterChanged,
    /// The server confirmed the local player's committed cards.
    PlayedCardsChanged,
    /// The local display name changed. `persist` is false when the name came
    /// from a server echo and must not be written back to storage.
    NameChanged { persist: bool },
    /// The judge's tentative pick changed.
    JudgePickChanged,
    /// The server rejected an action; reason is stored on the session.
    Rejected,
}
