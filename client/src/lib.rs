//! Core engine for the punchline game client.
//!
//! The client never decides game outcomes. It mirrors the authoritative state
//! the server pushes, lets the local player build a tentative selection of
//! cards, and produces outbound intent messages. The hard part is folding a
//! stream of independently-arriving updates (catalog, roster, hand, game
//! snapshots, play confirmations) into one consistent [`session::Session`]
//! while keeping the cross-cutting rules intact: selection size is bounded by
//! the current prompt's pick count, the judge role is derived with a sticky
//! edge, and played cards are immutable until the next round.
//!
//! Rendering and transport stay outside. A host feeds inbound messages to
//! [`session::Session::apply`] and paints from the session plus the
//! [`events::SessionEvent`]s each call returns; user interaction goes through
//! the selection/outbound methods and whatever the host uses to send the
//! resulting [`punchline_shared::ClientMsg`].

pub mod catalog;
pub mod events;
pub mod outbound;
pub mod selection;
pub mod session;
pub mod stage;

pub use catalog::{Card, Catalog, PackInfo};
pub use events::SessionEvent;
pub use outbound::OutboundError;
pub use selection::{Selection, SelectionEntry};
pub use session::{RosterEntry, Session};
pub use stage::Status;
