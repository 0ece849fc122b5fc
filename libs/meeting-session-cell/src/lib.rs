// libs/meeting-session-cell/src/lib.rs
//! # Meeting Session Cell
//!
//! Session bootstrap and meeting lifecycle on top of the external
//! conferencing SDK. The SDK itself is consumed only through the
//! [`engine::MediaEngine`] trait; all real media capture and transport live
//! behind that seam.
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------------------+
//! |                  Session Cell                       |
//! +-----------------------------------------------------+
//! |  models.rs      |  Tile/event/state types & errors  |
//! |  engine.rs      |  MediaEngine trait (SDK boundary) |
//! |  bootstrap.rs   |  Credentials -> SessionHandle     |
//! |  controller.rs  |  Lifecycle state machine + reducer|
//! |  testing.rs     |  FakeMediaEngine test fixture     |
//! +-----------------------------------------------------+
//! ```
//!
//! ## Lifecycle
//!
//! `Idle -> Starting -> Joined -> Leaving -> Idle`. `Starting` doubles as the
//! mutual-exclusion guard: a second start while a session is active is
//! rejected. Teardown is best effort and always completes locally - each stop
//! step is attempted regardless of earlier failures, and a failed backend
//! attendee deletion is only a warning.
//!
//! ## Events
//!
//! The SDK pushes [`models::MeetingEvent`]s over a channel obtained from
//! [`engine::MediaEngine::subscribe`]. The controller reduces them
//! synchronously into its tile-binding set; rendering reads that set in a
//! separate pass and never happens inside event handling.

pub mod bootstrap;
pub mod controller;
pub mod engine;
pub mod models;
pub mod testing;

pub use bootstrap::{bootstrap_session, SessionConfiguration, SessionHandle};
pub use controller::MeetingController;
pub use engine::MediaEngine;
pub use models::{
    MediaDevice, MeetingEvent, SessionError, SessionState, TileBinding, TileId, TileKind,
    TileState,
};
