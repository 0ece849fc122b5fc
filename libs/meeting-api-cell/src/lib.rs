// libs/meeting-api-cell/src/lib.rs
//! # Meeting API Cell
//!
//! HTTP client for the managed conferencing backend. The backend owns all
//! meeting and attendee state; this cell only issues the three calls the
//! client needs and hands back parsed credentials:
//!
//! - `POST /api/chime/create` - create a meeting, registering the host
//! - `POST /api/chime/attendee` - register an attendee on an existing meeting
//! - `POST /api/chime/attendee/delete` - remove an attendee (best effort)
//!
//! There is no retry, authentication, or versioning at this layer. A failed
//! create/join is surfaced to the caller, who re-triggers manually; a failed
//! delete is a warning, never a blocker.

pub mod client;
pub mod models;

pub use client::MeetingApiClient;
pub use models::MeetingApiError;
