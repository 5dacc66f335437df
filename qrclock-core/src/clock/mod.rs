//! Clock application
//!
//! The menu/mode state machine, the four screens and the context that
//! connects them to the input events and the collaborator traits.

pub mod app;
pub mod context;
pub mod render;

pub use app::{Action, ClockApp, Event, MenuItem, Mode, SyncStatus};
pub use context::ClockContext;
