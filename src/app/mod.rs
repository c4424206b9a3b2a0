//! Application layer
//!
//! Owns the per-run state and turns semantic input events into state
//! changes and shell directives.

pub mod context;

pub use context::{AppContext, EventOutcome, InputEvent};
