//! Interaction Handler: turns pointer actions into picks, removals and bursts.
//!
//! # Invariants
//! - The frame loop and the host consume `Action`s, never raw window events.
//! - A click that hits nothing is an outcome, not an error.
//! - A hit object is removed exactly once and explodes exactly once.

pub mod action;
mod handler;

pub use action::{Action, ViewportError};
pub use handler::{ClickOutcome, InteractionError, InteractionHandler};
