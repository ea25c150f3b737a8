//! # Narrative Session (Loom)
//!
//! The session layer of Loom. This crate owns the per-session
//! [`NarrativeStateManager`], which accumulates player and story state from
//! `story_state` and hands out the snapshots used to personalize
//! AI-generated story content.
//!
//! ## Core Components
//!
//! - **manager**: the single-owner session state container
//! - **snapshot**: independent deep copies of session state for
//!   persistence and restoration
//!
//! ## Design Philosophy
//!
//! - **Single owner**: one manager per chat session, no internal locking
//! - **Total operations**: mutations accept their inputs as-is; missing
//!   keys initialize lazily and missing branches are a no-op
//! - **Independent snapshots**: stored state never aliases live state

pub mod manager;
pub mod snapshot;

pub use manager::*;
pub use snapshot::*;
