//! Participant Module
//!
//! Client-side stubs:
//! - `Participant` local model replica with join / apply / report lifecycle

pub mod participant;

pub use participant::Participant;
