//! # Simulation Boundary
//!
//! Everything in this app that pretends to be intelligent lives here:
//! the fake classifier, the keyword responder, and the impact formula.
//! Each one sits behind a trait or a pure function so a real model could
//! replace it without the view layer noticing.

pub mod classifier;
pub mod impact;
pub mod responder;
pub mod types;

pub use classifier::{ScanModel, SimulatedModel};
pub use responder::{KeywordEngine, ReplyEngine, ReplyError};
pub use types::{ChatLog, ChatMessage, ChatRole, ImpactStats, Prediction, WasteCategory};
