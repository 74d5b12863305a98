//! # Application State
//!
//! Core business state for EcoSegrega. This module contains domain logic
//! only - no TUI-specific types. Presentation state lives in the `tui`
//! module.
//!
//! ```text
//! App
//! ├── camera: Arc<dyn FrameSource>   // device boundary
//! ├── model: Arc<dyn ScanModel>      // fake classifier
//! ├── engine: Arc<dyn ReplyEngine>   // canned-answer assistant
//! ├── phase: ScanPhase               // scanner state machine
//! ├── predictions: Vec<Prediction>   // current scan tick, sorted
//! ├── scanner_status: String         // scanner status line
//! ├── stream: Option<CameraStream>   // acquired camera, if any
//! ├── chat: ChatLog                  // append-only conversation
//! ├── composing: bool                // assistant reply in flight
//! └── items_scanned: u64             // root scan counter
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;

use crate::camera::{CameraStream, FrameSource};
use crate::core::config::ResolvedConfig;
use crate::sim::classifier::ScanModel;
use crate::sim::{ChatLog, Prediction, ReplyEngine};

/// Scanner lifecycle. `Error` is terminal until the user starts again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Acquiring,
    Live,
    Error,
}

pub const SCANNER_IDLE_STATUS: &str = "Press 's' to start the camera and scan waste items!";
pub const SCANNER_LOADING_STATUS: &str = "Loading AI brain... Please wait!";
pub const SCANNER_READY_STATUS: &str = "✅ Camera ready! Point at waste items!";
pub const SCANNER_STOPPED_STATUS: &str = "Camera stopped. Press 's' to scan again!";

pub struct App {
    pub camera: Arc<dyn FrameSource>,
    pub model: Arc<dyn ScanModel>,
    pub engine: Arc<dyn ReplyEngine>,
    pub phase: ScanPhase,
    pub predictions: Vec<Prediction>,
    pub scanner_status: String,
    pub stream: Option<CameraStream>,
    pub chat: ChatLog,
    pub composing: bool,
    pub items_scanned: u64,
    pub config: ResolvedConfig,
}

impl App {
    pub fn new(
        camera: Arc<dyn FrameSource>,
        model: Arc<dyn ScanModel>,
        engine: Arc<dyn ReplyEngine>,
        config: ResolvedConfig,
    ) -> Self {
        Self {
            camera,
            model,
            engine,
            phase: ScanPhase::Idle,
            predictions: Vec::new(),
            scanner_status: String::from(SCANNER_IDLE_STATUS),
            stream: None,
            chat: ChatLog::new(),
            composing: false,
            items_scanned: 0,
            config,
        }
    }

    pub fn is_scanning(&self) -> bool {
        matches!(self.phase, ScanPhase::Acquiring | ScanPhase::Live)
    }
}
