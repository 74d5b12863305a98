//! # Actions
//!
//! Everything that can happen in EcoSegrega becomes an `Action`.
//! User presses 's'? That's `Action::StartScanner`.
//! The camera grants a stream? That's `Action::CameraLive(stream)`.
//!
//! The `update()` function takes the current state and an action,
//! then mutates the state and returns an `Effect` describing the I/O the
//! shell should perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: drive `update()` with a scripted action
//! sequence and assert on the state after each step.
//!
//! Results posted by background tasks pass through guards before they touch
//! state: a `ScanTick` is dropped unless the scanner is Live, a `CameraLive`
//! is released on arrival unless the scanner is still Acquiring, and a
//! `ReplyReady` is dropped unless a reply is actually pending. A stale task
//! can therefore deliver at most one late result, and it mutates nothing.

use log::{debug, info, warn};

use crate::camera::{CAMERA_ERROR_STATUS, CameraError, CameraStream};
use crate::core::state::{
    App, SCANNER_LOADING_STATUS, SCANNER_READY_STATUS, SCANNER_STOPPED_STATUS, ScanPhase,
};
use crate::sim::classifier::ScanFrame;
use crate::sim::ReplyError;
use crate::sim::responder::APOLOGY_MESSAGE;

#[derive(Debug)]
pub enum Action {
    Quit,
    /// User asked the scanner to start.
    StartScanner,
    /// User asked the scanner to stop (also sent on shutdown).
    StopScanner,
    /// Camera acquisition finished and the simulated model is loaded.
    CameraLive(CameraStream),
    /// Camera acquisition failed.
    CameraFailed(CameraError),
    /// One frame of simulated predictions from the scan loop.
    ScanTick(ScanFrame),
    /// User submitted a chat question.
    SubmitQuestion(String),
    /// The reply engine finished (or failed).
    ReplyReady(Result<String, ReplyError>),
}

/// I/O the shell must perform after a state transition.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Spawn the camera acquisition task.
    AcquireCamera,
    /// Start the periodic prediction task.
    StartScanLoop,
    /// Abort the prediction task handle, if any.
    StopScanLoop,
    /// Spawn the reply engine for this question.
    SpawnReply(String),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,

        Action::StartScanner => match app.phase {
            ScanPhase::Idle | ScanPhase::Error => {
                info!("Scanner starting, acquiring camera");
                app.phase = ScanPhase::Acquiring;
                app.scanner_status = SCANNER_LOADING_STATUS.to_string();
                Effect::AcquireCamera
            }
            // The camera must never be acquired twice without a release.
            ScanPhase::Acquiring | ScanPhase::Live => {
                debug!("Ignoring StartScanner in phase {:?}", app.phase);
                Effect::None
            }
        },

        Action::StopScanner => {
            if let Some(mut stream) = app.stream.take() {
                stream.stop_tracks();
                info!("Camera stream released");
            }
            app.phase = ScanPhase::Idle;
            app.predictions.clear();
            app.scanner_status = SCANNER_STOPPED_STATUS.to_string();
            Effect::StopScanLoop
        }

        Action::CameraLive(mut stream) => {
            if app.phase != ScanPhase::Acquiring {
                // Stopped while the grant was in flight. Release immediately.
                warn!("Camera granted after stop, releasing");
                stream.stop_tracks();
                return Effect::None;
            }
            info!("Camera live, starting scan loop");
            app.stream = Some(stream);
            app.phase = ScanPhase::Live;
            app.scanner_status = SCANNER_READY_STATUS.to_string();
            Effect::StartScanLoop
        }

        Action::CameraFailed(err) => {
            if app.phase != ScanPhase::Acquiring {
                debug!("Ignoring camera failure in phase {:?}", app.phase);
                return Effect::None;
            }
            warn!("Camera acquisition failed: {}", err);
            app.phase = ScanPhase::Error;
            app.predictions.clear();
            app.scanner_status = CAMERA_ERROR_STATUS.to_string();
            Effect::None
        }

        Action::ScanTick(frame) => {
            if app.phase != ScanPhase::Live {
                debug!("Dropping stale scan tick in phase {:?}", app.phase);
                return Effect::None;
            }
            app.predictions = frame.predictions;
            if frame.detected {
                app.items_scanned += 1;
                debug!("Item scanned, total {}", app.items_scanned);
            }
            Effect::None
        }

        Action::SubmitQuestion(text) => {
            let question = text.trim();
            if question.is_empty() {
                return Effect::None;
            }
            if app.composing {
                debug!("Ignoring submit while composing");
                return Effect::None;
            }
            app.chat.push_user(question.to_string());
            app.composing = true;
            Effect::SpawnReply(question.to_string())
        }

        Action::ReplyReady(result) => {
            if !app.composing {
                debug!("Dropping reply with no pending question");
                return Effect::None;
            }
            let text = match result {
                Ok(reply) => reply,
                Err(err) => {
                    // Swallowed: the conversation always gets an answer.
                    warn!("Reply engine failed: {}", err);
                    APOLOGY_MESSAGE.to_string()
                }
            };
            app.chat.push_assistant(text);
            app.composing = false;
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::SCANNER_IDLE_STATUS;
    use crate::sim::ChatRole;
    use crate::test_support::{test_app, test_frame, test_stream};

    #[test]
    fn test_start_scanner_enters_acquiring() {
        let mut app = test_app();
        let effect = update(&mut app, Action::StartScanner);
        assert_eq!(effect, Effect::AcquireCamera);
        assert_eq!(app.phase, ScanPhase::Acquiring);
        assert_eq!(app.scanner_status, SCANNER_LOADING_STATUS);
    }

    #[test]
    fn test_start_scanner_is_single_flight() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        // A second start must not trigger a second acquisition.
        assert_eq!(update(&mut app, Action::StartScanner), Effect::None);
        update(&mut app, Action::CameraLive(test_stream()));
        assert_eq!(update(&mut app, Action::StartScanner), Effect::None);
    }

    #[test]
    fn test_camera_grant_goes_live() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        let effect = update(&mut app, Action::CameraLive(test_stream()));
        assert_eq!(effect, Effect::StartScanLoop);
        assert_eq!(app.phase, ScanPhase::Live);
        assert_eq!(app.scanner_status, SCANNER_READY_STATUS);
        assert!(app.stream.as_ref().is_some_and(|s| s.is_live()));
    }

    #[test]
    fn test_camera_denial_enters_error() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        let effect = update(&mut app, Action::CameraFailed(CameraError::PermissionDenied));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.phase, ScanPhase::Error);
        assert_eq!(app.scanner_status, CAMERA_ERROR_STATUS);
        assert!(app.predictions.is_empty());
        assert!(app.stream.is_none());
    }

    #[test]
    fn test_error_allows_restart() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        update(&mut app, Action::CameraFailed(CameraError::NoDevice));
        assert_eq!(update(&mut app, Action::StartScanner), Effect::AcquireCamera);
        assert_eq!(app.phase, ScanPhase::Acquiring);
    }

    #[test]
    fn test_grant_after_stop_is_released() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        update(&mut app, Action::StopScanner);
        // The in-flight grant lands after the user stopped.
        let effect = update(&mut app, Action::CameraLive(test_stream()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.phase, ScanPhase::Idle);
        assert!(app.stream.is_none());
    }

    #[test]
    fn test_scan_tick_replaces_predictions() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        update(&mut app, Action::CameraLive(test_stream()));

        update(&mut app, Action::ScanTick(test_frame(false)));
        assert_eq!(app.predictions.len(), 4);
        assert_eq!(app.items_scanned, 0);

        update(&mut app, Action::ScanTick(test_frame(true)));
        // Wholesale replacement, not accumulation.
        assert_eq!(app.predictions.len(), 4);
        assert_eq!(app.items_scanned, 1);
    }

    #[test]
    fn test_stale_tick_after_stop_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        update(&mut app, Action::CameraLive(test_stream()));
        update(&mut app, Action::StopScanner);

        let effect = update(&mut app, Action::ScanTick(test_frame(true)));
        assert_eq!(effect, Effect::None);
        assert!(app.predictions.is_empty());
        assert_eq!(app.items_scanned, 0);
    }

    #[test]
    fn test_stop_releases_stream_and_clears() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        update(&mut app, Action::CameraLive(test_stream()));
        update(&mut app, Action::ScanTick(test_frame(false)));

        let effect = update(&mut app, Action::StopScanner);
        assert_eq!(effect, Effect::StopScanLoop);
        assert_eq!(app.phase, ScanPhase::Idle);
        assert!(app.stream.is_none());
        assert!(app.predictions.is_empty());
        assert_eq!(app.scanner_status, SCANNER_STOPPED_STATUS);
    }

    #[test]
    fn test_double_stop_is_harmless() {
        let mut app = test_app();
        update(&mut app, Action::StartScanner);
        update(&mut app, Action::CameraLive(test_stream()));
        update(&mut app, Action::StopScanner);
        let effect = update(&mut app, Action::StopScanner);
        assert_eq!(effect, Effect::StopScanLoop);
        assert_eq!(app.phase, ScanPhase::Idle);
        assert!(app.predictions.is_empty());
    }

    #[test]
    fn test_stop_from_idle_is_harmless() {
        let mut app = test_app();
        update(&mut app, Action::StopScanner);
        assert_eq!(app.phase, ScanPhase::Idle);
        assert_eq!(app.scanner_status, SCANNER_STOPPED_STATUS);
    }

    #[test]
    fn test_submit_blank_is_a_noop() {
        let mut app = test_app();
        for input in ["", "   ", "\t\n"] {
            let effect = update(&mut app, Action::SubmitQuestion(input.to_string()));
            assert_eq!(effect, Effect::None);
            assert_eq!(app.chat.len(), 1);
            assert!(!app.composing);
        }
    }

    #[test]
    fn test_submit_appends_user_and_composes() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::SubmitQuestion("  Where does glass go?  ".to_string()),
        );
        assert_eq!(effect, Effect::SpawnReply("Where does glass go?".to_string()));
        assert_eq!(app.chat.len(), 2);
        let last = app.chat.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert_eq!(last.text, "Where does glass go?");
        assert!(app.composing);
    }

    #[test]
    fn test_submit_while_composing_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuestion("plastic?".to_string()));
        let effect = update(&mut app, Action::SubmitQuestion("metal?".to_string()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.chat.len(), 2);
    }

    #[test]
    fn test_reply_appends_and_ends_composing() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuestion("glass?".to_string()));
        update(
            &mut app,
            Action::ReplyReady(Ok("Glass goes in the DRY WASTE bin!".to_string())),
        );
        assert_eq!(app.chat.len(), 3);
        let last = app.chat.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert!(last.text.contains("DRY WASTE"));
        assert!(!app.composing);
    }

    #[test]
    fn test_reply_failure_substitutes_apology() {
        let mut app = test_app();
        update(&mut app, Action::SubmitQuestion("glass?".to_string()));
        update(
            &mut app,
            Action::ReplyReady(Err(ReplyError::Compute("boom".to_string()))),
        );
        assert_eq!(app.chat.len(), 3);
        let last = app.chat.messages().last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.text, APOLOGY_MESSAGE);
        assert!(!app.composing);
    }

    #[test]
    fn test_stale_reply_is_dropped() {
        let mut app = test_app();
        let effect = update(&mut app, Action::ReplyReady(Ok("ghost".to_string())));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.chat.len(), 1);
    }

    #[test]
    fn test_idle_status_before_any_action() {
        let app = test_app();
        assert_eq!(app.scanner_status, SCANNER_IDLE_STATUS);
    }
}
