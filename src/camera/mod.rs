//! # Camera Device Boundary
//!
//! The only device this app touches. `FrameSource` is the seam: the shipped
//! `SimulatedCamera` fabricates a stream (or refuses, to demo the failure
//! path), and a real capture backend could slot in behind the same trait.
//!
//! Ownership rule: whoever holds the `CameraStream` owns the device. Tracks
//! are stopped explicitly on scanner stop and again by `Drop`, so the device
//! is released on every exit path.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};

use crate::CameraAccess;

/// Fixed status line surfaced when acquisition fails. No retry logic.
pub const CAMERA_ERROR_STATUS: &str = "❌ Camera not available. Please check permissions!";

/// Errors that can occur while acquiring the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user (or policy) refused access.
    PermissionDenied,
    /// No capture device is present.
    NoDevice,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "camera permission denied"),
            CameraError::NoDevice => write!(f, "no camera device found"),
        }
    }
}

impl std::error::Error for CameraError {}

/// Resolution hint passed to the device. A hint, not a guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConstraints {
    pub width: u32,
    pub height: u32,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// One track of an acquired stream.
#[derive(Debug)]
pub struct VideoTrack {
    pub id: u32,
    pub width: u32,
    pub height: u32,
    live: bool,
}

impl VideoTrack {
    pub fn is_live(&self) -> bool {
        self.live
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            debug!("Video track {} stopped", self.id);
        }
    }
}

/// An acquired camera stream. Exclusively owned; stopping twice is fine.
#[derive(Debug)]
pub struct CameraStream {
    tracks: Vec<VideoTrack>,
}

impl CameraStream {
    pub fn tracks(&self) -> &[VideoTrack] {
        &self.tracks
    }

    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(VideoTrack::is_live)
    }

    /// Stops every track, releasing the device. Idempotent.
    pub fn stop_tracks(&mut self) {
        for track in &mut self.tracks {
            track.stop();
        }
    }
}

impl Drop for CameraStream {
    fn drop(&mut self) {
        if self.is_live() {
            info!("Camera stream dropped while live, releasing device");
            self.stop_tracks();
        }
    }
}

#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Requests camera access. Suspends for the duration of the permission
    /// prompt; resolves to a live stream or a [`CameraError`].
    async fn open(&self, constraints: StreamConstraints) -> Result<CameraStream, CameraError>;
}

/// Stand-in for a capture backend. Grants or denies according to the
/// configured [`CameraAccess`], after a short prompt delay.
pub struct SimulatedCamera {
    access: CameraAccess,
    prompt_delay: Duration,
}

impl SimulatedCamera {
    pub fn new(access: CameraAccess, prompt_delay: Duration) -> Self {
        Self {
            access,
            prompt_delay,
        }
    }
}

#[async_trait]
impl FrameSource for SimulatedCamera {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn open(&self, constraints: StreamConstraints) -> Result<CameraStream, CameraError> {
        tokio::time::sleep(self.prompt_delay).await;

        match self.access {
            CameraAccess::Denied => {
                info!("Simulated camera denied access");
                Err(CameraError::PermissionDenied)
            }
            CameraAccess::Auto => {
                info!(
                    "Simulated camera granted {}x{} stream",
                    constraints.width, constraints.height
                );
                Ok(CameraStream {
                    tracks: vec![VideoTrack {
                        id: 0,
                        width: constraints.width,
                        height: constraints.height,
                        live: true,
                    }],
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn granted() -> SimulatedCamera {
        SimulatedCamera::new(CameraAccess::Auto, Duration::ZERO)
    }

    #[test]
    fn test_open_grants_live_stream() {
        let stream = tokio_test::block_on(granted().open(StreamConstraints::default()))
            .expect("auto access grants");
        assert!(stream.is_live());
        assert_eq!(stream.tracks().len(), 1);
        assert_eq!(stream.tracks()[0].width, 640);
        assert_eq!(stream.tracks()[0].height, 480);
    }

    #[test]
    fn test_open_denied() {
        let camera = SimulatedCamera::new(CameraAccess::Denied, Duration::ZERO);
        let err = tokio_test::block_on(camera.open(StreamConstraints::default()))
            .expect_err("denied access refuses");
        assert_eq!(err, CameraError::PermissionDenied);
    }

    #[test]
    fn test_stop_tracks_is_idempotent() {
        let mut stream = tokio_test::block_on(granted().open(StreamConstraints::default()))
            .expect("auto access grants");
        stream.stop_tracks();
        assert!(!stream.is_live());
        // Second stop must be harmless.
        stream.stop_tracks();
        assert!(!stream.is_live());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            CameraError::PermissionDenied.to_string(),
            "camera permission denied"
        );
        assert_eq!(CameraError::NoDevice.to_string(), "no camera device found");
    }
}
