//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::CameraAccess;
use crate::camera::{CameraStream, FrameSource, SimulatedCamera, StreamConstraints};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::sim::classifier::{ScanFrame, ScanModel, score_catalog};
use crate::sim::{ReplyEngine, ReplyError};

/// A model that replays one fixed frame, with the detection flag forced.
pub struct FixedModel {
    pub detected: bool,
}

impl ScanModel for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self) -> ScanFrame {
        test_frame(self.detected)
    }
}

/// An engine that returns a canned result without thinking.
pub struct StubEngine {
    pub result: Result<String, ReplyError>,
}

#[async_trait]
impl ReplyEngine for StubEngine {
    fn name(&self) -> &str {
        "stub"
    }

    async fn reply(&self, _question: &str) -> Result<String, ReplyError> {
        self.result.clone()
    }
}

/// A deterministic frame over the full catalog.
pub fn test_frame(detected: bool) -> ScanFrame {
    use rand::SeedableRng;
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let mut frame = score_catalog(&mut rng, 0.0);
    frame.detected = detected;
    frame
}

/// A live stream from the zero-delay simulated camera.
pub fn test_stream() -> CameraStream {
    let camera = SimulatedCamera::new(CameraAccess::Auto, Duration::ZERO);
    tokio_test::block_on(camera.open(StreamConstraints::default())).expect("auto access grants")
}

/// Config with all artificial delays collapsed to zero.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        camera_prompt_delay: Duration::ZERO,
        model_load_delay: Duration::ZERO,
        thinking_delay: Duration::ZERO,
        scan_tick: Duration::from_millis(1),
        animation_duration: Duration::from_millis(10),
        ..ResolvedConfig::default()
    }
}

/// Creates a test App with zero-delay stubs everywhere.
pub fn test_app() -> App {
    App::new(
        Arc::new(SimulatedCamera::new(CameraAccess::Auto, Duration::ZERO)),
        Arc::new(FixedModel { detected: false }),
        Arc::new(StubEngine {
            result: Ok("stub reply".to_string()),
        }),
        test_config(),
    )
}
