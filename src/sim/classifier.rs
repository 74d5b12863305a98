//! The fake vision model. Scores the fixed catalog with uniform random
//! confidences and occasionally claims to have spotted an item.

use rand::Rng;

use super::types::{Prediction, WASTE_CATALOG};

/// Chance per tick that the model reports a scanned item.
pub const DETECT_PROBABILITY: f64 = 0.3;

/// One frame's worth of simulated model output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFrame {
    /// Catalog scores, sorted by descending confidence.
    pub predictions: Vec<Prediction>,
    /// Whether this tick counts as a scanned item.
    pub detected: bool,
}

/// The seam between the scan loop and whatever produces predictions.
/// The shipped implementation rolls dice; a real classifier would slot in
/// here without the loop or the view changing.
pub trait ScanModel: Send + Sync {
    /// Returns the name of the model.
    fn name(&self) -> &str;

    /// Scores one frame.
    fn predict(&self) -> ScanFrame;
}

/// Uniform-random stand-in for a classifier.
pub struct SimulatedModel {
    detect_probability: f64,
}

impl SimulatedModel {
    pub fn new(detect_probability: f64) -> Self {
        Self { detect_probability }
    }
}

impl Default for SimulatedModel {
    fn default() -> Self {
        Self::new(DETECT_PROBABILITY)
    }
}

impl ScanModel for SimulatedModel {
    fn name(&self) -> &str {
        "simulated"
    }

    fn predict(&self) -> ScanFrame {
        let mut rng = rand::rng();
        score_catalog(&mut rng, self.detect_probability)
    }
}

/// Scores every catalog entry with an independent uniform confidence and
/// sorts descending. Split out from the trait impl so tests can pass a
/// seeded generator.
pub fn score_catalog<R: Rng>(rng: &mut R, detect_probability: f64) -> ScanFrame {
    let mut predictions: Vec<Prediction> = WASTE_CATALOG
        .iter()
        .map(|item| Prediction {
            label: item.label,
            confidence: rng.random_range(0.0..1.0),
            category: item.category,
            point_value: item.point_value,
        })
        .collect();

    predictions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let detected = rng.random_range(0.0..1.0) < detect_probability;

    ScanFrame {
        predictions,
        detected,
    }
}
