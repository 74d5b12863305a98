//! The impact "calculations". A pseudo-formula over the scan counter and a
//! random generator; the numbers mean nothing beyond looking plausible.

use rand::Rng;

use super::types::ImpactStats;

/// One tree absorbs roughly this many kilograms of CO₂ per year. The only
/// constant here with any real-world pedigree.
pub const KG_CO2_PER_TREE: u64 = 22;

/// Derives the next stats from the scan counter and the previous stats.
///
/// `co2_saved` floats with the counter plus noise, `trees_equivalent` is the
/// integer quotient by [`KG_CO2_PER_TREE`], and `points_earned` only ever
/// grows. Pure over the injected generator so callers can seed it.
pub fn project_impact<R: Rng>(rng: &mut R, items_scanned: u64, prev: &ImpactStats) -> ImpactStats {
    let co2_saved_kg = (items_scanned as f64 * 0.5 + rng.random_range(0.0..10.0)).floor() as u64;
    let trees_equivalent = co2_saved_kg / KG_CO2_PER_TREE;
    let points_earned = prev.points_earned + rng.random_range(10..60);

    ImpactStats {
        items_scanned,
        co2_saved_kg,
        trees_equivalent,
        points_earned,
    }
}
