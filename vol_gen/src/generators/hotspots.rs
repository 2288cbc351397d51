use genevis_lib::volumetric::generate::{Hotspot, HotspotGenerator};
use nalgebra::point;

// Spots stay away from the volume border
const CENTER_SPREAD: f32 = 0.6;
const RADIUS_RANGE: (f32, f32) = (0.08, 0.25);

/// `n` spots with random centers, radii and peaks up to `peak`
pub fn random_hotspots(n: usize, peak: u16, base: u16, seed: Option<u64>) -> HotspotGenerator {
    let rng = match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };

    let coord = || (rng.f32() * 2.0 - 1.0) * CENTER_SPREAD;
    let spots = (0..n)
        .map(|_| {
            let center = point![coord(), coord(), coord()];
            Hotspot {
                center,
                radius: RADIUS_RANGE.0 + rng.f32() * (RADIUS_RANGE.1 - RADIUS_RANGE.0),
                peak: rng.u16(peak / 2..=peak),
            }
        })
        .collect();

    HotspotGenerator { base, spots }
}
