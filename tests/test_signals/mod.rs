#![allow(dead_code)]

pub mod checks;

pub use checks::{assert_edges_paired, brute_force_slope};

use slopepeak::simulation::{Bump, synthetic_spectrum};

pub const SPECTRUM_LEN: usize = 512;
pub const BUMP_CENTRES: [usize; 3] = [100, 250, 400];

/// Three well separated Gaussian bumps on a unit floor with light noise
pub fn three_bump_spectrum(seed: u64) -> Vec<f64> {
    let bumps = [
        Bump::gaussian(BUMP_CENTRES[0] as f64, 8.0, 3.0),
        Bump::gaussian(BUMP_CENTRES[1] as f64, 8.0, 2.0),
        Bump::gaussian(BUMP_CENTRES[2] as f64, 8.0, 4.0),
    ];
    synthetic_spectrum(SPECTRUM_LEN, &bumps, 1.0, 0.02, seed).expect("valid noise level")
}
