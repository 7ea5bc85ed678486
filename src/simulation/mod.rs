mod noise;
mod signal;
mod slope;
mod spectrum;

pub use noise::{add_white_noise, noise_std_for_snr};
pub use signal::{Tone, generate_tones, into_frames};
pub use slope::random_slope_signal;
pub use spectrum::{Bump, BumpShape, synthetic_spectrum};
