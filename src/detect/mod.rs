// Onset detection
// STA/LTA energy-ratio trigger, noise-envelope deviation trigger, and the
// batch runner that turns either into a PickSet

pub mod batch;
pub mod noise;
pub mod sta_lta;

pub use batch::{run_batch, Detector};
pub use noise::NoiseConfig;
pub use sta_lta::StaLtaConfig;
