//! Recording value objects

mod preset;
mod timecode;

pub use preset::{QualityPreset, ALL_PRESETS};
pub use timecode::Timecode;
