//! Post-processing effect descriptors.

mod bloom;

pub use bloom::BloomEffect;
