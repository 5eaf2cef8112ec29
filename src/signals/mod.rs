//! Signal classification and generation.

pub mod classifier;
pub mod engine;

pub use classifier::{Classification, SignalClassifier};
pub use engine::{SignalEngine, CANDLE_LIMIT};
