//! Frame sinks: where composed frame sequences end up.

/// Animated GIF file sink.
pub mod gif;
/// The sink contract and an in-memory sink.
pub mod sink;
