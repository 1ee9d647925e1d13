//! Core pixel containers and the error taxonomy.

/// Frames, frame stacks, channel layouts and orientation.
pub mod core;
/// Error type shared by every module.
pub mod error;
