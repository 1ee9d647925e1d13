//! Frame compositing: masking a frame stack with phase grids and summing it,
//! plus the inverse view used to check what a sliding mask reveals.

/// Masking + reduction of a frame stack into a scanimation.
pub mod compositor;
/// Simulated viewing of a composite through a phase grid.
pub mod reveal;
