//! Frame-stack normalization ahead of grid construction.
//!
//! Raw pixel arrays in arbitrary axis orders are mapped to the canonical
//! `(frame, height, width, channel)` stack, and frame sizes are fitted so the
//! grid period tiles the striping axis.

/// Axis-order tags and array <-> stack conversion.
pub mod axes;
/// Crop / pad / scale fitting to the grid period.
pub mod fit;
