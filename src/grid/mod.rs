//! Striped occlusion grids.
//!
//! A grid is built once at phase 0 and rolled to the other phases on demand.

/// Grid configuration, construction and phase rolling.
pub mod builder;
