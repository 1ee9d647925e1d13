//! Decoding of input sources and encoding of output images.
//!
//! This is the only part of the crate that touches the filesystem.

/// GIF / still-image decoding and frame selection.
pub mod decode;
/// PNG output.
pub mod encode;
