//! scanimate turns a stack of animation frames into a *scanimation*: one static
//! image that appears to move when a matching striped mask is slid across it.
//!
//! # Pipeline overview
//!
//! 1. **Load**: decode a GIF, a directory of stills or a list of stills into a
//!    [`FrameStack`] and keep every n-th frame ([`load_source`]).
//! 2. **Fit** (optional): crop, pad or scale frames so the grid period tiles
//!    the striping axis ([`fit_to_period`]).
//! 3. **Grid**: build the phase-0 occlusion grid ([`build_grid`]).
//! 4. **Compose**: mask frame `k` with the grid rolled to phase `k` and sum
//!    the masked frames ([`compose`]).
//! 5. **Write**: save the composite and the phase-0 view mask as PNG
//!    ([`write_scanimation`]).
//!
//! Steps 2-4 are pure functions over borrowed inputs; only [`load_source`] and
//! the PNG writers touch the filesystem. [`scanimate`] chains steps 2-4.
//!
//! Raw pixel arrays in other axis orders (`BFCHW`, `HWF`, ...) can be brought
//! into the canonical `(frame, height, width, channel)` layout with
//! [`stack_from_array`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod composite;
mod config;
mod foundation;
mod grid;
mod layout;
mod media;
mod pipeline;

pub use composite::compositor::{CompositeConfig, Scanimation, compose};
pub use composite::reveal::{reveal, reveal_all};
pub use config::ScanimateConfig;
pub use foundation::core::{Channels, Frame, FrameStack, MAX_VALUE, Orientation};
pub use foundation::error::{ScanimateError, ScanimateResult};
pub use grid::builder::{Grid, GridConfig, build_grid, build_grid_for_stack};
pub use layout::axes::{
    AxisOrder, AxisTag, stack_from_array, stack_to_array, stack_to_array_with_order,
};
pub use layout::fit::{FitMode, fit_to_period};
pub use media::decode::{Source, decode_gif, frame_from_dynamic, load_source, stack_stills};
pub use media::encode::{
    OutputPaths, PATTERN_FILE, SCANIMATION_FILE, ensure_parent_dir, save_png, write_scanimation,
};
pub use pipeline::{ScanimationRun, scanimate};
