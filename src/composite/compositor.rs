use rayon::prelude::*;

use crate::foundation::core::{Frame, FrameStack, MAX_VALUE, Orientation};
use crate::foundation::error::{ScanimateError, ScanimateResult};
use crate::grid::builder::{Grid, GridConfig};

/// Immutable compositing parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositeConfig {
    /// Per-phase shift in pixels; must equal the grid's stripe width.
    pub stripe_width: u32,
    /// Shift axis; must equal the grid's orientation.
    pub orientation: Orientation,
    /// Mask frames on a rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Optional explicit worker thread count (parallel mode only).
    pub threads: Option<usize>,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            stripe_width: 1,
            orientation: Orientation::Horizontal,
            parallel: false,
            threads: None,
        }
    }
}

impl CompositeConfig {
    /// Sequential config matching the stripe width and orientation of `grid`.
    pub fn for_grid(grid: &GridConfig) -> Self {
        Self {
            stripe_width: grid.stripe_width,
            orientation: grid.orientation,
            ..Self::default()
        }
    }

    /// Return a copy with parallel masking switched on or off.
    pub fn with_parallel(mut self, parallel: bool, threads: Option<usize>) -> Self {
        self.parallel = parallel;
        self.threads = threads;
        self
    }
}

/// Result of [`compose`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scanimation {
    /// Sum of every frame masked by its phase grid; alpha forced opaque.
    pub composite: Frame,
    /// Phase-0 grid rendered 0/255, the overlay a viewer slides across.
    pub view_mask: Frame,
}

/// Interleave `frames` behind the phases of `base_grid` into one image.
///
/// Frame `k` is multiplied by the grid rolled to phase `k`, the masked frames
/// are summed in `u32` and narrowed back to `u8`. When the grid period tiles
/// the striping axis every output pixel comes from exactly one frame.
///
/// All precondition checks run before any output buffer is allocated.
#[tracing::instrument(
    level = "debug",
    skip(frames, base_grid),
    fields(frames = frames.len(), width = frames.width(), height = frames.height())
)]
pub fn compose(
    frames: &FrameStack,
    base_grid: &Grid,
    config: &CompositeConfig,
) -> ScanimateResult<Scanimation> {
    check_inputs(frames, base_grid, config)?;

    let acc = if config.parallel {
        accumulate_parallel(frames, base_grid, config.threads)?
    } else {
        accumulate_sequential(frames, base_grid)?
    };

    let composite = narrow(acc, base_grid);
    let view_mask = base_grid.at_phase(0)?.to_view_mask();
    Ok(Scanimation {
        composite,
        view_mask,
    })
}

fn check_inputs(frames: &FrameStack, grid: &Grid, config: &CompositeConfig) -> ScanimateResult<()> {
    if frames.len() != grid.frame_count() {
        return Err(ScanimateError::frame_count(grid.frame_count(), frames.len()));
    }
    let shape = (frames.height(), frames.width(), frames.channels().count());
    if shape != grid.shape() {
        return Err(ScanimateError::shape(format!(
            "frames have shape {shape:?}, grid has {:?}",
            grid.shape()
        )));
    }
    if config.stripe_width != grid.stripe_width() {
        return Err(ScanimateError::invalid(format!(
            "composite stripe_width {} differs from grid stripe_width {}",
            config.stripe_width,
            grid.stripe_width()
        )));
    }
    if config.orientation != grid.orientation() {
        return Err(ScanimateError::invalid(format!(
            "composite orientation {:?} differs from grid orientation {:?}",
            config.orientation,
            grid.orientation()
        )));
    }
    if config.parallel
        && let Some(0) = config.threads
    {
        return Err(ScanimateError::invalid(
            "composite 'threads' must be >= 1 when set",
        ));
    }
    Ok(())
}

fn mask_into(acc: &mut [u32], frame: &Frame, grid: &Grid) {
    for ((a, &px), &m) in acc.iter_mut().zip(&frame.data).zip(grid.samples()) {
        *a = a.saturating_add(u32::from(px) * u32::from(m));
    }
}

fn accumulate_sequential(frames: &FrameStack, base: &Grid) -> ScanimateResult<Vec<u32>> {
    let mut acc = vec![0u32; base.samples().len()];
    for (k, frame) in frames.frames().iter().enumerate() {
        let grid_k = base.at_phase(k)?;
        mask_into(&mut acc, frame, &grid_k);
    }
    Ok(acc)
}

fn accumulate_parallel(
    frames: &FrameStack,
    base: &Grid,
    threads: Option<usize>,
) -> ScanimateResult<Vec<u32>> {
    let pool = build_thread_pool(threads)?;
    let len = base.samples().len();
    tracing::debug!(workers = pool.current_num_threads(), "parallel masking");

    pool.install(|| {
        frames
            .frames()
            .par_iter()
            .enumerate()
            .try_fold(
                || vec![0u32; len],
                |mut acc, (k, frame)| -> ScanimateResult<Vec<u32>> {
                    let grid_k = base.at_phase(k)?;
                    mask_into(&mut acc, frame, &grid_k);
                    Ok(acc)
                },
            )
            .try_reduce(
                || vec![0u32; len],
                |mut a, b| {
                    for (x, y) in a.iter_mut().zip(b) {
                        *x = x.saturating_add(y);
                    }
                    Ok(a)
                },
            )
    })
}

fn narrow(acc: Vec<u32>, grid: &Grid) -> Frame {
    let channels = grid.channels();
    let mut data = acc
        .into_iter()
        .map(|v| v.min(u32::from(MAX_VALUE)) as u8)
        .collect::<Vec<_>>();
    if let Some(a) = channels.alpha_index() {
        for px in data.chunks_exact_mut(channels.count()) {
            px[a] = MAX_VALUE;
        }
    }
    Frame {
        width: grid.width(),
        height: grid.height(),
        channels,
        data,
    }
}

fn build_thread_pool(threads: Option<usize>) -> ScanimateResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ScanimateError::invalid(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
