use crate::composite::compositor::{Scanimation, compose};
use crate::config::ScanimateConfig;
use crate::foundation::core::FrameStack;
use crate::foundation::error::ScanimateResult;
use crate::grid::builder::{Grid, build_grid_for_stack};
use crate::layout::fit::fit_to_period;

/// Everything produced by [`scanimate`].
#[derive(Clone, Debug)]
pub struct ScanimationRun {
    /// Frames after downsampling and fitting to the grid period.
    pub frames: FrameStack,
    /// Phase-0 grid used for compositing.
    pub grid: Grid,
    /// Composite image and view mask.
    pub output: Scanimation,
}

/// Keep every `config.downsample`-th frame of `stack`, fit the result to the
/// period, build its phase-0 grid and compose it.
#[tracing::instrument(level = "debug", skip(stack), fields(frames = stack.len()))]
pub fn scanimate(stack: &FrameStack, config: &ScanimateConfig) -> ScanimateResult<ScanimationRun> {
    config.validate()?;
    let selected = stack.select_every(config.downsample)?;
    let grid_config = config.grid_config(selected.len());
    let frames = fit_to_period(&selected, &grid_config, config.fit)?;
    let grid = build_grid_for_stack(&grid_config, &frames)?;
    let output = compose(&frames, &grid, &config.composite_config())?;
    Ok(ScanimationRun {
        frames,
        grid,
        output,
    })
}
