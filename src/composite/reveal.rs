use crate::foundation::core::{Frame, MAX_VALUE};
use crate::foundation::error::{ScanimateError, ScanimateResult};
use crate::grid::builder::Grid;

/// What a viewer sees with the mask slid to `grid`'s phase: the composite
/// multiplied by the grid, alpha kept opaque.
pub fn reveal(composite: &Frame, grid: &Grid) -> ScanimateResult<Frame> {
    if composite.shape() != grid.shape() {
        return Err(ScanimateError::shape(format!(
            "composite has shape {:?}, grid has {:?}",
            composite.shape(),
            grid.shape()
        )));
    }
    composite.check_len()?;

    let mut data = composite
        .data
        .iter()
        .zip(grid.samples())
        .map(|(&px, &m)| px * m)
        .collect::<Vec<_>>();
    if let Some(a) = composite.channels.alpha_index() {
        for px in data.chunks_exact_mut(composite.channels.count()) {
            px[a] = MAX_VALUE;
        }
    }

    Ok(Frame {
        width: composite.width,
        height: composite.height,
        channels: composite.channels,
        data,
    })
}

/// One revealed view per phase of `base`, in phase order.
#[tracing::instrument(level = "debug", skip_all, fields(phases = base.frame_count()))]
pub fn reveal_all(composite: &Frame, base: &Grid) -> ScanimateResult<Vec<Frame>> {
    base.phase_grids()?
        .iter()
        .map(|grid| reveal(composite, grid))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/composite/reveal.rs"]
mod tests;
