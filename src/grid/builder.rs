use crate::foundation::core::{Channels, Frame, FrameStack, MAX_VALUE, Orientation, sample_len};
use crate::foundation::error::{ScanimateError, ScanimateResult};

/// Immutable parameters of a striped occlusion pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Thickness of each visible stripe in pixels (>= 1).
    pub stripe_width: u32,
    /// Number of animation frames / phases (>= 1).
    pub frame_count: usize,
    /// Axis along which the stripes vary.
    pub orientation: Orientation,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            stripe_width: 1,
            frame_count: 1,
            orientation: Orientation::Horizontal,
        }
    }
}

impl GridConfig {
    /// Config with the given stripe width, frame count and orientation.
    pub fn new(stripe_width: u32, frame_count: usize, orientation: Orientation) -> Self {
        Self {
            stripe_width,
            frame_count,
            orientation,
        }
    }

    /// Config whose frame count matches `stack`.
    pub fn for_stack(stripe_width: u32, orientation: Orientation, stack: &FrameStack) -> Self {
        Self::new(stripe_width, stack.len(), orientation)
    }

    /// Reject zero stripe widths and frame counts.
    pub fn validate(&self) -> ScanimateResult<()> {
        if self.stripe_width == 0 {
            return Err(ScanimateError::invalid("stripe_width must be >= 1"));
        }
        if self.frame_count == 0 {
            return Err(ScanimateError::invalid("frame_count must be >= 1"));
        }
        Ok(())
    }

    /// Repeat distance of the pattern: `stripe_width * frame_count`.
    pub fn period(&self) -> ScanimateResult<usize> {
        self.validate()?;
        (self.stripe_width as usize)
            .checked_mul(self.frame_count)
            .ok_or_else(|| ScanimateError::invalid("stripe_width * frame_count overflows"))
    }

    /// Check that the period tiles the striping axis of a `height x width` image.
    pub fn check_axis(&self, height: u32, width: u32) -> ScanimateResult<usize> {
        let period = self.period()?;
        let axis_len = self.orientation.axis_len(height, width) as usize;
        if axis_len % period != 0 {
            return Err(ScanimateError::period(period, axis_len));
        }
        Ok(period)
    }
}

/// Binary occlusion mask for one phase, shaped `(height, width, channels)`.
///
/// Samples are 0 (occluded) or 1 (visible). The alpha sample of an RGBA grid
/// is always 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    config: GridConfig,
    phase: usize,
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

/// Build the phase-0 grid for a `height x width` image with `channels` samples.
///
/// A pixel is visible iff its striping-axis coordinate `c` satisfies
/// `c % (stripe_width * frame_count) < stripe_width`. The period must divide
/// the striping axis, otherwise [`ScanimateError::InvalidPeriod`] is returned.
#[tracing::instrument(level = "debug")]
pub fn build_grid(
    config: &GridConfig,
    height: u32,
    width: u32,
    channels: Channels,
) -> ScanimateResult<Grid> {
    config.validate()?;
    if height == 0 || width == 0 {
        return Err(ScanimateError::invalid(format!(
            "grid dimensions must be > 0 (got {width}x{height})"
        )));
    }
    let period = config.check_axis(height, width)?;
    let stripe = config.stripe_width as usize;
    let alpha = channels.alpha_index();

    let mut data = vec![0u8; sample_len(width, height, channels)];
    for (i, px) in data.chunks_exact_mut(channels.count()).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let coord = config.orientation.coordinate(x, y) as usize;
        px.fill(u8::from(coord % period < stripe));
        if let Some(a) = alpha {
            px[a] = 1;
        }
    }
    tracing::debug!(period, "built phase-0 grid");

    Ok(Grid {
        config: *config,
        phase: 0,
        width,
        height,
        channels,
        data,
    })
}

/// Build the phase-0 grid matching the spatial footprint of `stack`.
pub fn build_grid_for_stack(config: &GridConfig, stack: &FrameStack) -> ScanimateResult<Grid> {
    build_grid(config, stack.height(), stack.width(), stack.channels())
}

impl Grid {
    /// Configuration the grid was built from.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Phase index in `0..frame_count`.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Number of phases the pattern cycles through.
    pub fn frame_count(&self) -> usize {
        self.config.frame_count
    }

    /// Stripe width in pixels.
    pub fn stripe_width(&self) -> u32 {
        self.config.stripe_width
    }

    /// Striping orientation.
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample layout the grid broadcasts over.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw 0/1 samples, same layout as a [`Frame`] of this shape.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// `(height, width, channels)` as used in shape diagnostics.
    pub fn shape(&self) -> (u32, u32, usize) {
        (self.height, self.width, self.channels.count())
    }

    /// Whether pixel `(x, y)` lets its source frame through.
    pub fn is_visible(&self, x: u32, y: u32) -> bool {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * self.channels.count();
        self.data[i] == 1
    }

    /// The same pattern circularly shifted so that it sits at `phase`.
    ///
    /// Phase `k` is phase 0 rolled by `k * stripe_width` pixels along the
    /// striping axis; pixels leaving one edge re-enter at the opposite edge.
    pub fn at_phase(&self, phase: usize) -> ScanimateResult<Grid> {
        let n = self.config.frame_count;
        if phase >= n {
            return Err(ScanimateError::invalid(format!(
                "phase {phase} out of range for {n} frames"
            )));
        }
        let steps = (phase + n - self.phase) % n;
        let mut data = self.data.clone();
        self.roll_in_place(&mut data, steps * self.config.stripe_width as usize);
        Ok(Grid {
            config: self.config,
            phase,
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        })
    }

    /// All `frame_count` phases in order, starting at phase 0.
    pub fn phase_grids(&self) -> ScanimateResult<Vec<Grid>> {
        (0..self.config.frame_count)
            .map(|k| self.at_phase(k))
            .collect()
    }

    /// Render as an overlay image: 0 -> 0, 1 -> 255 on every sample.
    pub fn to_view_mask(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data: self.data.iter().map(|&v| v * MAX_VALUE).collect(),
        }
    }

    fn roll_in_place(&self, data: &mut [u8], shift_px: usize) {
        let c = self.channels.count();
        match self.config.orientation {
            Orientation::Horizontal => {
                let width = self.width as usize;
                let shift = shift_px % width;
                if shift == 0 {
                    return;
                }
                for row in data.chunks_exact_mut(width * c) {
                    row.rotate_right(shift * c);
                }
            }
            Orientation::Vertical => {
                let height = self.height as usize;
                let shift = shift_px % height;
                if shift == 0 {
                    return;
                }
                data.rotate_right(shift * self.width as usize * c);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/builder.rs"]
mod tests;
