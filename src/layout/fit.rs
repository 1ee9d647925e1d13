use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, Pixel, Rgb, Rgba};

use crate::foundation::core::{Channels, Frame, FrameStack, Orientation};
use crate::foundation::error::{ScanimateError, ScanimateResult};
use crate::grid::builder::GridConfig;

/// How frames are resized so the grid period tiles the striping axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Leave frames untouched; a non-dividing period is an error later on.
    #[default]
    None,
    /// Drop trailing lines down to the previous multiple of the period.
    Crop,
    /// Append zero lines up to the next multiple of the period.
    Pad,
    /// Resample the whole frame to the nearest multiple of the period.
    Scale,
}

/// Resize every frame of `stack` so that `config`'s period divides its
/// striping axis. Stacks that already tile are returned unchanged.
#[tracing::instrument(level = "debug", skip(stack), fields(width = stack.width(), height = stack.height()))]
pub fn fit_to_period(
    stack: &FrameStack,
    config: &GridConfig,
    mode: FitMode,
) -> ScanimateResult<FrameStack> {
    let period = config.period()?;
    let orientation = config.orientation;
    let axis_len = orientation.axis_len(stack.height(), stack.width()) as usize;
    if mode == FitMode::None || axis_len % period == 0 {
        return Ok(stack.clone());
    }

    let target = match mode {
        FitMode::None => axis_len,
        FitMode::Crop => {
            let t = axis_len / period * period;
            if t == 0 {
                return Err(ScanimateError::period(period, axis_len));
            }
            t
        }
        FitMode::Pad => axis_len.div_ceil(period) * period,
        FitMode::Scale => {
            let periods = (axis_len as f64 / period as f64).round().max(1.0) as usize;
            periods * period
        }
    };
    let target = u32::try_from(target)
        .map_err(|_| ScanimateError::invalid(format!("fitted axis length {target} exceeds u32")))?;
    tracing::debug!(axis_len, target, ?mode, "fitting frames to period");

    let frames = stack
        .frames()
        .iter()
        .map(|f| match mode {
            FitMode::Scale => scale_frame(f, orientation, target),
            _ => crop_or_pad_frame(f, orientation, target),
        })
        .collect::<ScanimateResult<Vec<_>>>()?;
    FrameStack::new(frames)
}

fn crop_or_pad_frame(frame: &Frame, orientation: Orientation, target: u32) -> ScanimateResult<Frame> {
    let c = frame.channels.count();
    let width = frame.width as usize;
    let row_len = width * c;
    match orientation {
        Orientation::Horizontal => {
            let t = target as usize;
            let keep = width.min(t);
            let mut data = Vec::with_capacity(t * frame.height as usize * c);
            for row in frame.data.chunks_exact(row_len) {
                data.extend_from_slice(&row[..keep * c]);
                data.resize(data.len() + (t - keep) * c, 0);
            }
            Frame::new(target, frame.height, frame.channels, data)
        }
        Orientation::Vertical => {
            let keep = (frame.height as usize).min(target as usize);
            let mut data = frame.data[..keep * row_len].to_vec();
            data.resize(target as usize * row_len, 0);
            Frame::new(frame.width, target, frame.channels, data)
        }
    }
}

fn scale_frame(frame: &Frame, orientation: Orientation, target: u32) -> ScanimateResult<Frame> {
    let (along, across) = match orientation {
        Orientation::Horizontal => (frame.width, frame.height),
        Orientation::Vertical => (frame.height, frame.width),
    };
    let factor = f64::from(target) / f64::from(along);
    let across = ((f64::from(across) * factor).round() as u32).max(1);
    let (width, height) = match orientation {
        Orientation::Horizontal => (target, across),
        Orientation::Vertical => (across, target),
    };

    let data = match frame.channels {
        Channels::Gray => resize_samples::<Luma<u8>>(frame, width, height)?,
        Channels::Rgb => resize_samples::<Rgb<u8>>(frame, width, height)?,
        Channels::Rgba => resize_samples::<Rgba<u8>>(frame, width, height)?,
    };
    Frame::new(width, height, frame.channels, data)
}

fn resize_samples<P>(frame: &Frame, width: u32, height: u32) -> ScanimateResult<Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let buf = ImageBuffer::<P, Vec<u8>>::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| ScanimateError::shape("frame buffer does not match its dimensions"))?;
    Ok(imageops::resize(&buf, width, height, FilterType::Triangle).into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
