use std::str::FromStr;

use crate::foundation::error::{ScanimateError, ScanimateResult};

/// Fully opaque / fully visible 8-bit sample value.
pub const MAX_VALUE: u8 = u8::MAX;

/// Per-pixel sample layout of a [`Frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channels {
    /// One luminance sample.
    Gray,
    /// Red, green, blue.
    Rgb,
    /// Red, green, blue, alpha (straight, not premultiplied).
    Rgba,
}

impl Channels {
    /// Map a raw channel count (1, 3 or 4) to a layout.
    pub fn from_count(count: usize) -> ScanimateResult<Self> {
        match count {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            n => Err(ScanimateError::invalid(format!(
                "channel count must be 1, 3 or 4 (got {n})"
            ))),
        }
    }

    /// Number of interleaved samples per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// `true` when the last sample is alpha.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }

    /// Index of the alpha sample within a pixel, if any.
    pub fn alpha_index(self) -> Option<usize> {
        self.has_alpha().then(|| self.count() - 1)
    }
}

/// Axis along which the stripe pattern varies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Stripes are columns; the illusion moves horizontally ("hgrid").
    #[default]
    #[serde(alias = "hgrid")]
    Horizontal,
    /// Stripes are rows; the illusion moves vertically ("vgrid").
    #[serde(alias = "vgrid")]
    Vertical,
}

impl Orientation {
    /// Pattern name used on the command line.
    pub fn pattern_name(self) -> &'static str {
        match self {
            Self::Horizontal => "hgrid",
            Self::Vertical => "vgrid",
        }
    }

    /// Length of the striping axis for a `height x width` image.
    pub fn axis_len(self, height: u32, width: u32) -> u32 {
        match self {
            Self::Horizontal => width,
            Self::Vertical => height,
        }
    }

    /// Coordinate tested against the stripe period for pixel `(x, y)`.
    pub(crate) fn coordinate(self, x: u32, y: u32) -> u32 {
        match self {
            Self::Horizontal => x,
            Self::Vertical => y,
        }
    }
}

impl FromStr for Orientation {
    type Err = ScanimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hgrid" | "horizontal" => Ok(Self::Horizontal),
            "vgrid" | "vertical" => Ok(Self::Vertical),
            other => Err(ScanimateError::invalid(format!(
                "unknown pattern '{other}' (expected 'hgrid' or 'vgrid')"
            ))),
        }
    }
}

/// One 8-bit image: row-major, channel-interleaved samples.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Sample layout.
    pub channels: Channels,
    /// `width * height * channels.count()` samples.
    pub data: Vec<u8>,
}

impl Frame {
    /// Wrap a sample buffer, checking its length against the declared shape.
    pub fn new(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> ScanimateResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScanimateError::invalid(format!(
                "frame dimensions must be > 0 (got {width}x{height})"
            )));
        }
        let frame = Self {
            width,
            height,
            channels,
            data,
        };
        frame.check_len()?;
        Ok(frame)
    }

    /// Check that `data` holds exactly `width * height * channels` samples.
    ///
    /// The fields are public, so frames built by hand can disagree with their
    /// declared shape.
    pub fn check_len(&self) -> ScanimateResult<()> {
        let expected = sample_len(self.width, self.height, self.channels);
        if self.data.len() != expected {
            return Err(ScanimateError::shape(format!(
                "frame buffer holds {} samples, {}x{}x{} needs {expected}",
                self.data.len(),
                self.width,
                self.height,
                self.channels.count()
            )));
        }
        Ok(())
    }

    /// A frame where every pixel equals `pixel`.
    pub fn solid(width: u32, height: u32, channels: Channels, pixel: &[u8]) -> ScanimateResult<Self> {
        if pixel.len() != channels.count() {
            return Err(ScanimateError::shape(format!(
                "solid pixel has {} samples, layout needs {}",
                pixel.len(),
                channels.count()
            )));
        }
        let px_count = width as usize * height as usize;
        Self::new(width, height, channels, pixel.repeat(px_count))
    }

    /// Samples of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let i = self.index(x, y);
        &self.data[i..i + self.channels.count()]
    }

    /// `(height, width, channels)` as used in shape diagnostics.
    pub fn shape(&self) -> (u32, u32, usize) {
        (self.height, self.width, self.channels.count())
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * self.channels.count()
    }
}

pub(crate) fn sample_len(width: u32, height: u32, channels: Channels) -> usize {
    width as usize * height as usize * channels.count()
}

/// Ordered, non-empty sequence of frames sharing one shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameStack {
    frames: Vec<Frame>,
}

impl FrameStack {
    /// Build a stack; every frame must match the first one's shape and hold
    /// a buffer of that size.
    pub fn new(frames: Vec<Frame>) -> ScanimateResult<Self> {
        let Some(first) = frames.first() else {
            return Err(ScanimateError::invalid("frame stack must hold at least one frame"));
        };
        for (idx, f) in frames.iter().enumerate() {
            let expected = sample_len(f.width, f.height, f.channels);
            if f.data.len() != expected {
                return Err(ScanimateError::shape(format!(
                    "frame {idx} holds {} samples, its {}x{}x{} shape needs {expected}",
                    f.data.len(),
                    f.width,
                    f.height,
                    f.channels.count()
                )));
            }
        }
        let shape = first.shape();
        if let Some((idx, bad)) = frames.iter().enumerate().find(|(_, f)| f.shape() != shape) {
            return Err(ScanimateError::shape(format!(
                "frame {idx} has shape {:?}, frame 0 has {shape:?}",
                bad.shape()
            )));
        }
        Ok(Self { frames })
    }

    /// Number of frames (N).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`: stacks are non-empty by construction.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Shared frame width.
    pub fn width(&self) -> u32 {
        self.frames[0].width
    }

    /// Shared frame height.
    pub fn height(&self) -> u32 {
        self.frames[0].height
    }

    /// Shared sample layout.
    pub fn channels(&self) -> Channels {
        self.frames[0].channels
    }

    /// Borrow the frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Consume the stack, returning its frames.
    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Keep every `stride`-th frame starting at frame 0.
    pub fn select_every(&self, stride: usize) -> ScanimateResult<Self> {
        if stride == 0 {
            return Err(ScanimateError::invalid("downsample stride must be >= 1"));
        }
        Self::new(self.frames.iter().step_by(stride).cloned().collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
