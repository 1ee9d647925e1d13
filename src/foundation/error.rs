/// Convenience result type used across scanimate.
pub type ScanimateResult<T> = Result<T, ScanimateError>;

/// Top-level error taxonomy used by the grid, compositing and media APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScanimateError {
    /// The frame stack length differs from the frame count a grid was built for.
    #[error("frame count mismatch: grid expects {expected} frames, got {actual}")]
    FrameCountMismatch {
        /// Frame count configured on the grid.
        expected: usize,
        /// Number of frames supplied.
        actual: usize,
    },

    /// Frame dimensions or channel counts disagree with each other or with a grid.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// `stripe_width * frame_count` does not divide the striping axis length.
    #[error("invalid period: period {period} does not divide axis length {axis_len}")]
    InvalidPeriod {
        /// Pattern period in pixels.
        period: usize,
        /// Length of the striping axis in pixels.
        axis_len: usize,
    },

    /// Non-positive sizes, unsupported channel counts and other bad arguments.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Wrapped lower-level error from decoding, encoding or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScanimateError {
    /// Build a [`ScanimateError::ShapeMismatch`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Build a [`ScanimateError::InvalidParameter`] value.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Build a [`ScanimateError::FrameCountMismatch`] value.
    pub fn frame_count(expected: usize, actual: usize) -> Self {
        Self::FrameCountMismatch { expected, actual }
    }

    /// Build a [`ScanimateError::InvalidPeriod`] value.
    pub fn period(period: usize, axis_len: usize) -> Self {
        Self::InvalidPeriod { period, axis_len }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
