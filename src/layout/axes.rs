use std::fmt;
use std::str::FromStr;

use ndarray::{Array4, ArrayD, ArrayViewD, Axis, IxDyn};

use crate::foundation::core::{Channels, Frame, FrameStack};
use crate::foundation::error::{ScanimateError, ScanimateResult};

/// One named axis of a raw pixel array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisTag {
    /// `B`: batch of stacks; only a batch of one is accepted.
    Batch,
    /// `F`: animation frames.
    Frame,
    /// `H`: rows.
    Height,
    /// `W`: columns.
    Width,
    /// `C`: samples per pixel.
    Channel,
}

impl AxisTag {
    const CANONICAL: [AxisTag; 5] = [
        AxisTag::Batch,
        AxisTag::Frame,
        AxisTag::Height,
        AxisTag::Width,
        AxisTag::Channel,
    ];

    fn letter(self) -> char {
        match self {
            Self::Batch => 'B',
            Self::Frame => 'F',
            Self::Height => 'H',
            Self::Width => 'W',
            Self::Channel => 'C',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'B' => Some(Self::Batch),
            'F' => Some(Self::Frame),
            'H' => Some(Self::Height),
            'W' => Some(Self::Width),
            'C' => Some(Self::Channel),
            _ => None,
        }
    }
}

/// Memory layout of a raw pixel array, e.g. `FHWC`, `BFCHW` or `HWF`.
///
/// `F`, `H` and `W` are required. Without `C` the array is grayscale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AxisOrder {
    axes: Vec<AxisTag>,
}

impl AxisOrder {
    /// The layout [`FrameStack`] uses internally: `FHWC`.
    pub fn canonical() -> Self {
        Self {
            axes: vec![
                AxisTag::Frame,
                AxisTag::Height,
                AxisTag::Width,
                AxisTag::Channel,
            ],
        }
    }

    /// Number of axes.
    pub fn rank(&self) -> usize {
        self.axes.len()
    }

    /// Axes in declared order.
    pub fn axes(&self) -> &[AxisTag] {
        &self.axes
    }

    /// Position of `tag` in the declared order.
    pub fn position(&self, tag: AxisTag) -> Option<usize> {
        self.axes.iter().position(|&a| a == tag)
    }

    /// Whether the layout includes `tag`.
    pub fn has(&self, tag: AxisTag) -> bool {
        self.position(tag).is_some()
    }

    // Canonical-ordered subset of the declared axes.
    fn canonical_subset(&self) -> Vec<AxisTag> {
        AxisTag::CANONICAL
            .into_iter()
            .filter(|&t| self.has(t))
            .collect()
    }
}

impl FromStr for AxisOrder {
    type Err = ScanimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut axes = Vec::with_capacity(s.len());
        for c in s.trim().chars() {
            let tag = AxisTag::from_letter(c).ok_or_else(|| {
                ScanimateError::invalid(format!("unknown axis letter '{c}' in order '{s}'"))
            })?;
            if axes.contains(&tag) {
                return Err(ScanimateError::invalid(format!(
                    "axis '{c}' repeated in order '{s}'"
                )));
            }
            axes.push(tag);
        }
        for required in [AxisTag::Frame, AxisTag::Height, AxisTag::Width] {
            if !axes.contains(&required) {
                return Err(ScanimateError::invalid(format!(
                    "axis order '{s}' lacks required axis '{}'",
                    required.letter()
                )));
            }
        }
        Ok(Self { axes })
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tag in &self.axes {
            write!(f, "{}", tag.letter())?;
        }
        Ok(())
    }
}

/// Normalize a raw array laid out as `order` into a [`FrameStack`].
#[tracing::instrument(level = "debug", skip(array, order), fields(shape = ?array.shape(), order = %order))]
pub fn stack_from_array(array: ArrayViewD<'_, u8>, order: &AxisOrder) -> ScanimateResult<FrameStack> {
    if array.ndim() != order.rank() {
        return Err(ScanimateError::shape(format!(
            "array has {} axes, order '{order}' declares {}",
            array.ndim(),
            order.rank()
        )));
    }
    if let Some(b) = order.position(AxisTag::Batch)
        && array.len_of(Axis(b)) != 1
    {
        return Err(ScanimateError::shape(format!(
            "batch axis has length {}, only a single stack is supported",
            array.len_of(Axis(b))
        )));
    }

    let perm = order
        .canonical_subset()
        .into_iter()
        .filter_map(|t| order.position(t))
        .collect::<Vec<_>>();
    let mut view = array.permuted_axes(IxDyn(&perm));
    if order.has(AxisTag::Batch) {
        view = view.index_axis_move(Axis(0), 0);
    }
    if !order.has(AxisTag::Channel) {
        view = view.insert_axis(Axis(3));
    }

    let dims = view.shape().to_vec();
    let (n, h, w, c) = (dims[0], dims[1], dims[2], dims[3]);
    let channels = Channels::from_count(c)?;
    let height = u32::try_from(h).map_err(|_| ScanimateError::invalid("height exceeds u32"))?;
    let width = u32::try_from(w).map_err(|_| ScanimateError::invalid("width exceeds u32"))?;

    let mut frames = Vec::with_capacity(n);
    for k in 0..n {
        let data = view.index_axis(Axis(0), k).iter().copied().collect();
        frames.push(Frame::new(width, height, channels, data)?);
    }
    FrameStack::new(frames)
}

/// Canonical `(frames, height, width, channels)` copy of `stack`.
pub fn stack_to_array(stack: &FrameStack) -> ScanimateResult<Array4<u8>> {
    let shape = (
        stack.len(),
        stack.height() as usize,
        stack.width() as usize,
        stack.channels().count(),
    );
    let data = stack
        .frames()
        .iter()
        .flat_map(|f| f.data.iter().copied())
        .collect::<Vec<_>>();
    Array4::from_shape_vec(shape, data)
        .map_err(|e| ScanimateError::shape(format!("frame stack to array: {e}")))
}

/// Copy of `stack` laid out as `order` (standard row-major strides).
pub fn stack_to_array_with_order(stack: &FrameStack, order: &AxisOrder) -> ScanimateResult<ArrayD<u8>> {
    let mut array = stack_to_array(stack)?.into_dyn();
    if !order.has(AxisTag::Channel) {
        if stack.channels() != Channels::Gray {
            return Err(ScanimateError::shape(format!(
                "order '{order}' has no channel axis but the stack has {} channels",
                stack.channels().count()
            )));
        }
        array = array.index_axis_move(Axis(3), 0);
    }
    if order.has(AxisTag::Batch) {
        array = array.insert_axis(Axis(0));
    }

    let canon = order.canonical_subset();
    let perm = order
        .axes()
        .iter()
        .filter_map(|t| canon.iter().position(|c| c == t))
        .collect::<Vec<_>>();
    Ok(array.permuted_axes(IxDyn(&perm)).as_standard_layout().into_owned())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/axes.rs"]
mod tests;
