use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::composite::compositor::CompositeConfig;
use crate::foundation::core::Orientation;
use crate::foundation::error::{ScanimateError, ScanimateResult};
use crate::grid::builder::GridConfig;
use crate::layout::fit::FitMode;

/// End-to-end settings, loadable from a JSON file.
///
/// Every field is optional in JSON:
///
/// ```json
/// { "pattern": "vgrid", "stripe_width": 2, "downsample": 2, "fit": "crop" }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanimateConfig {
    /// Stripe orientation (`hgrid` / `vgrid`).
    pub pattern: Orientation,
    /// Stripe thickness in pixels.
    pub stripe_width: u32,
    /// Keep every n-th source frame.
    pub downsample: usize,
    /// How frames are fitted to the grid period.
    pub fit: FitMode,
    /// Mask frames in parallel.
    pub parallel: bool,
    /// Worker threads for parallel masking.
    pub threads: Option<usize>,
}

impl Default for ScanimateConfig {
    fn default() -> Self {
        Self {
            pattern: Orientation::Horizontal,
            stripe_width: 1,
            downsample: 1,
            fit: FitMode::None,
            parallel: false,
            threads: None,
        }
    }
}

impl ScanimateConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> ScanimateResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject non-positive sizes.
    pub fn validate(&self) -> ScanimateResult<()> {
        if self.stripe_width == 0 {
            return Err(ScanimateError::invalid("stripe_width must be >= 1"));
        }
        if self.downsample == 0 {
            return Err(ScanimateError::invalid("downsample must be >= 1"));
        }
        if let Some(0) = self.threads {
            return Err(ScanimateError::invalid("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Grid parameters for a stack of `frame_count` frames.
    pub fn grid_config(&self, frame_count: usize) -> GridConfig {
        GridConfig::new(self.stripe_width, frame_count, self.pattern)
    }

    /// Compositing parameters matching [`Self::grid_config`].
    pub fn composite_config(&self) -> CompositeConfig {
        CompositeConfig {
            stripe_width: self.stripe_width,
            orientation: self.pattern,
            parallel: self.parallel,
            threads: self.threads,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
