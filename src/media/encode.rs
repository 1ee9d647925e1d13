use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::composite::compositor::Scanimation;
use crate::foundation::core::{Channels, Frame};
use crate::foundation::error::ScanimateResult;

/// Default file name of the composite image.
pub const SCANIMATION_FILE: &str = "scanimation.png";
/// Default file name of the view mask.
pub const PATTERN_FILE: &str = "pattern.png";

/// Destination paths for the two output images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    /// Composite image path.
    pub scanimation: PathBuf,
    /// View mask path.
    pub pattern: PathBuf,
}

impl OutputPaths {
    /// `scanimation.png` and `pattern.png` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            scanimation: dir.join(SCANIMATION_FILE),
            pattern: dir.join(PATTERN_FILE),
        }
    }
}

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> ScanimateResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write `frame` as an 8-bit PNG in its own colour model.
pub fn save_png(path: &Path, frame: &Frame) -> ScanimateResult<()> {
    ensure_parent_dir(path)?;
    let color = match frame.channels {
        Channels::Gray => image::ColorType::L8,
        Channels::Rgb => image::ColorType::Rgb8,
        Channels::Rgba => image::ColorType::Rgba8,
    };
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        color,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "wrote png");
    Ok(())
}

/// Write the composite and the view mask to `paths`.
pub fn write_scanimation(out: &Scanimation, paths: &OutputPaths) -> ScanimateResult<()> {
    save_png(&paths.scanimation, &out.composite)?;
    save_png(&paths.pattern, &out.view_mask)
}

#[cfg(test)]
#[path = "../../tests/unit/media/encode.rs"]
mod tests;
