use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageFormat};

use crate::foundation::core::{Channels, Frame, FrameStack};
use crate::foundation::error::{ScanimateError, ScanimateResult};

/// Where the animation frames come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// A single animated GIF; every animation frame is used.
    Gif(PathBuf),
    /// A directory of still images, ordered by file name.
    Directory(PathBuf),
    /// Explicit still images, in the given order.
    Stills(Vec<PathBuf>),
}

impl Source {
    /// Classify command-line paths. Every path must exist.
    pub fn classify(paths: &[PathBuf]) -> ScanimateResult<Self> {
        if paths.is_empty() {
            return Err(ScanimateError::invalid(
                "at least one image source must be given",
            ));
        }
        if let Some(missing) = paths.iter().find(|p| !p.exists()) {
            return Err(anyhow::anyhow!("image source '{}' does not exist", missing.display()).into());
        }
        match paths {
            [one] if one.is_dir() => Ok(Self::Directory(one.clone())),
            [one] if is_gif(one) => Ok(Self::Gif(one.clone())),
            _ => Ok(Self::Stills(paths.to_vec())),
        }
    }
}

fn is_gif(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

/// Load `paths` as a frame stack and keep every `downsample`-th frame.
#[tracing::instrument(level = "debug")]
pub fn load_source(paths: &[PathBuf], downsample: usize) -> ScanimateResult<FrameStack> {
    if downsample == 0 {
        return Err(ScanimateError::invalid("downsample must be >= 1"));
    }
    let stack = match Source::classify(paths)? {
        Source::Gif(path) => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("read gif '{}'", path.display()))?;
            decode_gif(&bytes).with_context(|| format!("decode gif '{}'", path.display()))?
        }
        Source::Directory(dir) => load_stills(&list_images(&dir)?)?,
        Source::Stills(paths) => load_stills(&paths)?,
    };
    let decoded = stack.len();
    let stack = stack.select_every(downsample)?;
    tracing::info!(
        decoded,
        kept = stack.len(),
        width = stack.width(),
        height = stack.height(),
        channels = stack.channels().count(),
        "loaded frames"
    );
    Ok(stack)
}

/// Decode every frame of an animated GIF as straight RGBA.
pub fn decode_gif(bytes: &[u8]) -> ScanimateResult<FrameStack> {
    let decoder = GifDecoder::new(Cursor::new(bytes)).context("open gif decoder")?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .context("decode gif frames")?;

    let frames = frames
        .into_iter()
        .map(|f| {
            let rgba = f.into_buffer();
            let (width, height) = rgba.dimensions();
            Frame::new(width, height, Channels::Rgba, rgba.into_raw())
        })
        .collect::<ScanimateResult<Vec<_>>>()?;
    FrameStack::new(frames)
}

/// Stack decoded stills, converting all of them to the widest colour model
/// found among them (gray < rgb < rgba).
pub fn stack_stills(images: &[DynamicImage]) -> ScanimateResult<FrameStack> {
    let channels = images
        .iter()
        .map(channels_of)
        .max()
        .ok_or_else(|| ScanimateError::invalid("no images to stack"))?;
    let frames = images
        .iter()
        .map(|img| frame_from_dynamic(img, channels))
        .collect::<ScanimateResult<Vec<_>>>()?;
    FrameStack::new(frames)
}

/// Convert a decoded image into a [`Frame`] with the requested layout.
pub fn frame_from_dynamic(img: &DynamicImage, channels: Channels) -> ScanimateResult<Frame> {
    let (width, height, data) = match channels {
        Channels::Gray => {
            let buf = img.to_luma8();
            (buf.width(), buf.height(), buf.into_raw())
        }
        Channels::Rgb => {
            let buf = img.to_rgb8();
            (buf.width(), buf.height(), buf.into_raw())
        }
        Channels::Rgba => {
            let buf = img.to_rgba8();
            (buf.width(), buf.height(), buf.into_raw())
        }
    };
    Frame::new(width, height, channels, data)
}

fn channels_of(img: &DynamicImage) -> Channels {
    let color = img.color();
    if color.has_alpha() {
        Channels::Rgba
    } else if color.has_color() {
        Channels::Rgb
    } else {
        Channels::Gray
    }
}

fn load_stills(paths: &[PathBuf]) -> ScanimateResult<FrameStack> {
    let images = paths
        .iter()
        .map(|p| image::open(p).with_context(|| format!("decode image '{}'", p.display())))
        .collect::<anyhow::Result<Vec<_>>>()?;
    stack_stills(&images)
}

fn list_images(dir: &Path) -> ScanimateResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read directory '{}'", dir.display()))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read directory entry in '{}'", dir.display()))?
            .path();
        if path.is_file() && ImageFormat::from_path(&path).is_ok() {
            paths.push(path);
        }
    }
    if paths.is_empty() {
        return Err(ScanimateError::invalid(format!(
            "directory '{}' contains no images",
            dir.display()
        )));
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

#[cfg(test)]
#[path = "../../tests/unit/media/decode.rs"]
mod tests;
