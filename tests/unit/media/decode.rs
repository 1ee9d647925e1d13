use image::codecs::gif::GifEncoder;
use image::{GrayImage, Luma, Rgba, RgbaImage};

use super::*;

fn gif_bytes(width: u32, height: u32, colors: &[[u8; 4]]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buf);
        let frames = colors
            .iter()
            .map(|&c| image::Frame::new(RgbaImage::from_pixel(width, height, Rgba(c))));
        encoder.encode_frames(frames).unwrap();
    }
    buf
}

#[test]
fn decode_gif_yields_every_frame_as_rgba() {
    let bytes = gif_bytes(6, 4, &[[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]);
    let stack = decode_gif(&bytes).unwrap();
    assert_eq!(stack.len(), 3);
    assert_eq!(stack.width(), 6);
    assert_eq!(stack.height(), 4);
    assert_eq!(stack.channels(), Channels::Rgba);
}

#[test]
fn decode_gif_rejects_garbage() {
    assert!(decode_gif(b"not a gif").is_err());
}

#[test]
fn stills_widen_to_the_richest_colour_model() {
    let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([40])));
    let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4])));
    let stack = stack_stills(&[gray, rgba]).unwrap();
    assert_eq!(stack.channels(), Channels::Rgba);
    assert_eq!(stack.frames()[0].pixel(0, 0), &[40, 40, 40, 255]);
    assert_eq!(stack.frames()[1].pixel(1, 1), &[1, 2, 3, 4]);
}

#[test]
fn stills_of_different_sizes_are_a_shape_mismatch() {
    let a = DynamicImage::ImageLuma8(GrayImage::new(2, 2));
    let b = DynamicImage::ImageLuma8(GrayImage::new(3, 2));
    assert!(matches!(
        stack_stills(&[a, b]),
        Err(ScanimateError::ShapeMismatch(_))
    ));
}

#[test]
fn classify_distinguishes_gif_directory_and_stills() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("anim.GIF");
    std::fs::write(&gif, gif_bytes(2, 2, &[[0, 0, 0, 255]])).unwrap();
    let png = dir.path().join("a.png");
    GrayImage::new(2, 2).save(&png).unwrap();

    assert_eq!(
        Source::classify(std::slice::from_ref(&gif)).unwrap(),
        Source::Gif(gif.clone())
    );
    assert_eq!(
        Source::classify(&[dir.path().to_path_buf()]).unwrap(),
        Source::Directory(dir.path().to_path_buf())
    );
    assert_eq!(
        Source::classify(std::slice::from_ref(&png)).unwrap(),
        Source::Stills(vec![png.clone()])
    );

    let missing = dir.path().join("nope.gif");
    let err = Source::classify(&[missing]).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    assert!(Source::classify(&[]).is_err());
}

#[test]
fn load_source_reads_directory_in_name_order_and_downsamples() {
    let dir = tempfile::tempdir().unwrap();
    for (name, v) in [("c.png", 30u8), ("a.png", 10), ("b.png", 20), ("d.png", 40)] {
        GrayImage::from_pixel(3, 3, Luma([v]))
            .save(dir.path().join(name))
            .unwrap();
    }
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let all = load_source(&[dir.path().to_path_buf()], 1).unwrap();
    let values = all.frames().iter().map(|f| f.data[0]).collect::<Vec<_>>();
    assert_eq!(values, vec![10, 20, 30, 40]);

    let every_other = load_source(&[dir.path().to_path_buf()], 2).unwrap();
    let values = every_other
        .frames()
        .iter()
        .map(|f| f.data[0])
        .collect::<Vec<_>>();
    assert_eq!(values, vec![10, 30]);

    assert!(load_source(&[dir.path().to_path_buf()], 0).is_err());
}

#[test]
fn broken_gif_error_keeps_decoder_cause() {
    let dir = tempfile::tempdir().unwrap();
    let gif = dir.path().join("broken.gif");
    std::fs::write(&gif, b"GIF89a this is not a real gif").unwrap();

    let err = load_source(&[gif], 1).unwrap_err();
    assert!(err.to_string().contains("decode gif"), "{err}");
    let cause = std::error::Error::source(&err).expect("decoder cause is kept");
    assert!(!cause.to_string().is_empty());
}
