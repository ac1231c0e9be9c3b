use std::path::Path;

use image::{GrayImage, Luma};
use mattecam::{
    capture::{CaptureSource, FileCapture},
    develop::{develop, DevelopOptions},
    image::{Color, Image, Orientation},
};

fn save_mask(path: &Path, width: u32, height: u32, value: u8) {
    GrayImage::from_pixel(width, height, Luma([value]))
        .save(path)
        .unwrap();
}

#[test]
fn develop_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let photo = Image::filled(8, 4, Color::BLACK);
    photo.save(dir.path().join("photo.png")).unwrap();
    save_mask(&dir.path().join("skin.png"), 4, 2, 0);
    save_mask(&dir.path().join("hair.png"), 4, 2, 255);
    save_mask(&dir.path().join("teeth.png"), 4, 2, 0);

    let mut source = FileCapture::new(dir.path().join("photo.png"))
        .skin(dir.path().join("skin.png"))
        .hair(dir.path().join("hair.png"))
        .teeth(dir.path().join("teeth.png"));
    let captured = source.capture().unwrap();
    assert_eq!(captured.photo, photo);
    assert!(captured.mattes().is_some());

    let options = DevelopOptions {
        alpha: 1.0,
        ..DevelopOptions::default()
    };
    let developed = develop(&captured, &options);
    assert_eq!(developed.width(), 4);
    assert_eq!(developed.height(), 8);
    assert!(developed.pixels().all(|c| c == Color::GREEN));

    developed.save(dir.path().join("out.png")).unwrap();
    assert_eq!(Image::load(dir.path().join("out.png")).unwrap(), developed);
}

#[test]
fn develop_without_mattes() {
    let dir = tempfile::tempdir().unwrap();
    let photo = Image::from_fn(3, 2, |x, y| Color::from_rgb8(x as u8 * 50, y as u8 * 50, 0));
    photo.save(dir.path().join("photo.png")).unwrap();
    save_mask(&dir.path().join("skin.png"), 3, 2, 255);

    // Only the skin matte is available, so none are applied.
    let mut source = FileCapture::new(dir.path().join("photo.png")).skin(dir.path().join("skin.png"));
    let captured = source.capture().unwrap();
    assert!(captured.skin.is_some());
    assert!(captured.mattes().is_none());

    let developed = develop(&captured, &DevelopOptions::default());
    assert_eq!(developed, photo.oriented(Orientation::Right));
}

#[test]
fn color_mattes_are_reduced_to_luminance() {
    let dir = tempfile::tempdir().unwrap();
    Image::filled(2, 2, Color::WHITE)
        .save(dir.path().join("white.png"))
        .unwrap();

    let mut source = FileCapture::new(dir.path().join("white.png"))
        .skin(dir.path().join("white.png"))
        .hair(dir.path().join("white.png"))
        .teeth(dir.path().join("white.png"));
    let captured = source.capture().unwrap();
    let [skin, ..] = captured.mattes().unwrap();
    assert_eq!(skin.get(1, 1), 255);
}

#[test]
fn jpeg_photo() {
    let dir = tempfile::tempdir().unwrap();
    let photo = Image::filled(16, 16, Color::from_rgb8(200, 100, 50));
    photo.save(dir.path().join("photo.jpg")).unwrap();

    let loaded = Image::load(dir.path().join("photo.jpg")).unwrap();
    assert_eq!(loaded.resolution(), photo.resolution());
    let c = loaded.get(8, 8);
    assert!((i16::from(c.r()) - 200).abs() <= 4, "{c:?}");
    assert!((i16::from(c.g()) - 100).abs() <= 4, "{c:?}");
    assert!((i16::from(c.b()) - 50).abs() <= 4, "{c:?}");
    assert_eq!(c.a(), 255);
}
