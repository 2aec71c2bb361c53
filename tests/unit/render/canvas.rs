use super::*;

fn solid(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb(rgb))
}

#[test]
fn blank_canvas_uses_background_rgb() {
    let c = blank_canvas(Size::new(3, 2), BackgroundColor::DarkGray);
    assert_eq!(dimensions(&c), Size::new(3, 2));
    assert!(c.pixels().all(|p| p.0 == [0x33, 0x33, 0x33]));
}

#[test]
fn paste_clips_layers_that_overhang() {
    let mut canvas = solid(4, 4, [0, 0, 0]);
    paste(&mut canvas, &solid(2, 2, [255, 0, 0]), Offset::new(-1, 3));
    assert_eq!(canvas.get_pixel(0, 3).0, [255, 0, 0]);
    assert_eq!(canvas.get_pixel(1, 3).0, [0, 0, 0]);
    assert_eq!(canvas.get_pixel(0, 2).0, [0, 0, 0]);
}

#[test]
fn crop_is_clipped_to_bounds() {
    let img = solid(10, 10, [1, 2, 3]);
    let c = crop(&img, Rect::new(8, 8, 5, 5));
    assert_eq!(dimensions(&c), Size::new(2, 2));
}

#[test]
fn compose_resizes_crops_and_pastes() {
    let src = solid(10, 10, [200, 10, 10]);
    let placement = Placement {
        canvas: Size::new(20, 20),
        resize_to: Some(Size::new(20, 20)),
        crop: Some(Rect::new(2, 2, 16, 16)),
        offset: Offset::new(2, 2),
    };
    let out = compose(&src, &placement, BackgroundColor::White);
    assert_eq!(dimensions(&out), Size::new(20, 20));
    assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(out.get_pixel(1, 19).0, [255, 255, 255]);
    assert_eq!(out.get_pixel(10, 10).0, [200, 10, 10]);
}

#[test]
fn open_rgb_flattens_alpha_and_reports_decode_errors() {
    let dir = std::path::PathBuf::from("target").join("unit_open_rgb");
    std::fs::create_dir_all(&dir).unwrap();

    let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 0]));
    let png = dir.join("alpha.png");
    rgba.save(&png).unwrap();
    let rgb = open_rgb(&png).unwrap();
    assert_eq!(dimensions(&rgb), Size::new(3, 2));
    assert_eq!(rgb.get_pixel(0, 0).0, [10, 20, 30]);

    let junk = dir.join("junk.jpg");
    std::fs::write(&junk, b"not an image at all").unwrap();
    assert!(matches!(
        open_rgb(&junk),
        Err(PanelizerError::Decode { .. })
    ));

    assert!(matches!(
        open_rgb(&dir.join("missing.jpg")),
        Err(PanelizerError::Io { .. })
    ));
}

#[test]
fn probe_dimensions_sniffs_content_not_extension() {
    let dir = std::path::PathBuf::from("target").join("unit_probe_dimensions");
    std::fs::create_dir_all(&dir).unwrap();

    let mislabeled = dir.join("really_png.jpg");
    solid(7, 5, [1, 2, 3])
        .save_with_format(&mislabeled, image::ImageFormat::Png)
        .unwrap();
    assert_eq!(probe_dimensions(&mislabeled).unwrap(), Size::new(7, 5));

    let junk = dir.join("junk.png");
    std::fs::write(&junk, b"nope").unwrap();
    assert!(matches!(
        probe_dimensions(&junk),
        Err(PanelizerError::Decode { .. })
    ));
    assert!(matches!(
        probe_dimensions(&dir.join("missing.png")),
        Err(PanelizerError::Io { .. })
    ));
}
