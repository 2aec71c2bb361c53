use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_writer").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn names_follow_output_convention() {
    assert_eq!(panel_file_name("IMG_1", ""), "IMG_1_panel.jpg");
    assert_eq!(panel_file_name("pano", "_3"), "pano_3_panel.jpg");
    assert_eq!(stack_file_name("IMG_2"), "IMG_2_stacked.jpg");
    assert_eq!(file_stem_lossy(Path::new("/a/b/photo.final.jpeg")), "photo.final");
}

#[test]
fn output_dir_sits_next_to_source() {
    assert_eq!(
        output_dir_for(Path::new("/photos/trip/a.jpg")),
        PathBuf::from("/photos/trip/panelizer_output")
    );
    assert_eq!(
        output_dir_for(Path::new("a.jpg")),
        PathBuf::from("panelizer_output")
    );
}

#[test]
fn ensure_output_dir_is_idempotent() {
    let dir = scratch("idempotent");
    let src = dir.join("x.jpg");
    let a = ensure_output_dir(&src).unwrap();
    let b = ensure_output_dir(&src).unwrap();
    assert_eq!(a, b);
    assert!(a.is_dir());
}

#[test]
fn jpeg_round_trips_dimensions() {
    let dir = scratch("jpeg");
    let img = RgbImage::from_pixel(37, 21, image::Rgb([12, 200, 99]));
    let path = dir.join("out.jpg");
    write_jpeg(&img, &path).unwrap();
    assert_eq!(image::image_dimensions(&path).unwrap(), (37, 21));
    assert_eq!(
        image::ImageFormat::from_path(&path).unwrap(),
        image::ImageFormat::Jpeg
    );
}

/// Sampling factor byte of every component in the first baseline SOF segment.
fn sof0_sampling(jpeg: &[u8]) -> Vec<u8> {
    let mut i = 2;
    while i + 4 <= jpeg.len() {
        assert_eq!(jpeg[i], 0xFF, "segment marker expected at {i}");
        let marker = jpeg[i + 1];
        let len = usize::from(u16::from_be_bytes([jpeg[i + 2], jpeg[i + 3]]));
        if marker == 0xC0 {
            let components = usize::from(jpeg[i + 9]);
            return (0..components).map(|c| jpeg[i + 11 + 3 * c]).collect();
        }
        i += 2 + len;
    }
    panic!("no SOF0 segment");
}

#[test]
fn jpeg_is_baseline_with_full_resolution_chroma() {
    let dir = scratch("sampling");
    let img = RgbImage::from_fn(64, 48, |x, y| image::Rgb([(x * 4) as u8, (y * 5) as u8, 128]));
    let path = dir.join("p_panel.jpg");
    write_jpeg(&img, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    assert_eq!(sof0_sampling(&bytes), vec![0x11, 0x11, 0x11]);
}

#[test]
fn failed_encode_leaves_no_file_behind() {
    let dir = scratch("failed_encode");
    let path = dir.join("huge.jpg");
    let img = RgbImage::new(70_000, 1);
    assert!(matches!(
        write_jpeg(&img, &path),
        Err(PanelizerError::Encode { .. })
    ));
    assert!(!path.exists());
}

#[test]
fn remove_outputs_ignores_missing_files() {
    let dir = scratch("remove");
    let kept = dir.join("a.jpg");
    std::fs::write(&kept, b"x").unwrap();
    remove_outputs(&[kept.clone(), dir.join("never_written.jpg")]);
    assert!(!kept.exists());
}

#[test]
fn sidecar_names_the_file_and_the_error() {
    let dir = scratch("sidecar");
    let src = dir.join("broken.png");
    let path = write_failure_sidecar(&src, &"bad header").unwrap();
    assert_eq!(path, dir.join(OUTPUT_DIR_NAME).join("broken.png.failed"));
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(
        text,
        "Export failed for broken.png (or stack).\nDetails: bad header"
    );
}
