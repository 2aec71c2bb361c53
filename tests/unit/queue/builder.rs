use std::collections::HashMap;

use super::*;

fn stacking() -> LayoutConfig {
    LayoutConfig {
        stack_landscape_images: true,
        ..LayoutConfig::default()
    }
}

fn probe_table(entries: &[(&str, Option<(u32, u32)>)]) -> HashMap<PathBuf, Option<Size>> {
    entries
        .iter()
        .map(|(name, dims)| (PathBuf::from(name), dims.map(Size::from)))
        .collect()
}

fn group(files: &[&str], table: &HashMap<PathBuf, Option<Size>>) -> Vec<Vec<String>> {
    build_queue_with(files, &stacking(), |p| table.get(p).copied().flatten())
        .into_iter()
        .map(|u| {
            u.paths
                .iter()
                .map(|p| p.display().to_string())
                .collect()
        })
        .collect()
}

#[test]
fn without_stacking_every_file_is_a_unit() {
    let files = ["a.jpg", "b.jpg", "c.jpg"];
    let units = build_queue_with(&files, &LayoutConfig::default(), |_| {
        panic!("no probing without stacking")
    });
    assert_eq!(units.len(), 3);
    assert!(units.iter().all(|u| !u.is_stack()));
    assert_eq!(units[1].paths, vec![PathBuf::from("b.jpg")]);
}

#[test]
fn compatible_wide_run_is_stacked() {
    let table = probe_table(&[
        ("a.jpg", Some((1900, 1000))),
        ("b.jpg", Some((1920, 1000))),
        ("c.jpg", Some((1000, 1500))),
    ]);
    assert_eq!(
        group(&["a.jpg", "b.jpg", "c.jpg"], &table),
        vec![vec!["a.jpg", "b.jpg"], vec!["c.jpg"]]
    );
}

#[test]
fn stacks_never_exceed_three() {
    let table = probe_table(&[
        ("1.jpg", Some((1900, 1000))),
        ("2.jpg", Some((1900, 1000))),
        ("3.jpg", Some((1900, 1000))),
        ("4.jpg", Some((1900, 1000))),
        ("5.jpg", Some((1900, 1000))),
    ]);
    let groups = group(&["1.jpg", "2.jpg", "3.jpg", "4.jpg", "5.jpg"], &table);
    assert_eq!(
        groups,
        vec![vec!["1.jpg", "2.jpg", "3.jpg"], vec!["4.jpg", "5.jpg"]]
    );
}

#[test]
fn incompatible_ratio_breaks_the_run() {
    let table = probe_table(&[
        ("a.jpg", Some((1800, 1000))),
        ("b.jpg", Some((2150, 1000))),
        ("c.jpg", Some((1800, 1000))),
    ]);
    assert_eq!(
        group(&["a.jpg", "b.jpg", "c.jpg"], &table),
        vec![vec!["a.jpg"], vec!["b.jpg"], vec!["c.jpg"]]
    );
}

#[test]
fn panoramas_and_portraits_do_not_stack() {
    let table = probe_table(&[
        ("pano.jpg", Some((3000, 1000))),
        ("wide.jpg", Some((1900, 1000))),
        ("tall.jpg", Some((1000, 1900))),
    ]);
    assert_eq!(
        group(&["pano.jpg", "wide.jpg", "tall.jpg"], &table),
        vec![vec!["pano.jpg"], vec!["wide.jpg"], vec!["tall.jpg"]]
    );
}

#[test]
fn unreadable_files_become_singletons() {
    let table = probe_table(&[
        ("a.jpg", Some((1900, 1000))),
        ("broken.jpg", None),
        ("c.jpg", Some((1900, 1000))),
        ("d.jpg", Some((1900, 1000))),
    ]);
    assert_eq!(
        group(&["a.jpg", "broken.jpg", "c.jpg", "d.jpg"], &table),
        vec![vec!["a.jpg"], vec!["broken.jpg"], vec!["c.jpg", "d.jpg"]]
    );
}

#[test]
fn each_file_is_probed_once() {
    let files = ["a.jpg", "b.jpg", "c.jpg", "d.jpg"];
    let mut calls = HashMap::<PathBuf, usize>::new();
    let _ = build_queue_with(&files, &stacking(), |p| {
        *calls.entry(p.to_path_buf()).or_default() += 1;
        Some(Size::new(1900, 1000))
    });
    assert!(calls.values().all(|&n| n == 1));
}

#[test]
fn display_names_label_stacks() {
    let cfg = stacking();
    let stack = WorkUnit {
        paths: vec![PathBuf::from("/x/a.jpg"), PathBuf::from("/x/b.jpg")],
        config: cfg,
    };
    assert_eq!(stack.display_name(), "Stack (2): a.jpg...");
    assert_eq!(WorkUnit::single("/x/c.png", cfg).display_name(), "c.png");
}

#[test]
fn collect_images_filters_and_sorts() {
    let dir = PathBuf::from("target").join("unit_collect_images");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("nested.jpg")).unwrap();
    for name in ["b.PNG", "a.jpeg", "c.jpg", "notes.txt", "d.gif"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    let names: Vec<String> = collect_images(&dir)
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.jpeg", "b.PNG", "c.jpg"]);

    assert!(collect_images(&dir.join("missing")).is_err());
}

#[test]
fn stacks_images_whose_extension_does_not_match_their_format() {
    let dir = PathBuf::from("target").join("unit_queue_sniff");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();

    let files = [dir.join("a.jpg"), dir.join("b.jpg")];
    for f in &files {
        image::RgbImage::from_pixel(380, 200, image::Rgb([30, 60, 90]))
            .save_with_format(f, image::ImageFormat::Png)
            .unwrap();
    }

    let units = build_queue(&files, &stacking());
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].paths, files.to_vec());
}
