use std::path::PathBuf;

use image::{Rgb, RgbImage};

use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_batch").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn config() -> LayoutConfig {
    LayoutConfig {
        canvas_height: 120,
        ..LayoutConfig::default()
    }
}

fn fixture(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for (i, (w, h)) in [(40, 60), (60, 40), (50, 50), (30, 90)].into_iter().enumerate() {
        let p = dir.join(format!("img{i}.png"));
        RgbImage::from_pixel(w, h, Rgb([1, 2, 3])).save(&p).unwrap();
        files.push(p);
    }
    files
}

#[test]
fn zero_threads_is_rejected() {
    let opts = BatchOptions {
        parallel: true,
        threads: Some(0),
    };
    assert!(process_batch(&[], &opts).is_err());
}

#[test]
fn parallel_and_sequential_reports_match() {
    let seq_dir = scratch("seq");
    let par_dir = scratch("par");
    let seq = run_batch(&fixture(&seq_dir), &config(), &BatchOptions::default()).unwrap();
    let par = run_batch(
        &fixture(&par_dir),
        &config(),
        &BatchOptions {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(seq.succeeded, 4);
    assert_eq!(par.succeeded, 4);
    assert_eq!(seq.outcomes.len(), par.outcomes.len());
    for (s, p) in seq.outcomes.iter().zip(&par.outcomes) {
        let (UnitOutcome::Written(s), UnitOutcome::Written(p)) = (s, p) else {
            panic!("expected written outcomes");
        };
        assert_eq!(s[0].file_name(), p[0].file_name());
    }
}

#[test]
fn invalid_config_fails_before_queueing() {
    let cfg = LayoutConfig {
        canvas_height: 0,
        ..config()
    };
    assert!(run_batch(&["nope.jpg"], &cfg, &BatchOptions::default()).is_err());
}

#[test]
fn report_counts_missing_units_as_failed() {
    let units = vec![
        WorkUnit::single("target/unit_batch/none_1.jpg", config()),
        WorkUnit::single("target/unit_batch/none_2.jpg", config()),
    ];
    let report = process_batch(&units, &BatchOptions::default()).unwrap();
    assert_eq!(report.failed, 2);
    assert_eq!(report.succeeded, 0);
    assert!(report.outcomes.iter().all(|o| *o == UnitOutcome::Missing));
}
