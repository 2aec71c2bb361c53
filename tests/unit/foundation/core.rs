use super::*;

#[test]
fn aspect_handles_zero_height() {
    assert_eq!(Size::new(10, 0).aspect(), 0.0);
    assert!((Size::new(1920, 1080).aspect() - 16.0 / 9.0).abs() < 1e-12);
}

#[test]
fn scaled_truncates() {
    assert_eq!(Size::new(1000, 1500).scaled(2500.0 / 1500.0), Size::new(1666, 2500));
    assert_eq!(Size::new(3, 3).scaled(0.5), Size::new(1, 1));
}

#[test]
fn percent_of_floors_and_clamps() {
    assert_eq!(percent_of(2500, 10.0), 250);
    assert_eq!(percent_of(2000, 2.5), 50);
    assert_eq!(percent_of(1875, 7.0), 131);
    assert_eq!(percent_of(2000, -5.0), 0);
}

#[test]
fn ensure_non_empty_rejects_zero_axes() {
    assert!(Size::new(0, 5).ensure_non_empty("safe area").is_err());
    assert!(Size::new(5, 5).ensure_non_empty("safe area").is_ok());
}

#[test]
fn edges_sum_by_axis() {
    let e = PixelEdges {
        left: 1,
        right: 2,
        top: 3,
        bottom: 4,
    };
    assert_eq!(e.horizontal(), 3);
    assert_eq!(e.vertical(), 7);
    assert_eq!(PixelEdges::uniform(5).horizontal(), 10);
}
