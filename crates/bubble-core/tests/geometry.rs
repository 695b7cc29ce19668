// File: crates/bubble-core/tests/geometry.rs
// Purpose: Evenly spaced values and ring placement around a centre.

use bubble_core::geometry::{linspace, ring, Point};

#[test]
fn linspace_includes_both_ends() {
    assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert_eq!(linspace(2.0, 3.0, 1), vec![2.0, 3.0]);
}

#[test]
fn ring_starts_at_twelve_o_clock_and_keeps_radius() {
    let center = Point::new(100.0, 100.0);
    let pts = ring(center, 50.0, 4);
    assert_eq!(pts.len(), 4);
    assert!((pts[0].x - 100.0).abs() < 1e-9 && (pts[0].y - 50.0).abs() < 1e-9);
    for p in &pts {
        let d = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
        assert!((d - 50.0).abs() < 1e-9);
    }
    assert!(ring(center, 50.0, 0).is_empty());
}
