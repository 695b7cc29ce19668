// File: crates/bubble-core/src/geometry.rs
// Summary: Lightweight geometry helpers for bubble placement.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

/// `steps` evenly spaced values from `start` to `end` inclusive; fewer than two steps yields both ends.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// `n` points evenly spaced on a circle of `radius` around `center`, starting at twelve o'clock.
pub fn ring(center: Point, radius: f64, n: usize) -> Vec<Point> {
    if n == 0 { return Vec::new(); }
    // n + 1 steps so the last angle stops short of a full turn
    linspace(0.0, std::f64::consts::TAU, n + 1)
        .into_iter()
        .take(n)
        .map(|a| Point::new(center.x + radius * a.sin(), center.y - radius * a.cos()))
        .collect()
}
