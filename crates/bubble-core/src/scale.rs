// File: crates/bubble-core/src/scale.rs
// Summary: Linear value -> radius scale for bubble sizing.

/// Maps item values in `[vmin, vmax]` onto radii in `[rmin, rmax]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    pub vmin: f64,
    pub vmax: f64,
    pub rmin: f64,
    pub rmax: f64,
}

impl RadiusScale {
    pub fn new(vmin: f64, vmax: f64, rmin: f64, rmax: f64) -> Self {
        Self { vmin, vmax, rmin, rmax }
    }

    /// Radius for `value`. A degenerate domain (all values equal) maps everything to `rmax`.
    #[inline]
    pub fn radius(&self, value: f64) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < 1e-9 { return self.rmax; }
        let t = ((value - self.vmin) / span).clamp(0.0, 1.0);
        self.rmin + t * (self.rmax - self.rmin)
    }
}
