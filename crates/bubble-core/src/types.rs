// File: crates/bubble-core/src/types.rs
// Summary: Shared types and constants (sizes, durations, node handles).

use serde::Serialize;
use std::fmt;

/// Default square chart size in pixels.
pub const DEFAULT_SIZE: f64 = 500.0;
/// Default minimum bubble radius in pixels.
pub const DEFAULT_RADIUS_MIN: f64 = 50.0;
/// Default duration of every chart transition, in milliseconds.
pub const DEFAULT_TRANSIT_MS: u64 = 1000;
/// Default autoplay click interval, in milliseconds.
pub const DEFAULT_CLICK_INTERVAL_MS: u64 = 4000;
/// Final opacity of the central-click label after its fade-in.
pub const CENTRAL_LABEL_OPACITY: f64 = 0.8;

/// Index of a bubble in the scene.
/// Contract: only valid for the scene that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const fn index(self) -> usize { self.0 }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
