// File: crates/bubble-core/src/autoplay.rs
// Summary: Random-click autoplay; every interval a random skill bubble is clicked.

use std::time::Duration;

use anyhow::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::chart::BubbleChart;
use crate::misc::SliceExt;
use crate::types::{NodeId, DEFAULT_CLICK_INTERVAL_MS};

#[derive(Clone, Debug)]
pub struct AutoClicker {
    interval: Duration,
    targets: Vec<String>,
}

impl AutoClicker {
    /// Click among the classes of every bubble currently in `chart`.
    pub fn for_chart(chart: &BubbleChart, interval: Duration) -> Self {
        let targets = chart.scene().nodes().pluck(|n| n.class_name.clone()).distinct();
        Self { interval, targets }
    }

    pub fn with_targets(targets: Vec<String>, interval: Duration) -> Self {
        Self { interval, targets: targets.distinct() }
    }

    pub fn interval(&self) -> Duration { self.interval }

    pub fn targets(&self) -> &[String] { &self.targets }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.targets.choose(rng).map(String::as_str)
    }

    /// One timer tick: click a random target and let its transitions finish.
    /// Targets missing from the chart are skipped.
    pub fn tick<R: Rng + ?Sized>(&self, chart: &mut BubbleChart, rng: &mut R) -> Result<Option<NodeId>> {
        let Some(class) = self.pick(rng) else { return Ok(None) };
        let Some(node) = chart.scene().find_by_class(class) else { return Ok(None) };
        chart.click(node)?;
        chart.settle()?;
        info!(class, %node, "autoplay click");
        Ok(Some(node))
    }

    /// Fire `rounds` ticks, calling `wait` with the interval before each one.
    pub fn run<R, W>(&self, chart: &mut BubbleChart, rounds: usize, rng: &mut R, mut wait: W) -> Result<Vec<NodeId>>
    where
        R: Rng + ?Sized,
        W: FnMut(Duration),
    {
        let mut clicked = Vec::with_capacity(rounds);
        for _ in 0..rounds {
            wait(self.interval);
            if let Some(node) = self.tick(chart, rng)? {
                clicked.push(node);
            }
        }
        Ok(clicked)
    }
}

impl Default for AutoClicker {
    fn default() -> Self {
        Self { interval: Duration::from_millis(DEFAULT_CLICK_INTERVAL_MS), targets: Vec::new() }
    }
}
