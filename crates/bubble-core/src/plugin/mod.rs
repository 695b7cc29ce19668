// File: crates/bubble-core/src/plugin/mod.rs
// Summary: Extension trait and the built-in extensions selectable from a chart's `plugins` list.

pub mod central_click;
pub mod lines;

use crate::chart::LifecycleComposer;
use crate::config::PluginEntry;

pub use central_click::CentralClickExtension;
pub use lines::LinesExtension;

/// Independently written behaviour that wraps the chart's lifecycle methods.
///
/// Extensions never see each other: each `install` only captures whatever the composer holds at
/// that moment.
pub trait Extension {
    /// Unique within one chart.
    fn name(&self) -> &str;
    fn install(&self, hooks: &mut LifecycleComposer);
}

/// Instantiate the built-in extension named by `entry`.
pub fn from_entry(entry: &PluginEntry) -> Box<dyn Extension> {
    match entry {
        PluginEntry::Lines(options) => Box::new(LinesExtension::new(options.clone())),
        PluginEntry::CentralClick(options) => Box::new(CentralClickExtension::new(options.clone())),
    }
}
