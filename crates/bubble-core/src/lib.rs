// File: crates/bubble-core/src/lib.rs
// Summary: Core library entry point; exports hook composition, notifications, configuration and the chart host.

pub mod autoplay;
pub mod chart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hooks;
pub mod misc;
pub mod observer;
pub mod palette;
pub mod plugin;
pub mod scale;
pub mod scene;
pub mod types;

pub use autoplay::AutoClicker;
pub use chart::{BubbleChart, ChartBuilder, ChartEvent, Lifecycle, LifecycleComposer, Stage, CLICK};
pub use config::{ChartConfig, LoggingConfig, PluginEntry, SkillItem};
pub use error::ChartError;
pub use hooks::{after, before, hook, Hook, HookChain, HookComposer};
pub use misc::SliceExt;
pub use observer::{handler, predicate, Channel, Handler, ObserverRegistry, Predicate};
pub use plugin::{CentralClickExtension, Extension, LinesExtension};
pub use scene::{BubbleNode, Scene, TextElement, Transition};
pub use types::NodeId;
