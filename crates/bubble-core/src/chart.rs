// File: crates/bubble-core/src/chart.rs
// Summary: BubbleChart host; composes extension hooks over setup/reset/moveToCentral and drives them.

use std::collections::HashSet;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::{ChartConfig, SkillItem};
use crate::error::ChartError;
use crate::hooks::{hook, HookChain, HookComposer};
use crate::misc;
use crate::observer::{Channel, ObserverRegistry};
use crate::plugin::{self, Extension};
use crate::scene::Scene;
use crate::types::NodeId;

/// Notification sent on the chart's event channel when a bubble is clicked.
pub const CLICK: &str = "click";

#[derive(Clone, Debug, PartialEq)]
pub enum ChartEvent {
    Click { node: NodeId, class_name: String },
}

impl ChartEvent {
    pub fn node(&self) -> NodeId {
        match self {
            ChartEvent::Click { node, .. } => *node,
        }
    }
}

/// State every lifecycle hook receives.
pub struct Stage {
    pub scene: Scene,
    /// Milliseconds for chart transitions.
    pub transit_duration: u64,
    /// The chart's own event channel.
    pub events: Rc<Channel<ChartEvent>>,
}

pub type SetupChain = HookChain<Stage, (), ()>;
pub type NodeChain = HookChain<Stage, NodeId, ()>;

/// Builders for the three lifecycle methods an extension may wrap.
pub struct LifecycleComposer {
    pub setup: HookComposer<Stage, (), ()>,
    pub reset: HookComposer<Stage, NodeId, ()>,
    pub move_to_central: HookComposer<Stage, NodeId, ()>,
}

impl LifecycleComposer {
    /// Composer seeded with the host's own implementations.
    pub fn new() -> Self {
        Self {
            setup: HookComposer::new(
                "setup",
                hook(|stage: &mut Stage, ()| {
                    debug!(nodes = stage.scene.len(), "setup");
                    Ok(())
                }),
            ),
            reset: HookComposer::new(
                "reset",
                hook(|stage: &mut Stage, node: NodeId| {
                    stage.scene.node(node)?;
                    debug!(%node, "reset");
                    Ok(())
                }),
            ),
            move_to_central: HookComposer::new(
                "moveToCentral",
                hook(|stage: &mut Stage, node: NodeId| {
                    let duration = stage.transit_duration;
                    stage.scene.begin_central_transition(node, duration)?;
                    Ok(())
                }),
            ),
        }
    }

    pub fn build(self) -> Lifecycle {
        Lifecycle {
            setup: self.setup.build(),
            reset: self.reset.build(),
            move_to_central: self.move_to_central.build(),
        }
    }
}

impl Default for LifecycleComposer {
    fn default() -> Self { Self::new() }
}

/// Frozen lifecycle chains, fixed once the chart is constructed.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    pub setup: SetupChain,
    pub reset: NodeChain,
    pub move_to_central: NodeChain,
}

pub struct ChartBuilder {
    config: ChartConfig,
    extra: Vec<Box<dyn Extension>>,
}

impl ChartBuilder {
    /// Add an extension after the ones listed in the configuration's `plugins`.
    pub fn extension(mut self, extension: impl Extension + 'static) -> Self {
        self.extra.push(Box::new(extension));
        self
    }

    pub fn build(self) -> Result<BubbleChart> {
        let Self { config, extra } = self;
        config.validate()?;

        let extensions: Vec<Box<dyn Extension>> =
            config.plugins.iter().map(plugin::from_entry).chain(extra).collect();
        let mut seen = HashSet::new();
        for ext in &extensions {
            if !seen.insert(ext.name().to_string()) {
                return Err(ChartError::DuplicateExtension(ext.name().to_string()).into());
            }
        }

        let mut composer = LifecycleComposer::new();
        for ext in &extensions {
            ext.install(&mut composer);
        }
        let lifecycle = composer.build();

        let uid = misc::uuid();
        let observers = ObserverRegistry::new();
        let events = observers.get(&uid);
        let stage = Stage { scene: Scene::build(&config)?, transit_duration: config.transit_duration, events };

        let mut chart = BubbleChart {
            uid,
            extensions: extensions.iter().map(|e| e.name().to_string()).collect(),
            config,
            stage,
            lifecycle,
            observers,
        };
        chart.lifecycle.setup.call(&mut chart.stage, ())?;
        info!(uid = %chart.uid, nodes = chart.stage.scene.len(), extensions = ?chart.extensions, "bubble chart ready");
        Ok(chart)
    }
}

pub struct BubbleChart {
    uid: String,
    config: ChartConfig,
    stage: Stage,
    lifecycle: Lifecycle,
    observers: ObserverRegistry<ChartEvent>,
    extensions: Vec<String>,
}

impl BubbleChart {
    /// Build a chart with the configuration's plugins and run `setup` once.
    pub fn new(config: ChartConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    pub fn builder(config: ChartConfig) -> ChartBuilder {
        ChartBuilder { config, extra: Vec::new() }
    }

    pub fn uid(&self) -> &str { &self.uid }

    pub fn config(&self) -> &ChartConfig { &self.config }

    pub fn scene(&self) -> &Scene { &self.stage.scene }

    pub fn lifecycle(&self) -> &Lifecycle { &self.lifecycle }

    /// Installed extension names, in installation order.
    pub fn extensions(&self) -> &[String] { &self.extensions }

    /// The chart's event channel (`"click"` notifications).
    pub fn events(&self) -> Rc<Channel<ChartEvent>> { Rc::clone(&self.stage.events) }

    /// Registry owning the event channel; other named channels may live here too.
    pub fn observers(&self) -> &ObserverRegistry<ChartEvent> { &self.observers }

    pub fn reset(&mut self, node: NodeId) -> Result<()> {
        self.lifecycle.reset.call(&mut self.stage, node)
    }

    pub fn move_to_central(&mut self, node: NodeId) -> Result<()> {
        self.lifecycle.move_to_central.call(&mut self.stage, node)
    }

    /// Notify `"click"`, then make `node` central: the old central bubble is reset first.
    pub fn click(&mut self, node: NodeId) -> Result<()> {
        let class_name = self.stage.scene.node(node)?.class_name.clone();
        debug!(%node, class = %class_name, "click");
        self.stage.events.send(CLICK, &ChartEvent::Click { node, class_name })?;
        match self.stage.scene.central() {
            Some(current) if current == node => Ok(()),
            Some(current) => {
                self.reset(current)?;
                self.move_to_central(node)
            }
            None => self.move_to_central(node),
        }
    }

    /// Click the bubble whose class is `class`.
    pub fn click_class(&mut self, class: &str) -> Result<NodeId> {
        let node = self
            .stage
            .scene
            .find_by_class(class)
            .ok_or_else(|| anyhow::anyhow!("no bubble with class '{class}'"))?;
        self.click(node)?;
        Ok(node)
    }

    /// Finish pending transitions. Returns how many end callbacks ran.
    pub fn settle(&mut self) -> Result<usize> {
        self.stage.scene.settle()
    }

    /// Replace the chart data.
    ///
    /// Same item count: items are rebound onto the existing bubbles and every bubble is reset.
    /// Different count: the scene is rebuilt and `setup` runs again.
    pub fn set_items(&mut self, items: Vec<SkillItem>) -> Result<()> {
        let mut next = self.config.clone();
        next.data.items = items;
        next.validate()?;
        if next.data.items.len() == self.stage.scene.len() {
            self.stage.scene.rebind(&next)?;
            self.config = next;
            let ids: Vec<NodeId> = self.stage.scene.ids().collect();
            for id in ids {
                self.reset(id)?;
            }
        } else {
            self.stage.scene = Scene::build(&next)?;
            self.config = next;
            self.lifecycle.setup.call(&mut self.stage, ())?;
        }
        info!(nodes = self.stage.scene.len(), "chart data replaced");
        Ok(())
    }
}
