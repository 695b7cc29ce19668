// File: crates/bubble-core/src/scene.rs
// Summary: Retained bubble scene: nodes, their text labels, and the centring transition.
// Notes:
// - Stands in for the external layout engine. Placement is a plain ring around the centre, not a
//   collision-free packing.
// - Transitions are recorded as end state plus duration; `settle` plays the end callbacks.

use std::collections::BTreeSet;
use std::fmt;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::{ChartConfig, Classed, SkillItem, TextAttrs, TextStyle};
use crate::error::ChartError;
use crate::geometry::{ring, Point};
use crate::misc::{self, SliceExt};
use crate::palette;
use crate::scale::RadiusScale;
use crate::types::NodeId;

/// Opacity animated from `from` (unset when the element had none) to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Fade {
    pub from: Option<f64>,
    pub to: f64,
}

/// Resolved attribute targets of a transition.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AttrTargets {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dy: Option<String>,
}

/// Last transition started on a text element and the changes animated by it.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Transition {
    pub duration_ms: u64,
    pub style: TextStyle,
    pub attrs: AttrTargets,
    pub opacity: Option<Fade>,
}

impl Transition {
    pub fn new(duration_ms: u64) -> Self {
        Self { duration_ms, ..Self::default() }
    }
}

/// One text label inside a bubble.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TextElement {
    pub classes: BTreeSet<String>,
    pub style: TextStyle,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub dy: Option<String>,
    pub text: String,
    pub opacity: Option<f64>,
    pub transition: Option<Transition>,
}

impl TextElement {
    pub fn classed(&mut self, classes: &Classed) -> &mut Self {
        for (name, on) in classes {
            if *on { self.classes.insert(name.clone()); } else { self.classes.remove(name); }
        }
        self
    }

    pub fn add_class(&mut self, name: &str) -> &mut Self {
        self.classes.insert(name.to_string());
        self
    }

    pub fn has_class(&self, name: &str) -> bool { self.classes.contains(name) }

    /// Set style keys. After `transition` the keys are also recorded as animated targets.
    pub fn style(&mut self, style: &TextStyle) -> &mut Self {
        self.style.apply(style);
        if let Some(tr) = &mut self.transition { tr.style.apply(style); }
        self
    }

    /// Apply attributes, resolving bound coordinates against the owning bubble's centre.
    pub fn attrs(&mut self, attrs: &TextAttrs, cx: f64, cy: f64) -> &mut Self {
        let x = attrs.x.map(|x| x.resolve(cx, cy));
        let y = attrs.y.map(|y| y.resolve(cx, cy));
        if x.is_some() { self.x = x; }
        if y.is_some() { self.y = y; }
        if let Some(dy) = &attrs.dy { self.dy = Some(dy.clone()); }
        if let Some(tr) = &mut self.transition {
            if x.is_some() { tr.attrs.x = x; }
            if y.is_some() { tr.attrs.y = y; }
            if let Some(dy) = &attrs.dy { tr.attrs.dy = Some(dy.clone()); }
        }
        self
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    pub fn opacity(&mut self, opacity: f64) -> &mut Self {
        if let Some(tr) = &mut self.transition {
            let from = tr.opacity.map_or(self.opacity, |fade| fade.from);
            tr.opacity = Some(Fade { from, to: opacity });
        }
        self.opacity = Some(opacity);
        self
    }

    /// Start a transition: following style, attribute and opacity changes animate over `duration_ms`.
    pub fn transition(&mut self, duration_ms: u64) -> &mut Self {
        self.transition = Some(Transition::new(duration_ms));
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BubbleNode {
    /// Stable external id (v4 UUID).
    pub uid: String,
    pub item: SkillItem,
    pub class_name: String,
    pub value: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub color: String,
    pub texts: Vec<TextElement>,
}

impl BubbleNode {
    pub fn append_text(&mut self) -> &mut TextElement {
        self.texts.push(TextElement::default());
        let last = self.texts.len() - 1;
        &mut self.texts[last]
    }

    pub fn texts_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a TextElement> + 'a {
        self.texts.iter().filter(move |t| t.has_class(class))
    }

    /// Remove the first text carrying `class`. Returns whether one was found.
    pub fn remove_text_with_class(&mut self, class: &str) -> bool {
        match self.texts.iter().position(|t| t.has_class(class)) {
            Some(pos) => { self.texts.remove(pos); true }
            None => false,
        }
    }

    /// Text of the item field `name`, or empty when the field is unknown.
    pub fn field_text(&self, name: &str) -> String {
        self.item.field(name).unwrap_or_default().to_string()
    }
}

/// Callback run when the current centring transition ends.
pub type TransitionEnd = Box<dyn FnOnce(&mut Scene) -> Result<()>>;

#[derive(Serialize)]
pub struct Scene {
    pub center: Point,
    nodes: Vec<BubbleNode>,
    central: Option<NodeId>,
    #[serde(skip)]
    central_end: Vec<TransitionEnd>,
}

impl Scene {
    /// Size and place every item. The largest item starts in the centre.
    pub fn build(config: &ChartConfig) -> Result<Self, ChartError> {
        let items = &config.data.items;
        if items.is_empty() {
            return Err(ChartError::EmptyData);
        }
        let values = items.iter().map(SkillItem::value).collect::<Result<Vec<_>, _>>()?;
        let vmin = values.min_value().copied().unwrap_or(0.0);
        let vmax = values.max_value().copied().unwrap_or(0.0);
        let scale = RadiusScale::new(vmin, vmax, config.radius_min, config.radius_max());
        let palette = palette::find(&config.circle_palette);

        let half = config.view_box_size() / 2.0;
        let center = Point::new(half, half);
        let central = values
            .iter()
            .enumerate()
            .fold(0usize, |best, (i, v)| if *v > values[best] { i } else { best });
        let orbit = (config.inner_radius() + config.outer_radius()) / 2.0;
        let mut slots = ring(center, orbit, items.len().saturating_sub(1)).into_iter();

        let mut nodes = Vec::with_capacity(items.len());
        for (i, (item, value)) in items.iter().zip(values.iter().copied()).enumerate() {
            let at = if i == central { center } else { slots.next().unwrap_or(center) };
            nodes.push(BubbleNode {
                uid: misc::uuid(),
                item: item.clone(),
                class_name: item.class_name(),
                value,
                cx: at.x,
                cy: at.y,
                r: scale.radius(value),
                color: palette.color(i).to_string(),
                texts: Vec::new(),
            });
        }
        debug!(nodes = nodes.len(), vmin, vmax, central, "scene built");
        Ok(Self { center, nodes, central: Some(NodeId(central)), central_end: Vec::new() })
    }

    pub fn nodes(&self) -> &[BubbleNode] { &self.nodes }

    pub fn nodes_mut(&mut self) -> &mut [BubbleNode] { &mut self.nodes }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> { (0..self.nodes.len()).map(NodeId) }

    pub fn node(&self, id: NodeId) -> Result<&BubbleNode, ChartError> {
        self.nodes.get(id.index()).ok_or(ChartError::UnknownNode(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut BubbleNode, ChartError> {
        self.nodes.get_mut(id.index()).ok_or(ChartError::UnknownNode(id))
    }

    pub fn find_by_class(&self, class: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.class_name == class).map(NodeId)
    }

    pub fn central(&self) -> Option<NodeId> { self.central }

    /// Swap `id` into the centre; the previous central bubble takes its slot.
    ///
    /// Interrupts a centring still in flight: its queued end callbacks are dropped.
    pub fn begin_central_transition(&mut self, id: NodeId, duration_ms: u64) -> Result<(), ChartError> {
        let target = self.node(id)?;
        let (tx, ty) = (target.cx, target.cy);
        if let Some(prev) = self.central.filter(|p| *p != id) {
            let node = self.node_mut(prev)?;
            node.cx = tx;
            node.cy = ty;
        }
        let center = self.center;
        let node = self.node_mut(id)?;
        node.cx = center.x;
        node.cy = center.y;
        self.central = Some(id);
        let interrupted = self.central_end.len();
        self.central_end.clear();
        trace!(node = %id, duration_ms, interrupted, "centring transition started");
        Ok(())
    }

    /// Queue `f` to run when the centring transition ends.
    pub fn on_central_transition_end(&mut self, f: TransitionEnd) {
        self.central_end.push(f);
    }

    pub fn pending_transitions(&self) -> usize { self.central_end.len() }

    /// End pending transitions: run queued callbacks in order, including ones they queue.
    pub fn settle(&mut self) -> Result<usize> {
        let mut ran = 0;
        while !self.central_end.is_empty() {
            let batch = std::mem::take(&mut self.central_end);
            for f in batch {
                f(self)?;
                ran += 1;
            }
        }
        if ran > 0 { trace!(ran, "transitions settled"); }
        Ok(ran)
    }

    /// Rebind `items` onto the existing nodes one-to-one, resizing each bubble.
    /// Contract: `items.len() == self.len()`.
    pub(crate) fn rebind(&mut self, config: &ChartConfig) -> Result<(), ChartError> {
        let items = &config.data.items;
        let values = items.iter().map(SkillItem::value).collect::<Result<Vec<_>, _>>()?;
        let vmin = values.min_value().copied().unwrap_or(0.0);
        let vmax = values.max_value().copied().unwrap_or(0.0);
        let scale = RadiusScale::new(vmin, vmax, config.radius_min, config.radius_max());
        for ((node, item), value) in self.nodes.iter_mut().zip(items).zip(values) {
            node.item = item.clone();
            node.class_name = item.class_name();
            node.value = value;
            node.r = scale.radius(value);
        }
        Ok(())
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("center", &self.center)
            .field("nodes", &self.nodes)
            .field("central", &self.central)
            .field("pending_transitions", &self.central_end.len())
            .finish()
    }
}
