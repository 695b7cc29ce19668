// File: crates/bubble-core/src/plugin/lines.rs
// Summary: Text-lines extension; one styled label per format entry, re-bound on reset and restyled when central.

use std::rc::Rc;

use tracing::trace;

use crate::chart::{LifecycleComposer, Stage};
use crate::config::LinesOptions;
use crate::hooks::after;
use crate::types::NodeId;

use super::Extension;

pub const NAME: &str = "lines";

pub struct LinesExtension {
    options: Rc<LinesOptions>,
}

impl LinesExtension {
    pub fn new(options: LinesOptions) -> Self {
        Self { options: Rc::new(options) }
    }

    pub fn options(&self) -> &LinesOptions { &self.options }
}

impl Extension for LinesExtension {
    fn name(&self) -> &str { NAME }

    fn install(&self, hooks: &mut LifecycleComposer) {
        let opts = Rc::clone(&self.options);
        hooks.setup.install(NAME, move |original| {
            after(original, move |stage: &mut Stage, ()| {
                for node in stage.scene.nodes_mut() {
                    let (cx, cy) = (node.cx, node.cy);
                    for f in &opts.format {
                        let text = node.field_text(&f.text_field);
                        node.append_text().classed(&f.classed).style(&f.style).attrs(&f.attr, cx, cy).text(text);
                    }
                }
                trace!(labels = opts.format.len(), "lines appended");
                Ok(())
            })
        });

        let opts = Rc::clone(&self.options);
        hooks.reset.install(NAME, move |original| {
            after(original, move |stage: &mut Stage, id: NodeId| {
                let duration = stage.transit_duration;
                let node = stage.scene.node_mut(id)?;
                let (cx, cy) = (node.cx, node.cy);
                for (i, f) in opts.format.iter().enumerate() {
                    let text = node.field_text(&f.text_field);
                    if let Some(label) = node.texts.get_mut(i) {
                        label.classed(&f.classed).text(text).transition(duration).style(&f.style).attrs(&f.attr, cx, cy);
                    }
                }
                Ok(())
            })
        });

        let opts = Rc::clone(&self.options);
        hooks.move_to_central.install(NAME, move |original| {
            after(original, move |stage: &mut Stage, id: NodeId| {
                let duration = stage.transit_duration;
                let node = stage.scene.node_mut(id)?;
                let (cx, cy) = (node.cx, node.cy);
                for (i, f) in opts.central_format.iter().enumerate() {
                    let text = f.text_field.as_deref().map(|field| node.field_text(field));
                    let Some(label) = node.texts.get_mut(i) else { continue };
                    label.transition(duration).style(&f.style).attrs(&f.attr, cx, cy);
                    if let Some(classed) = &f.classed { label.classed(classed); }
                    if let Some(text) = text { label.text(text); }
                }
                Ok(())
            })
        });
    }
}
