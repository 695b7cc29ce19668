// File: crates/bubble-core/src/plugin/central_click.rs
// Summary: Central-click extension; fades a marker label into the central bubble once it has settled.

use std::rc::Rc;

use tracing::debug;

use crate::chart::{ChartEvent, LifecycleComposer, Stage, CLICK};
use crate::config::CentralClickOptions;
use crate::hooks::after;
use crate::observer::handler;
use crate::scene::Scene;
use crate::types::{NodeId, CENTRAL_LABEL_OPACITY};

use super::Extension;

pub const NAME: &str = "central-click";
/// Class of the marker label added to the central bubble.
pub const MARKER_CLASS: &str = "central-click";

pub struct CentralClickExtension {
    options: Rc<CentralClickOptions>,
}

impl CentralClickExtension {
    pub fn new(options: CentralClickOptions) -> Self {
        Self { options: Rc::new(options) }
    }
}

impl Extension for CentralClickExtension {
    fn name(&self) -> &str { NAME }

    fn install(&self, hooks: &mut LifecycleComposer) {
        // One handler per chart; setup may run again when the data is replaced.
        let on_click = handler(|event: &ChartEvent| {
            debug!(node = %event.node(), "central-click saw click");
            Ok(())
        });
        hooks.setup.install(NAME, move |original| {
            after(original, move |stage: &mut Stage, ()| {
                stage.events.off(CLICK, &on_click);
                stage.events.on(CLICK, Rc::clone(&on_click));
                Ok(())
            })
        });

        hooks.reset.install(NAME, |original| {
            after(original, |stage: &mut Stage, id: NodeId| {
                stage.scene.node_mut(id)?.remove_text_with_class(MARKER_CLASS);
                Ok(())
            })
        });

        let opts = Rc::clone(&self.options);
        hooks.move_to_central.install(NAME, move |original| {
            after(original, move |stage: &mut Stage, id: NodeId| {
                let fade = stage.transit_duration / 2;
                let opts = Rc::clone(&opts);
                stage.scene.on_central_transition_end(Box::new(move |scene: &mut Scene| -> anyhow::Result<()> {
                    let node = scene.node_mut(id)?;
                    let (cx, cy) = (node.cx, node.cy);
                    let label = node.append_text();
                    label.add_class(MARKER_CLASS).attrs(&opts.attr, cx, cy).style(&opts.style);
                    label.x = Some(cx);
                    label.y = Some(cy);
                    label.text(opts.text.clone()).opacity(0.0).transition(fade).opacity(CENTRAL_LABEL_OPACITY);
                    Ok(())
                }));
                Ok(())
            })
        });
    }
}
