// File: crates/bubble-examples/src/bin/custom_extension.rs
// Summary: Minimal example that adds a hand-written extension next to the configured plugins.

use bubble_core::{after, before, BubbleChart, ChartConfig, Extension, LifecycleComposer, NodeId, SkillItem, Stage};

/// Tags the central bubble's first label with a `highlight` class and logs each setup.
struct Highlight;

impl Extension for Highlight {
    fn name(&self) -> &str { "highlight" }

    fn install(&self, hooks: &mut LifecycleComposer) {
        hooks.setup.install("highlight", |original| {
            before(original, |stage: &mut Stage, ()| {
                println!("setup: {} bubbles", stage.scene.len());
                Ok(())
            })
        });
        hooks.reset.install("highlight", |original| {
            after(original, |stage: &mut Stage, id: NodeId| {
                if let Some(label) = stage.scene.node_mut(id)?.texts.first_mut() {
                    label.classes.remove("highlight");
                }
                Ok(())
            })
        });
        hooks.move_to_central.install("highlight", |original| {
            after(original, |stage: &mut Stage, id: NodeId| {
                if let Some(label) = stage.scene.node_mut(id)?.texts.first_mut() {
                    label.add_class("highlight");
                }
                Ok(())
            })
        });
    }
}

fn main() -> anyhow::Result<()> {
    let mut config = ChartConfig::portfolio();
    config.data.items = vec![
        SkillItem::new("Rust", "420"),
        SkillItem::new("Tokio", "260"),
        SkillItem::new("Serde", "310"),
        SkillItem::new("Criterion", "90"),
    ];

    let mut chart = BubbleChart::builder(config).extension(Highlight).build()?;
    println!("extensions: {:?}", chart.extensions());

    for class in ["Serde", "Criterion"] {
        let id = chart.click_class(class)?;
        chart.settle()?;
        let node = chart.scene().node(id)?;
        let classes: Vec<&str> = node.texts.iter().flat_map(|t| t.classes.iter().map(String::as_str)).collect();
        println!("{class} is central; label classes {classes:?}");
    }
    Ok(())
}
