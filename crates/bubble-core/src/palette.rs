// File: crates/bubble-core/src/palette.rs
// Summary: Categorical circle colour palettes.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

impl Palette {
    pub fn category10() -> Self {
        Self {
            name: "category10",
            colors: &[
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
                "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
            ],
        }
    }

    pub fn category20c() -> Self {
        Self {
            name: "category20c",
            colors: &[
                "#3182bd", "#6baed6", "#9ecae1", "#c6dbef", // blues
                "#e6550d", "#fd8d3c", "#fdae6b", "#fdd0a2", // oranges
                "#31a354", "#74c476", "#a1d99b", "#c7e9c0", // greens
                "#756bb1", "#9e9ac8", "#bcbddc", "#dadaeb", // purples
                "#636363", "#969696", "#bdbdbd", "#d9d9d9", // greys
            ],
        }
    }

    pub fn mono_dark() -> Self {
        Self { name: "mono-dark", colors: &["#222222", "#333333", "#444444"] }
    }

    /// Colour for the `index`-th bubble, cycling through the palette.
    pub fn color(&self, index: usize) -> &'static str {
        self.colors[index % self.colors.len()]
    }
}

/// Return a list of built-in palette presets.
pub fn presets() -> Vec<Palette> {
    vec![Palette::category20c(), Palette::category10(), Palette::mono_dark()]
}

/// Find a palette by its `name`, falling back to category20c.
pub fn find(name: &str) -> Palette {
    for p in presets() { if p.name.eq_ignore_ascii_case(name) { return p; } }
    Palette::category20c()
}
