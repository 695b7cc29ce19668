// File: crates/bubble-core/src/config.rs
// Summary: Typed chart configuration payload (sizing, skill items, plugin option bags) plus logging settings.
// Notes:
// - JSON field names follow the page payload (`innerRadius`, `textField`, `font-size`, ...), so an
//   exported configuration object loads unchanged.
// - Style and attribute keys are enumerated; unknown keys are rejected rather than carried along.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::types::{DEFAULT_RADIUS_MIN, DEFAULT_SIZE, DEFAULT_TRANSIT_MS};

/// Class toggles applied to a text element: `true` adds the class, `false` removes it.
pub type Classed = BTreeMap<String, bool>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default = "default_true")]
    pub support_responsive: bool,
    #[serde(default = "default_size")]
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_box_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer_radius: Option<f64>,
    #[serde(default = "default_radius_min")]
    pub radius_min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_max: Option<f64>,
    /// Milliseconds for every chart transition.
    #[serde(default = "default_transit")]
    pub transit_duration: u64,
    /// Circle colour palette name; see [`crate::palette::find`].
    #[serde(default = "default_palette")]
    pub circle_palette: String,
    pub data: DataConfig,
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

fn default_true() -> bool { true }
fn default_size() -> f64 { DEFAULT_SIZE }
fn default_radius_min() -> f64 { DEFAULT_RADIUS_MIN }
fn default_transit() -> u64 { DEFAULT_TRANSIT_MS }
fn default_palette() -> String { "category20c".to_string() }

impl ChartConfig {
    /// Minimal configuration: defaults everywhere, no plugins.
    pub fn with_items(items: Vec<SkillItem>) -> Self {
        Self {
            support_responsive: true,
            size: DEFAULT_SIZE,
            view_box_size: None,
            inner_radius: None,
            outer_radius: None,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: None,
            transit_duration: DEFAULT_TRANSIT_MS,
            circle_palette: default_palette(),
            data: DataConfig { items },
            plugins: Vec::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn view_box_size(&self) -> f64 { self.view_box_size.unwrap_or(self.size) }

    pub fn inner_radius(&self) -> f64 { self.inner_radius.unwrap_or(self.view_box_size() / 3.0) }

    pub fn outer_radius(&self) -> f64 { self.outer_radius.unwrap_or(self.view_box_size() / 2.0) }

    /// Largest bubble radius; never below `radius_min` unless set explicitly.
    pub fn radius_max(&self) -> f64 {
        self.radius_max
            .unwrap_or_else(|| ((self.outer_radius() - self.inner_radius()) / 2.0).max(self.radius_min))
    }

    /// Check what serde cannot: numeric counts, radius bounds, unique plugin names.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.data.items.is_empty() {
            return Err(ChartError::EmptyData);
        }
        for item in &self.data.items {
            item.value()?;
        }
        let (min, max) = (self.radius_min, self.radius_max());
        if !(min <= max) {
            return Err(ChartError::InvalidRadius { min, max });
        }
        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if !seen.insert(plugin.name()) {
                return Err(ChartError::DuplicateExtension(plugin.name().to_string()));
            }
        }
        Ok(())
    }

    /// The skills chart from the portfolio page.
    pub fn portfolio() -> Self {
        let items = [
            ("JavaScript", "350"),
            ("Rails", "300"),
            ("HTML", "500"),
            ("Ruby", "240"),
            ("CSS", "400"),
            ("Backbone", "150"),
            ("jQuery", "300"),
            ("Github", "200"),
            ("Heroku", "130"),
            ("PostgreSQL", "450"),
            ("Bootstrap", "400"),
            ("Repec", "30"),
            ("AJAX", "200"),
        ]
        .into_iter()
        .map(|(text, count)| SkillItem::new(text, count))
        .collect();

        let family = "Source Sans Pro, sans-serif";
        let centred = TextAttrs { x: Some(Coord::Bound(NodeField::Cx)), y: Some(Coord::Bound(NodeField::Cy)), dy: None };

        let central_click = CentralClickOptions {
            text: String::new(),
            style: TextStyle {
                font_size: Some("12px".into()),
                font_style: Some("italic".into()),
                font_family: Some(family.into()),
                text_anchor: Some("middle".into()),
                fill: Some("white".into()),
                ..TextStyle::default()
            },
            attr: TextAttrs { dy: Some("65px".into()), ..TextAttrs::default() },
        };

        let lines = LinesOptions {
            format: vec![
                LineFormat {
                    text_field: "text".into(),
                    classed: Classed::from([("count".to_string(), true)]),
                    style: TextStyle {
                        font_size: Some("16px".into()),
                        font_family: Some(family.into()),
                        text_anchor: Some("middle".into()),
                        text_shadow: Some("1px 1px 1px rgba(0, 0, 0, 0.5)".into()),
                        font_weight: Some("900".into()),
                        fill: Some("white".into()),
                        ..TextStyle::default()
                    },
                    attr: TextAttrs { dy: Some("0px".into()), ..centred.clone() },
                },
                LineFormat {
                    text_field: String::new(),
                    classed: Classed::from([("text".to_string(), true)]),
                    style: TextStyle {
                        font_size: Some("14px".into()),
                        font_family: Some(family.into()),
                        text_anchor: Some("middle".into()),
                        fill: Some("black".into()),
                        ..TextStyle::default()
                    },
                    attr: TextAttrs { dy: Some("20px".into()), ..centred },
                },
            ],
            central_format: vec![
                CentralFormat {
                    style: TextStyle { font_size: Some("50px".into()), ..TextStyle::default() },
                    ..CentralFormat::default()
                },
                CentralFormat {
                    style: TextStyle { font_size: Some("30px".into()), ..TextStyle::default() },
                    attr: TextAttrs { dy: Some("40px".into()), ..TextAttrs::default() },
                    ..CentralFormat::default()
                },
            ],
        };

        Self {
            inner_radius: Some(DEFAULT_SIZE / 3.5),
            radius_min: 40.0,
            plugins: vec![PluginEntry::CentralClick(central_click), PluginEntry::Lines(lines)],
            ..Self::with_items(items)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub items: Vec<SkillItem>,
}

/// One skill bubble: label and proficiency count (a numeric string).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillItem {
    pub text: String,
    pub count: String,
}

impl SkillItem {
    pub fn new(text: impl Into<String>, count: impl Into<String>) -> Self {
        Self { text: text.into(), count: count.into() }
    }

    /// Sortable bubble value (the parsed count).
    pub fn value(&self) -> Result<f64, ChartError> {
        self.count
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ChartError::InvalidCount { text: self.text.clone(), count: self.count.clone() })
    }

    /// CSS class for the bubble: the label with spaces removed.
    pub fn class_name(&self) -> String {
        self.text.split(' ').collect()
    }

    /// Look up a field by name, as text bindings do. Unknown or empty names yield `None`.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "text" => Some(&self.text),
            "count" => Some(&self.count),
            _ => None,
        }
    }
}

/// Plugin list entry; `name` selects the extension and the shape of `options`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "options")]
pub enum PluginEntry {
    #[serde(rename = "lines")]
    Lines(LinesOptions),
    #[serde(rename = "central-click")]
    CentralClick(CentralClickOptions),
}

impl PluginEntry {
    pub fn name(&self) -> &'static str {
        match self {
            PluginEntry::Lines(_) => crate::plugin::lines::NAME,
            PluginEntry::CentralClick(_) => crate::plugin::central_click::NAME,
        }
    }
}

/// Options of the text-lines extension: `format[n]` styles the n-th label of every bubble.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinesOptions {
    pub format: Vec<LineFormat>,
    /// Overrides applied to the n-th label when its bubble becomes central.
    #[serde(default)]
    pub central_format: Vec<CentralFormat>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFormat {
    /// Item field shown by this label; empty or unknown shows nothing.
    #[serde(default)]
    pub text_field: String,
    #[serde(default)]
    pub classed: Classed,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub attr: TextAttrs,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CentralFormat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classed: Option<Classed>,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub attr: TextAttrs,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralClickOptions {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub style: TextStyle,
    #[serde(default)]
    pub attr: TextAttrs,
}

/// Recognised text style keys. Applying a style only touches the keys that are set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TextStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_shadow: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
}

impl TextStyle {
    /// Overlay the keys set in `other` onto `self`.
    pub fn apply(&mut self, other: &TextStyle) {
        fn set(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(v) = value { *slot = Some(v.clone()); }
        }
        set(&mut self.font_size, &other.font_size);
        set(&mut self.font_family, &other.font_family);
        set(&mut self.font_style, &other.font_style);
        set(&mut self.font_weight, &other.font_weight);
        set(&mut self.text_anchor, &other.text_anchor);
        set(&mut self.text_shadow, &other.text_shadow);
        set(&mut self.fill, &other.fill);
        set(&mut self.opacity, &other.opacity);
    }

    pub fn is_empty(&self) -> bool { *self == TextStyle::default() }
}

/// Recognised text attributes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextAttrs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<Coord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dy: Option<String>,
}

/// A coordinate that is either fixed or read from the bubble it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coord {
    Fixed(f64),
    Bound(NodeField),
}

impl Coord {
    pub fn resolve(self, cx: f64, cy: f64) -> f64 {
        match self {
            Coord::Fixed(v) => v,
            Coord::Bound(NodeField::Cx) => cx,
            Coord::Bound(NodeField::Cy) => cy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeField {
    Cx,
    Cy,
}

/// Logging and tracing configuration for the binaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive: `"trace"`, `"debug"`, `"info"`, ...
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String { "info".to_string() }
fn default_format() -> String { "pretty".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), format: default_format() }
    }
}
