//! Deterministic category colors
//!
//! Categories take colors from a fixed concatenation of qualitative palettes.
//! Once the palettes are exhausted, further colors are synthesized by
//! rotating the hue by the golden angle while cycling through a few
//! saturation and lightness levels.

mod cache;

pub use cache::ColorCache;

use ::palette::{Hsl, IntoColor, Srgb};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// ColorBrewer Set3
const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Carto Pastel
const PASTEL: &[&str] = &[
    "#66c5cc", "#f6cf71", "#f89c74", "#dcb0f2", "#87c55f", "#9eb9f3", "#fe88b1", "#c9db74",
    "#8be0a4", "#b497e7", "#b3b3b3",
];

/// ColorBrewer Set1
const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];

/// ColorBrewer Set2
const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];

/// ColorBrewer Dark2
const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];

/// Plotly default qualitative sequence
const PLOTLY: &[&str] = &[
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// D3 Category 10
const D3: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Palettes concatenated, in order, into the base palette
const BASE_PALETTES: &[&[&str]] = &[SET3, PASTEL, SET1, SET2, DARK2, PLOTLY, D3];

/// Golden angle in degrees
pub const GOLDEN_ANGLE: f64 = 137.508;

/// The full base palette (68 colors)
pub fn base_palette() -> Vec<String> {
    BASE_PALETTES
        .iter()
        .flat_map(|p| p.iter())
        .map(|c| c.to_string())
        .collect()
}

/// Tuning for colors synthesized past the end of the base palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynthesisParams {
    /// Hue increment per synthetic index, in degrees
    pub hue_step: f64,
    /// Saturation levels, cycled by `j mod len`
    pub saturations: Vec<f64>,
    /// Lightness levels, cycled by `j mod len`
    pub lightnesses: Vec<f64>,
}

impl Default for SynthesisParams {
    fn default() -> Self {
        Self {
            hue_step: GOLDEN_ANGLE,
            saturations: vec![0.70, 0.80, 0.90],
            lightnesses: vec![0.45, 0.50, 0.55, 0.60, 0.65],
        }
    }
}

impl SynthesisParams {
    pub fn validate(&self) -> Result<()> {
        if !self.hue_step.is_finite() {
            return Err(DashboardError::Config("hue_step must be finite".to_string()));
        }
        for (name, levels) in [
            ("saturations", &self.saturations),
            ("lightnesses", &self.lightnesses),
        ] {
            if levels.is_empty() {
                return Err(DashboardError::Config(format!("{} must not be empty", name)));
            }
            if levels.iter().any(|v| !(0.0..=1.0).contains(v)) {
                return Err(DashboardError::Config(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Hue of synthetic index `j`, in `[0, 360)`
    pub fn hue(&self, j: usize) -> f64 {
        (j as f64 * self.hue_step).rem_euclid(360.0)
    }

    /// Hex color of synthetic index `j`
    ///
    /// The level lists must be non-empty, as checked by [`Self::validate`].
    pub fn color(&self, j: usize) -> String {
        let s = self.saturations[j % self.saturations.len()];
        let l = self.lightnesses[j % self.lightnesses.len()];
        hsl_to_hex(self.hue(j), s, l)
    }
}

/// Convert HSL (hue in degrees, saturation and lightness in 0..=1) to `#rrggbb`
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let hsl: Hsl<::palette::encoding::Srgb, f64> = Hsl::new(h.rem_euclid(360.0), s, l);
    let rgb: Srgb<f64> = hsl.into_color();
    let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(rgb.red),
        channel(rgb.green),
        channel(rgb.blue)
    )
}

/// Ordered category → color mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorAssignment {
    colors: IndexMap<String, String>,
}

impl ColorAssignment {
    pub fn get(&self, category: &str) -> Option<&str> {
        self.colors.get(category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Entries in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Maps ordered category lists to colors
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAssigner {
    base: Vec<String>,
    params: SynthesisParams,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self {
            base: base_palette(),
            params: SynthesisParams::default(),
        }
    }
}

impl ColorAssigner {
    pub fn new(params: SynthesisParams) -> Result<Self> {
        Self::with_base(base_palette(), params)
    }

    /// Assigner over a custom base palette; `params` must pass validation
    pub fn with_base(base: Vec<String>, params: SynthesisParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { base, params })
    }

    pub fn base(&self) -> &[String] {
        &self.base
    }

    /// Color for the category at position `i` of the input
    pub fn color_for_index(&self, i: usize) -> String {
        match self.base.get(i) {
            Some(color) => color.clone(),
            None => self.params.color(i - self.base.len()),
        }
    }

    /// Assign a color to every category, in order
    ///
    /// Categories should be distinct. A repeated category keeps the color
    /// of its first occurrence; the repeat still consumes a palette slot.
    pub fn assign<S: AsRef<str>>(&self, categories: &[S]) -> ColorAssignment {
        let mut colors = IndexMap::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            colors
                .entry(category.as_ref().to_string())
                .or_insert_with(|| self.color_for_index(i));
        }
        ColorAssignment { colors }
    }
}

/// Assign colors with the default palette and synthesis parameters
pub fn assign_colors<S: AsRef<str>>(categories: &[S]) -> ColorAssignment {
    ColorAssigner::default().assign(categories)
}
