//! Chart construction for the trade dashboard

mod colors;
mod page;
mod ranking;
mod timeline;

pub use page::{render_html, save_images};

use charming::Chart;

use crate::output::truncate;
use crate::palette::ColorAssignment;
use crate::session::Summary;

use colors::{COUNTRY_BARS, SECTION_BARS, STATE_BARS};
use ranking::{Orientation, ranking_chart};

/// Chart dimensions for PNG output (2x for Retina quality)
pub(super) const CHART_WIDTH: u32 = 2400;
pub(super) const CHART_HEIGHT: u32 = 1200;

/// Longest category label shown on an axis
const MAX_LABEL_CHARS: usize = 40;

/// A built chart with its file stem and title
pub struct NamedChart {
    pub name: &'static str,
    pub title: String,
    pub chart: Chart,
}

/// Divisor and suffix used to keep axis values short
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    pub divisor: f64,
    pub suffix: &'static str,
}

impl ValueScale {
    /// Pick the largest unit that keeps `max` at or above 1
    pub fn for_max(max: f64) -> Self {
        let max = max.abs();
        let (divisor, suffix) = if max >= 1e12 {
            (1e12, "T")
        } else if max >= 1e9 {
            (1e9, "B")
        } else if max >= 1e6 {
            (1e6, "M")
        } else if max >= 1e3 {
            (1e3, "K")
        } else {
            (1.0, "")
        };
        Self { divisor, suffix }
    }

    /// Scaled value rounded to 2 decimals
    pub fn apply(&self, value: f64) -> f64 {
        ((value / self.divisor) * 100.0).round() / 100.0
    }

    /// Axis name, e.g. "US$ FOB (M)"
    pub fn axis_name(&self) -> String {
        if self.suffix.is_empty() {
            "US$ FOB".to_string()
        } else {
            format!("US$ FOB ({})", self.suffix)
        }
    }
}

/// Shorten long category labels for axes
pub(super) fn truncate_label(label: &str) -> String {
    truncate(label, MAX_LABEL_CHARS)
}

/// Build the five dashboard charts
///
/// Product bars take their color from `product_colors` so a product keeps
/// the same color in every chart and every run over the same dataset.
pub fn build_charts(summary: &Summary<'_>, product_colors: &ColorAssignment) -> Vec<NamedChart> {
    let top_n = summary.top_n;

    let timeline_title = "FOB value by year and flow".to_string();
    let countries_title = format!("Top {} countries by FOB value", top_n);
    let states_title = "FOB value by state".to_string();
    let sections_title = format!("Top {} sections by FOB value", top_n);
    let products_title = format!("Top {} products (HS6) by FOB value", top_n);

    vec![
        NamedChart {
            name: "timeline",
            chart: timeline::timeline_chart(&summary.yearly, &timeline_title),
            title: timeline_title,
        },
        NamedChart {
            name: "countries",
            chart: ranking_chart(
                &countries_title,
                &summary.countries,
                Orientation::Horizontal,
                &COUNTRY_BARS,
                None,
            ),
            title: countries_title,
        },
        NamedChart {
            name: "states",
            chart: ranking_chart(
                &states_title,
                &summary.states,
                Orientation::Vertical,
                &STATE_BARS,
                None,
            ),
            title: states_title,
        },
        NamedChart {
            name: "sections",
            chart: ranking_chart(
                &sections_title,
                &summary.sections,
                Orientation::Horizontal,
                &SECTION_BARS,
                None,
            ),
            title: sections_title,
        },
        NamedChart {
            name: "products",
            chart: ranking_chart(
                &products_title,
                &summary.products,
                Orientation::Horizontal,
                &COUNTRY_BARS,
                Some(product_colors),
            ),
            title: products_title,
        },
    ]
}
