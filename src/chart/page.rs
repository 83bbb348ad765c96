//! Standalone HTML dashboard page and PNG chart export

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use charming::{ImageRenderer, renderer::ImageFormat};
use log::debug;

use super::colors::{COLOR_BACKGROUND, COLOR_CARD, COLOR_MUTED, COLOR_TEXT};
use super::{CHART_HEIGHT, CHART_WIDTH, NamedChart};
use crate::error::{DashboardError, Result};
use crate::output::{format_count, format_usd};
use crate::session::Summary;

const ECHARTS_CDN: &str = "https://cdn.jsdelivr.net/npm/echarts@5.4.2/dist/echarts.min.js";

/// Height of each chart container in the page, in pixels
const PAGE_CHART_HEIGHT: u32 = 480;

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Chart options as JSON, safe to inline in a `<script>` element
fn chart_options(chart: &NamedChart) -> Result<String> {
    let json = serde_json::to_string(&chart.chart)?;
    Ok(json.replace("</", "<\\/"))
}

/// Build the dashboard page: filters, metric cards and every chart
pub fn render_html(summary: &Summary<'_>, charts: &[NamedChart]) -> Result<String> {
    if summary.records.is_empty() {
        return Err(DashboardError::Chart("No data to render".to_string()));
    }

    let metrics = &summary.metrics;
    let cards = [
        ("Total FOB value (USD)", format_usd(metrics.total_fob)),
        ("Countries", format_count(metrics.countries)),
        ("Products", format_count(metrics.products)),
        ("States", format_count(metrics.states)),
    ];

    let mut html = String::new();
    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Foreign Trade Dashboard</title>
<script src="{cdn}"></script>
<style>
body {{ background: {bg}; color: {text}; font-family: sans-serif; margin: 24px; }}
.cards {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 16px; }}
.card {{ background: {card}; border-radius: 8px; padding: 16px; }}
.card .caption {{ color: {muted}; font-size: 14px; }}
.card .value {{ font-size: 28px; margin-top: 8px; }}
.filters {{ color: {muted}; margin-bottom: 16px; }}
.chart {{ width: 100%; height: {height}px; margin-top: 24px; }}
</style>
</head>
<body>
<h1>Foreign Trade Dashboard</h1>
"#,
        cdn = ECHARTS_CDN,
        bg = COLOR_BACKGROUND,
        text = COLOR_TEXT,
        card = COLOR_CARD,
        muted = COLOR_MUTED,
        height = PAGE_CHART_HEIGHT,
    )?;

    html.push_str("<div class=\"filters\">");
    if summary.filters.is_empty() {
        html.push_str("No filters applied");
    } else {
        let described: Vec<String> = summary.filters.iter().map(|f| escape_html(f)).collect();
        html.push_str(&described.join(" &middot; "));
    }
    html.push_str("</div>\n<div class=\"cards\">\n");

    for (caption, value) in &cards {
        writeln!(
            html,
            "<div class=\"card\"><div class=\"caption\">{}</div><div class=\"value\">{}</div></div>",
            caption,
            escape_html(value)
        )?;
    }
    html.push_str("</div>\n");

    for chart in charts {
        writeln!(
            html,
            "<div id=\"{}\" class=\"chart\" title=\"{}\"></div>",
            chart.name,
            escape_html(&chart.title)
        )?;
    }

    html.push_str("<script>\n");
    for chart in charts {
        writeln!(
            html,
            "echarts.init(document.getElementById('{}')).setOption({});",
            chart.name,
            chart_options(chart)?
        )?;
    }
    html.push_str("</script>\n</body>\n</html>\n");

    Ok(html)
}

/// Save each chart as `<dir>/<name>.png`
pub fn save_images(summary: &Summary<'_>, charts: &[NamedChart], dir: &Path) -> Result<Vec<PathBuf>> {
    if summary.records.is_empty() {
        return Err(DashboardError::Chart("No data to render".to_string()));
    }
    std::fs::create_dir_all(dir)?;

    let mut renderer = ImageRenderer::new(CHART_WIDTH, CHART_HEIGHT);
    let mut saved = Vec::with_capacity(charts.len());

    for chart in charts {
        let path = dir.join(format!("{}.png", chart.name));
        let path_str = path.to_string_lossy();
        debug!("Rendering {}", path_str);
        renderer
            .save_format(ImageFormat::Png, &chart.chart, &*path_str)
            .map_err(|e| DashboardError::Chart(format!("Failed to save chart: {}", e)))?;
        saved.push(path);
    }

    Ok(saved)
}
