use ::palette::Srgb;
use colored::*;

use crate::aggregate::{Metrics, YearlyFlows};
use crate::data::TradeRecord;
use crate::palette::ColorAssignment;

/// Width of the label column in ranked tables
const LABEL_WIDTH: usize = 48;

fn style_label(label: &str) -> ColoredString {
    label.bold()
}

pub fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

/// Group an unsigned integer string with commas ("1234567" -> "1,234,567")
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a dollar amount as "$1,234,567.89"
pub fn format_usd(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

pub fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Short dollar amount for tables ("$1.23M")
pub fn format_compact_usd(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1e12 {
        (abs / 1e12, "T")
    } else if abs >= 1e9 {
        (abs / 1e9, "B")
    } else if abs >= 1e6 {
        (abs / 1e6, "M")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format!("{}${:.2}", sign, abs);
    };
    format!("{}${:.2}{}", sign, scaled, suffix)
}

/// Parse "#rrggbb" into RGB components
fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let rgb: Srgb<u8> = hex.parse().ok()?;
    Some(rgb.into_components())
}

pub fn colors_enabled() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

/// A colored block for a category color, or a blank when unknown or uncolored
pub fn swatch(color: Option<&str>) -> ColoredString {
    if !colors_enabled() {
        return "  ".normal();
    }
    match color.and_then(parse_hex) {
        Some((r, g, b)) => "██".truecolor(r, g, b),
        None => "  ".normal(),
    }
}

/// Shorten `label` to at most `width` characters, ending in an ellipsis
pub fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(width.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}

pub fn print_section(title: &str) {
    println!();
    println!("[{}]", title);
}

pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

pub fn print_filters(filters: &[String], matched: usize, total: usize) {
    println!("Filters:");
    if filters.is_empty() {
        println!("  (none)");
    }
    for f in filters {
        println!("  {}", f);
    }
    println!("Matched {} of {} records", format_count(matched), format_count(total));
}

pub fn print_metrics(metrics: &Metrics) {
    print_section("Key Metrics");
    println!(
        "  {:<24}{}",
        style_label("Total FOB (USD)"),
        format_usd(metrics.total_fob).green()
    );
    println!("  {:<24}{}", style_label("Countries"), format_count(metrics.countries));
    println!("  {:<24}{}", style_label("Products"), format_count(metrics.products));
    println!("  {:<24}{}", style_label("States"), format_count(metrics.states));
}

/// Years as rows, flows as columns
pub fn print_yearly(yearly: &YearlyFlows) {
    print_section("FOB by Year and Flow");
    if yearly.years.is_empty() {
        println!("  (no data)");
        return;
    }

    print!("{:<6}", "YEAR");
    for series in &yearly.series {
        print!(" {:>18}", truncate(&series.flow, 18));
    }
    println!();
    print_separator(6 + 19 * yearly.series.len());

    for (i, year) in yearly.years.iter().enumerate() {
        print!("{:<6}", year);
        for series in &yearly.series {
            print!(" {:>18}", format_compact_usd(series.values[i]));
        }
        println!();
    }
}

/// Ranked `(label, value)` table with share of the total
///
/// With `colors`, each row starts with the label's color swatch.
pub fn print_ranking(
    title: &str,
    items: &[(String, f64)],
    total: f64,
    colors: Option<&ColorAssignment>,
) {
    print_section(title);
    if items.is_empty() {
        println!("  (no data)");
        return;
    }

    for (rank, (label, value)) in items.iter().enumerate() {
        let share = if total > 0.0 { value / total * 100.0 } else { 0.0 };
        let marker = match colors {
            Some(assignment) => format!("{} ", swatch(assignment.get(label))),
            None => String::new(),
        };
        println!(
            "{:>3}. {}{:<width$} {:>12} {:>6.1}%",
            rank + 1,
            marker,
            truncate(label, LABEL_WIDTH),
            format_compact_usd(*value),
            share,
            width = LABEL_WIDTH
        );
    }
}

pub fn print_detail(rows: &[&TradeRecord], limit: usize, total_rows: usize) {
    print_section("Detailed Data");
    if rows.is_empty() {
        println!("  (no data)");
        return;
    }

    println!(
        "{:<6} {:<12} {:<18} {:<4} {:<8} {:<32} {:>16}",
        "YEAR", "FLOW", "COUNTRY", "UF", "HS6", "PRODUCT", "FOB (USD)"
    );
    print_separator(102);
    for r in rows.iter().take(limit) {
        println!(
            "{:<6} {:<12} {:<18} {:<4} {:<8} {:<32} {:>16}",
            r.year,
            truncate(&r.flow, 12),
            truncate(&r.country, 18),
            truncate(&r.state, 4),
            truncate(&r.product_code, 8),
            truncate(&r.product, 32),
            format_usd(r.fob_value)
        );
    }
    if total_rows > limit {
        println!("... {} more rows", format_count(total_rows - limit));
    }
}
