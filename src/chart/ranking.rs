//! Ranked bar charts (countries, states, sections, products)

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisType, Color, ColorStop, ItemStyle, Label, LabelPosition, LineStyle,
        SplitLine, TextStyle, Tooltip, Trigger,
    },
    series::Bar,
};

use super::colors::{BarGradient, COLOR_BACKGROUND, COLOR_GRID, COLOR_TEXT};
use super::{ValueScale, truncate_label};
use crate::palette::ColorAssignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Orientation {
    /// Categories on the y-axis, largest at the top
    Horizontal,
    /// Categories on the x-axis, largest at the left
    Vertical,
}

fn gradient(colors: &BarGradient, orientation: Orientation) -> Color {
    let (x2, y2) = match orientation {
        Orientation::Horizontal => (1.0, 0.0),
        Orientation::Vertical => (0.0, 1.0),
    };
    Color::LinearGradient {
        x: 0.0,
        y: 0.0,
        x2,
        y2,
        color_stops: vec![
            ColorStop::new(0.0, colors.start),
            ColorStop::new(1.0, colors.end),
        ],
    }
}

/// Build a bar chart from `(label, value)` pairs sorted largest first
///
/// When `category_colors` is given, each bar uses its label's color.
pub(super) fn ranking_chart(
    title: &str,
    items: &[(String, f64)],
    orientation: Orientation,
    bar_colors: &BarGradient,
    category_colors: Option<&ColorAssignment>,
) -> Chart {
    let scale = ValueScale::for_max(items.first().map(|(_, v)| *v).unwrap_or(0.0));

    // ECharts draws the first category of a y-axis at the bottom
    let ordered: Vec<&(String, f64)> = match orientation {
        Orientation::Horizontal => items.iter().rev().collect(),
        Orientation::Vertical => items.iter().collect(),
    };

    let labels: Vec<String> = ordered.iter().map(|(l, _)| truncate_label(l)).collect();

    let category_axis = Axis::new()
        .type_(AxisType::Category)
        .data(labels)
        .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(14));

    let value_axis = Axis::new()
        .type_(AxisType::Value)
        .name(scale.axis_name())
        .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(14))
        .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(14))
        .split_line(SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)));

    let (x_axis, y_axis) = match orientation {
        Orientation::Horizontal => (value_axis, category_axis),
        Orientation::Vertical => (category_axis, value_axis),
    };

    let label_position = match orientation {
        Orientation::Horizontal => LabelPosition::Right,
        Orientation::Vertical => LabelPosition::Top,
    };

    let bar = Bar::new()
        .name("US$ FOB")
        .label(
            Label::new()
                .show(true)
                .position(label_position)
                .color(COLOR_TEXT)
                .font_size(12)
                .formatter("{c}"),
        );

    let bar = match category_colors {
        Some(assignment) => {
            let data: Vec<DataPointItem> = ordered
                .iter()
                .map(|(label, value)| {
                    let item = DataPointItem::new(scale.apply(*value));
                    match assignment.get(label) {
                        Some(color) => item.item_style(ItemStyle::new().color(color)),
                        None => item,
                    }
                })
                .collect();
            bar.data(data)
        }
        None => {
            let data: Vec<f64> = ordered.iter().map(|(_, v)| scale.apply(*v)).collect();
            bar.data(data)
                .item_style(ItemStyle::new().color(gradient(bar_colors, orientation)))
        }
    };

    Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(
            Title::new()
                .text(title)
                .left("center")
                .top("2%")
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(20)),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("6%")
                .bottom("5%")
                .top("12%")
                .contain_label(true),
        )
        .x_axis(x_axis)
        .y_axis(y_axis)
        .series(bar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::colors::COUNTRY_BARS;
    use crate::palette::assign_colors;

    fn items() -> Vec<(String, f64)> {
        vec![
            ("China".to_string(), 3_000_000.0),
            ("Chile".to_string(), 2_000_000.0),
            ("Argentina".to_string(), 500_000.0),
        ]
    }

    fn options(chart: &Chart) -> String {
        serde_json::to_string(chart).unwrap()
    }

    #[test]
    fn test_horizontal_puts_largest_last_on_axis() {
        let chart = ranking_chart("Top", &items(), Orientation::Horizontal, &COUNTRY_BARS, None);
        let json = options(&chart);
        let argentina = json.find("Argentina").unwrap();
        let china = json.find("China").unwrap();
        assert!(argentina < china);
        assert!(json.contains("US$ FOB (M)"));
    }

    #[test]
    fn test_vertical_keeps_order() {
        let chart = ranking_chart("By state", &items(), Orientation::Vertical, &COUNTRY_BARS, None);
        let json = options(&chart);
        assert!(json.find("China").unwrap() < json.find("Argentina").unwrap());
    }

    #[test]
    fn test_category_colors_applied() {
        let colors = assign_colors(&["Argentina", "Chile", "China"]);
        let chart = ranking_chart(
            "Products",
            &items(),
            Orientation::Horizontal,
            &COUNTRY_BARS,
            Some(&colors),
        );
        let json = options(&chart);
        assert!(json.contains("#8dd3c7"));
        assert!(json.contains("#ffffb3"));
        assert!(json.contains("#bebada"));
    }

    #[test]
    fn test_empty_items() {
        let chart = ranking_chart("Empty", &[], Orientation::Vertical, &COUNTRY_BARS, None);
        assert!(options(&chart).contains("Empty"));
    }
}
