//! FOB value over time, one line per flow

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisType, Color, ItemStyle, LineStyle, SplitLine, Symbol, TextStyle, Tooltip,
        Trigger,
    },
    series::Line,
};

use super::ValueScale;
use super::colors::{COLOR_BACKGROUND, COLOR_GRID, COLOR_TEXT, FLOW_COLORS};
use crate::aggregate::YearlyFlows;

pub(super) fn timeline_chart(yearly: &YearlyFlows, title: &str) -> Chart {
    let max = yearly
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(0.0f64, f64::max);
    let scale = ValueScale::for_max(max);

    let years: Vec<String> = yearly.years.iter().map(|y| y.to_string()).collect();
    let legend: Vec<String> = yearly.series.iter().map(|s| s.flow.clone()).collect();

    let mut chart = Chart::new()
        .background_color(Color::Value(COLOR_BACKGROUND.to_string()))
        .title(
            Title::new()
                .text(title)
                .left("center")
                .top("2%")
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(20)),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .legend(
            Legend::new()
                .data(legend)
                .bottom("2%")
                .item_gap(24)
                .text_style(TextStyle::new().color(COLOR_TEXT).font_size(14)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .top("12%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .boundary_gap(false)
                .data(years)
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(14)),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(scale.axis_name())
                .name_text_style(TextStyle::new().color(COLOR_TEXT).font_size(14))
                .axis_label(AxisLabel::new().color(COLOR_TEXT).font_size(14))
                .split_line(
                    SplitLine::new().line_style(LineStyle::new().width(0.5).color(COLOR_GRID)),
                ),
        );

    for (i, series) in yearly.series.iter().enumerate() {
        let color = FLOW_COLORS[i % FLOW_COLORS.len()];
        let data: Vec<f64> = series.values.iter().map(|v| scale.apply(*v)).collect();

        chart = chart.series(
            Line::new()
                .name(&series.flow)
                .data(data)
                .symbol(Symbol::Circle)
                .symbol_size(8)
                .line_style(LineStyle::new().width(2).color(color))
                .item_style(ItemStyle::new().color(color)),
        );
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::FlowSeries;

    #[test]
    fn test_one_line_per_flow() {
        let yearly = YearlyFlows {
            years: vec![2022, 2023],
            series: vec![
                FlowSeries {
                    flow: "Exportação".to_string(),
                    values: vec![1.5e9, 2.0e9],
                },
                FlowSeries {
                    flow: "Importação".to_string(),
                    values: vec![1.0e9, 0.0],
                },
            ],
        };
        let json = serde_json::to_string(&timeline_chart(&yearly, "Timeline")).unwrap();
        assert_eq!(json.matches("\"line\"").count(), 2);
        assert!(json.contains("Exportação"));
        assert!(json.contains("2023"));
        assert!(json.contains("US$ FOB (B)"));
    }
}
