//! Group-by, sum and ranking over filtered records

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::data::{Field, TradeRecord};

/// Headline numbers for the filtered selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub total_fob: f64,
    pub countries: usize,
    pub products: usize,
    pub states: usize,
}

impl Metrics {
    pub fn compute(records: &[&TradeRecord]) -> Self {
        Self {
            total_fob: records.iter().map(|r| r.fob_value).sum(),
            countries: count_distinct(records, |r| &r.country),
            products: count_distinct(records, |r| &r.product_code),
            states: count_distinct(records, |r| &r.state),
        }
    }
}

fn count_distinct<'a>(records: &[&'a TradeRecord], key: impl Fn(&'a TradeRecord) -> &'a str) -> usize {
    records.iter().map(|&r| key(r)).collect::<BTreeSet<_>>().len()
}

/// FOB sums per year for one flow
#[derive(Debug, Clone, PartialEq)]
pub struct FlowSeries {
    pub flow: String,
    /// One value per entry of [`YearlyFlows::years`]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct YearlyFlows {
    pub years: Vec<i32>,
    pub series: Vec<FlowSeries>,
}

/// Sum FOB per value of `field`, largest first (ties by key)
pub fn sum_by(records: &[&TradeRecord], field: Field) -> Vec<(String, f64)> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for record in records {
        *totals.entry(field.value(record).into_owned()).or_insert(0.0) += record.fob_value;
    }

    let mut ranked: Vec<(String, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
}

/// The `n` largest groups of `field`
pub fn top_n(records: &[&TradeRecord], field: Field, n: usize) -> Vec<(String, f64)> {
    let mut ranked = sum_by(records, field);
    ranked.truncate(n);
    ranked
}

/// FOB per year, one series per flow; years with no data are zero
pub fn yearly_by_flow(records: &[&TradeRecord]) -> YearlyFlows {
    let mut grouped: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();
    let mut years: BTreeSet<i32> = BTreeSet::new();

    for record in records {
        years.insert(record.year);
        *grouped
            .entry(record.flow.as_str())
            .or_default()
            .entry(record.year)
            .or_insert(0.0) += record.fob_value;
    }

    let years: Vec<i32> = years.into_iter().collect();
    let series = grouped
        .into_iter()
        .map(|(flow, by_year)| FlowSeries {
            flow: flow.to_string(),
            values: years
                .iter()
                .map(|y| by_year.get(y).copied().unwrap_or(0.0))
                .collect(),
        })
        .collect();

    YearlyFlows { years, series }
}

/// Detail rows, largest FOB first
pub fn sorted_by_value<'a>(records: &[&'a TradeRecord]) -> Vec<&'a TradeRecord> {
    let mut rows = records.to_vec();
    rows.sort_by(|a, b| b.fob_value.total_cmp(&a.fob_value));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;

    fn rows() -> Vec<TradeRecord> {
        vec![
            record(2022, "Export", "China", "Soy", 100.0),
            record(2023, "Export", "China", "Soy", 200.0),
            record(2023, "Import", "Chile", "Copper", 50.0),
            record(2023, "Export", "Argentina", "Steel", 75.0),
            record(2021, "Import", "Chile", "Copper", 25.0),
        ]
    }

    #[test]
    fn test_metrics() {
        let data = rows();
        let refs: Vec<&TradeRecord> = data.iter().collect();
        let m = Metrics::compute(&refs);
        assert_eq!(m.total_fob, 450.0);
        assert_eq!(m.countries, 3);
        assert_eq!(m.products, 3);
        assert_eq!(m.states, 1);
    }

    #[test]
    fn test_metrics_empty() {
        let m = Metrics::compute(&[]);
        assert_eq!(m.total_fob, 0.0);
        assert_eq!(m.countries, 0);
    }

    #[test]
    fn test_sum_by_sorted_descending() {
        let data = rows();
        let refs: Vec<&TradeRecord> = data.iter().collect();
        let ranked = sum_by(&refs, Field::Country);
        assert_eq!(
            ranked,
            vec![
                ("China".to_string(), 300.0),
                ("Argentina".to_string(), 75.0),
                ("Chile".to_string(), 75.0),
            ]
        );
    }

    #[test]
    fn test_top_n_truncates() {
        let data = rows();
        let refs: Vec<&TradeRecord> = data.iter().collect();
        let top = top_n(&refs, Field::Product, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, "Soy");
        assert!(top_n(&refs, Field::Product, 10).len() == 3);
    }

    #[test]
    fn test_yearly_by_flow_fills_missing_years() {
        let data = rows();
        let refs: Vec<&TradeRecord> = data.iter().collect();
        let yearly = yearly_by_flow(&refs);
        assert_eq!(yearly.years, vec![2021, 2022, 2023]);
        assert_eq!(yearly.series.len(), 2);
        assert_eq!(yearly.series[0].flow, "Export");
        assert_eq!(yearly.series[0].values, vec![0.0, 100.0, 275.0]);
        assert_eq!(yearly.series[1].flow, "Import");
        assert_eq!(yearly.series[1].values, vec![25.0, 0.0, 50.0]);
    }

    #[test]
    fn test_sorted_by_value() {
        let data = rows();
        let refs: Vec<&TradeRecord> = data.iter().collect();
        let values: Vec<f64> = sorted_by_value(&refs).iter().map(|r| r.fob_value).collect();
        assert_eq!(values, vec![200.0, 100.0, 75.0, 50.0, 25.0]);
    }
}
