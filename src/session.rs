//! A dashboard session: the loaded table and its product colors

use std::path::Path;

use log::debug;

use crate::aggregate::{self, Metrics, YearlyFlows};
use crate::data::{Dataset, Field, TradeRecord, load_dataset};
use crate::error::Result;
use crate::filter::FilterSpec;
use crate::palette::{ColorAssigner, ColorAssignment, ColorCache};

/// Everything rendered for one filter selection
pub struct Summary<'a> {
    pub records: Vec<&'a TradeRecord>,
    /// Human-readable description of the active filters
    pub filters: Vec<String>,
    pub top_n: usize,
    pub metrics: Metrics,
    pub yearly: YearlyFlows,
    pub countries: Vec<(String, f64)>,
    pub states: Vec<(String, f64)>,
    pub sections: Vec<(String, f64)>,
    pub products: Vec<(String, f64)>,
}

impl<'a> Summary<'a> {
    pub fn compute(dataset: &'a Dataset, spec: &FilterSpec, top_n: usize) -> Self {
        let records = spec.apply(dataset);
        debug!(
            "Filter kept {} of {} records",
            records.len(),
            dataset.len()
        );

        Self {
            filters: spec.describe(),
            top_n,
            metrics: Metrics::compute(&records),
            yearly: aggregate::yearly_by_flow(&records),
            countries: aggregate::top_n(&records, Field::Country, top_n),
            states: aggregate::sum_by(&records, Field::State),
            sections: aggregate::top_n(&records, Field::Section, top_n),
            products: aggregate::top_n(&records, Field::Product, top_n),
            records,
        }
    }

    /// Detail rows, largest FOB first
    pub fn detail_rows(&self) -> Vec<&'a TradeRecord> {
        aggregate::sorted_by_value(&self.records)
    }
}

/// Owns the dataset and the color cache for the lifetime of the process
pub struct Session {
    dataset: Dataset,
    /// Color universe: every distinct product description, sorted
    products: Vec<String>,
    colors: ColorCache,
}

impl Session {
    pub fn open(path: impl AsRef<Path>, assigner: ColorAssigner) -> Result<Self> {
        Ok(Self::new(load_dataset(path)?, assigner))
    }

    pub fn new(dataset: Dataset, assigner: ColorAssigner) -> Self {
        let products = dataset.distinct(Field::Product);
        Self {
            dataset,
            products,
            colors: ColorCache::new(assigner),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Default selection: the most recent year, every flow
    pub fn default_filters(&self) -> FilterSpec {
        let years: Vec<String> = self
            .dataset
            .latest_year()
            .map(|y| y.to_string())
            .into_iter()
            .collect();
        FilterSpec::new().with(Field::Year, years)
    }

    /// Product colors over the whole dataset, independent of filters
    pub fn product_colors(&mut self) -> &ColorAssignment {
        self.colors.get_or_assign(&self.products)
    }

    /// Summary for `spec` together with the session's product colors
    pub fn summarize(&mut self, spec: &FilterSpec, top_n: usize) -> (Summary<'_>, &ColorAssignment) {
        let colors = self.colors.get_or_assign(&self.products);
        let summary = Summary::compute(&self.dataset, spec, top_n);
        (summary, colors)
    }

    pub fn color_computations(&self) -> usize {
        self.colors.computations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::record;

    fn session() -> Session {
        Session::new(
            Dataset::new(vec![
                record(2022, "Export", "China", "Soy", 100.0),
                record(2023, "Export", "China", "Soy", 200.0),
                record(2023, "Import", "Chile", "Copper", 50.0),
                record(2023, "Export", "Argentina", "Steel", 75.0),
            ]),
            ColorAssigner::default(),
        )
    }

    #[test]
    fn test_default_filters_select_latest_year() {
        let s = session();
        let spec = s.default_filters();
        assert_eq!(spec.describe(), vec!["Year: 2023"]);
    }

    #[test]
    fn test_default_filters_empty_dataset() {
        let s = Session::new(Dataset::default(), ColorAssigner::default());
        assert!(s.default_filters().is_empty());
    }

    #[test]
    fn test_summary_for_latest_year() {
        let mut s = session();
        let spec = s.default_filters();
        let (summary, _) = s.summarize(&spec, 10);
        assert_eq!(summary.records.len(), 3);
        assert_eq!(summary.metrics.total_fob, 325.0);
        assert_eq!(summary.countries[0], ("China".to_string(), 200.0));
        assert_eq!(summary.detail_rows()[0].fob_value, 200.0);
    }

    #[test]
    fn test_colors_stable_across_filters() {
        let mut s = session();
        let all = {
            let (_, colors) = s.summarize(&FilterSpec::new(), 10);
            colors.clone()
        };
        let chile_only = FilterSpec::new().with(Field::Country, ["Chile"]);
        {
            let (summary, colors) = s.summarize(&chile_only, 10);
            assert_eq!(summary.products.len(), 1);
            assert_eq!(colors, &all);
            // Universe is sorted: Copper, Soy, Steel
            assert_eq!(colors.get("Copper"), Some("#8dd3c7"));
            assert_eq!(colors.get("Steel"), Some("#bebada"));
        }
        assert_eq!(s.color_computations(), 1);
    }
}
