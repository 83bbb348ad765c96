//! Trade record schema and the in-memory dataset

mod loader;

pub use loader::{TABLE_NAME, load_dataset};

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// One import/export record
///
/// Serialized headers are the English column names; the Portuguese source
/// names are accepted as aliases when reading CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(alias = "Fluxo")]
    pub flow: String,
    #[serde(alias = "Ano")]
    pub year: i32,
    #[serde(alias = "Países", alias = "Paises")]
    pub country: String,
    #[serde(alias = "UF", alias = "UF do Produto")]
    pub state: String,
    #[serde(alias = "URF")]
    pub customs_unit: String,
    #[serde(alias = "Cod_Secao", alias = "Código Seção")]
    pub section_code: String,
    #[serde(alias = "Desc_Secao", alias = "Descrição Seção")]
    pub section: String,
    #[serde(alias = "Via")]
    pub transport_mode: String,
    #[serde(alias = "Cod_SH6", alias = "Código SH6")]
    pub product_code: String,
    #[serde(alias = "Desc_SH6", alias = "Descrição SH6")]
    pub product: String,
    /// FOB value in US dollars
    #[serde(alias = "Valor_FOB", alias = "Valor US$ FOB")]
    pub fob_value: f64,
}

/// Filterable and groupable columns of [`TradeRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Year,
    Flow,
    Country,
    State,
    CustomsUnit,
    SectionCode,
    Section,
    TransportMode,
    ProductCode,
    Product,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::Year,
        Field::Flow,
        Field::Country,
        Field::State,
        Field::CustomsUnit,
        Field::SectionCode,
        Field::Section,
        Field::TransportMode,
        Field::ProductCode,
        Field::Product,
    ];

    /// Canonical snake-case name (also the CSV header)
    pub fn name(self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Flow => "flow",
            Field::Country => "country",
            Field::State => "state",
            Field::CustomsUnit => "customs_unit",
            Field::SectionCode => "section_code",
            Field::Section => "section",
            Field::TransportMode => "transport_mode",
            Field::ProductCode => "product_code",
            Field::Product => "product",
        }
    }

    /// Human-readable column title
    pub fn title(self) -> &'static str {
        match self {
            Field::Year => "Year",
            Field::Flow => "Flow",
            Field::Country => "Country",
            Field::State => "State",
            Field::CustomsUnit => "Customs unit",
            Field::SectionCode => "Section code",
            Field::Section => "Section",
            Field::TransportMode => "Transport mode",
            Field::ProductCode => "HS6 code",
            Field::Product => "Product",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|f| f.name()).collect()
    }

    /// Display value of this field for a record
    pub fn value(self, record: &TradeRecord) -> Cow<'_, str> {
        match self {
            Field::Year => Cow::Owned(record.year.to_string()),
            Field::Flow => Cow::Borrowed(&record.flow),
            Field::Country => Cow::Borrowed(&record.country),
            Field::State => Cow::Borrowed(&record.state),
            Field::CustomsUnit => Cow::Borrowed(&record.customs_unit),
            Field::SectionCode => Cow::Borrowed(&record.section_code),
            Field::Section => Cow::Borrowed(&record.section),
            Field::TransportMode => Cow::Borrowed(&record.transport_mode),
            Field::ProductCode => Cow::Borrowed(&record.product_code),
            Field::Product => Cow::Borrowed(&record.product),
        }
    }

    /// Sort distinct values: years numerically, everything else lexicographically
    pub fn sort_values(self, values: &mut [String]) {
        if self == Field::Year {
            values.sort_by_key(|v| v.parse::<i64>().unwrap_or(i64::MAX));
        } else {
            values.sort();
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let field = match normalized.as_str() {
            "year" | "ano" => Field::Year,
            "flow" | "fluxo" => Field::Flow,
            "country" | "paises" | "países" | "pais" | "país" => Field::Country,
            "state" | "uf" | "uf_do_produto" => Field::State,
            "customs_unit" | "urf" => Field::CustomsUnit,
            "section_code" | "cod_secao" | "código_seção" => Field::SectionCode,
            "section" | "secao" | "seção" | "desc_secao" => Field::Section,
            "transport_mode" | "via" => Field::TransportMode,
            "product_code" | "hs6" | "sh6" | "cod_sh6" => Field::ProductCode,
            "product" | "produto" | "desc_sh6" => Field::Product,
            _ => return Err(DashboardError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

/// The loaded trade table
#[derive(Debug, Default, Clone)]
pub struct Dataset {
    records: Vec<TradeRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TradeRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct values of a field
    pub fn distinct(&self, field: Field) -> Vec<String> {
        let set: BTreeSet<Cow<'_, str>> = self.records.iter().map(|r| field.value(r)).collect();
        let mut values: Vec<String> = set.into_iter().map(Cow::into_owned).collect();
        field.sort_values(&mut values);
        values
    }

    /// Most recent year present in the table
    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn test_field_parse_aliases() {
        assert_eq!("year".parse::<Field>().unwrap(), Field::Year);
        assert_eq!("Ano".parse::<Field>().unwrap(), Field::Year);
        assert_eq!("Países".parse::<Field>().unwrap(), Field::Country);
        assert_eq!("URF".parse::<Field>().unwrap(), Field::CustomsUnit);
        assert_eq!("customs-unit".parse::<Field>().unwrap(), Field::CustomsUnit);
        assert_eq!("Desc_SH6".parse::<Field>().unwrap(), Field::Product);
    }

    #[test]
    fn test_field_parse_unknown() {
        let err = "colour".parse::<Field>().unwrap_err();
        assert!(matches!(err, DashboardError::UnknownField(ref f) if f == "colour"));
        assert!(err.to_string().contains("customs_unit"));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn test_distinct_years_sort_numerically() {
        let ds = Dataset::new(vec![
            record(2021, "Export", "China", "Soy", 1.0),
            record(999, "Export", "China", "Soy", 1.0),
            record(2020, "Import", "Chile", "Oil", 1.0),
            record(2021, "Import", "Chile", "Oil", 1.0),
        ]);
        assert_eq!(ds.distinct(Field::Year), vec!["999", "2020", "2021"]);
        assert_eq!(ds.distinct(Field::Flow), vec!["Export", "Import"]);
        assert_eq!(ds.latest_year(), Some(2021));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert!(ds.distinct(Field::Product).is_empty());
        assert_eq!(ds.latest_year(), None);
    }
}
