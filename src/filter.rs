//! Typed inclusion-list filters over trade records

use std::collections::BTreeSet;

use crate::data::{Dataset, Field, TradeRecord};
use crate::error::{DashboardError, Result};

/// One field restricted to a set of allowed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub field: Field,
    pub allowed: BTreeSet<String>,
}

impl FilterClause {
    fn matches(&self, record: &TradeRecord) -> bool {
        self.allowed.contains(&*self.field.value(record))
    }
}

/// Conjunction of filter clauses
///
/// A field without a clause, or with an empty value list, is unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    clauses: Vec<FilterClause>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `field` to `values`; an empty list adds no restriction
    pub fn with<I, S>(mut self, field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add(field, values);
        self
    }

    pub fn add<I, S>(&mut self, field: Field, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let allowed: BTreeSet<String> = values
            .into_iter()
            .map(Into::into)
            .map(|v| v.trim().to_string())
            .collect();
        if !allowed.is_empty() {
            self.clauses.push(FilterClause { field, allowed });
        }
    }

    /// Parse a `FIELD=v1,v2` clause, validating the field name
    pub fn parse_clause(clause: &str) -> Result<(Field, Vec<String>)> {
        let (name, values) = clause
            .split_once('=')
            .ok_or_else(|| DashboardError::InvalidFilter {
                clause: clause.to_string(),
                reason: "expected FIELD=VALUE[,VALUE...]".to_string(),
            })?;

        let field: Field = name.parse()?;
        let values: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .collect();

        if values.is_empty() {
            return Err(DashboardError::InvalidFilter {
                clause: clause.to_string(),
                reason: format!("no values given for {}", field),
            });
        }
        Ok((field, values))
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether any clause restricts `field`
    pub fn restricts(&self, field: Field) -> bool {
        self.clauses.iter().any(|c| c.field == field)
    }

    pub fn matches(&self, record: &TradeRecord) -> bool {
        self.clauses.iter().all(|c| c.matches(record))
    }

    /// Matching records, in dataset order
    pub fn apply<'a>(&self, dataset: &'a Dataset) -> Vec<&'a TradeRecord> {
        dataset.records().iter().filter(|r| self.matches(r)).collect()
    }

    /// One `field: v1, v2` line per clause
    pub fn describe(&self) -> Vec<String> {
        self.clauses
            .iter()
            .map(|c| {
                let values: Vec<&str> = c.allowed.iter().map(String::as_str).collect();
                format!("{}: {}", c.field.title(), values.join(", "))
            })
            .collect()
    }
}
