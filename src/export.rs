//! Export filtered records to CSV or XLSX

use std::path::Path;

use log::info;
use rust_xlsxwriter::{Format, Workbook};

use crate::data::{Field, TradeRecord};
use crate::error::{DashboardError, Result};

/// Suggested file name for exports
pub const DEFAULT_EXPORT_NAME: &str = "comercio_exterior_filtrado.csv";

/// Worksheet name used in XLSX exports
const SHEET_NAME: &str = "Dados";

/// Column headers, in record order
const HEADERS: [&str; 11] = [
    "flow",
    "year",
    "country",
    "state",
    "customs_unit",
    "section_code",
    "section",
    "transport_mode",
    "product_code",
    "product",
    "fob_value",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(DashboardError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// Write `records` to `path`, choosing the format from the extension
pub fn export_records(records: &[&TradeRecord], path: &Path) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    match format {
        ExportFormat::Csv => write_csv(records, path)?,
        ExportFormat::Xlsx => write_xlsx(records, path)?,
    }
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(format)
}

/// CSV with English headers, readable again by the loader
pub fn write_csv(records: &[&TradeRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(HEADERS)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Single-sheet workbook with a bold header and formatted FOB column
pub fn write_xlsx(records: &[&TradeRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format("#,##0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    let text_fields = [
        (0, Field::Flow),
        (2, Field::Country),
        (3, Field::State),
        (4, Field::CustomsUnit),
        (5, Field::SectionCode),
        (6, Field::Section),
        (7, Field::TransportMode),
        (8, Field::ProductCode),
        (9, Field::Product),
    ];

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, field) in text_fields {
            worksheet.write_string(row, col, &*field.value(record))?;
        }
        worksheet.write_number(row, 1, record.year as f64)?;
        worksheet.write_number_with_format(row, 10, record.fob_value, &money_format)?;
    }

    worksheet.set_column_width(6, 40)?;
    worksheet.set_column_width(9, 48)?;
    worksheet.set_column_width(10, 18)?;

    workbook.save(path)?;
    Ok(())
}
