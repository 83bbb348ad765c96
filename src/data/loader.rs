use std::path::Path;
use std::time::Instant;

use log::{debug, info};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use super::{Dataset, TradeRecord};
use crate::error::{DashboardError, Result};

/// Table holding the trade records in the SQLite source
pub const TABLE_NAME: &str = "comercio_exterior";

const SELECT_RECORDS: &str = r#"
    SELECT Fluxo, Ano, "Países", "UF do Produto", URF,
           "Código Seção", "Descrição Seção", Via,
           "Código SH6", "Descrição SH6", "Valor US$ FOB"
    FROM comercio_exterior
"#;

enum SourceFormat {
    Sqlite,
    Csv,
}

fn source_format(path: &Path) -> Result<SourceFormat> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "sqlite" | "sqlite3" | "db" => Ok(SourceFormat::Sqlite),
        "csv" => Ok(SourceFormat::Csv),
        _ => Err(DashboardError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension,
        }),
    }
}

/// Load the whole trade table from a SQLite database or a CSV file
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DashboardError::DataNotFound(path.to_path_buf()));
    }

    let started = Instant::now();
    let records = match source_format(path)? {
        SourceFormat::Sqlite => load_sqlite(path)?,
        SourceFormat::Csv => load_csv(path)?,
    };

    info!(
        "Loaded {} records from {} in {:.1?}",
        records.len(),
        path.display(),
        started.elapsed()
    );

    Ok(Dataset::new(records))
}

fn load_sqlite(path: &Path) -> Result<Vec<TradeRecord>> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    debug!("Querying table {}", TABLE_NAME);

    let mut stmt = conn.prepare(SELECT_RECORDS)?;
    let rows = stmt.query_map([], |row| {
        Ok(TradeRecord {
            flow: text_column(row, 0)?,
            year: year_column(row, 1)?,
            country: text_column(row, 2)?,
            state: text_column(row, 3)?,
            customs_unit: text_column(row, 4)?,
            section_code: text_column(row, 5)?,
            section: text_column(row, 6)?,
            transport_mode: text_column(row, 7)?,
            product_code: text_column(row, 8)?,
            product: text_column(row, 9)?,
            fob_value: value_column(row, 10)?,
        })
    })?;

    let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

/// Read any SQLite cell as display text (codes may be stored as integers)
fn text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}

fn year_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<i32> {
    let invalid = || {
        rusqlite::Error::InvalidColumnType(idx, "Ano".to_string(), rusqlite::types::Type::Text)
    };
    match row.get_ref(idx)? {
        ValueRef::Integer(i) => i32::try_from(i).map_err(|_| invalid()),
        ValueRef::Real(f) => Ok(f as i32),
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn value_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<f64> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(0.0),
        ValueRef::Text(t) => std::str::from_utf8(t)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .ok_or_else(|| {
                rusqlite::Error::InvalidColumnType(
                    idx,
                    "Valor US$ FOB".to_string(),
                    rusqlite::types::Type::Text,
                )
            }),
        _ => row.get(idx),
    }
}

fn load_csv(path: &Path) -> Result<Vec<TradeRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut records = Vec::new();
    for (line, result) in reader.deserialize::<TradeRecord>().enumerate() {
        let record =
            result.map_err(|e| DashboardError::Load(format!("row {}: {}", line + 2, e)))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CSV_HEADER: &str = "flow,year,country,state,customs_unit,section_code,section,transport_mode,product_code,product,fob_value";

    #[test]
    fn test_missing_file() {
        let err = load_dataset("/nonexistent/comercio_exterior.sqlite").unwrap_err();
        assert!(matches!(err, DashboardError::DataNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.parquet");
        std::fs::write(&path, b"").unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat { ref extension, .. } if extension == "parquet"));
    }

    #[test]
    fn test_load_csv_english_headers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trade.csv");
        let body = format!(
            "{}\nExport,2023,China,SP,Porto de Santos,II,Vegetable products,Maritima,120190,Soy beans,1500.5\n",
            CSV_HEADER
        );
        std::fs::write(&path, body).unwrap();

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.year, 2023);
        assert_eq!(r.product, "Soy beans");
        assert_eq!(r.fob_value, 1500.5);
    }

    #[test]
    fn test_load_csv_source_headers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trade.csv");
        let body = "Fluxo,Ano,Países,UF,URF,Cod_Secao,Desc_Secao,Via,Cod_SH6,Desc_SH6,Valor_FOB\n\
                    Importação,2022,Chile,RS,Porto Alegre,V,Minerais,Rodoviaria,270900,Petroleo,10\n";
        std::fs::write(&path, body).unwrap();

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.records()[0].flow, "Importação");
        assert_eq!(ds.records()[0].country, "Chile");
    }

    #[test]
    fn test_load_csv_bad_row_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trade.csv");
        let body = format!(
            "{}\nExport,not-a-year,China,SP,X,II,S,M,1,P,1\n",
            CSV_HEADER
        );
        std::fs::write(&path, body).unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(err.to_string().contains("row 2"), "got: {}", err);
    }

    #[test]
    fn test_load_sqlite_mixed_column_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("comercio_exterior.sqlite");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE comercio_exterior (
                Fluxo TEXT, Ano INTEGER, "Países" TEXT, "UF do Produto" TEXT, URF TEXT,
                "Código Seção" TEXT, "Descrição Seção" TEXT, Via TEXT,
                "Código SH6" INTEGER, "Descrição SH6" TEXT, "Valor US$ FOB" INTEGER
            );
            INSERT INTO comercio_exterior VALUES
                ('Exportação', 2024, 'China', 'MT', 'Porto de Santos', 'II', 'Vegetais', 'Maritima', 120190, 'Soja', 900),
                ('Importação', '2023', 'EUA', 'SP', 'Aeroporto de Guarulhos', 'XVI', 'Maquinas', 'Aerea', 847130, 'Computadores', 12.5);
            "#,
        )
        .unwrap();
        drop(conn);

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records()[0].product_code, "120190");
        assert_eq!(ds.records()[0].fob_value, 900.0);
        assert_eq!(ds.records()[1].year, 2023);
        assert_eq!(ds.records()[1].fob_value, 12.5);
    }
}
