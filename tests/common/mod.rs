//! Common test utilities

use std::io::Write;
use std::path::Path;

/// One fixture row: flow, year, country, state, product, FOB value
pub struct Row {
    pub flow: &'static str,
    pub year: i32,
    pub country: &'static str,
    pub state: &'static str,
    pub product: &'static str,
    pub fob: f64,
}

const fn row(
    flow: &'static str,
    year: i32,
    country: &'static str,
    state: &'static str,
    product: &'static str,
    fob: f64,
) -> Row {
    Row {
        flow,
        year,
        country,
        state,
        product,
        fob,
    }
}

/// Small trade table spanning two years and two flows
pub const ROWS: &[Row] = &[
    row("Exportação", 2022, "China", "SP", "Soja", 1_000_000.0),
    row("Exportação", 2022, "Chile", "PR", "Café", 250_000.0),
    row("Importação", 2022, "Argentina", "SP", "Petróleo", 400_000.0),
    row("Exportação", 2023, "China", "MT", "Soja", 3_000_000.0),
    row("Exportação", 2023, "Estados Unidos", "MG", "Minério de ferro", 1_500_000.0),
    row("Exportação", 2023, "Chile", "SP", "Café", 500_000.0),
    row("Importação", 2023, "Estados Unidos", "RJ", "Petróleo", 2_000_000.0),
];

/// Section, HS6 code and transport mode derived from the product
fn product_details(product: &str) -> (&'static str, &'static str, &'static str, &'static str) {
    match product {
        "Soja" => ("II", "Produtos do reino vegetal", "120190", "Marítima"),
        "Café" => ("II", "Produtos do reino vegetal", "090111", "Marítima"),
        "Petróleo" => ("V", "Produtos minerais", "270900", "Marítima"),
        _ => ("V", "Produtos minerais", "260111", "Ferroviária"),
    }
}

fn customs_unit(state: &str) -> &'static str {
    match state {
        "PR" => "Porto de Paranaguá",
        "RJ" => "Porto do Rio de Janeiro",
        _ => "Porto de Santos",
    }
}

/// Write the fixture as CSV with the source column names
pub fn write_csv(path: &Path) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "Fluxo,Ano,Países,UF do Produto,URF,Código Seção,Descrição Seção,Via,Código SH6,Descrição SH6,Valor US$ FOB"
    )?;
    for r in ROWS {
        let (section_code, section, hs6, via) = product_details(r.product);
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.flow,
            r.year,
            r.country,
            r.state,
            customs_unit(r.state),
            section_code,
            section,
            via,
            hs6,
            r.product,
            r.fob
        )?;
    }
    Ok(())
}

/// Write the fixture as a SQLite database with table `comercio_exterior`
pub fn write_sqlite(path: &Path) -> rusqlite::Result<()> {
    let conn = rusqlite::Connection::open(path)?;
    conn.execute_batch(
        r#"CREATE TABLE comercio_exterior (
            Fluxo TEXT, Ano INTEGER, "Países" TEXT, "UF do Produto" TEXT, URF TEXT,
            "Código Seção" TEXT, "Descrição Seção" TEXT, Via TEXT,
            "Código SH6" INTEGER, "Descrição SH6" TEXT, "Valor US$ FOB" REAL
        )"#,
    )?;
    for r in ROWS {
        let (section_code, section, hs6, via) = product_details(r.product);
        let hs6: i64 = hs6.parse().unwrap_or_default();
        conn.execute(
            "INSERT INTO comercio_exterior VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                r.flow,
                r.year,
                r.country,
                r.state,
                customs_unit(r.state),
                section_code,
                section,
                via,
                hs6,
                r.product,
                r.fob
            ],
        )?;
    }
    Ok(())
}
