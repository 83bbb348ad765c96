use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::{Builder, Env};
use log::debug;

use tradedash::config::DashboardConfig;
use tradedash::data::{Field, TABLE_NAME};
use tradedash::export::{DEFAULT_EXPORT_NAME, ExportFormat};
use tradedash::filter::FilterSpec;
use tradedash::mode::{DashboardOptions, open_session, run_dashboard, run_list};
use tradedash::output::print_error;
use tradedash::{ColorAssigner, DashboardError};

fn examples_help() -> String {
    format!(
        "Examples:
  tradedash trade.sqlite                                 Latest year, all flows
  tradedash trade.csv --year 2022 --flow Exportação      One year, one flow
  tradedash trade.sqlite --all-years --top 5             Every year, top 5 rankings
  tradedash trade.sqlite --filter via=Marítima,Aérea     Filter any field
  tradedash trade.sqlite --html dashboard.html           Write an HTML dashboard
  tradedash trade.sqlite --charts charts/                Save each chart as PNG
  tradedash trade.sqlite --export {export}
  tradedash trade.sqlite --list product                  Products with their colors

SQLite sources are read from the table `{table}`.",
        export = DEFAULT_EXPORT_NAME,
        table = TABLE_NAME,
    )
}

#[derive(Parser)]
#[command(
    name = "tradedash",
    version,
    about = "Foreign trade dashboard: filters, rankings and charts over FOB values",
    after_help = examples_help()
)]
struct Args {
    /// Trade data file (SQLite table comercio_exterior, or CSV)
    data: PathBuf,

    /// Years to include (default: most recent year)
    #[arg(short, long, value_delimiter = ',', value_name = "YEAR")]
    year: Vec<String>,

    /// Trade flows to include
    #[arg(short, long, value_delimiter = ',', value_name = "FLOW")]
    flow: Vec<String>,

    /// Partner countries to include
    #[arg(short, long, value_delimiter = ',', value_name = "COUNTRY")]
    country: Vec<String>,

    /// Brazilian states (UF) to include
    #[arg(short, long, value_delimiter = ',', value_name = "STATE")]
    state: Vec<String>,

    /// Customs units (URF) to include
    #[arg(short = 'u', long, value_delimiter = ',', value_name = "URF")]
    customs_unit: Vec<String>,

    /// Product sections to include
    #[arg(short = 'S', long, value_delimiter = ',', value_name = "SECTION")]
    section: Vec<String>,

    /// Filter any field, e.g. --filter via=Marítima,Aérea (repeatable)
    #[arg(long = "filter", value_name = "FIELD=V1,V2")]
    filters: Vec<String>,

    /// Include every year instead of only the most recent one
    #[arg(long)]
    all_years: bool,

    /// Entries shown in each ranking [default: 10]
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Detail rows to print, 0 to hide the table [default: 20]
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Write an HTML dashboard with all charts
    #[arg(long, value_name = "PATH")]
    html: Option<PathBuf>,

    /// Save each chart as PNG into this directory
    #[arg(long, value_name = "DIR")]
    charts: Option<PathBuf>,

    /// Export the filtered records (.csv or .xlsx)
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,

    /// List the distinct values of a field and exit
    #[arg(long, value_name = "FIELD")]
    list: Option<String>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress the filter summary
    #[arg(short, long)]
    quiet: bool,

    /// Show diagnostic logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn fail(msg: &str) -> ! {
    print_error(msg);
    std::process::exit(1);
}

fn check_parent_exists(path: &Path) {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fail(&format!("Directory does not exist: {}", parent.display()));
    }
}

/// Filter clauses from the typed flags and `--filter`
fn build_filters(args: &Args) -> FilterSpec {
    let mut spec = FilterSpec::new()
        .with(Field::Year, args.year.iter().cloned())
        .with(Field::Flow, args.flow.iter().cloned())
        .with(Field::Country, args.country.iter().cloned())
        .with(Field::State, args.state.iter().cloned())
        .with(Field::CustomsUnit, args.customs_unit.iter().cloned())
        .with(Field::Section, args.section.iter().cloned());

    for clause in &args.filters {
        let (field, values) = FilterSpec::parse_clause(clause).unwrap_or_else(|e| fail(&e.to_string()));
        spec.add(field, values);
    }
    spec
}

fn main() {
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }

    let default_level = if args.verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = match &args.config {
        Some(path) => DashboardConfig::load(path).unwrap_or_else(|e| {
            fail(&format!("{}: {}", path.display(), e));
        }),
        None => DashboardConfig::default(),
    };
    debug!("Configuration: {:?}", config);

    // Validate numeric options
    if args.top == Some(0) {
        fail("--top must be positive");
    }
    let top_n = args.top.unwrap_or(config.top_n);
    let detail_rows = args.rows.unwrap_or(config.detail_rows);

    // Validate option combinations
    let has_outputs = args.html.is_some() || args.charts.is_some() || args.export.is_some();
    if args.list.is_some() && has_outputs {
        fail("--list cannot be used with --html, --charts or --export");
    }

    // Validate output paths
    if let Some(ref path) = args.html {
        check_parent_exists(path);
    }
    if let Some(ref path) = args.export {
        check_parent_exists(path);
        if let Err(e) = ExportFormat::from_path(path) {
            fail(&e.to_string());
        }
    }

    let list_field: Option<Field> = args
        .list
        .as_deref()
        .map(|name| name.parse().unwrap_or_else(|e: DashboardError| fail(&e.to_string())));
    let mut filters = build_filters(&args);

    let assigner = ColorAssigner::new(config.synthesis.clone()).unwrap_or_else(|e| fail(&e.to_string()));
    let mut session = open_session(&args.data, assigner);

    // Dispatch to appropriate mode
    if let Some(field) = list_field {
        run_list(&mut session, field, args.quiet);
        return;
    }

    if config.default_latest_year && !args.all_years && !filters.restricts(Field::Year) {
        let latest = session.default_filters();
        for clause in latest.clauses() {
            filters.add(clause.field, clause.allowed.iter().cloned());
        }
    }

    let options = DashboardOptions {
        top_n,
        detail_rows,
        quiet: args.quiet,
        html: args.html.as_deref(),
        charts_dir: args.charts.as_deref(),
        export: args.export.as_deref(),
    };
    run_dashboard(&mut session, &filters, &options);
    debug!("Color assignments computed: {}", session.color_computations());
}
