//! Dashboard mode: terminal report plus optional HTML, PNG and export outputs

use std::path::Path;

use crate::chart;
use crate::error::{DashboardError, Result};
use crate::export;
use crate::filter::FilterSpec;
use crate::output::{
    format_count, print_detail, print_error, print_filters, print_metrics, print_ranking,
    print_warning, print_yearly,
};
use crate::session::{Session, Summary};

pub struct DashboardOptions<'a> {
    pub top_n: usize,
    /// Detail rows to print; 0 hides the table
    pub detail_rows: usize,
    pub quiet: bool,
    pub html: Option<&'a Path>,
    pub charts_dir: Option<&'a Path>,
    pub export: Option<&'a Path>,
}

/// Run the dashboard for one filter selection
pub fn run_dashboard(session: &mut Session, spec: &FilterSpec, options: &DashboardOptions<'_>) {
    let total_records = session.dataset().len();
    let (summary, product_colors) = session.summarize(spec, options.top_n);
    let matched = summary.records.len();
    let total_fob = summary.metrics.total_fob;

    if !options.quiet {
        print_filters(&summary.filters, matched, total_records);
    }

    print_metrics(&summary.metrics);
    print_yearly(&summary.yearly);
    print_ranking(
        &format!("Top {} Countries", options.top_n),
        &summary.countries,
        total_fob,
        None,
    );
    print_ranking("FOB by State", &summary.states, total_fob, None);
    print_ranking(
        &format!("Top {} Sections", options.top_n),
        &summary.sections,
        total_fob,
        None,
    );
    print_ranking(
        &format!("Top {} Products", options.top_n),
        &summary.products,
        total_fob,
        Some(product_colors),
    );

    if options.detail_rows > 0 {
        print_detail(&summary.detail_rows(), options.detail_rows, matched);
    }

    let mut failed = false;

    if options.html.is_some() || options.charts_dir.is_some() {
        let charts = chart::build_charts(&summary, product_colors);

        if let Some(path) = options.html {
            let result = chart::render_html(&summary, &charts)
                .and_then(|html| std::fs::write(path, html).map_err(DashboardError::from));
            match result {
                Ok(()) => eprintln!("Dashboard saved to: {}", path.display()),
                Err(e) => failed |= report_render_error(&summary, &e),
            }
        }

        if let Some(dir) = options.charts_dir {
            match chart::save_images(&summary, &charts, dir) {
                Ok(paths) => {
                    for path in paths {
                        eprintln!("Chart saved to: {}", path.display());
                    }
                }
                Err(e) => failed |= report_render_error(&summary, &e),
            }
        }
    }

    if let Some(path) = options.export {
        match export_summary(&summary, path) {
            Ok(()) => eprintln!("Exported {} rows to: {}", format_count(matched), path.display()),
            Err(e) => {
                print_error(&e.to_string());
                failed = true;
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
}

fn export_summary(summary: &Summary<'_>, path: &Path) -> Result<()> {
    export::export_records(&summary.records, path).map(|_| ())
}

/// Empty selections only warn; anything else is a failure
fn report_render_error(summary: &Summary<'_>, err: &DashboardError) -> bool {
    if summary.records.is_empty() {
        print_warning(&err.to_string());
        false
    } else {
        print_error(&err.to_string());
        true
    }
}
