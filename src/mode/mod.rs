//! CLI mode implementations

mod dashboard;
mod options;

pub use dashboard::{DashboardOptions, run_dashboard};
pub use options::run_list;

use std::path::Path;

use crate::output::print_error;
use crate::palette::ColorAssigner;
use crate::session::Session;

/// Load the data file into a session, exiting with an error on failure
pub fn open_session(path: &Path, assigner: ColorAssigner) -> Session {
    Session::open(path, assigner).unwrap_or_else(|e| {
        print_error(&e.to_string());
        std::process::exit(1);
    })
}
