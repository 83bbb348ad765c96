//! Foreign trade dashboard over FOB records
//!
//! The binary wires these modules to the command line; the library exposes
//! the loader, filters, aggregates, category colors, charts and exports.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod filter;
pub mod mode;
pub mod output;
pub mod palette;
pub mod session;

pub use error::{DashboardError, Result};
pub use self::palette::{ColorAssigner, ColorAssignment, assign_colors};
