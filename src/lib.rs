//! # Sales Insights
//!
//! A library for descriptive analytics over retail sales data: it loads a
//! sales spreadsheet, derives per-row measures, and renders grouped revenue
//! summaries with terminal charts.
//!
//! ## Core Concepts
//!
//! - **Sales Record**: one transaction row. Every raw field is optional;
//!   malformed cells load as `None` instead of failing the run
//! - **Derived Measures**: revenue (sale value minus cost), the year-month
//!   period and the year, computed once when the table is built
//! - **Sales Table**: the immutable in-memory dataset every report borrows
//! - **Reports**: independent sections (totals, breakdowns by state,
//!   category, seller, month and segment, top products, discount-revenue
//!   correlation), each rendered as text plus a terminal chart
//!
//! ## Example
//!
//! ```rust,no_run
//! use sales_insights::run_sales_analysis;
//!
//! fn main() -> sales_insights::Result<()> {
//!     run_sales_analysis("dados_vendas.xlsx")
//! }
//! ```

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod loader;
pub mod report;
pub mod schema;
pub mod table;
pub mod utils;

pub use error::{Result, SalesInsightsError};
pub use loader::load_sales_table;
pub use schema::{Column, SalesRecord, YearMonth};
pub use table::{ColumnSummary, DataSummary, SalesTable};

use log::info;
use std::path::Path;

/// Runs the full analysis: loads the spreadsheet at `path` once, then
/// renders and prints every report section in a fixed order. A load failure
/// aborts before any section is printed.
pub fn run_sales_analysis<P: AsRef<Path>>(path: P) -> Result<()> {
    let table = loader::load_sales_table(path)?;

    let sections = report::render_all(&table);
    info!("Rendering {} report sections", sections.len());
    for section in &sections {
        print!("{}", section);
    }
    println!();

    info!("Sales analysis complete");
    Ok(())
}
