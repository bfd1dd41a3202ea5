//! Clean a grammar question dataset grouped by case.
//!
//! Questions repeated inside a case group are removed completely and the
//! survivors get sequential ids (`N_0`, `A_0`, `G_0`, `D_0`, ...).

use std::path::Path;

use log::info;

pub mod cases;
pub mod errors;
pub mod filter;
pub mod report;
pub mod store;

pub use cases::Case;
pub use errors::{FilterError, Result};
pub use filter::{filter_group, process, Document, GroupOutcome};
pub use report::{DroppedQuestion, FilterReport, GroupReport};
pub use store::OutputLayout;

/// Read `input`, filter all four groups and write the result to `output`.
///
/// Nothing is written when `output` is `None` or when any group fails.
pub fn filter_file(input: &Path, output: Option<&Path>, layout: OutputLayout) -> Result<FilterReport> {
    let document = store::read_document(input)?;
    info!("Loaded {}", input.display());

    let (document, report) = process(document)?;

    if let Some(path) = output {
        store::write_document(path, &document, layout)?;
        info!(
            "Wrote {} entries ({} dropped) to {}",
            report.total_kept(),
            report.total_dropped(),
            path.display()
        );
    }
    Ok(report)
}
