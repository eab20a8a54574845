//! Report CLI commands

use std::io;

use crate::error::WattbookResult;
use crate::reports::BillingTotalsReport;
use crate::storage::Storage;

/// Print the billing totals, as a table or as CSV
pub fn handle_report_command(storage: &Storage, csv: bool) -> WattbookResult<()> {
    let report = BillingTotalsReport::generate(storage)?;

    if csv {
        report.export_csv(io::stdout().lock())
    } else {
        print!("{}", report.format_terminal());
        Ok(())
    }
}
