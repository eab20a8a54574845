//! Billing Totals Report
//!
//! Roster-wide totals: client count, last recorded consumption, last bills
//! and every bill ever generated.

use std::collections::HashSet;
use std::io::Write;

use serde::Serialize;

use crate::error::{WattbookError, WattbookResult};
use crate::models::{Bill, Client};
use crate::storage::Storage;

/// Billing Totals Report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingTotalsReport {
    pub client_count: usize,
    /// Sum of every client's last recorded consumption
    pub total_consumption: f64,
    /// Sum of every client's last bill
    pub total_last_bills: f64,
    pub bill_count: usize,
    /// Sum of every stored bill's amount
    pub total_billed: f64,
    pub unpaid_count: usize,
    pub unpaid_amount: f64,
    /// Bills whose client no longer exists
    pub dangling_count: usize,
}

impl BillingTotalsReport {
    /// Generate the report from the current stores
    pub fn generate(storage: &Storage) -> WattbookResult<Self> {
        let clients = storage.clients.list()?;
        let bills = storage.bills.list()?;
        Ok(Self::from_records(&clients, &bills))
    }

    /// Aggregate already loaded records
    pub fn from_records(clients: &[Client], bills: &[Bill]) -> Self {
        let client_ids: HashSet<_> = clients.iter().map(|c| c.id).collect();
        let unpaid = bills.iter().filter(|b| !b.paid);

        Self {
            client_count: clients.len(),
            total_consumption: clients.iter().map(|c| c.consumption).sum(),
            total_last_bills: clients.iter().map(|c| c.last_bill).sum(),
            bill_count: bills.len(),
            total_billed: bills.iter().map(|b| b.amount).sum(),
            unpaid_count: unpaid.clone().count(),
            unpaid_amount: unpaid.map(|b| b.amount).sum(),
            dangling_count: bills
                .iter()
                .filter(|b| !client_ids.contains(&b.client_id))
                .count(),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Billing Totals\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');

        output.push_str(&format!("Clients:            {:>15}\n", self.client_count));
        output.push_str(&format!(
            "Total consumption:  {:>15.2}\n",
            self.total_consumption
        ));
        output.push_str(&format!(
            "Total last bills:   {:>15.2}\n",
            self.total_last_bills
        ));
        output.push_str(&"-".repeat(40));
        output.push('\n');
        output.push_str(&format!("Bills:              {:>15}\n", self.bill_count));
        output.push_str(&format!("Total billed:       {:>15.2}\n", self.total_billed));
        output.push_str(&format!(
            "Unpaid:             {:>15.2} ({} bills)\n",
            self.unpaid_amount, self.unpaid_count
        ));

        if self.dangling_count > 0 {
            output.push_str(&format!(
                "\n{} bill(s) reference deleted clients\n",
                self.dangling_count
            ));
        }

        output
    }

    /// Export the report as metric,value CSV rows
    pub fn export_csv<W: Write>(&self, writer: W) -> WattbookResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| WattbookError::Export(e.to_string());

        csv_writer.write_record(["metric", "value"]).map_err(export_err)?;
        let rows = [
            ("client_count", self.client_count.to_string()),
            ("total_consumption", format!("{:.2}", self.total_consumption)),
            ("total_last_bills", format!("{:.2}", self.total_last_bills)),
            ("bill_count", self.bill_count.to_string()),
            ("total_billed", format!("{:.2}", self.total_billed)),
            ("unpaid_count", self.unpaid_count.to_string()),
            ("unpaid_amount", format!("{:.2}", self.unpaid_amount)),
            ("dangling_count", self.dangling_count.to_string()),
        ];
        for (metric, value) in rows {
            csv_writer
                .write_record([metric, value.as_str()])
                .map_err(export_err)?;
        }

        csv_writer
            .flush()
            .map_err(|e| WattbookError::Export(e.to_string()))
    }
}
