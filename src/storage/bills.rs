//! Bill repository for binary record storage
//!
//! Manages loading and saving bills to billing.dat, and the one operation
//! that writes both store files: bill generation.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{WattbookError, WattbookResult};
use crate::models::{Bill, BillId, Client, ClientId, DueDate};

use super::clients::ClientRepository;
use super::record_store::RecordStore;

/// Repository for bill persistence
#[derive(Debug)]
pub struct BillRepository {
    store: RecordStore<Bill>,
}

/// Result of marking a bill paid
#[derive(Debug, Clone)]
pub struct PaidBill {
    pub bill: Bill,
    /// False when the bill was already paid and nothing was written
    pub newly_paid: bool,
}

/// A generated bill together with the client record it updated
#[derive(Debug, Clone)]
pub struct GeneratedBill {
    pub bill: Bill,
    /// The client before the bill's figures were applied
    pub client_before: Client,
    /// The client as now stored
    pub client_after: Client,
}

impl BillRepository {
    /// Create a new bill repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: RecordStore::new(path),
        }
    }

    pub(crate) fn store(&self) -> &RecordStore<Bill> {
        &self.store
    }

    /// Every bill, in stored order
    pub fn list(&self) -> WattbookResult<Vec<Bill>> {
        self.store.load()
    }

    /// Bills raised against one client
    pub fn list_for_client(&self, client_id: ClientId) -> WattbookResult<Vec<Bill>> {
        Ok(self
            .store
            .load()?
            .into_iter()
            .filter(|b| b.client_id == client_id)
            .collect())
    }

    /// Count bills
    pub fn count(&self) -> WattbookResult<usize> {
        Ok(self.store.load()?.len())
    }

    /// Get a bill by ID
    pub fn find_by_id(&self, id: BillId) -> WattbookResult<Option<Bill>> {
        Ok(self.store.load()?.into_iter().find(|b| b.id == id))
    }

    /// The id the next generated bill will receive
    pub fn next_id(records: &[Bill]) -> WattbookResult<BillId> {
        BillId::next_after(records.iter().map(|b| b.id))
            .ok_or_else(|| WattbookError::Storage("Bill id space exhausted".into()))
    }

    /// Generate a bill for a client and record its figures on the client
    ///
    /// Both store files are written to temp files first and renamed into
    /// place only once both writes succeeded, so a failed write leaves
    /// neither file changed.
    pub fn generate(
        &self,
        clients: &ClientRepository,
        client_id: ClientId,
        consumption: f64,
        rate: f64,
        due_date: &str,
    ) -> WattbookResult<GeneratedBill> {
        let due_date = DueDate::new(due_date.trim())
            .map_err(|e| WattbookError::Validation(format!("Due date: {}", e)))?;
        let mut bill = Bill::new(BillId::new(0), client_id, consumption, rate, due_date);
        bill.validate()
            .map_err(|e| WattbookError::Validation(e.to_string()))?;

        let mut client_records = clients.store().load()?;
        let client = client_records
            .iter_mut()
            .find(|c| c.id == client_id)
            .ok_or_else(|| WattbookError::client_not_found(client_id.to_string()))?;

        let mut bills = self.store.load()?;
        bill.id = Self::next_id(&bills)?;

        let client_before = client.clone();
        client.apply_bill(&bill);
        let client_after = client.clone();
        bills.push(bill.clone());

        let staged_bills = self.store.stage(&bills)?;
        let staged_clients = clients.store().stage(&client_records)?;

        staged_bills.commit()?;
        if let Err(e) = staged_clients.commit() {
            warn!(bill_id = %bill.id, client_id = %client_id, error = %e,
                "bill saved but client update failed; stores are out of step");
            return Err(e);
        }

        info!(bill_id = %bill.id, client_id = %client_id, amount = bill.amount, "bill generated");
        Ok(GeneratedBill {
            bill,
            client_before,
            client_after,
        })
    }

    /// Mark a bill as paid; marking an already-paid bill again is not an error
    pub fn mark_paid(&self, id: BillId) -> WattbookResult<PaidBill> {
        let mut bills = self.store.load()?;
        let bill = bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| WattbookError::bill_not_found(id.to_string()))?;

        if bill.paid {
            return Ok(PaidBill {
                bill: bill.clone(),
                newly_paid: false,
            });
        }

        bill.mark_paid();
        let updated = bill.clone();
        self.store.save(&bills)?;

        info!(bill_id = %id, "bill marked paid");
        Ok(PaidBill {
            bill: updated,
            newly_paid: true,
        })
    }
}
