//! Billing service
//!
//! Bill generation and payment tracking, audited.

use crate::audit::AuditEvent;
use crate::error::{WattbookError, WattbookResult};
use crate::models::{Bill, BillId, ClientId};
use crate::storage::{GeneratedBill, Storage};

/// Service for billing
pub struct BillingService<'a> {
    storage: &'a Storage,
}

impl<'a> BillingService<'a> {
    /// Create a new billing service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Generate a bill and update the billed client
    pub fn generate(
        &self,
        client_id: ClientId,
        consumption: f64,
        rate: f64,
        due_date: &str,
    ) -> WattbookResult<GeneratedBill> {
        let generated =
            self.storage
                .bills
                .generate(&self.storage.clients, client_id, consumption, rate, due_date)?;

        self.storage.record(AuditEvent::BillGenerated {
            bill: generated.bill.clone(),
            client_name: generated.client_after.name.to_string(),
            previous_last_bill: generated.client_before.last_bill,
        })?;

        Ok(generated)
    }

    /// Mark a bill as paid; only the first payment is recorded
    pub fn mark_paid(&self, id: BillId) -> WattbookResult<Bill> {
        let paid = self.storage.bills.mark_paid(id)?;

        if paid.newly_paid {
            self.storage.record(AuditEvent::BillPaid {
                bill_id: paid.bill.id,
                client_id: paid.bill.client_id,
                amount: paid.bill.amount,
            })?;
        }

        Ok(paid.bill)
    }

    /// Get a bill by ID
    pub fn get(&self, id: BillId) -> WattbookResult<Option<Bill>> {
        self.storage.bills.find_by_id(id)
    }

    /// Get a bill by ID, failing if it doesn't exist
    pub fn require(&self, id: BillId) -> WattbookResult<Bill> {
        self.get(id)?
            .ok_or_else(|| WattbookError::bill_not_found(id.to_string()))
    }

    /// Get all bills, or only those of one client
    pub fn list(&self, client_id: Option<ClientId>) -> WattbookResult<Vec<Bill>> {
        match client_id {
            Some(client_id) => self.storage.bills.list_for_client(client_id),
            None => self.storage.bills.list(),
        }
    }
}
