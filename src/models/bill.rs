//! Bill model
//!
//! A bill snapshots a client's consumption and rate at generation time.
//! Only the paid flag changes afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::client::check_quantity;
use super::ids::{BillId, ClientId};
use super::text::FixedText;

/// Due date text, 16-byte field
pub type DueDate = FixedText<16>;

/// Shortest accepted due date, e.g. "20240115"
pub const MIN_DUE_DATE_LEN: usize = 8;

/// A billing event for one client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,

    /// The billed client. Not re-checked after generation, so it may dangle
    /// once the client is deleted.
    pub client_id: ClientId,

    pub consumption: f64,

    pub rate: f64,

    /// `consumption * rate`, fixed at generation
    pub amount: f64,

    /// Free-form due date text
    pub due_date: DueDate,

    pub paid: bool,
}

impl Bill {
    /// Create an unpaid bill, computing its amount
    pub fn new(
        id: BillId,
        client_id: ClientId,
        consumption: f64,
        rate: f64,
        due_date: DueDate,
    ) -> Self {
        Self {
            id,
            client_id,
            consumption,
            rate,
            amount: consumption * rate,
            due_date,
            paid: false,
        }
    }

    /// Mark as paid. There is no way back to unpaid.
    pub fn mark_paid(&mut self) {
        self.paid = true;
    }

    /// Validate the bill
    pub fn validate(&self) -> Result<(), BillValidationError> {
        check_quantity(self.consumption).map_err(BillValidationError::InvalidConsumption)?;
        check_quantity(self.rate).map_err(BillValidationError::InvalidRate)?;
        check_quantity(self.amount).map_err(BillValidationError::InvalidAmount)?;
        // The minimum counts characters; the 15-byte field limit counts bytes
        let chars = self.due_date.char_count();
        if chars < MIN_DUE_DATE_LEN {
            return Err(BillValidationError::DueDateTooShort(chars));
        }
        Ok(())
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bill #{} for client #{}: {:.2} due {}",
            self.id, self.client_id, self.amount, self.due_date
        )
    }
}

/// Validation errors for bills
#[derive(Debug, Clone, PartialEq)]
pub enum BillValidationError {
    InvalidConsumption(f64),
    InvalidRate(f64),
    InvalidAmount(f64),
    DueDateTooShort(usize),
}

impl fmt::Display for BillValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConsumption(v) => {
                write!(f, "Consumption must be a non-negative number (got {})", v)
            }
            Self::InvalidRate(v) => write!(f, "Rate must be a non-negative number (got {})", v),
            Self::InvalidAmount(v) => {
                write!(f, "Bill amount must be a finite number (got {})", v)
            }
            Self::DueDateTooShort(len) => write!(
                f,
                "Due date too short ({} chars, min {})",
                len, MIN_DUE_DATE_LEN
            ),
        }
    }
}

impl std::error::Error for BillValidationError {}
