//! Client model
//!
//! One record per customer account on the utility's roster.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::bill::Bill;
use super::ids::ClientId;
use super::text::FixedText;

/// Client name, 50-byte field
pub type ClientName = FixedText<50>;
/// Service address, 100-byte field
pub type ClientAddress = FixedText<100>;
/// Contact phone, 20-byte field
pub type ClientPhone = FixedText<20>;

/// A customer account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier, allocated as max + 1
    pub id: ClientId,

    pub name: ClientName,

    pub address: ClientAddress,

    pub phone: ClientPhone,

    /// Most recently recorded usage in kWh
    pub consumption: f64,

    /// Per-kWh price currently in effect
    pub rate: f64,

    /// Amount of the most recently generated bill (0 if none)
    pub last_bill: f64,
}

impl Client {
    /// Create a client record
    pub fn new(
        id: ClientId,
        name: ClientName,
        address: ClientAddress,
        phone: ClientPhone,
        consumption: f64,
        rate: f64,
        last_bill: f64,
    ) -> Self {
        Self {
            id,
            name,
            address,
            phone,
            consumption,
            rate,
            last_bill,
        }
    }

    /// Replace the metered values
    pub fn set_usage(&mut self, consumption: f64, rate: f64) {
        self.consumption = consumption;
        self.rate = rate;
    }

    /// Carry a freshly generated bill's figures onto this client
    pub fn apply_bill(&mut self, bill: &Bill) {
        self.consumption = bill.consumption;
        self.rate = bill.rate;
        self.last_bill = bill.amount;
    }

    /// Validate the client
    pub fn validate(&self) -> Result<(), ClientValidationError> {
        if self.name.as_str().trim().is_empty() {
            return Err(ClientValidationError::EmptyName);
        }
        if self.address.as_str().trim().is_empty() {
            return Err(ClientValidationError::EmptyAddress);
        }
        if self.phone.as_str().trim().is_empty() {
            return Err(ClientValidationError::EmptyPhone);
        }
        Self::validate_usage(self.consumption, self.rate)?;
        check_quantity(self.last_bill).map_err(ClientValidationError::InvalidLastBill)?;
        Ok(())
    }

    /// Check a consumption/rate pair before it is applied to any client
    pub fn validate_usage(consumption: f64, rate: f64) -> Result<(), ClientValidationError> {
        check_quantity(consumption).map_err(ClientValidationError::InvalidConsumption)?;
        check_quantity(rate).map_err(ClientValidationError::InvalidRate)
    }
}

/// Metered quantities and money amounts must be finite and not negative
pub(crate) fn check_quantity(value: f64) -> Result<(), f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(value)
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}

/// Validation errors for clients
#[derive(Debug, Clone, PartialEq)]
pub enum ClientValidationError {
    EmptyName,
    EmptyAddress,
    EmptyPhone,
    InvalidConsumption(f64),
    InvalidRate(f64),
    InvalidLastBill(f64),
}

impl fmt::Display for ClientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Client name cannot be empty"),
            Self::EmptyAddress => write!(f, "Client address cannot be empty"),
            Self::EmptyPhone => write!(f, "Client phone cannot be empty"),
            Self::InvalidConsumption(v) => {
                write!(f, "Consumption must be a non-negative number (got {})", v)
            }
            Self::InvalidRate(v) => write!(f, "Rate must be a non-negative number (got {})", v),
            Self::InvalidLastBill(v) => {
                write!(f, "Last bill must be a non-negative number (got {})", v)
            }
        }
    }
}

impl std::error::Error for ClientValidationError {}
