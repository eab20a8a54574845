//! Core data models for WattBook
//!
//! Clients, bills, their typed ids and the bounded text used by the
//! fixed-width record fields.

pub mod bill;
pub mod client;
pub mod ids;
pub mod text;

pub use bill::{Bill, BillValidationError, DueDate, MIN_DUE_DATE_LEN};
pub use client::{Client, ClientAddress, ClientName, ClientPhone, ClientValidationError};
pub use ids::{BillId, ClientId};
pub use text::{FixedText, TextError};
