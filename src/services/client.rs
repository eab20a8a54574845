//! Client service
//!
//! Client management on top of the client repository, with every mutation
//! recorded in the audit log.

use std::fmt;
use std::str::FromStr;

use crate::audit::{AuditEvent, Usage};
use crate::error::{WattbookError, WattbookResult};
use crate::models::{Client, ClientId};
use crate::storage::Storage;

/// Orders the client store can be rewritten in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOrder {
    /// Ascending consumption, ties by ascending id
    Consumption,
    /// Ascending id
    Id,
}

impl fmt::Display for ClientOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientOrder::Consumption => write!(f, "consumption"),
            ClientOrder::Id => write!(f, "id"),
        }
    }
}

impl FromStr for ClientOrder {
    type Err = WattbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consumption" | "1" => Ok(ClientOrder::Consumption),
            "id" | "2" => Ok(ClientOrder::Id),
            other => Err(WattbookError::Validation(format!(
                "Unknown sort order '{}'; expected consumption or id",
                other
            ))),
        }
    }
}

/// Service for client management
pub struct ClientService<'a> {
    storage: &'a Storage,
}

impl<'a> ClientService<'a> {
    /// Create a new client service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new client
    pub fn add(
        &self,
        name: &str,
        address: &str,
        phone: &str,
        consumption: f64,
        rate: f64,
        last_bill: f64,
    ) -> WattbookResult<Client> {
        let client = self
            .storage
            .clients
            .add(name, address, phone, consumption, rate, last_bill)?;

        self.storage.record(AuditEvent::ClientAdded {
            client: client.clone(),
        })?;

        Ok(client)
    }

    /// Replace a client's consumption and rate
    pub fn update(&self, id: ClientId, consumption: f64, rate: f64) -> WattbookResult<Client> {
        let change = self.storage.clients.update(id, consumption, rate)?;

        self.storage.record(AuditEvent::UsageChanged {
            client_id: change.after.id,
            name: change.after.name.to_string(),
            before: Usage::of(&change.before),
            after: Usage::of(&change.after),
        })?;

        Ok(change.after)
    }

    /// Delete a client; its bills are kept
    pub fn delete(&self, id: ClientId) -> WattbookResult<Client> {
        let removed = self.storage.clients.delete(id)?;

        self.storage.record(AuditEvent::ClientDeleted {
            client: removed.clone(),
        })?;

        Ok(removed)
    }

    /// Get a client by ID
    pub fn get(&self, id: ClientId) -> WattbookResult<Option<Client>> {
        self.storage.clients.find_by_id(id)
    }

    /// Get a client by ID, failing if it doesn't exist
    pub fn require(&self, id: ClientId) -> WattbookResult<Client> {
        self.get(id)?
            .ok_or_else(|| WattbookError::client_not_found(id.to_string()))
    }

    /// Get the first client with exactly this name
    pub fn get_by_name(&self, name: &str) -> WattbookResult<Option<Client>> {
        self.storage.clients.find_by_name(name)
    }

    /// Find a client by ID string or exact name
    pub fn find(&self, identifier: &str) -> WattbookResult<Option<Client>> {
        if let Ok(id) = identifier.parse::<ClientId>() {
            if let Some(client) = self.get(id)? {
                return Ok(Some(client));
            }
        }

        self.get_by_name(identifier.trim())
    }

    /// Get all clients in stored order
    pub fn list(&self) -> WattbookResult<Vec<Client>> {
        self.storage.clients.list()
    }

    /// Rewrite the store in the given order, returning the new order
    pub fn sort(&self, order: ClientOrder) -> WattbookResult<Vec<Client>> {
        let clients = match order {
            ClientOrder::Consumption => self.storage.clients.sort_by_consumption()?,
            ClientOrder::Id => self.storage.clients.sort_by_id()?,
        };

        self.storage.record(AuditEvent::ClientsSorted {
            order: order.to_string(),
            count: clients.len(),
        })?;

        Ok(clients)
    }
}
