//! Audit log records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Bill, BillId, Client, ClientId};

/// Metered values of a client at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub consumption: f64,
    pub rate: f64,
}

impl Usage {
    pub fn of(client: &Client) -> Self {
        Self {
            consumption: client.consumption,
            rate: client.rate,
        }
    }
}

/// A change to the client or bill store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEvent {
    ClientAdded {
        client: Client,
    },
    /// Consumption and rate replaced by hand
    UsageChanged {
        client_id: ClientId,
        name: String,
        before: Usage,
        after: Usage,
    },
    /// The full record is kept since nothing else remembers it
    ClientDeleted {
        client: Client,
    },
    ClientsSorted {
        order: String,
        count: usize,
    },
    /// A bill was raised; the client's usage and last bill now match it
    BillGenerated {
        bill: Bill,
        client_name: String,
        previous_last_bill: f64,
    },
    BillPaid {
        bill_id: BillId,
        client_id: ClientId,
        amount: f64,
    },
}

impl fmt::Display for AuditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEvent::ClientAdded { client } => write!(
                f,
                "client #{} added: {}, {:.2} kWh at {:.4}",
                client.id, client.name, client.consumption, client.rate
            ),
            AuditEvent::UsageChanged {
                client_id,
                name,
                before,
                after,
            } => {
                write!(f, "client #{} ({}) usage", client_id, name)?;
                let mut changed = false;
                if before.consumption != after.consumption {
                    write!(
                        f,
                        " consumption {:.2} -> {:.2}",
                        before.consumption, after.consumption
                    )?;
                    changed = true;
                }
                if before.rate != after.rate {
                    write!(f, " rate {:.4} -> {:.4}", before.rate, after.rate)?;
                    changed = true;
                }
                if !changed {
                    write!(f, " rewritten unchanged")?;
                }
                Ok(())
            }
            AuditEvent::ClientDeleted { client } => {
                write!(f, "client #{} deleted: {}", client.id, client.name)
            }
            AuditEvent::ClientsSorted { order, count } => {
                write!(f, "{} clients sorted by {}", count, order)
            }
            AuditEvent::BillGenerated {
                bill,
                client_name,
                previous_last_bill,
            } => write!(
                f,
                "bill #{} generated for client #{} ({}): {:.2} due {} (last bill was {:.2})",
                bill.id, bill.client_id, client_name, bill.amount, bill.due_date, previous_last_bill
            ),
            AuditEvent::BillPaid {
                bill_id,
                client_id,
                amount,
            } => write!(
                f,
                "bill #{} for client #{} paid: {:.2}",
                bill_id, client_id, amount
            ),
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event: AuditEvent,
}

impl AuditEntry {
    /// Stamp an event with the current time
    pub fn new(event: AuditEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.event
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientAddress, ClientName, ClientPhone, DueDate};

    fn ada() -> Client {
        Client::new(
            ClientId::new(3),
            ClientName::new("Ada").unwrap(),
            ClientAddress::new("1 Grid Rd").unwrap(),
            ClientPhone::new("555").unwrap(),
            120.0,
            0.15,
            0.0,
        )
    }

    #[test]
    fn test_usage_change_lists_only_changed_values() {
        let event = AuditEvent::UsageChanged {
            client_id: ClientId::new(3),
            name: "Ada".into(),
            before: Usage { consumption: 100.0, rate: 0.15 },
            after: Usage { consumption: 120.0, rate: 0.15 },
        };
        assert_eq!(event.to_string(), "client #3 (Ada) usage consumption 100.00 -> 120.00");
    }

    #[test]
    fn test_bill_generated_text() {
        let bill = Bill::new(
            BillId::new(9),
            ClientId::new(3),
            120.0,
            0.15,
            DueDate::new("2024-01-15").unwrap(),
        );
        let event = AuditEvent::BillGenerated {
            bill,
            client_name: "Ada".into(),
            previous_last_bill: 12.5,
        };
        assert_eq!(
            event.to_string(),
            "bill #9 generated for client #3 (Ada): 18.00 due 2024-01-15 (last bill was 12.50)"
        );
    }

    #[test]
    fn test_json_is_tagged_by_kind() {
        let entry = AuditEntry::new(AuditEvent::BillPaid {
            bill_id: BillId::new(9),
            client_id: ClientId::new(3),
            amount: 18.0,
        });

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"kind\":\"bill_paid\""));
        assert!(json.contains("\"bill_id\":9"));
        let parsed: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_deleted_client_survives_json() {
        let entry = AuditEntry::new(AuditEvent::ClientDeleted { client: ada() });
        let parsed: AuditEntry = serde_json::from_str(&serde_json::to_string(&entry).unwrap()).unwrap();
        assert_eq!(parsed.event, AuditEvent::ClientDeleted { client: ada() });
        assert!(parsed.to_string().ends_with("client #3 deleted: Ada"));
    }
}
