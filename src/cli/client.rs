//! Client CLI commands
//!
//! Implements CLI commands for client management.

use clap::{Subcommand, ValueEnum};

use crate::display::client::{format_client_details, format_client_list};
use crate::error::{WattbookError, WattbookResult};
use crate::models::ClientId;
use crate::services::{ClientOrder, ClientService};
use crate::storage::Storage;

/// Sort orders accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortBy {
    /// Ascending consumption, ties by id
    Consumption,
    /// Ascending id
    Id,
}

impl From<SortBy> for ClientOrder {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Consumption => ClientOrder::Consumption,
            SortBy::Id => ClientOrder::Id,
        }
    }
}

/// Client subcommands
#[derive(Subcommand)]
pub enum ClientCommands {
    /// Add a new client
    Add {
        /// Client name
        name: String,
        /// Service address
        address: String,
        /// Contact phone
        phone: String,
        /// Current consumption in kWh
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        consumption: f64,
        /// Price per kWh
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        rate: f64,
        /// Amount of the last bill
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        last_bill: f64,
    },
    /// Replace a client's consumption and rate
    Update {
        /// Client ID
        id: ClientId,
        /// New consumption in kWh
        #[arg(allow_negative_numbers = true)]
        consumption: f64,
        /// New price per kWh
        #[arg(allow_negative_numbers = true)]
        rate: f64,
    },
    /// Delete a client (its bills are kept)
    Delete {
        /// Client ID
        id: ClientId,
    },
    /// Show a client by ID or exact name
    Show {
        /// Client ID or name
        client: String,
    },
    /// Find the first client with exactly this name
    Find {
        /// Client name (case-sensitive)
        name: String,
    },
    /// List all clients in stored order
    List,
    /// Rewrite the client store in a new order
    Sort {
        /// Sort key
        #[arg(value_enum, default_value = "id")]
        by: SortBy,
    },
}

/// Handle a client command
pub fn handle_client_command(storage: &Storage, cmd: ClientCommands) -> WattbookResult<()> {
    let service = ClientService::new(storage);

    match cmd {
        ClientCommands::Add {
            name,
            address,
            phone,
            consumption,
            rate,
            last_bill,
        } => {
            let client = service.add(&name, &address, &phone, consumption, rate, last_bill)?;
            println!("Created client: {}", client.name);
            println!("  ID: {}", client.id);
        }

        ClientCommands::Update {
            id,
            consumption,
            rate,
        } => {
            let client = service.update(id, consumption, rate)?;
            println!("Updated client: {}", client);
            println!("  Consumption: {:.2} kWh", client.consumption);
            println!("  Rate: {:.4}", client.rate);
        }

        ClientCommands::Delete { id } => {
            let removed = service.delete(id)?;
            println!("Deleted client: {}", removed);
        }

        ClientCommands::Show { client } => {
            let found = service
                .find(&client)?
                .ok_or_else(|| WattbookError::client_not_found(&client))?;
            print!("{}", format_client_details(&found));
        }

        ClientCommands::Find { name } => {
            let found = service
                .get_by_name(&name)?
                .ok_or_else(|| WattbookError::client_not_found(&name))?;
            print!("{}", format_client_details(&found));
        }

        ClientCommands::List => {
            print!("{}", format_client_list(&service.list()?));
        }

        ClientCommands::Sort { by } => {
            let order = ClientOrder::from(by);
            let clients = service.sort(order)?;
            println!("Sorted {} clients by {}.", clients.len(), order);
            print!("{}", format_client_list(&clients));
        }
    }

    Ok(())
}
