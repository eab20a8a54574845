//! Bill CLI commands

use clap::Subcommand;

use crate::display::bill::{format_bill_details, format_bill_list};
use crate::error::WattbookResult;
use crate::models::{BillId, ClientId};
use crate::services::BillingService;
use crate::storage::Storage;

/// Bill subcommands
#[derive(Subcommand)]
pub enum BillCommands {
    /// Generate a bill and record it on the client
    Generate {
        /// Client ID
        client: ClientId,
        /// Consumption in kWh
        #[arg(allow_negative_numbers = true)]
        consumption: f64,
        /// Price per kWh
        #[arg(allow_negative_numbers = true)]
        rate: f64,
        /// Due date, 8 to 15 characters (e.g. 2024-01-15)
        #[arg(short, long)]
        due: String,
    },
    /// Mark a bill as paid
    Pay {
        /// Bill ID
        id: BillId,
    },
    /// Show a bill
    Show {
        /// Bill ID
        id: BillId,
    },
    /// List bills
    List {
        /// Only bills for this client
        #[arg(short, long)]
        client: Option<ClientId>,
    },
}

/// Handle a bill command
pub fn handle_bill_command(storage: &Storage, cmd: BillCommands) -> WattbookResult<()> {
    let service = BillingService::new(storage);

    match cmd {
        BillCommands::Generate {
            client,
            consumption,
            rate,
            due,
        } => {
            let generated = service.generate(client, consumption, rate, &due)?;
            println!(
                "Generated bill #{} for {}",
                generated.bill.id, generated.client_after
            );
            println!("  Amount: {:.2}", generated.bill.amount);
            println!("  Due: {}", generated.bill.due_date);
        }

        BillCommands::Pay { id } => {
            let bill = service.mark_paid(id)?;
            println!("Bill #{} marked as paid ({:.2}).", bill.id, bill.amount);
        }

        BillCommands::Show { id } => {
            let bill = service.require(id)?;
            print!("{}", format_bill_details(&bill));
        }

        BillCommands::List { client } => {
            print!("{}", format_bill_list(&service.list(client)?));
        }
    }

    Ok(())
}
