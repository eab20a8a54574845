//! Interactive menu
//!
//! Runs when `wattbook` is started without a subcommand. Reads one answer
//! per line from `input` and writes prompts and results to `output`. A
//! failed operation prints its error and returns to the menu it came from.
//! `0` at the top menu, or end of input anywhere, ends the session.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use crate::backup::{BackupManager, BackupReport, RestoreManager};
use crate::display::{format_bill_list, format_client_details, format_client_list};
use crate::error::{WattbookError, WattbookResult};
use crate::models::{BillId, ClientId};
use crate::reports::BillingTotalsReport;
use crate::services::{BillingService, ClientOrder, ClientService};
use crate::storage::Storage;

const MAIN_MENU: &str = "\n=== WattBook ===
1. Client management
2. Billing
3. Backup data
4. Restore data
5. Reports
0. Exit";

const CLIENT_MENU: &str = "\n--- Client Menu ---
1. Add client
2. Update client
3. Delete client
4. Search client
5. Display all clients
6. Sort clients
0. Back";

const BILLING_MENU: &str = "\n--- Billing Menu ---
1. Generate bill
2. Mark bill as paid
3. Display all bills
0. Back";

/// Why a menu step stopped early
enum Interrupt {
    /// Input ran out
    Eof,
    /// The operation failed; report it and carry on
    Failed(WattbookError),
    /// Writing to the terminal failed
    Output(io::Error),
}

impl From<WattbookError> for Interrupt {
    fn from(err: WattbookError) -> Self {
        Interrupt::Failed(err)
    }
}

type Step<T = ()> = Result<T, Interrupt>;

/// Run the menu until the operator exits or input ends
pub fn run_menu<R: BufRead, W: Write>(storage: &Storage, input: R, output: W) -> WattbookResult<()> {
    Menu {
        storage,
        input,
        output,
    }
    .run()
}

struct Menu<'a, R, W> {
    storage: &'a Storage,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    fn run(mut self) -> WattbookResult<()> {
        loop {
            let step = self.main_step();
            let interrupt = match step {
                Ok(true) => continue,
                Ok(false) => return Ok(()),
                Err(interrupt) => interrupt,
            };
            match self.recover(interrupt) {
                Ok(()) => {}
                Err(Interrupt::Eof) => return Ok(()),
                Err(Interrupt::Output(e)) => return Err(e.into()),
                Err(Interrupt::Failed(e)) => return Err(e),
            }
        }
    }

    /// Returns false once the operator chose to exit
    fn main_step(&mut self) -> Step<bool> {
        self.say(MAIN_MENU)?;
        match self.prompt("Choice: ")?.as_str() {
            "1" => self.client_menu()?,
            "2" => self.billing_menu()?,
            "3" => {
                let report = BackupManager::new(self.storage.paths().clone()).backup();
                self.report_copy(&report, "Nothing to back up.")?
            }
            "4" => {
                let report = RestoreManager::new(self.storage.paths().clone()).restore();
                self.report_copy(&report, "Nothing to restore.")?
            }
            "5" => {
                let report = BillingTotalsReport::generate(self.storage)?;
                self.say(report.format_terminal().trim_end())?
            }
            "0" => return Ok(false),
            _ => self.say("Invalid choice.")?,
        }
        Ok(true)
    }

    fn client_menu(&mut self) -> Step {
        loop {
            self.say(CLIENT_MENU)?;
            let choice = self.prompt("Choice: ")?;
            let result = match choice.as_str() {
                "1" => self.add_client(),
                "2" => self.update_client(),
                "3" => self.delete_client(),
                "4" => self.search_client(),
                "5" => self.display_clients(),
                "6" => self.sort_clients(),
                "0" => return Ok(()),
                _ => self.say("Invalid choice."),
            };
            if let Err(interrupt) = result {
                self.recover(interrupt)?;
            }
        }
    }

    fn billing_menu(&mut self) -> Step {
        loop {
            self.say(BILLING_MENU)?;
            let choice = self.prompt("Choice: ")?;
            let result = match choice.as_str() {
                "1" => self.generate_bill(),
                "2" => self.mark_paid(),
                "3" => self.display_bills(),
                "0" => return Ok(()),
                _ => self.say("Invalid choice."),
            };
            if let Err(interrupt) = result {
                self.recover(interrupt)?;
            }
        }
    }

    fn add_client(&mut self) -> Step {
        let name = self.prompt("Enter client name: ")?;
        let address = self.prompt("Enter address: ")?;
        let phone = self.prompt("Enter phone: ")?;
        let consumption: f64 = self.prompt_parsed("Enter consumption (kWh): ", "consumption")?;
        let rate: f64 = self.prompt_parsed("Enter rate per kWh: ", "rate")?;
        let last_bill: f64 = self.prompt_parsed("Enter last bill amount: ", "last bill")?;

        let client = ClientService::new(self.storage)
            .add(&name, &address, &phone, consumption, rate, last_bill)?;
        self.say(&format!("Client added with ID {}.", client.id))
    }

    fn update_client(&mut self) -> Step {
        let service = ClientService::new(self.storage);
        let id: ClientId = self.prompt_parsed("Enter client ID to update: ", "client ID")?;
        let current = service.require(id)?;

        let consumption: f64 = self.prompt_parsed(
            &format!(
                "Current consumption: {:.2}. Enter new consumption: ",
                current.consumption
            ),
            "consumption",
        )?;
        let rate: f64 = self.prompt_parsed(
            &format!("Current rate: {:.4}. Enter new rate: ", current.rate),
            "rate",
        )?;

        service.update(id, consumption, rate)?;
        self.say("Client updated.")
    }

    fn delete_client(&mut self) -> Step {
        let id: ClientId = self.prompt_parsed("Enter client ID to delete: ", "client ID")?;
        let removed = ClientService::new(self.storage).delete(id)?;
        self.say(&format!("Client deleted: {}", removed))
    }

    fn search_client(&mut self) -> Step {
        let service = ClientService::new(self.storage);
        let client = match self.prompt("Search by: 1) ID 2) Name: ")?.as_str() {
            "1" => {
                let id: ClientId = self.prompt_parsed("Enter ID: ", "client ID")?;
                service.require(id)?
            }
            "2" => {
                let name = self.prompt("Enter name: ")?;
                service
                    .get_by_name(&name)?
                    .ok_or_else(|| WattbookError::client_not_found(name))?
            }
            _ => return self.say("Invalid option."),
        };
        self.say(format_client_details(&client).trim_end())
    }

    fn display_clients(&mut self) -> Step {
        let clients = ClientService::new(self.storage).list()?;
        self.say(format_client_list(&clients).trim_end())
    }

    fn sort_clients(&mut self) -> Step {
        let order: ClientOrder = self.prompt_parsed("Sort by: 1) Consumption 2) ID: ", "sort order")?;
        let clients = ClientService::new(self.storage).sort(order)?;
        self.say(&format!("{} clients sorted by {} and saved.", clients.len(), order))
    }

    fn generate_bill(&mut self) -> Step {
        let client_id: ClientId = self.prompt_parsed("Enter client ID: ", "client ID")?;
        // Fail before asking for the rest when the client is unknown
        ClientService::new(self.storage).require(client_id)?;

        let consumption: f64 =
            self.prompt_parsed("Enter consumption (kWh) for this bill: ", "consumption")?;
        let rate: f64 = self.prompt_parsed("Enter rate per kWh: ", "rate")?;
        let due_date = self.prompt("Enter due date (YYYY-MM-DD): ")?;

        let generated =
            BillingService::new(self.storage).generate(client_id, consumption, rate, &due_date)?;
        self.say(&format!(
            "Bill generated with ID {}. Amount: {:.2}",
            generated.bill.id, generated.bill.amount
        ))
    }

    fn mark_paid(&mut self) -> Step {
        let id: BillId = self.prompt_parsed("Enter bill ID to mark as paid: ", "bill ID")?;
        BillingService::new(self.storage).mark_paid(id)?;
        self.say("Bill marked as paid.")
    }

    fn display_bills(&mut self) -> Step {
        let bills = BillingService::new(self.storage).list(None)?;
        self.say(format_bill_list(&bills).trim_end())
    }

    fn report_copy(&mut self, report: &BackupReport, nothing: &str) -> Step {
        self.say(&report.summary())?;
        if !report.succeeded() {
            self.say(nothing)?;
        }
        Ok(())
    }

    /// Print a failed step's error; pass end of input and output failures on
    fn recover(&mut self, interrupt: Interrupt) -> Step {
        match interrupt {
            Interrupt::Failed(e) => self.say(&format!("Error: {}", e)),
            other => Err(other),
        }
    }

    fn say(&mut self, text: &str) -> Step {
        writeln!(self.output, "{}", text).map_err(Interrupt::Output)
    }

    fn prompt(&mut self, label: &str) -> Step<String> {
        write!(self.output, "{}", label)
            .and_then(|_| self.output.flush())
            .map_err(Interrupt::Output)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Interrupt::Failed(WattbookError::Io(format!("Failed to read input: {}", e))))?;
        if read == 0 {
            return Err(Interrupt::Eof);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_parsed<T: FromStr>(&mut self, label: &str, what: &str) -> Step<T> {
        let answer = self.prompt(label)?;
        answer.parse().map_err(|_| {
            Interrupt::Failed(WattbookError::Validation(format!(
                "Invalid {}: '{}'",
                what, answer
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Settings, WattbookPaths};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = WattbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn run(storage: &Storage, script: &str) -> String {
        let mut output = Vec::new();
        run_menu(storage, Cursor::new(script.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_exit_from_main_menu() {
        let (_temp_dir, storage) = create_test_storage();
        let output = run(&storage, "0\n");
        assert!(output.contains("=== WattBook ==="));
        assert!(output.ends_with("Choice: "));
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_temp_dir, storage) = create_test_storage();
        run(&storage, "");
        // Mid-operation as well
        run(&storage, "1\n1\nAda\n");
        assert_eq!(storage.clients.count().unwrap(), 0);
    }

    #[test]
    fn test_add_and_display_client() {
        let (_temp_dir, storage) = create_test_storage();
        let output = run(
            &storage,
            "1\n1\nAda Lovelace\n12 Square\n555-0100\n120\n0.15\n0\n5\n0\n0\n",
        );

        assert!(output.contains("Client added with ID 1."));
        assert!(output.contains("Ada Lovelace"));
        assert_eq!(storage.clients.count().unwrap(), 1);
    }

    #[test]
    fn test_bad_number_returns_to_menu() {
        let (_temp_dir, storage) = create_test_storage();
        let output = run(&storage, "1\n1\nAda\naddr\nphone\nabc\n0\n0\n");

        assert!(output.contains("Error: Validation error: Invalid consumption: 'abc'"));
        assert!(output.matches("--- Client Menu ---").count() >= 2);
        assert_eq!(storage.clients.count().unwrap(), 0);
    }

    #[test]
    fn test_generate_and_pay_bill() {
        let (_temp_dir, storage) = create_test_storage();
        storage.clients.add("Ada", "a", "p", 0.0, 0.0, 0.0).unwrap();

        let output = run(&storage, "2\n1\n1\n120\n0.15\n2024-01-15\n2\n1\n3\n0\n0\n");

        assert!(output.contains("Bill generated with ID 1. Amount: 18.00"));
        assert!(output.contains("Bill marked as paid."));
        assert!(storage.bills.find_by_id(BillId::new(1)).unwrap().unwrap().paid);
    }

    #[test]
    fn test_generate_for_unknown_client_stops_early() {
        let (_temp_dir, storage) = create_test_storage();
        let output = run(&storage, "2\n1\n9\n0\n0\n");

        assert!(output.contains("Error: Client not found: 9"));
        assert!(!output.contains("Enter consumption"));
    }

    #[test]
    fn test_search_by_name() {
        let (_temp_dir, storage) = create_test_storage();
        storage.clients.add("Ada", "12 Square", "p", 0.0, 0.0, 0.0).unwrap();

        let output = run(&storage, "1\n4\n2\nAda\n4\n2\nBob\n0\n0\n");
        assert!(output.contains("Address:     12 Square"));
        assert!(output.contains("Error: Client not found: Bob"));
    }

    #[test]
    fn test_backup_restore_and_report() {
        let (_temp_dir, storage) = create_test_storage();
        let output = run(&storage, "3\n");
        assert!(output.contains("Nothing to back up."));

        storage.clients.add("Ada", "a", "p", 10.0, 0.5, 5.0).unwrap();
        let output = run(&storage, "3\n4\n5\n0\n");
        assert!(output.contains("Backup completed"));
        assert!(output.contains("Restore completed"));
        assert!(output.contains("Total last bills:"));
    }
}
