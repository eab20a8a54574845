use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use wattbook::cli::{
    handle_audit_command, handle_backup_command, handle_bill_command, handle_client_command,
    handle_export_command, handle_report_command, handle_restore_command, run_menu,
};
use wattbook::config::{paths::DATA_DIR_ENV, Settings, WattbookPaths};
use wattbook::logging;
use wattbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "wattbook",
    author = "Kaylee Beyene",
    version,
    about = "Client roster and billing ledger for an electricity utility",
    long_about = "WattBook keeps a roster of utility clients and the bills raised \
                  against them in two binary record files, with backup and restore. \
                  Run it without a subcommand for the interactive menu."
)]
struct Cli {
    /// Directory holding config, audit log and data files
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Client management commands
    #[command(subcommand)]
    Client(wattbook::cli::ClientCommands),

    /// Billing commands
    #[command(subcommand)]
    Bill(wattbook::cli::BillCommands),

    /// Copy both store files to their backups
    Backup {
        /// Show the current backup files instead of copying
        #[arg(long)]
        status: bool,
    },

    /// Copy both backup files over the store files
    Restore {
        /// Only check that the backups decode; copy nothing
        #[arg(long)]
        check: bool,
    },

    /// Show billing totals
    Report {
        /// Write the totals as CSV instead
        #[arg(long)]
        csv: bool,
    },

    /// Export clients and bills
    #[command(subcommand)]
    Export(wattbook::cli::ExportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directories and write default settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => WattbookPaths::with_base_dir(dir),
        None => WattbookPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_filter);

    // Initialize storage
    let storage = Storage::new(paths.clone(), &settings)?;

    match cli.command {
        Some(Commands::Client(cmd)) => handle_client_command(&storage, cmd)?,
        Some(Commands::Bill(cmd)) => handle_bill_command(&storage, cmd)?,
        Some(Commands::Backup { status }) => handle_backup_command(&paths, status)?,
        Some(Commands::Restore { check }) => handle_restore_command(&paths, check)?,
        Some(Commands::Report { csv }) => handle_report_command(&storage, csv)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing WattBook at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Clients file: {}", paths.clients_file().display());
            println!("Bills file:   {}", paths.bills_file().display());
            println!();
            println!("Run 'wattbook client add --help' to add the first client.");
        }
        Some(Commands::Config) => {
            println!("WattBook Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Clients file:    {}", paths.clients_file().display());
            println!("Bills file:      {}", paths.bills_file().display());
            println!("Clients backup:  {}", paths.clients_backup().display());
            println!("Bills backup:    {}", paths.bills_backup().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled: {}", settings.audit_enabled);
            println!("  Log filter:    {}", settings.log_filter);
        }
        None => {
            let stdin = io::stdin();
            run_menu(&storage, stdin.lock(), io::stdout())?;
        }
    }

    Ok(())
}
