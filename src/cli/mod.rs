//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod backup;
pub mod bill;
pub mod client;
pub mod export;
pub mod menu;
pub mod report;

pub use audit::handle_audit_command;
pub use backup::{handle_backup_command, handle_restore_command};
pub use bill::{handle_bill_command, BillCommands};
pub use client::{handle_client_command, ClientCommands, SortBy};
pub use export::{handle_export_command, ExportCommands, ExportFormat};
pub use menu::run_menu;
pub use report::handle_report_command;
