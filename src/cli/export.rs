//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::{WattbookError, WattbookResult};
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV (one record type per file)
    Csv,
    /// JSON
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all clients
    Clients {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export all bills
    Bills {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export clients and bills together
    All {
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> WattbookResult<()> {
    match cmd {
        ExportCommands::Clients { format, output } => {
            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => csv::export_clients_csv(storage, &mut writer)?,
                ExportFormat::Json => json::export_clients_json(storage, &mut writer, true)?,
                ExportFormat::Yaml => yaml::export_clients_yaml(storage, &mut writer)?,
            }
            finish(writer, output.as_ref(), "Clients")
        }

        ExportCommands::Bills { format, output } => {
            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => csv::export_bills_csv(storage, &mut writer)?,
                ExportFormat::Json => json::export_bills_json(storage, &mut writer, true)?,
                ExportFormat::Yaml => yaml::export_bills_yaml(storage, &mut writer)?,
            }
            finish(writer, output.as_ref(), "Bills")
        }

        ExportCommands::All {
            format,
            output,
            pretty,
        } => {
            if format == ExportFormat::Csv {
                return Err(WattbookError::Validation(
                    "CSV holds a single table; export clients and bills separately".into(),
                ));
            }
            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
                _ => json::export_full_json(storage, &mut writer, pretty)?,
            }
            finish(writer, output.as_ref(), "Clients and bills")
        }
    }
}

fn open_output(output: Option<&PathBuf>) -> WattbookResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                WattbookError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn finish(mut writer: Box<dyn Write>, output: Option<&PathBuf>, what: &str) -> WattbookResult<()> {
    writer
        .flush()
        .map_err(|e| WattbookError::Export(e.to_string()))?;

    if let Some(path) = output {
        println!("{} exported to: {}", what, path.display());
    }
    Ok(())
}
