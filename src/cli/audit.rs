//! Audit log CLI command

use crate::error::WattbookResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> WattbookResult<()> {
    let Some(logger) = storage.audit() else {
        println!("Audit logging is disabled (set \"audit_enabled\": true in config.json).");
        return Ok(());
    };

    let entries = logger.read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }
    Ok(())
}
