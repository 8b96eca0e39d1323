use crate::types::TxIntent;
use crate::user_settings::app_data_dir;
use crate::utils::format_token_amount;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Log file name
const OPERATION_LOG_FILE: &str = "operation_log.txt";

/// Get the full path to the operation log file
fn log_path() -> PathBuf {
    app_data_dir().join(OPERATION_LOG_FILE)
}

/// Get the full path to the operation log file as a string for display
pub fn log_file_path() -> String {
    log_path().display().to_string()
}

/// Render one log entry: a header line followed by indented detail lines
pub fn format_entry(timestamp: DateTime<Utc>, chain_id: u64, operation: &str, details: &str) -> String {
    let mut entry = format!(
        "[{}] chain_id={} operation={}\n",
        timestamp.to_rfc3339(),
        chain_id,
        operation
    );
    if details.trim().is_empty() {
        entry.push_str("  (no additional details)\n");
    } else {
        for line in details.lines() {
            if line.trim().is_empty() {
                entry.push('\n');
            } else {
                entry.push_str("  ");
                entry.push_str(line);
                entry.push('\n');
            }
        }
    }
    entry.push('\n');
    entry
}

/// Details block describing a staged transaction
pub fn describe_intent(intent: &TxIntent) -> String {
    format!(
        "vault={} ({:?})\namount={} {}\nstaged_at={}",
        intent.vault_name,
        intent.vault,
        format_token_amount(intent.amount, u32::from(intent.token_decimals), 6),
        intent.token_symbol,
        intent.created_at.to_rfc3339()
    )
}

/// Append a structured log entry describing a user-requested operation.
pub fn append_log(operation: &str, chain_id: u64, details: impl AsRef<str>) -> Result<()> {
    let path = log_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    file.write_all(format_entry(Utc::now(), chain_id, operation, details.as_ref()).as_bytes())?;
    Ok(())
}

/// Record a staged deposit or withdraw
pub fn log_staged_transaction(intent: &TxIntent, chain_id: u64) -> Result<()> {
    append_log(&format!("stage_{}", intent.kind.label()), chain_id, describe_intent(intent))
}

/// Read the entire log file content
pub fn read_log() -> Result<String> {
    let path = log_path();
    if path.exists() {
        Ok(fs::read_to_string(&path)?)
    } else {
        Ok(String::new())
    }
}

/// Last `limit` non-empty lines of `log`, newest first
pub fn recent_lines(log: &str, limit: usize) -> Vec<String> {
    log.lines()
        .rev()
        .filter(|line| !line.trim().is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Read the tail of the log file, newest first
pub fn read_recent(limit: usize) -> Result<Vec<String>> {
    Ok(recent_lines(&read_log()?, limit))
}
