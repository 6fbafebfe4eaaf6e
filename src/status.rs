// System status display — shows DB stats and next-step hints.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use crate::db::Store;

/// Display system status to the terminal.
pub async fn show(store: &Arc<dyn Store>, db_display_path: &str) -> Result<()> {
    if !Path::new(db_display_path).exists() {
        println!("Database: not initialized");
        println!("\nRun `ember init` to set up the database.");
        return Ok(());
    }

    // Database file size
    let file_size = std::fs::metadata(db_display_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_display_path, file_size);

    let users = store.count_users().await?;
    let activities = store.count_activities().await?;

    if users == 0 {
        println!("Users: none registered yet");
        println!("  Run `ember register <username>` to create one");
    } else {
        println!("Users: {users}");
    }

    if activities == 0 {
        println!("Activities: none recorded yet");
        println!("  Run `ember add --user-id <id> <name>` to record one");
    } else {
        println!("Activities: {activities}");
    }

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
