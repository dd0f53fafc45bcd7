use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::entry::Entry;
use crate::TARGET_NOTIFY;

/// Composes the human-readable announcement for one new addition.
pub fn compose_message(entry: &Entry) -> String {
    let title = entry.title.as_deref().unwrap_or("<untitled>");
    let link = entry.support_link.as_deref().unwrap_or_default();
    let supporters = entry.total_supporters.unwrap_or(0);
    format!(
        "{}\nlink: {}\ntotal supporters right now: {}\n",
        title, link, supporters
    )
}

/// Writes one numbered message file per new addition into `dir`, which is
/// created if missing. Files from an earlier run with the same index are
/// overwritten.
pub fn write_notifications(dir: &Path, new_additions: &[Entry]) -> Result<()> {
    if new_additions.is_empty() {
        info!(target: TARGET_NOTIFY, "No new ongoing entries found");
        return Ok(());
    }

    fs::create_dir_all(dir).with_context(|| {
        format!("Failed to create notification directory {}", dir.display())
    })?;

    for (counter, entry) in new_additions.iter().enumerate() {
        let path = dir.join(format!("{}.txt", counter));
        fs::write(&path, compose_message(entry))
            .with_context(|| format!("Failed to write notification {}", path.display()))?;
    }

    info!(
        target: TARGET_NOTIFY,
        "Found {} new additions",
        new_additions.len()
    );
    Ok(())
}
