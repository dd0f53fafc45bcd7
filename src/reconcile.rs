use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;
use tracing::debug;

use crate::entry::{Entry, SourceData};
use crate::{STATUS_ONGOING, TARGET_RECONCILE};

/// Result of reconciling a fresh source snapshot against the prior one.
#[derive(Debug, Default)]
pub struct Reconciled {
    /// Every currently-ongoing entry, in source order, each with a
    /// resolved `first_seen`. This replaces the persisted snapshot.
    pub snapshot: Vec<Entry>,
    /// The subset of `snapshot` whose id was not in the prior snapshot.
    pub new_additions: Vec<Entry>,
}

/// Diffs the fresh source against the prior snapshot.
///
/// Only entries whose status is exactly `"ONGOING"` are kept. An entry
/// whose id was already known keeps the `first_seen` stamp it was given
/// when first observed; everything else is stamped with `now`. Entries
/// without a usable id can never match and are never reported as new,
/// but they still ride along in the snapshot.
pub fn reconcile(prior: &[Entry], source: &SourceData, now: DateTime<Utc>) -> Reconciled {
    let now_stamp = now.to_rfc3339_opts(SecondsFormat::Secs, true);

    let known: HashMap<&str, &Entry> = prior
        .iter()
        .filter_map(|entry| entry.identity().map(|id| (id, entry)))
        .collect();

    let mut out = Reconciled::default();
    for source_entry in &source.entries {
        if source_entry.status.as_deref() != Some(STATUS_ONGOING) {
            continue;
        }

        let mut entry = source_entry.clone();
        match entry.identity().and_then(|id| known.get(id)) {
            Some(prior_entry) => {
                entry.first_seen = prior_entry
                    .first_seen
                    .clone()
                    .or_else(|| Some(now_stamp.clone()));
            }
            None => {
                entry.first_seen = Some(now_stamp.clone());
                if entry.identity().is_some() {
                    debug!(
                        target: TARGET_RECONCILE,
                        "New entry: {} ({})",
                        entry.title.as_deref().unwrap_or("<untitled>"),
                        entry.id.as_deref().unwrap_or_default()
                    );
                    out.new_additions.push(entry.clone());
                }
            }
        }
        out.snapshot.push(entry);
    }

    out
}
