use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rss::{Channel, ChannelBuilder, Guid, Item, ItemBuilder};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::entry::Entry;
use crate::TARGET_FEED;

/// Channel-level metadata for the rendered feed.
pub struct FeedInfo {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Renders the finalized snapshot as an RSS channel, one item per entry.
/// Pure over its inputs; `now` is the pubDate fallback for entries whose
/// `first_seen` stamp does not parse.
pub fn render_feed(info: &FeedInfo, snapshot: &[Entry], now: DateTime<Utc>) -> Channel {
    let items: Vec<Item> = snapshot
        .iter()
        .map(|entry| render_item(entry, now))
        .collect();

    ChannelBuilder::default()
        .title(info.title.clone())
        .link(info.link.clone())
        .description(info.description.clone())
        .items(items)
        .build()
}

fn render_item(entry: &Entry, now: DateTime<Utc>) -> Item {
    let link = entry.support_link.clone().unwrap_or_default();
    let supporters = entry.total_supporters.unwrap_or(0);

    let pub_date = match entry.first_seen.as_deref() {
        Some(stamp) => match DateTime::parse_from_rfc3339(stamp) {
            Ok(parsed) => parsed.to_rfc2822(),
            Err(err) => {
                debug!(
                    target: TARGET_FEED,
                    "Unparseable first_seen {:?}: {}. Using current time.", stamp, err
                );
                now.to_rfc2822()
            }
        },
        None => now.to_rfc2822(),
    };

    let guid = entry.identity().map(|id| Guid {
        value: id.to_string(),
        permalink: false,
    });

    ItemBuilder::default()
        .title(entry.title.clone())
        .link(entry.support_link.clone())
        .guid(guid)
        .description(Some(format!(
            "{} supporters so far. Support link: {}",
            supporters, link
        )))
        .pub_date(Some(pub_date))
        .build()
}

/// Writes the channel as RSS XML.
pub fn write_feed(path: &Path, channel: &Channel) -> Result<()> {
    fs::write(path, channel.to_string())
        .with_context(|| format!("Failed to write feed to {}", path.display()))?;
    info!(
        target: TARGET_FEED,
        "Rendered feed with {} items to {}",
        channel.items().len(),
        path.display()
    );
    Ok(())
}
