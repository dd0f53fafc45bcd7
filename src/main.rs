use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use vigil::feed::{self, FeedInfo};
use vigil::logging::configure_logging;
use vigil::reconcile::reconcile;
use vigil::{notify, store};

/// Tracks ongoing entries from a periodically refreshed JSON feed:
/// diffs the fresh source against the persisted snapshot, announces new
/// additions, overwrites the snapshot, and renders it as RSS.
#[derive(Parser, Debug)]
#[command(name = "vigil", version)]
struct Args {
    /// Source JSON feed to reconcile against
    #[arg(short, long, env = "VIGIL_SOURCE")]
    source: PathBuf,

    /// Snapshot file holding the currently-ongoing entries
    #[arg(short, long, env = "VIGIL_DATABASE", default_value = "ongoing_entries.json")]
    database: PathBuf,

    /// Where to write the rendered RSS feed
    #[arg(short, long, env = "VIGIL_FEED", default_value = "feed.xml")]
    feed: PathBuf,

    /// Directory receiving one message file per new addition
    #[arg(long, env = "VIGIL_NOTIFY_DIR", default_value = "notifications")]
    notify_dir: PathBuf,

    /// RSS channel title
    #[arg(long, default_value = "Ongoing petitions")]
    feed_title: String,

    /// RSS channel link
    #[arg(long, default_value = "https://example.org/petitions")]
    feed_link: String,

    /// RSS channel description
    #[arg(long, default_value = "Petitions currently accepting support")]
    feed_description: String,

    /// Also write a daily rolling debug log into this directory
    #[arg(long, env = "VIGIL_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    configure_logging(args.log_dir.as_deref());

    let now = Utc::now();

    // Hard contract on the source: bail before anything is written, so a
    // bad fetch leaves the snapshot file untouched.
    let source = store::load_source(&args.source)?;
    let prior = store::load_snapshot(&args.database);

    let outcome = reconcile(&prior, &source, now);

    notify::write_notifications(&args.notify_dir, &outcome.new_additions)?;
    store::save_snapshot(&args.database, &outcome.snapshot)?;

    let channel_info = FeedInfo {
        title: args.feed_title,
        link: args.feed_link,
        description: args.feed_description,
    };
    let channel = feed::render_feed(&channel_info, &outcome.snapshot, now);
    feed::write_feed(&args.feed, &channel)?;

    info!(
        "Run complete: {} ongoing entries, {} new",
        outcome.snapshot.len(),
        outcome.new_additions.len()
    );
    Ok(())
}
