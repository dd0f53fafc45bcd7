pub mod entry;
pub mod feed;
pub mod logging;
pub mod notify;
pub mod reconcile;
pub mod store;

pub const TARGET_STORE: &str = "store";
pub const TARGET_RECONCILE: &str = "reconcile";
pub const TARGET_FEED: &str = "feed";
pub const TARGET_NOTIFY: &str = "notify";

/// The only status value the tracker retains. Entries carrying anything
/// else are pruned from the snapshot on the next run.
pub const STATUS_ONGOING: &str = "ONGOING";
