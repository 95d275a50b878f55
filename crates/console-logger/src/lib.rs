//! Console Logger
//!
//! tracing setup for the browser: every event goes to the devtools console
//! and into a circular buffer of recent entries. `log` records from
//! dependencies are bridged into tracing.

mod buffer;
mod layer;

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub use buffer::{recent_entries, LogEntry, RingBuffer, BUFFER_CAPACITY};
pub use layer::ConsoleLayer;

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logger(app_name: &str, max_level: Level) -> Result<(), String> {
    tracing_subscriber::registry()
        .with(LevelFilter::from_level(max_level))
        .with(ConsoleLayer::new(app_name))
        .try_init()
        .map_err(|e| format!("failed to init logger: {}", e))
}
