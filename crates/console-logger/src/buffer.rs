//! Circular Log Buffer
//!
//! Keeps the most recent log entries in memory so they can be inspected
//! after the fact (the console may have been cleared or closed).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local, Utc};
use tracing::Level;

/// Entries kept by the process-wide buffer
pub const BUFFER_CAPACITY: usize = 500;

static BUFFER: OnceLock<Mutex<RingBuffer>> = OnceLock::new();

/// A single captured log event
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    /// `[12:30:01.250 INFO app::target] message`
    pub fn format_line(&self) -> String {
        format!(
            "[{} {} {}] {}",
            self.timestamp.with_timezone(&Local).format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Fixed-capacity FIFO; the oldest entry is evicted when full
#[derive(Debug)]
pub struct RingBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn global() -> &'static Mutex<RingBuffer> {
    BUFFER.get_or_init(|| Mutex::new(RingBuffer::new(BUFFER_CAPACITY)))
}

pub(crate) fn push(entry: LogEntry) {
    if let Ok(mut buffer) = global().lock() {
        buffer.push(entry);
    }
}

/// Recent entries, oldest first
pub fn recent_entries() -> Vec<LogEntry> {
    global().lock().map(|b| b.snapshot()).unwrap_or_default()
}
