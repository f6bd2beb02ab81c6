//! Timestamp conversion history
//!
//! Conversions the user chose to keep are stored as a JSON array in
//! `history.json` inside the application's data directory, oldest first.

use crate::core::timestamp::TimestampUnit;
use crate::utils::{get_data_dir, load_json_or_default, remove_file_if_exists, write_atomic};
use chrono::{DateTime, Utc};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const HISTORY_FILE_NAME: &str = "history.json";

/// A single saved conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampHistoryItem {
    pub id: Uuid,
    /// Timestamp text as entered (trimmed)
    pub timestamp: String,
    pub is_milliseconds: bool,
    pub converted_time: String,
    pub create_time: DateTime<Utc>,
}

impl TimestampHistoryItem {
    pub fn new(
        timestamp: impl Into<String>,
        unit: TimestampUnit,
        converted_time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: timestamp.into(),
            is_milliseconds: unit.is_milliseconds(),
            converted_time: converted_time.into(),
            create_time: Utc::now(),
        }
    }

    pub const fn unit(&self) -> TimestampUnit {
        TimestampUnit::from_milliseconds_flag(self.is_milliseconds)
    }
}

impl PartialEq for TimestampHistoryItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TimestampHistoryItem {}

/// Ordered list of saved conversions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimestampHistory {
    items: Vec<TimestampHistoryItem>,
}

impl TimestampHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a conversion unless it is empty or already recorded.
    ///
    /// An entry counts as already recorded when both the timestamp text and
    /// the unit match. Returns the new entry, or `None` if nothing was added.
    pub fn record(
        &mut self,
        timestamp: &str,
        unit: TimestampUnit,
        converted_time: &str,
    ) -> Option<&TimestampHistoryItem> {
        let timestamp = timestamp.trim();
        if timestamp.is_empty() || converted_time.is_empty() {
            return None;
        }

        if self
            .items
            .iter()
            .any(|item| item.timestamp == timestamp && item.unit() == unit)
        {
            tracing::debug!("Skipping duplicate history entry for {timestamp} ({unit})");
            return None;
        }

        self.items
            .push(TimestampHistoryItem::new(timestamp, unit, converted_time));
        self.items.last()
    }

    pub fn get(&self, id: Uuid) -> Option<&TimestampHistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Removes an entry by ID, returning it if present.
    pub fn remove(&mut self, id: Uuid) -> Option<TimestampHistoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops the oldest entries so that at most `max` remain.
    pub fn enforce_limit(&mut self, max: usize) {
        if self.items.len() > max {
            let excess = self.items.len() - max;
            self.items.drain(..excess);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimestampHistoryItem> {
        self.items.iter()
    }

    /// Entries ordered by descending creation time
    pub fn newest_first(&self) -> impl Iterator<Item = &TimestampHistoryItem> {
        self.items.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fuzzy filters entries by timestamp text and converted date.
    ///
    /// Results are sorted by descending score. Empty queries return every
    /// entry newest first with a score of 0.
    pub fn search(&self, query: &str) -> Vec<(&TimestampHistoryItem, u16)> {
        if query.is_empty() {
            return self.newest_first().map(|item| (item, 0)).collect();
        }

        let mut matcher = Matcher::new(Config::DEFAULT);
        let query_lowercase = query.to_lowercase();
        let mut needle_buf = Vec::new();
        let needle = Utf32Str::new(&query_lowercase, &mut needle_buf);

        let mut haystack_buf = Vec::new();

        let mut results: Vec<_> = self
            .items
            .iter()
            .filter_map(|item| {
                let text = format!("{} {}", item.timestamp, item.converted_time).to_lowercase();
                haystack_buf.clear();
                let haystack = Utf32Str::new(&text, &mut haystack_buf);
                matcher
                    .fuzzy_match(haystack, needle)
                    .map(|score| (item, score))
            })
            .collect();

        results.sort_by(|a, b| b.1.cmp(&a.1));
        results
    }
}

/// Path of the history file in the data directory
pub fn history_path() -> crate::Result<PathBuf> {
    let mut path = get_data_dir().ok_or(crate::Error::DataDirUnavailable)?;
    path.push(HISTORY_FILE_NAME);
    Ok(path)
}

/// Loads history from `path`.
///
/// A missing file is an empty history. An unreadable or corrupt file is
/// logged and also treated as empty so the converter stays usable.
pub async fn load_history_from(path: &Path) -> TimestampHistory {
    load_json_or_default(path, "history").await
}

/// Writes history to `path` atomically.
pub async fn save_history_to(path: &Path, history: &TimestampHistory) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    write_atomic(path, json.as_bytes()).await?;
    tracing::debug!("Saved {} history entries to {}", history.len(), path.display());
    Ok(())
}

/// Removes the history file. A file that does not exist is not an error.
pub async fn delete_history_file(path: &Path) -> crate::Result<()> {
    remove_file_if_exists(path).await?;
    Ok(())
}
