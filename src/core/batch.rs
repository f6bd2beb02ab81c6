//! Batch input splitting and QR code history
//!
//! Batch generation takes one blob of text, picks a separator (or detects
//! one), and turns each non-empty part into its own QR code. Rendering the
//! symbols happens elsewhere; this module owns the splitting rules and the
//! history of generated texts, where every batch shares one timestamp.

use crate::utils::{get_data_dir, load_json_or_default, remove_file_if_exists, write_atomic};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const QR_HISTORY_FILE_NAME: &str = "qr_history.json";

/// Above this many space-separated parts the text reads as prose, so
/// detection falls back to newlines.
pub const MAX_SPACE_SEPARATED_PARTS: usize = 10;

/// Delimiter between batch items
#[derive(Debug, Clone, PartialEq, Eq, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Separator {
    #[strum(serialize = "newline", serialize = "nl", serialize = "lf")]
    Newline,
    #[strum(serialize = "comma")]
    Comma,
    #[strum(serialize = "semicolon")]
    Semicolon,
    #[strum(serialize = "tab")]
    Tab,
    #[strum(serialize = "space")]
    Space,
    #[strum(serialize = "pipe")]
    Pipe,
    #[strum(serialize = "dash", serialize = "hyphen")]
    Dash,
    /// Any other literal string
    #[strum(default)]
    Custom(String),
}

impl Separator {
    /// Candidates for [`detect_separator`], in tie-break order
    pub const CANDIDATES: [Separator; 7] = [
        Separator::Newline,
        Separator::Comma,
        Separator::Semicolon,
        Separator::Tab,
        Separator::Space,
        Separator::Pipe,
        Separator::Dash,
    ];

    /// The literal text split on. An empty custom separator means newline.
    pub fn pattern(&self) -> &str {
        match self {
            Separator::Newline => "\n",
            Separator::Comma => ",",
            Separator::Semicolon => ";",
            Separator::Tab => "\t",
            Separator::Space => " ",
            Separator::Pipe => "|",
            Separator::Dash => "-",
            Separator::Custom(custom) if custom.is_empty() => "\n",
            Separator::Custom(custom) => custom,
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Separator::Newline => f.write_str("newline"),
            Separator::Comma => f.write_str("comma"),
            Separator::Semicolon => f.write_str("semicolon"),
            Separator::Tab => f.write_str("tab"),
            Separator::Space => f.write_str("space"),
            Separator::Pipe => f.write_str("pipe"),
            Separator::Dash => f.write_str("dash"),
            Separator::Custom(_) => write!(f, "{:?}", self.pattern()),
        }
    }
}

/// Splits `text` on `separator`, trimming each part and dropping empty ones.
pub fn split_batch(text: &str, separator: &Separator) -> Vec<String> {
    text.split(separator.pattern())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Picks the separator that occurs most often in `text`.
///
/// A candidate only counts if splitting on it yields at least two non-empty
/// parts; ties go to the earlier entry of [`Separator::CANDIDATES`]. Space
/// loses to newline when it would produce more than
/// [`MAX_SPACE_SEPARATED_PARTS`] parts. Newline is the fallback.
pub fn detect_separator(text: &str) -> Separator {
    let mut best = Separator::Newline;
    let mut max_count = 0;

    for candidate in Separator::CANDIDATES {
        let count = text.matches(candidate.pattern()).count();
        if count > max_count && split_batch(text, &candidate).len() >= 2 {
            best = candidate;
            max_count = count;
        }
    }

    if best == Separator::Space
        && split_batch(text, &Separator::Space).len() > MAX_SPACE_SEPARATED_PARTS
    {
        tracing::debug!("Too many space-separated parts, splitting on newlines");
        best = Separator::Newline;
    }

    best
}

/// One generated QR code, by its text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrHistoryItem {
    pub id: Uuid,
    pub text: String,
    /// Position of the text in its batch input
    #[serde(default)]
    pub batch_index: Option<usize>,
    /// Shared by every item generated in the same batch
    #[serde(default)]
    pub batch_timestamp: Option<DateTime<Utc>>,
    pub create_time: DateTime<Utc>,
}

impl QrHistoryItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            batch_index: None,
            batch_timestamp: None,
            create_time: Utc::now(),
        }
    }

    pub fn in_batch(text: impl Into<String>, index: usize, batch_timestamp: DateTime<Utc>) -> Self {
        Self {
            batch_index: Some(index),
            batch_timestamp: Some(batch_timestamp),
            ..Self::new(text)
        }
    }

    pub const fn is_batch_generated(&self) -> bool {
        self.batch_timestamp.is_some()
    }
}

impl PartialEq for QrHistoryItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for QrHistoryItem {}

/// Outcome of [`QrHistory::record_batch`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecord {
    pub batch_timestamp: DateTime<Utc>,
    pub added: usize,
    pub skipped: usize,
}

/// Generated QR texts, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QrHistory {
    items: Vec<QrHistoryItem>,
}

impl QrHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn contains_text(&self, text: &str) -> bool {
        self.items.iter().any(|item| item.text == text)
    }

    /// Adds a single text at the top unless it is blank or already present.
    pub fn record(&mut self, text: &str) -> Option<&QrHistoryItem> {
        let text = text.trim();
        if text.is_empty() || self.contains_text(text) {
            return None;
        }
        self.items.insert(0, QrHistoryItem::new(text));
        self.items.first()
    }

    /// Adds every part of a batch under one shared timestamp.
    ///
    /// Each part keeps its index in `parts`. Parts whose text is already in
    /// the history, including earlier parts of the same batch, are skipped.
    /// New items go on top, so the last part ends up first.
    pub fn record_batch<S: AsRef<str>>(&mut self, parts: &[S]) -> BatchRecord {
        let batch_timestamp = Utc::now();
        let mut added = 0;

        for (index, part) in parts.iter().enumerate() {
            let text = part.as_ref().trim();
            if text.is_empty() || self.contains_text(text) {
                continue;
            }
            self.items
                .insert(0, QrHistoryItem::in_batch(text, index, batch_timestamp));
            added += 1;
        }

        tracing::debug!("Recorded batch {batch_timestamp}: {added} of {} parts", parts.len());
        BatchRecord {
            batch_timestamp,
            added,
            skipped: parts.len() - added,
        }
    }

    /// Items generated in the batch stamped `batch_timestamp`, in batch order.
    pub fn batch_items(&self, batch_timestamp: DateTime<Utc>) -> Vec<&QrHistoryItem> {
        let mut items: Vec<_> = self
            .items
            .iter()
            .filter(|item| item.batch_timestamp == Some(batch_timestamp))
            .collect();
        items.sort_by_key(|item| item.batch_index);
        items
    }

    pub fn get(&self, id: Uuid) -> Option<&QrHistoryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<QrHistoryItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops the oldest entries so that at most `max` remain.
    pub fn enforce_limit(&mut self, max: usize) {
        self.items.truncate(max);
    }

    pub fn iter(&self) -> impl Iterator<Item = &QrHistoryItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Path of the QR history file in the data directory
pub fn qr_history_path() -> crate::Result<PathBuf> {
    let mut path = get_data_dir().ok_or(crate::Error::DataDirUnavailable)?;
    path.push(QR_HISTORY_FILE_NAME);
    Ok(path)
}

/// Loads QR history from `path`; missing or corrupt files give an empty history.
pub async fn load_qr_history_from(path: &Path) -> QrHistory {
    load_json_or_default(path, "QR history").await
}

pub async fn save_qr_history_to(path: &Path, history: &QrHistory) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(history)?;
    write_atomic(path, json.as_bytes()).await?;
    tracing::debug!("Saved {} QR history entries to {}", history.len(), path.display());
    Ok(())
}

pub async fn delete_qr_history_file(path: &Path) -> crate::Result<()> {
    remove_file_if_exists(path).await?;
    Ok(())
}
