// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Entry;
use crate::validate;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Cashbook", "cashbook"));

/// Key the serialized ledger snapshot lives under.
pub const LEDGER_KEY: &str = "ledger";
/// Key of the read-only seed document consulted when no snapshot exists yet.
pub const SEED_KEY: &str = "seed";

/// Key-value blob store the ledger persists through. `read` distinguishes
/// "absent" from a failed read; `write` replaces the whole value.
pub trait BlobStore {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

pub fn data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("CASHBOOK_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

/// Blob store backed by one JSON file per key in a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: PathBuf) -> Self {
        FileStore { dir }
    }

    pub fn open_default() -> Result<Self> {
        Ok(FileStore::open(data_dir()?))
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Read {}", path.display())),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Create data dir {}", self.dir.display()))?;
        let path = self.path_for(key);
        fs::write(&path, value).with_context(|| format!("Write {}", path.display()))
    }
}

/// In-memory blob store, the library analogue of an in-memory database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn with_blob(key: &str, value: &str) -> Self {
        let mut store = MemoryStore::default();
        store.blobs.insert(key.to_string(), value.to_string());
        store
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loose snapshot row: stored documents may predate the current shape, so
/// every field is optional and amounts may be numbers or strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEntry {
    id: Option<i64>,
    date: Option<String>,
    income: Value,
    income_note: Option<String>,
    expense: Value,
    expense_note: Option<String>,
}

fn coerce_amount(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n
            .as_f64()
            .and_then(|f| Decimal::try_from(f).ok())
            .unwrap_or(Decimal::ZERO),
        Value::String(s) => validate::parse_amount(s),
        _ => Decimal::ZERO,
    }
}

/// Decodes a snapshot, normalizing each row field-by-field and recomputing
/// `total`. Rows that would not pass `add` today (legacy zero/zero entries,
/// out-of-range dates) are kept as-is; only the document-level parse can fail.
pub fn decode_snapshot(text: &str) -> serde_json::Result<Vec<Entry>> {
    let raw: Vec<RawEntry> = serde_json::from_str(text)?;
    Ok(raw
        .into_iter()
        .map(|r| {
            let mut entry = Entry {
                id: r.id.unwrap_or(0),
                date: r.date.unwrap_or_default().trim().to_string(),
                income: coerce_amount(&r.income),
                income_note: r.income_note.unwrap_or_default(),
                expense: coerce_amount(&r.expense),
                expense_note: r.expense_note.unwrap_or_default(),
                total: Decimal::ZERO,
            };
            entry.recompute_total();
            entry
        })
        .collect())
}

pub fn encode_snapshot(entries: &[Entry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}
