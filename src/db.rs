// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Key-value persistence for the ledger.
//!
//! The whole ledger lives as one JSON document under `STORAGE_KEY` in a
//! single-table SQLite file. It is read once at startup and written back after
//! a mutating command.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::Result as StoreResult;
use crate::store::Ledger;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.finsight", "Finsight", "finsight"));

pub const STORAGE_KEY: &str = "finance-tracker-storage";

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("finsight.sqlite"))
}

pub fn open_at(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS kv(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    "#,
    )?;
    Ok(())
}

pub fn get_value(conn: &Connection, key: &str) -> StoreResult<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> StoreResult<()> {
    conn.execute(
        "INSERT INTO kv(key, value, updated_at) VALUES(?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=excluded.updated_at",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_value(conn: &Connection, key: &str) -> StoreResult<bool> {
    let n = conn.execute("DELETE FROM kv WHERE key=?1", params![key])?;
    Ok(n > 0)
}

/// Rehydrate the ledger. A missing key yields an empty ledger.
pub fn load_ledger(conn: &Connection) -> Result<Ledger> {
    match get_value(conn, STORAGE_KEY)? {
        Some(raw) => {
            let ledger: Ledger = serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt ledger state under '{}'", STORAGE_KEY))?;
            info!(
                transactions = ledger.transactions().len(),
                "ledger loaded"
            );
            Ok(ledger)
        }
        None => {
            info!(key = STORAGE_KEY, "no stored ledger, starting empty");
            Ok(Ledger::new())
        }
    }
}

pub fn save_ledger(conn: &Connection, ledger: &mut Ledger) -> Result<()> {
    let raw = serde_json::to_string(ledger)?;
    set_value(conn, STORAGE_KEY, &raw)?;
    ledger.mark_clean();
    info!(transactions = ledger.transactions().len(), "ledger saved");
    Ok(())
}
