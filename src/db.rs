// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data dir {}", dir.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS users(
        id TEXT PRIMARY KEY,
        is_new_user INTEGER NOT NULL DEFAULT 1,
        name TEXT NOT NULL DEFAULT '',
        mobile_number TEXT NOT NULL DEFAULT '',
        age TEXT NOT NULL DEFAULT ''
    );

    -- dates are stored as YYYY-MM-DD so range filters compare as dates
    CREATE TABLE IF NOT EXISTS transactions(
        user_id TEXT NOT NULL,
        id TEXT NOT NULL,
        title TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        type TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        PRIMARY KEY(user_id, id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_title_date
        ON transactions(user_id, title, date);

    -- one limit per category
    CREATE TABLE IF NOT EXISTS limits(
        user_id TEXT NOT NULL,
        category TEXT NOT NULL,
        id TEXT NOT NULL,
        amount TEXT NOT NULL,
        time_period TEXT NOT NULL,
        PRIMARY KEY(user_id, category)
    );

    CREATE TABLE IF NOT EXISTS notifications(
        user_id TEXT NOT NULL,
        id TEXT NOT NULL,
        type TEXT NOT NULL,
        message TEXT NOT NULL,
        is_read INTEGER NOT NULL DEFAULT 0,
        timestamp INTEGER NOT NULL,
        PRIMARY KEY(user_id, id)
    );
    CREATE INDEX IF NOT EXISTS idx_notifications_unread
        ON notifications(user_id, is_read, timestamp);
    "#,
    )?;
    Ok(())
}
