// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::transactions::filtered;
use crate::config::Config;
use crate::export::{to_csv, to_pdf};
use crate::store::SqliteStore;
use crate::utils::now_millis;
use anyhow::{Context, Result, bail};
use chrono::Local;
use rusqlite::Connection;
use std::fs;
use std::path::PathBuf;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let fmt = m.get_one::<String>("format").unwrap().trim().to_lowercase();
    if fmt != "csv" && fmt != "pdf" {
        bail!("Unknown format: {} (use csv|pdf)", fmt);
    }

    let store = SqliteStore::new(conn, cfg.user.as_str());
    let txs = filtered(&store, m, Local::now().date_naive())?;

    let out = match m.get_one::<String>("out") {
        Some(p) => PathBuf::from(p),
        None => cfg
            .export_dir
            .join(format!("transactions_{}.{}", now_millis(), fmt)),
    };
    if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Create export dir {}", dir.display()))?;
    }

    let bytes = if fmt == "csv" {
        to_csv(&txs)?.into_bytes()
    } else {
        to_pdf(&txs)?
    };
    fs::write(&out, bytes).with_context(|| format!("Write {}", out.display()))?;
    tracing::info!(path = %out.display(), count = txs.len(), format = %fmt, "export written");
    println!("Exported {} transactions to {}", txs.len(), out.display());
    Ok(())
}
