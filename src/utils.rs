// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use crate::models::dmy;
use anyhow::Result;
use chrono::{Local, NaiveDate, TimeZone};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber. Logs go to stderr so table output stays clean.
pub fn init_tracing(filter: &str) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("spendsavvy=warn"));
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

pub fn parse_date(s: &str) -> Result<NaiveDate, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Missing("date"));
    }
    NaiveDate::parse_from_str(s, dmy::FORMAT).map_err(|_| ValidationError::InvalidDate(s.into()))
}

pub fn parse_amount(s: &str) -> Result<Decimal, ValidationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ValidationError::Missing("amount"));
    }
    let d = s
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(s.into()))?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(ValidationError::NegativeAmount(d));
    }
    Ok(d)
}

pub fn fmt_date(d: &NaiveDate) -> String {
    d.format(dmy::FORMAT).to_string()
}

/// `Jan 05, 2025`
pub fn fmt_human_date(d: &NaiveDate) -> String {
    d.format("%b %d, %Y").to_string()
}

/// Renders an amount the way a double prints: always at least one fractional digit.
pub fn fmt_amount(d: &Decimal) -> String {
    let n = d.normalize();
    if n.scale() == 0 {
        format!("{}.0", n)
    } else {
        n.to_string()
    }
}

pub fn fmt_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => millis.to_string(),
    }
}

pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
