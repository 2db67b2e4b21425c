// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::Ledger;
use crate::limits::period_start;
use crate::notify::ConsoleNotifier;
use crate::store::SqliteStore;
use crate::utils::{fmt_date, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Local;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn, user);
    let notifier = ConsoleNotifier::stdout();
    let ledger = Ledger::new(&store, &notifier);
    match m.subcommand() {
        Some(("set", sub)) => set(&ledger, sub)?,
        Some(("list", sub)) => list(&ledger, sub)?,
        Some(("check", sub)) => check(&ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").unwrap();
    let amount = sub.get_one::<String>("amount").unwrap();
    let period = sub.get_one::<String>("period").unwrap();
    let limit = ledger.set_limit(category, amount, period)?;
    println!(
        "{} limit for {} set to {:.2}",
        limit.time_period, limit.category, limit.limit
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let limits = ledger.limits()?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &limits)? {
        let today = Local::now().date_naive();
        let rows = limits
            .iter()
            .map(|l| {
                vec![
                    l.category.clone(),
                    format!("{:.2}", l.limit),
                    l.period_label().to_string(),
                    fmt_date(&period_start(l.time_period, today)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Limit", "Period", "Period start"], rows)
        );
    }
    Ok(())
}

fn check(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let breaches = ledger.check_limits(category)?;
    if breaches.is_empty() {
        println!("All spending is within limits");
    } else {
        let rows = breaches
            .iter()
            .map(|b| {
                vec![
                    b.limit.category.clone(),
                    format!("{:.2}", b.spent),
                    format!("{:.2}", b.limit.limit),
                    fmt_date(&b.since),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Spent", "Limit", "Since"], rows)
        );
    }
    Ok(())
}
