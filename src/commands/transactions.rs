// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::filters::{self, DateRange, TypeFilter};
use crate::ledger::Ledger;
use crate::models::{Transaction, TransactionInput};
use crate::notify::ConsoleNotifier;
use crate::store::{SqliteStore, Store};
use crate::utils::{fmt_date, fmt_human_date, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, user, sub)?,
        Some(("list", sub)) => list(conn, user, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg(sub: &clap::ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name).cloned().unwrap_or_default()
}

fn add(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let input = TransactionInput {
        id: sub.get_one::<String>("id").cloned(),
        title: arg(sub, "title"),
        amount: arg(sub, "amount"),
        date: arg(sub, "date"),
        kind: arg(sub, "type"),
    };

    let store = SqliteStore::new(conn, user);
    let notifier = ConsoleNotifier::stdout();
    let ledger = Ledger::new(&store, &notifier);
    let live = ledger.live_totals();

    let outcome = ledger.add_transaction(&input)?;
    let tx = &outcome.transaction;
    println!(
        "Recorded {} {} '{}' on {} (id {})",
        tx.kind,
        tx.amount,
        tx.title,
        fmt_date(&tx.date),
        tx.id
    );
    let t = live.current();
    println!(
        "Income {:.2} | Expense {:.2} | Balance {:.2}",
        t.income, t.expense, t.balance
    );
    Ok(())
}

/// Filter flags resolved against `today`.
pub fn filtered(
    store: &dyn Store,
    sub: &clap::ArgMatches,
    today: NaiveDate,
) -> Result<Vec<Transaction>> {
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TypeFilter>())
        .transpose()?
        .unwrap_or_default();
    let range = sub
        .get_one::<String>("range")
        .map(|s| s.parse::<DateRange>())
        .transpose()?
        .unwrap_or_default();
    Ok(filters::apply(store.transactions()?, kind, range, today))
}

pub fn query_rows(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let store = SqliteStore::new(conn, user);
    filtered(&store, sub, Local::now().date_naive())
}

fn list(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, user, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions match the filters");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    fmt_human_date(&t.date),
                    t.title.clone(),
                    format!("{:.2}", t.amount),
                    t.kind.to_string(),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Title", "Amount", "Type", "ID"], rows)
        );
    }
    Ok(())
}
