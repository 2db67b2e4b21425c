// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{daily_expenses, spend_by_category, top_expenses};
use crate::ledger::{Home, Ledger};
use crate::models::TxType;
use crate::notify::ConsoleNotifier;
use crate::store::SqliteStore;
use crate::utils::{fmt_date, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use serde_json::{Value, json};

/// JSON body of `summary`. A new user gets zero totals and no categories.
pub fn summary_payload(home: &Home) -> Value {
    let by_cat = spend_by_category(&home.transactions, TxType::Expense);
    json!({
        "isNewUser": home.is_new_user,
        "totalIncome": home.totals.income,
        "totalExpense": home.totals.expense,
        "balance": home.totals.balance,
        "expenseByCategory": by_cat
            .iter()
            .map(|(c, a)| json!({"category": c, "amount": a}))
            .collect::<Vec<_>>(),
    })
}

pub fn summary(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn, user);
    let notifier = ConsoleNotifier::stdout();
    let ledger = Ledger::new(&store, &notifier);
    let home = ledger.home()?;

    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &summary_payload(&home))? {
        return Ok(());
    }
    if home.is_new_user {
        println!("No transactions yet. Add one with `spendsavvy tx add`.");
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                format!("{:.2}", home.totals.income),
                format!("{:.2}", home.totals.expense),
                format!("{:.2}", home.totals.balance),
            ]],
        )
    );
    let by_cat = spend_by_category(&home.transactions, TxType::Expense);
    if !by_cat.is_empty() {
        let rows = by_cat
            .into_iter()
            .map(|(c, a)| vec![c, format!("{:.2}", a)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

pub fn stats(conn: &Connection, user: &str, sub: &clap::ArgMatches) -> Result<()> {
    let top_n = *sub.get_one::<usize>("top").unwrap_or(&5);
    let store = SqliteStore::new(conn, user);
    let notifier = ConsoleNotifier::stdout();
    let ledger = Ledger::new(&store, &notifier);
    ledger.refresh()?;
    let txs = ledger.transactions();

    let series = daily_expenses(&txs);
    let top = top_expenses(&txs, top_n);
    let payload = json!({
        "chart": series
            .iter()
            .map(|(d, a)| json!({"date": fmt_date(d), "amount": a}))
            .collect::<Vec<_>>(),
        "topExpenses": &top,
    });
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &payload)? {
        return Ok(());
    }
    let chart_rows = series
        .iter()
        .map(|(d, a)| vec![fmt_date(d), format!("{:.2}", a)])
        .collect();
    println!("{}", pretty_table(&["Date", "Spent"], chart_rows));
    let top_rows = top
        .iter()
        .map(|t| vec![t.title.clone(), format!("{:.2}", t.amount), fmt_date(&t.date)])
        .collect();
    println!("{}", pretty_table(&["Top expense", "Amount", "Date"], top_rows));
    Ok(())
}
