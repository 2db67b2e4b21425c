// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::feed::{Feed, Subscription};
use crate::models::{Transaction, TxType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

pub fn totals(txs: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in txs {
        match tx.kind {
            TxType::Income => income += tx.amount,
            TxType::Expense => expense += tx.amount,
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Per-title sums for one transaction type, largest first.
pub fn spend_by_category(txs: &[Transaction], kind: TxType) -> Vec<(String, Decimal)> {
    let mut agg: HashMap<&str, Decimal> = HashMap::new();
    for tx in txs.iter().filter(|t| t.kind == kind) {
        *agg.entry(tx.title.as_str()).or_insert(Decimal::ZERO) += tx.amount;
    }
    let mut items: Vec<(String, Decimal)> =
        agg.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}

/// Expense totals per day, oldest first.
pub fn daily_expenses(txs: &[Transaction]) -> Vec<(NaiveDate, Decimal)> {
    let mut by_day: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in txs.iter().filter(|t| t.kind == TxType::Expense) {
        *by_day.entry(tx.date).or_insert(Decimal::ZERO) += tx.amount;
    }
    by_day.into_iter().collect()
}

pub fn top_expenses(txs: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut expenses: Vec<Transaction> = txs
        .iter()
        .filter(|t| t.kind == TxType::Expense)
        .cloned()
        .collect();
    // stable: ties keep feed order
    expenses.sort_by(|a, b| b.amount.cmp(&a.amount));
    expenses.truncate(n);
    expenses
}

/// Running totals kept in step with a transaction feed.
pub struct LiveTotals {
    latest: Arc<Mutex<Totals>>,
    _subscription: Subscription,
}

impl LiveTotals {
    pub fn attach(feed: &Feed<Transaction>) -> Self {
        let latest = Arc::new(Mutex::new(Totals::default()));
        let sink = Arc::clone(&latest);
        let subscription = feed.subscribe(move |txs| {
            let mut slot = sink.lock().unwrap_or_else(|p| p.into_inner());
            *slot = totals(txs);
        });
        Self {
            latest,
            _subscription: subscription,
        }
    }

    pub fn current(&self) -> Totals {
        *self.latest.lock().unwrap_or_else(|p| p.into_inner())
    }
}
