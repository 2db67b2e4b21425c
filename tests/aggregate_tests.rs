// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendsavvy::aggregate::{LiveTotals, Totals, daily_expenses, spend_by_category, top_expenses, totals};
use spendsavvy::feed::Feed;
use spendsavvy::models::{Transaction, TxType};

fn tx(id: &str, title: &str, amount: &str, (y, m, d): (i32, u32, u32), kind: TxType) -> Transaction {
    Transaction {
        id: id.into(),
        title: title.into(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        kind,
    }
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample() -> Vec<Transaction> {
    vec![
        tx("1", "Salary", "3000", (2025, 1, 1), TxType::Income),
        tx("2", "Rent", "1200", (2025, 1, 2), TxType::Expense),
        tx("3", "Grocery", "85.40", (2025, 1, 2), TxType::Expense),
        tx("4", "Grocery", "14.60", (2024, 12, 31), TxType::Expense),
        tx("5", "Bonus", "200", (2025, 1, 5), TxType::Income),
        tx("6", "Netflix", "15.49", (2025, 1, 10), TxType::Expense),
    ]
}

#[test]
fn empty_list_is_all_zero() {
    assert_eq!(totals(&[]), Totals::default());
    let t = totals(&[]);
    assert_eq!(t.income, Decimal::ZERO);
    assert_eq!(t.expense, Decimal::ZERO);
    assert_eq!(t.balance, Decimal::ZERO);
}

#[test]
fn totals_split_by_type() {
    let t = totals(&sample());
    assert_eq!(t.income, dec("3200"));
    assert_eq!(t.expense, dec("1315.49"));
    assert_eq!(t.balance, dec("1884.51"));
}

#[test]
fn balance_is_income_minus_expense_for_every_prefix() {
    let all = sample();
    for n in 0..=all.len() {
        let t = totals(&all[..n]);
        assert_eq!(t.balance, t.income - t.expense);
        assert!(t.income >= Decimal::ZERO);
        assert!(t.expense >= Decimal::ZERO);
    }
}

#[test]
fn type_names_parse_case_insensitively() {
    assert_eq!("INCOME".parse::<TxType>().unwrap(), TxType::Income);
    assert_eq!(" expense ".parse::<TxType>().unwrap(), TxType::Expense);
    assert!("refund".parse::<TxType>().is_err());
}

#[test]
fn spend_by_category_sums_titles_largest_first() {
    let by_cat = spend_by_category(&sample(), TxType::Expense);
    assert_eq!(
        by_cat,
        vec![
            ("Rent".to_string(), dec("1200")),
            ("Grocery".to_string(), dec("100.00")),
            ("Netflix".to_string(), dec("15.49")),
        ]
    );
}

#[test]
fn daily_expenses_are_in_calendar_order() {
    let series = daily_expenses(&sample());
    let days: Vec<String> = series.iter().map(|(d, _)| d.to_string()).collect();
    assert_eq!(days, vec!["2024-12-31", "2025-01-02", "2025-01-10"]);
    assert_eq!(series[1].1, dec("1285.40"));
}

#[test]
fn top_expenses_are_largest_first_and_capped() {
    let top = top_expenses(&sample(), 2);
    let ids: Vec<&str> = top.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3"]);
    assert_eq!(top_expenses(&sample(), 5).len(), 4);
}

#[test]
fn live_totals_recompute_on_publish() {
    let feed: Feed<Transaction> = Feed::new();
    let live = LiveTotals::attach(&feed);
    assert_eq!(live.current(), Totals::default());

    feed.publish(sample());
    assert_eq!(live.current().balance, dec("1884.51"));

    feed.publish(Vec::new());
    assert_eq!(live.current(), Totals::default());

    drop(live);
    assert_eq!(feed.subscriber_count(), 0);
}
