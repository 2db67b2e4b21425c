// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TxType};
use chrono::{Days, Months, NaiveDate};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(TxType),
}

impl TypeFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => tx.kind == *kind,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            other => Ok(TypeFilter::Only(other.parse::<TxType>()?)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateRange {
    #[default]
    AllTime,
    Today,
    Yesterday,
    Last30Days,
    Last90Days,
    LastYear,
}

impl DateRange {
    pub fn label(&self) -> &'static str {
        match self {
            DateRange::AllTime => "All Time",
            DateRange::Today => "Today",
            DateRange::Yesterday => "Yesterday",
            DateRange::Last30Days => "Last 30 Days",
            DateRange::Last90Days => "Last 90 Days",
            DateRange::LastYear => "Last Year",
        }
    }

    /// Inclusive `[from, to]` window relative to `today`; `None` means unbounded.
    pub fn window(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        let back_days = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN);
        match self {
            DateRange::AllTime => None,
            DateRange::Today => Some((today, today)),
            DateRange::Yesterday => {
                let y = back_days(1);
                Some((y, y))
            }
            DateRange::Last30Days => Some((back_days(30), today)),
            DateRange::Last90Days => Some((back_days(90), today)),
            DateRange::LastYear => Some((
                today
                    .checked_sub_months(Months::new(12))
                    .unwrap_or(NaiveDate::MIN),
                today,
            )),
        }
    }

    pub fn matches(&self, tx: &Transaction, today: NaiveDate) -> bool {
        match self.window(today) {
            None => true,
            Some((from, to)) => tx.date >= from && tx.date <= to,
        }
    }
}

impl FromStr for DateRange {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "alltime" | "all" => Ok(DateRange::AllTime),
            "today" => Ok(DateRange::Today),
            "yesterday" => Ok(DateRange::Yesterday),
            "last30days" => Ok(DateRange::Last30Days),
            "last90days" => Ok(DateRange::Last90Days),
            "lastyear" => Ok(DateRange::LastYear),
            _ => Err(anyhow::anyhow!(
                "Unknown date range '{}' (use all-time|today|yesterday|last-30-days|last-90-days|last-year)",
                s
            )),
        }
    }
}

pub fn apply(
    txs: Vec<Transaction>,
    kind: TypeFilter,
    range: DateRange,
    today: NaiveDate,
) -> Vec<Transaction> {
    txs.into_iter()
        .filter(|t| kind.matches(t) && range.matches(t, today))
        .collect()
}
