// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EXPENSE_CATEGORIES, INCOME_CATEGORIES};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn rows(income: bool, expense: bool) -> Vec<Vec<String>> {
    let (show_income, show_expense) = match (income, expense) {
        (false, false) => (true, true),
        other => other,
    };
    let mut data = Vec::new();
    if show_expense {
        data.extend(EXPENSE_CATEGORIES.iter().map(|c| vec![c.to_string(), "Expense".into()]));
    }
    if show_income {
        data.extend(INCOME_CATEGORIES.iter().map(|c| vec![c.to_string(), "Income".into()]));
    }
    data
}

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let data = rows(m.get_flag("income"), m.get_flag("expense"));
    println!("{}", pretty_table(&["Title", "Type"], data));
    Ok(())
}
