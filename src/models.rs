// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ValidationError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Grocery",
    "Netflix",
    "Rent",
    "Paypal",
    "Starbucks",
    "Shopping",
    "Transport",
    "Utilities",
    "Dining Out",
    "Entertainment",
    "Healthcare",
    "Insurance",
    "Subscriptions",
    "Education",
    "Debt Payments",
    "Gifts & Donations",
    "Travel",
    "Other Expenses",
];

pub const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Paypal",
    "Upwork",
    "Freelance",
    "Investments",
    "Bonus",
    "Rental Income",
    "Other Income",
];

/// Serde adapter for `dd/mm/yyyy` dates.
pub mod dmy {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%d/%m/%Y";

    pub fn serialize<S: Serializer>(d: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&d.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "Income",
            TxType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            _ => Err(ValidationError::UnknownType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimePeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// A stored period we don't recognise. Evaluated like `Daily`.
    Unspecified,
}

impl TimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Daily => "Daily",
            TimePeriod::Weekly => "Weekly",
            TimePeriod::Monthly => "Monthly",
            TimePeriod::Yearly => "Yearly",
            TimePeriod::Unspecified => "Unspecified",
        }
    }

    /// Lenient parse for values read back from storage.
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(TimePeriod::Unspecified)
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(TimePeriod::Daily),
            "weekly" => Ok(TimePeriod::Weekly),
            "monthly" => Ok(TimePeriod::Monthly),
            "yearly" => Ok(TimePeriod::Yearly),
            _ => Err(ValidationError::UnknownPeriod(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    #[serde(with = "dmy")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxType,
}

/// Raw, unvalidated transaction as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub id: Option<String>,
    pub title: String,
    pub amount: String,
    pub date: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    pub id: String,
    pub category: String,
    pub limit: Decimal,
    #[serde(rename = "timePeriod")]
    pub time_period: TimePeriod,
    /// Stored period text that didn't parse into a [`TimePeriod`].
    #[serde(skip)]
    pub stored_period: Option<String>,
}

impl Limit {
    /// Period name for messages, preferring the text that was stored.
    pub fn period_label(&self) -> &str {
        self.stored_period
            .as_deref()
            .unwrap_or_else(|| self.time_period.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "isNewUser")]
    pub is_new_user: bool,
    pub name: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    pub age: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            is_new_user: true,
            name: String::new(),
            mobile_number: String::new(),
            age: String::new(),
        }
    }
}
