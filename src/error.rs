// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by a [`crate::store::Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("invalid {field} '{value}' in stored record")]
    Corrupt { field: &'static str, value: String },
    #[error("{0} not found")]
    NotFound(String),
}

/// Rejected user input. Raised before anything is written.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("amount must not be negative (got {0})")]
    NegativeAmount(Decimal),
    #[error("invalid date '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),
    #[error("unknown transaction type '{0}' (use income|expense)")]
    UnknownType(String),
    #[error("unknown time period '{0}' (use daily|weekly|monthly|yearly)")]
    UnknownPeriod(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
