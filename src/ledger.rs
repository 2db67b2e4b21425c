// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{LiveTotals, Totals, totals};
use crate::error::{LedgerError, StoreError, ValidationError};
use crate::feed::{Feed, Subscription};
use crate::limits::{Breach, LimitChecker};
use crate::models::{Limit, Notification, TimePeriod, Transaction, TransactionInput, TxType};
use crate::notify::Notifier;
use crate::store::Store;
use crate::utils::{parse_amount, parse_date};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use uuid::Uuid;

/// Checks a raw transaction and assigns an id when none was supplied.
pub fn validate_transaction(input: &TransactionInput) -> Result<Transaction, ValidationError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ValidationError::Missing("title"));
    }
    let amount = parse_amount(&input.amount)?;
    let date = parse_date(&input.date)?;
    let kind = input.kind.parse::<TxType>()?;
    let id = input
        .id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    Ok(Transaction {
        id,
        title: title.to_string(),
        amount,
        date,
        kind,
    })
}

#[derive(Debug, Clone)]
pub struct AddOutcome {
    pub transaction: Transaction,
    pub breaches: Vec<Breach>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Home {
    pub is_new_user: bool,
    pub totals: Totals,
    pub transactions: Vec<Transaction>,
}

/// Coordinates writes, the live transaction feed and limit checks for one user.
pub struct Ledger<'a> {
    store: &'a dyn Store,
    notifier: &'a dyn Notifier,
    feed: Feed<Transaction>,
}

impl<'a> Ledger<'a> {
    pub fn new(store: &'a dyn Store, notifier: &'a dyn Notifier) -> Self {
        Self {
            store,
            notifier,
            feed: Feed::new(),
        }
    }

    /// Reloads the transaction list and publishes it to subscribers.
    pub fn refresh(&self) -> Result<(), StoreError> {
        let txs = self.store.transactions().inspect_err(|e| {
            tracing::error!(user = %self.store.user_id(), error = %e, "failed to load transactions");
        })?;
        self.feed.publish(txs);
        Ok(())
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&[Transaction]) + Send + 'static,
    {
        self.feed.subscribe(listener)
    }

    pub fn live_totals(&self) -> LiveTotals {
        LiveTotals::attach(&self.feed)
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.feed.current()
    }

    pub fn home(&self) -> Result<Home, StoreError> {
        let is_new_user = self
            .store
            .profile()?
            .map(|p| p.is_new_user)
            .unwrap_or(true);
        if is_new_user {
            return Ok(Home {
                is_new_user,
                totals: Totals::default(),
                transactions: Vec::new(),
            });
        }
        self.refresh()?;
        let transactions = self.feed.current();
        Ok(Home {
            is_new_user,
            totals: totals(&transactions),
            transactions,
        })
    }

    pub fn add_transaction(&self, input: &TransactionInput) -> Result<AddOutcome, LedgerError> {
        self.add_transaction_at(input, Local::now())
    }

    pub fn add_transaction_at<Tz: TimeZone>(
        &self,
        input: &TransactionInput,
        now: DateTime<Tz>,
    ) -> Result<AddOutcome, LedgerError> {
        let tx = validate_transaction(input)?;

        let stored = self
            .store
            .mark_returning_user()
            .and_then(|_| self.store.put_transaction(&tx));
        if let Err(e) = stored {
            tracing::error!(id = %tx.id, error = %e, "error adding transaction");
            return Err(e.into());
        }
        self.refresh()?;

        let breaches = if tx.kind == TxType::Expense {
            tracing::debug!(category = %tx.title, "checking spending for category");
            LimitChecker::new(self.store, self.notifier)
                .check_at(Some(tx.title.as_str()), now)
                .unwrap_or_default()
        } else {
            Vec::new()
        };
        Ok(AddOutcome {
            transaction: tx,
            breaches,
        })
    }

    pub fn set_limit(&self, category: &str, amount: &str, period: &str) -> Result<Limit, LedgerError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ValidationError::Missing("category").into());
        }
        let limit = parse_amount(amount)?;
        let period = period.parse::<TimePeriod>()?;
        Ok(self.store.put_limit(category, limit, period)?)
    }

    pub fn limits(&self) -> Result<Vec<Limit>, StoreError> {
        self.store.limits()
    }

    pub fn check_limits(&self, category: Option<&str>) -> Result<Vec<Breach>, StoreError> {
        LimitChecker::new(self.store, self.notifier).check(category)
    }

    pub fn unread(&self) -> Result<Vec<Notification>, StoreError> {
        self.store.notifications(true)
    }

    /// Idempotent: marking an already-read notification is a no-op.
    pub fn mark_read(&self, id: &str) -> Result<(), StoreError> {
        self.store.mark_notification_read(id)
    }
}
