// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Per-user persistence. Everything above this layer talks to the [`Store`] trait so
//! the limit checker and the ledger can be driven by any backing store.

use crate::error::StoreError;
use crate::models::{Limit, Notification, TimePeriod, Transaction, TxType, UserProfile};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use uuid::Uuid;

const ISO_DATE: &str = "%Y-%m-%d";

/// Document collections of a single user.
pub trait Store {
    fn user_id(&self) -> &str;

    fn profile(&self) -> Result<Option<UserProfile>, StoreError>;
    /// Merges name, mobile number and age into the profile record.
    fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;
    /// Clears `isNewUser`, creating the profile if needed.
    fn mark_returning_user(&self) -> Result<(), StoreError>;

    /// Insert or replace by id.
    fn put_transaction(&self, tx: &Transaction) -> Result<(), StoreError>;
    fn transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    /// Transactions titled `title` dated on or after `since`.
    fn transactions_since(
        &self,
        title: &str,
        since: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError>;

    fn limits(&self) -> Result<Vec<Limit>, StoreError>;
    /// Keyed upsert on category. An existing limit keeps its id.
    fn put_limit(
        &self,
        category: &str,
        limit: Decimal,
        period: TimePeriod,
    ) -> Result<Limit, StoreError>;

    fn add_notification(&self, n: &Notification) -> Result<(), StoreError>;
    /// Newest first.
    fn notifications(&self, unread_only: bool) -> Result<Vec<Notification>, StoreError>;
    fn mark_notification_read(&self, id: &str) -> Result<(), StoreError>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
    user: String,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection, user: impl Into<String>) -> Self {
        Self {
            conn,
            user: user.into(),
        }
    }

    fn collect_transactions(
        &self,
        sql: &str,
        args: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
                r.get::<_, String>(4)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, title, amount, date, kind) = row?;
            out.push(transaction_from_columns(id, title, &amount, &date, &kind)?);
        }
        Ok(out)
    }
}

fn transaction_from_columns(
    id: String,
    title: String,
    amount: &str,
    date: &str,
    kind: &str,
) -> Result<Transaction, StoreError> {
    let amount = amount.parse::<Decimal>().map_err(|_| StoreError::Corrupt {
        field: "amount",
        value: amount.to_string(),
    })?;
    let kind = kind.parse::<TxType>().map_err(|_| StoreError::Corrupt {
        field: "type",
        value: kind.to_string(),
    })?;
    let date = match NaiveDate::parse_from_str(date, ISO_DATE) {
        Ok(d) => d,
        Err(_) => {
            tracing::warn!(id = %id, raw = %date, "unparseable transaction date, using today");
            Local::now().date_naive()
        }
    };
    Ok(Transaction {
        id,
        title,
        amount,
        date,
        kind,
    })
}

impl Store for SqliteStore<'_> {
    fn user_id(&self) -> &str {
        &self.user
    }

    fn profile(&self) -> Result<Option<UserProfile>, StoreError> {
        let p = self
            .conn
            .query_row(
                "SELECT is_new_user, name, mobile_number, age FROM users WHERE id=?1",
                params![self.user],
                |r| {
                    Ok(UserProfile {
                        is_new_user: r.get::<_, bool>(0)?,
                        name: r.get(1)?,
                        mobile_number: r.get(2)?,
                        age: r.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(p)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO users(id, is_new_user, name, mobile_number, age) VALUES (?1,?2,?3,?4,?5)
             ON CONFLICT(id) DO UPDATE SET name=excluded.name,
                mobile_number=excluded.mobile_number, age=excluded.age",
            params![
                self.user,
                profile.is_new_user,
                profile.name,
                profile.mobile_number,
                profile.age
            ],
        )?;
        tracing::info!(user = %self.user, "profile saved");
        Ok(())
    }

    fn mark_returning_user(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO users(id, is_new_user) VALUES (?1, 0)
             ON CONFLICT(id) DO UPDATE SET is_new_user=0",
            params![self.user],
        )?;
        Ok(())
    }

    fn put_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO transactions(user_id, id, title, amount, date, type)
             VALUES (?1,?2,?3,?4,?5,?6)
             ON CONFLICT(user_id, id) DO UPDATE SET title=excluded.title,
                amount=excluded.amount, date=excluded.date, type=excluded.type",
            params![
                self.user,
                tx.id,
                tx.title,
                tx.amount.to_string(),
                tx.date.format(ISO_DATE).to_string(),
                tx.kind.as_str()
            ],
        )?;
        tracing::info!(user = %self.user, id = %tx.id, title = %tx.title, "transaction stored");
        Ok(())
    }

    fn transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        self.collect_transactions(
            "SELECT id, title, amount, date, type FROM transactions
             WHERE user_id=?1 ORDER BY date DESC, created_at DESC, id",
            &[&self.user],
        )
    }

    fn transactions_since(
        &self,
        title: &str,
        since: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        let since = since.format(ISO_DATE).to_string();
        self.collect_transactions(
            "SELECT id, title, amount, date, type FROM transactions
             WHERE user_id=?1 AND title=?2 AND date>=?3 ORDER BY date, id",
            &[&self.user, &title, &since],
        )
    }

    fn limits(&self) -> Result<Vec<Limit>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, category, amount, time_period FROM limits WHERE user_id=?1 ORDER BY category",
        )?;
        let rows = stmt.query_map(params![self.user], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;
        let mut out = Vec::new();
        for row in rows {
            let (id, category, amount, period) = row?;
            let limit = amount.parse::<Decimal>().map_err(|_| StoreError::Corrupt {
                field: "limit",
                value: amount.clone(),
            })?;
            let time_period = TimePeriod::from_stored(&period);
            let stored_period = (time_period == TimePeriod::Unspecified).then_some(period);
            out.push(Limit {
                id,
                category,
                limit,
                time_period,
                stored_period,
            });
        }
        Ok(out)
    }

    fn put_limit(
        &self,
        category: &str,
        limit: Decimal,
        period: TimePeriod,
    ) -> Result<Limit, StoreError> {
        self.conn.execute(
            "INSERT INTO limits(user_id, category, id, amount, time_period) VALUES (?1,?2,?3,?4,?5)
             ON CONFLICT(user_id, category) DO UPDATE SET amount=excluded.amount,
                time_period=excluded.time_period",
            params![
                self.user,
                category,
                Uuid::new_v4().to_string(),
                limit.to_string(),
                period.as_str()
            ],
        )?;
        let id: String = self.conn.query_row(
            "SELECT id FROM limits WHERE user_id=?1 AND category=?2",
            params![self.user, category],
            |r| r.get(0),
        )?;
        tracing::info!(user = %self.user, category, %limit, %period, "limit saved");
        Ok(Limit {
            id,
            category: category.to_string(),
            limit,
            time_period: period,
            stored_period: None,
        })
    }

    fn add_notification(&self, n: &Notification) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO notifications(user_id, id, type, message, is_read, timestamp)
             VALUES (?1,?2,?3,?4,?5,?6)",
            params![self.user, n.id, n.kind, n.message, n.is_read, n.timestamp],
        )?;
        Ok(())
    }

    fn notifications(&self, unread_only: bool) -> Result<Vec<Notification>, StoreError> {
        let sql = if unread_only {
            "SELECT id, type, message, is_read, timestamp FROM notifications
             WHERE user_id=?1 AND is_read=0 ORDER BY timestamp DESC, id"
        } else {
            "SELECT id, type, message, is_read, timestamp FROM notifications
             WHERE user_id=?1 ORDER BY timestamp DESC, id"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params![self.user], |r| {
            Ok(Notification {
                id: r.get(0)?,
                kind: r.get(1)?,
                message: r.get(2)?,
                is_read: r.get(3)?,
                timestamp: r.get(4)?,
            })
        })?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn mark_notification_read(&self, id: &str) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE notifications SET is_read=1 WHERE user_id=?1 AND id=?2",
            params![self.user, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("notification '{}'", id)));
        }
        tracing::debug!(user = %self.user, id, "notification marked read");
        Ok(())
    }
}
