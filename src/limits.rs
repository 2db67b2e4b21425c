// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spending-limit evaluation.
//!
//! For each limit the checker sums every transaction titled with the category since the
//! start of the limit's current period. When the sum is strictly greater than the threshold the user
//! is alerted and a notification record is kept for later review.

use crate::error::StoreError;
use crate::models::{Limit, Notification, TimePeriod};
use crate::notify::{Alert, Notifier};
use crate::store::Store;
use crate::utils::fmt_amount;
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, TimeZone};
use rust_decimal::Decimal;
use uuid::Uuid;

pub const LIMIT_EXCEEDED: &str = "Limit Exceeded";

/// First calendar day of the window `period` is currently in.
pub fn period_start(period: TimePeriod, today: NaiveDate) -> NaiveDate {
    match period {
        TimePeriod::Monthly => today.with_day(1).unwrap_or(today),
        TimePeriod::Weekly => {
            let back = today.weekday().num_days_from_monday();
            today
                .checked_sub_days(Days::new(u64::from(back)))
                .unwrap_or(today)
        }
        TimePeriod::Yearly => today.with_ordinal(1).unwrap_or(today),
        TimePeriod::Daily | TimePeriod::Unspecified => today,
    }
}

pub fn breach_alert(limit: &Limit) -> Alert {
    Alert {
        title: format!("{}: {}", LIMIT_EXCEEDED, limit.category),
        message: format!(
            "You have exceeded your {} limit of {} for {}.",
            limit.period_label(),
            fmt_amount(&limit.limit),
            limit.category
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breach {
    pub limit: Limit,
    pub spent: Decimal,
    pub since: NaiveDate,
}

pub struct LimitChecker<'a> {
    store: &'a dyn Store,
    notifier: &'a dyn Notifier,
}

impl<'a> LimitChecker<'a> {
    pub fn new(store: &'a dyn Store, notifier: &'a dyn Notifier) -> Self {
        Self { store, notifier }
    }

    pub fn check(&self, category: Option<&str>) -> Result<Vec<Breach>, StoreError> {
        self.check_at(category, Local::now())
    }

    /// Evaluates every limit (or only `category`'s) as of `now`.
    ///
    /// Only a failure to load the limits is returned. Anything that goes wrong while
    /// evaluating one limit is logged and the remaining limits are still checked.
    pub fn check_at<Tz: TimeZone>(
        &self,
        category: Option<&str>,
        now: DateTime<Tz>,
    ) -> Result<Vec<Breach>, StoreError> {
        let limits = self.store.limits().inspect_err(|e| {
            tracing::error!(user = %self.store.user_id(), error = %e, "failed to load limits");
        })?;
        let today = now.date_naive();
        let millis = now.timestamp_millis();

        let mut breaches = Vec::new();
        for limit in limits
            .into_iter()
            .filter(|l| category.is_none_or(|c| l.category == c))
        {
            match self.evaluate(&limit, today) {
                Ok(Some((spent, since))) => {
                    self.raise(&limit, millis);
                    breaches.push(Breach {
                        limit,
                        spent,
                        since,
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        category = %limit.category,
                        error = %e,
                        "failed to evaluate spending limit"
                    );
                }
            }
        }
        Ok(breaches)
    }

    fn evaluate(
        &self,
        limit: &Limit,
        today: NaiveDate,
    ) -> Result<Option<(Decimal, NaiveDate)>, StoreError> {
        let since = period_start(limit.time_period, today);
        tracing::debug!(category = %limit.category, %since, "checking limit");

        let spent: Decimal = self
            .store
            .transactions_since(&limit.category, since)?
            .iter()
            .map(|t| t.amount)
            .sum();
        tracing::debug!(category = %limit.category, %spent, limit = %limit.limit, "spending total");

        Ok((spent > limit.limit).then_some((spent, since)))
    }

    fn raise(&self, limit: &Limit, millis: i64) {
        let alert = breach_alert(limit);
        if let Err(e) = self.notifier.notify(&alert) {
            tracing::error!(category = %limit.category, error = %e, "failed to deliver alert");
        }
        let record = Notification {
            id: Uuid::new_v4().to_string(),
            kind: LIMIT_EXCEEDED.to_string(),
            message: alert.message,
            is_read: false,
            timestamp: millis,
        };
        match self.store.add_notification(&record) {
            Ok(()) => tracing::info!(category = %limit.category, id = %record.id, "limit breach recorded"),
            Err(e) => {
                tracing::error!(category = %limit.category, error = %e, "failed to save notification")
            }
        }
    }
}
