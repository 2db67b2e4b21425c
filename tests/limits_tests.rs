// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use spendsavvy::db;
use spendsavvy::error::StoreError;
use spendsavvy::limits::{LimitChecker, period_start};
use spendsavvy::models::{Limit, Notification, TimePeriod, Transaction, TxType, UserProfile};
use spendsavvy::notify::{Alert, ConsoleNotifier, Notifier, RecordingNotifier};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use spendsavvy::store::{SqliteStore, Store};

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn put(store: &dyn Store, id: &str, title: &str, amount: &str, on: NaiveDate, kind: TxType) {
    store
        .put_transaction(&Transaction {
            id: id.into(),
            title: title.into(),
            amount: dec(amount),
            date: on,
            kind,
        })
        .unwrap();
}

#[test]
fn weekly_start_is_monday_on_or_before_today() {
    // 2025-03-19 is a Wednesday
    assert_eq!(
        period_start(TimePeriod::Weekly, date(2025, 3, 19)),
        date(2025, 3, 17)
    );
    assert_eq!(
        period_start(TimePeriod::Weekly, date(2025, 3, 17)),
        date(2025, 3, 17)
    );
    assert_eq!(
        period_start(TimePeriod::Weekly, date(2025, 3, 23)),
        date(2025, 3, 17)
    );
    // week spanning a year boundary
    assert_eq!(
        period_start(TimePeriod::Weekly, date(2025, 1, 2)),
        date(2024, 12, 30)
    );
}

#[test]
fn other_period_starts() {
    let today = date(2025, 3, 19);
    assert_eq!(period_start(TimePeriod::Monthly, today), date(2025, 3, 1));
    assert_eq!(period_start(TimePeriod::Yearly, today), date(2025, 1, 1));
    assert_eq!(period_start(TimePeriod::Daily, today), today);
    assert_eq!(period_start(TimePeriod::Unspecified, today), today);
}

#[test]
fn monthly_breach_alerts_once_and_records_notification() {
    let conn = setup();
    let store = SqliteStore::new(&conn, "u1");
    store
        .put_limit("Grocery", dec("100"), TimePeriod::Monthly)
        .unwrap();
    put(&store, "a", "Grocery", "60", date(2025, 3, 1), TxType::Expense);
    put(&store, "b", "Grocery", "50", date(2025, 3, 15), TxType::Expense);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();

    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].spent, dec("110"));
    assert_eq!(breaches[0].since, date(2025, 3, 1));

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Limit Exceeded: Grocery");
    assert_eq!(
        sent[0].message,
        "You have exceeded your Monthly limit of 100.0 for Grocery."
    );

    let stored = store.notifications(true).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].kind, "Limit Exceeded");
    assert_eq!(stored[0].message, sent[0].message);
    assert!(!stored[0].is_read);
    assert_eq!(stored[0].timestamp, now.timestamp_millis());
}

#[test]
fn spending_within_limit_is_silent() {
    let conn = setup();
    let store = SqliteStore::new(&conn, "u1");
    store
        .put_limit("Grocery", dec("100"), TimePeriod::Monthly)
        .unwrap();
    put(&store, "a", "Grocery", "60", date(2025, 3, 1), TxType::Expense);
    put(&store, "b", "Grocery", "30", date(2025, 3, 15), TxType::Expense);
    // exactly at the threshold is not a breach
    put(&store, "c", "Grocery", "10", date(2025, 3, 16), TxType::Expense);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();

    assert!(breaches.is_empty());
    assert!(notifier.sent().is_empty());
    assert!(store.notifications(false).unwrap().is_empty());
}

#[test]
fn every_row_titled_with_the_category_counts_in_the_window() {
    let conn = setup();
    let store = SqliteStore::new(&conn, "u1");
    store
        .put_limit("Paypal", dec("100"), TimePeriod::Monthly)
        .unwrap();
    put(&store, "e", "Paypal", "60", date(2025, 3, 2), TxType::Expense);
    put(&store, "i", "Paypal", "50", date(2025, 3, 2), TxType::Income);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].spent, dec("110"));
    assert_eq!(notifier.sent().len(), 1);
}

#[test]
fn earlier_periods_do_not_count() {
    let conn = setup();
    let store = SqliteStore::new(&conn, "u1");
    store
        .put_limit("Paypal", dec("50"), TimePeriod::Yearly)
        .unwrap();
    // last year's row sorts after 01/01/2025 as text but is outside the window
    put(&store, "old", "Paypal", "500", date(2024, 12, 31), TxType::Expense);
    put(&store, "in", "Paypal", "40", date(2025, 1, 3), TxType::Income);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 1, 5, 9, 0, 0).unwrap();
    let checker = LimitChecker::new(&store, &notifier);
    assert!(checker.check_at(None, now).unwrap().is_empty());

    put(&store, "out", "Paypal", "20", date(2025, 1, 4), TxType::Expense);
    let breaches = checker.check_at(None, now).unwrap();
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].spent, dec("60"));
    assert_eq!(breaches[0].since, date(2025, 1, 1));
}

#[test]
fn unknown_stored_period_is_named_as_stored() {
    let conn = setup();
    conn.execute(
        "INSERT INTO limits(user_id, category, id, amount, time_period)
         VALUES ('u1', 'Rent', 'l1', '10', 'Fortnightly')",
        [],
    )
    .unwrap();
    let store = SqliteStore::new(&conn, "u1");
    let limits = store.limits().unwrap();
    assert_eq!(limits[0].time_period, TimePeriod::Unspecified);
    assert_eq!(limits[0].period_label(), "Fortnightly");

    // evaluated like a daily limit
    put(&store, "y", "Rent", "500", date(2025, 3, 18), TxType::Expense);
    put(&store, "t", "Rent", "11", date(2025, 3, 19), TxType::Expense);
    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].spent, dec("11"));
    assert_eq!(
        notifier.sent()[0].message,
        "You have exceeded your Fortnightly limit of 10.0 for Rent."
    );
}

#[test]
fn console_alert_names_channel_and_points_at_notifications() {
    let notifier = ConsoleNotifier::new(Vec::new());
    notifier
        .notify(&Alert {
            title: "Limit Exceeded: Grocery".into(),
            message: "You have exceeded your Monthly limit of 100.0 for Grocery.".into(),
        })
        .unwrap();
    let text = String::from_utf8(notifier.into_inner()).unwrap();
    let expected = concat!(
        "(!) [Spending Limit Notifications] Limit Exceeded: Grocery\n",
        "    You have exceeded your Monthly limit of 100.0 for Grocery.\n",
        "    run `spendsavvy notifications list` to review\n",
    );
    assert_eq!(text, expected);
}

#[test]
fn category_argument_narrows_the_check() {
    let conn = setup();
    let store = SqliteStore::new(&conn, "u1");
    store.put_limit("Rent", dec("10"), TimePeriod::Monthly).unwrap();
    store
        .put_limit("Travel", dec("10"), TimePeriod::Monthly)
        .unwrap();
    put(&store, "r", "Rent", "500", date(2025, 3, 2), TxType::Expense);
    put(&store, "t", "Travel", "80", date(2025, 3, 2), TxType::Expense);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(Some("Travel"), now)
        .unwrap();
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].limit.category, "Travel");
    assert_eq!(notifier.sent().len(), 1);
}

/// Delegates to SQLite but fails transaction lookups for one category and,
/// optionally, every notification write.
struct FlakyStore<'c> {
    inner: SqliteStore<'c>,
    broken: &'static str,
    notifications_down: bool,
}

impl Store for FlakyStore<'_> {
    fn user_id(&self) -> &str {
        self.inner.user_id()
    }
    fn profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.inner.profile()
    }
    fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.inner.save_profile(profile)
    }
    fn mark_returning_user(&self) -> Result<(), StoreError> {
        self.inner.mark_returning_user()
    }
    fn put_transaction(&self, tx: &Transaction) -> Result<(), StoreError> {
        self.inner.put_transaction(tx)
    }
    fn transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        self.inner.transactions()
    }
    fn transactions_since(
        &self,
        title: &str,
        since: NaiveDate,
    ) -> Result<Vec<Transaction>, StoreError> {
        if title == self.broken {
            return Err(StoreError::NotFound("transactions".into()));
        }
        self.inner.transactions_since(title, since)
    }
    fn limits(&self) -> Result<Vec<Limit>, StoreError> {
        self.inner.limits()
    }
    fn put_limit(
        &self,
        category: &str,
        limit: Decimal,
        period: TimePeriod,
    ) -> Result<Limit, StoreError> {
        self.inner.put_limit(category, limit, period)
    }
    fn add_notification(&self, n: &Notification) -> Result<(), StoreError> {
        if self.notifications_down {
            return Err(StoreError::NotFound("notifications".into()));
        }
        self.inner.add_notification(n)
    }
    fn notifications(&self, unread_only: bool) -> Result<Vec<Notification>, StoreError> {
        self.inner.notifications(unread_only)
    }
    fn mark_notification_read(&self, id: &str) -> Result<(), StoreError> {
        self.inner.mark_notification_read(id)
    }
}

#[test]
fn one_failing_category_does_not_stop_the_others() {
    let conn = setup();
    let store = FlakyStore {
        inner: SqliteStore::new(&conn, "u1"),
        broken: "Rent",
        notifications_down: false,
    };
    store.put_limit("Rent", dec("10"), TimePeriod::Monthly).unwrap();
    store
        .put_limit("Travel", dec("10"), TimePeriod::Monthly)
        .unwrap();
    put(&store, "r", "Rent", "500", date(2025, 3, 2), TxType::Expense);
    put(&store, "t", "Travel", "80", date(2025, 3, 2), TxType::Expense);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();
    assert_eq!(breaches.len(), 1);
    assert_eq!(breaches[0].limit.category, "Travel");
    assert_eq!(store.notifications(true).unwrap().len(), 1);
}

/// Refuses every alert.
struct DeadNotifier {
    attempts: AtomicUsize,
}

impl Notifier for DeadNotifier {
    fn notify(&self, _alert: &Alert) -> io::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "no display"))
    }
}

fn two_breached_limits(store: &dyn Store) {
    store.put_limit("Rent", dec("10"), TimePeriod::Monthly).unwrap();
    store
        .put_limit("Travel", dec("10"), TimePeriod::Monthly)
        .unwrap();
    put(store, "r", "Rent", "500", date(2025, 3, 2), TxType::Expense);
    put(store, "t", "Travel", "80", date(2025, 3, 2), TxType::Expense);
}

#[test]
fn failed_alert_still_records_breach_and_checks_the_rest() {
    let conn = setup();
    let store = SqliteStore::new(&conn, "u1");
    two_breached_limits(&store);

    let notifier = DeadNotifier {
        attempts: AtomicUsize::new(0),
    };
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();
    let categories: Vec<&str> = breaches.iter().map(|b| b.limit.category.as_str()).collect();
    assert_eq!(categories, vec!["Rent", "Travel"]);
    assert_eq!(notifier.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(store.notifications(true).unwrap().len(), 2);
}

#[test]
fn failed_notification_write_does_not_stop_the_others() {
    let conn = setup();
    let store = FlakyStore {
        inner: SqliteStore::new(&conn, "u1"),
        broken: "",
        notifications_down: true,
    };
    two_breached_limits(&store);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    let breaches = LimitChecker::new(&store, &notifier)
        .check_at(None, now)
        .unwrap();
    assert_eq!(breaches.len(), 2);
    assert_eq!(notifier.sent().len(), 2);
    assert!(store.notifications(false).unwrap().is_empty());
}

#[test]
fn limits_are_per_user() {
    let conn = setup();
    let alice = SqliteStore::new(&conn, "alice");
    let bob = SqliteStore::new(&conn, "bob");
    alice
        .put_limit("Grocery", dec("10"), TimePeriod::Monthly)
        .unwrap();
    put(&bob, "b1", "Grocery", "99", date(2025, 3, 2), TxType::Expense);

    let notifier = RecordingNotifier::new();
    let now = Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap();
    assert!(
        LimitChecker::new(&alice, &notifier)
            .check_at(None, now)
            .unwrap()
            .is_empty()
    );
    assert!(
        LimitChecker::new(&bob, &notifier)
            .check_at(None, now)
            .unwrap()
            .is_empty()
    );
}
