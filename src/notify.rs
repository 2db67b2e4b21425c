// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};
use std::sync::Mutex;

pub const CHANNEL_ID: &str = "spending_limit_notifications";
pub const CHANNEL_NAME: &str = "Spending Limit Notifications";
const HIGH_IMPORTANCE: &str = "(!)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Immediate, ephemeral delivery of an alert to the user.
pub trait Notifier {
    fn notify(&self, alert: &Alert) -> io::Result<()>;
}

/// Prints alerts on the single high-importance spending channel.
pub struct ConsoleNotifier<W: Write + Send> {
    out: Mutex<W>,
}

impl ConsoleNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|p| p.into_inner())
    }
}

impl<W: Write + Send> Notifier for ConsoleNotifier<W> {
    fn notify(&self, alert: &Alert) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|p| p.into_inner());
        writeln!(out, "{} [{}] {}", HIGH_IMPORTANCE, CHANNEL_NAME, alert.title)?;
        writeln!(out, "    {}", alert.message)?;
        writeln!(out, "    run `spendsavvy notifications list` to review")?;
        out.flush()?;
        tracing::debug!(channel = CHANNEL_ID, title = %alert.title, "alert delivered");
        Ok(())
    }
}

/// Keeps every alert in memory.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Alert> {
        self.sent.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, alert: &Alert) -> io::Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(alert.clone());
        Ok(())
    }
}
