// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{SqliteStore, Store};
use crate::utils::{fmt_timestamp, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn, user);
    match m.subcommand() {
        Some(("list", sub)) => list(&store, sub)?,
        Some(("read", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            store
                .mark_notification_read(id)
                .with_context(|| format!("Mark notification {} as read", id))?;
            println!("Notification {} marked as read", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(store: &dyn Store, sub: &clap::ArgMatches) -> Result<()> {
    let unread_only = !sub.get_flag("all");
    let items = store.notifications(unread_only)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        return Ok(());
    }
    if items.is_empty() {
        println!("No notifications");
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|n| {
            vec![
                fmt_timestamp(n.timestamp),
                n.kind.clone(),
                n.message.clone(),
                if n.is_read { "yes" } else { "no" }.to_string(),
                n.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["When", "Type", "Message", "Read", "ID"], rows)
    );
    Ok(())
}
