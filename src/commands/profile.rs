// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{SqliteStore, Store};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, user: &str, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn, user);
    match m.subcommand() {
        Some(("show", sub)) => {
            let profile = store.profile()?.unwrap_or_default();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &profile)? {
                let rows = vec![
                    vec!["User".into(), store.user_id().to_string()],
                    vec!["Name".into(), profile.name],
                    vec!["Mobile".into(), profile.mobile_number],
                    vec!["Age".into(), profile.age],
                    vec!["New user".into(), profile.is_new_user.to_string()],
                ];
                println!("{}", pretty_table(&["Field", "Value"], rows));
            }
        }
        Some(("set", sub)) => {
            let mut profile = store.profile()?.unwrap_or_default();
            if let Some(v) = sub.get_one::<String>("name") {
                profile.name = v.trim().to_string();
            }
            if let Some(v) = sub.get_one::<String>("mobile") {
                profile.mobile_number = v.trim().to_string();
            }
            if let Some(v) = sub.get_one::<String>("age") {
                profile.age = v.trim().to_string();
            }
            store.save_profile(&profile)?;
            println!("Profile updated for {}", store.user_id());
        }
        _ => {}
    }
    Ok(())
}
