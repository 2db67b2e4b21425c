// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use spendsavvy::{cli, commands, config, db, utils};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    utils::init_tracing(&config::log_filter());
    let cfg = config::Config::resolve(
        matches.get_one::<String>("db").map(|s| s.as_str()),
        matches.get_one::<String>("user").map(|s| s.as_str()),
    )?;

    if let Some(("categories", sub)) = matches.subcommand() {
        return commands::categories::handle(sub);
    }

    let conn = db::open_or_init(&cfg.db_path)?;
    let user = cfg.user.as_str();

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("profile", sub)) => commands::profile::handle(&conn, user, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, user, sub)?,
        Some(("summary", sub)) => commands::reports::summary(&conn, user, sub)?,
        Some(("stats", sub)) => commands::reports::stats(&conn, user, sub)?,
        Some(("limit", sub)) => commands::limits::handle(&conn, user, sub)?,
        Some(("notifications", sub)) => commands::notifications::handle(&conn, user, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
