// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

fn filter_args() -> [Arg; 2] {
    [
        Arg::new("type")
            .long("type")
            .default_value("all")
            .help("all | income | expense"),
        Arg::new("range")
            .long("range")
            .default_value("all-time")
            .help("all-time | today | yesterday | last-30-days | last-90-days | last-year"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendsavvy")
        .about("Track income and expenses, set spending limits, get alerted on breaches")
        .version(clap::crate_version!())
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .help("User id whose records to use (env SPENDSAVVY_USER, default 'local')"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("SQLite database path (env SPENDSAVVY_DB)"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("profile")
                .about("User profile")
                .subcommand(Command::new("show").args(json_args()))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("mobile").long("mobile"))
                        .arg(Arg::new("age").long("age")),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("DD/MM/YYYY"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income | expense"),
                        )
                        .arg(Arg::new("id").long("id").help("Replace the transaction with this id")),
                )
                .subcommand(Command::new("list").args(filter_args()).args(json_args())),
        )
        .subcommand(
            Command::new("summary")
                .about("Income, expense and balance totals")
                .args(json_args()),
        )
        .subcommand(
            Command::new("stats")
                .about("Daily expense series and top expenses")
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_parser(value_parser!(usize))
                        .default_value("5"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("limit")
                .about("Per-category spending limits")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("period")
                                .long("period")
                                .default_value("monthly")
                                .help("daily | weekly | monthly | yearly"),
                        ),
                )
                .subcommand(Command::new("list").args(json_args()))
                .subcommand(Command::new("check").arg(Arg::new("category").long("category"))),
        )
        .subcommand(
            Command::new("notifications")
                .about("Limit breach notifications")
                .subcommand(
                    Command::new("list")
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Include notifications already read"),
                        )
                        .args(json_args()),
                )
                .subcommand(Command::new("read").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .help("csv | pdf"),
                )
                .arg(Arg::new("out").long("out").help("Output file"))
                .args(filter_args()),
        )
        .subcommand(
            Command::new("categories")
                .about("Suggested transaction titles")
                .arg(
                    Arg::new("income")
                        .long("income")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("expense"),
                )
                .arg(Arg::new("expense").long("expense").action(ArgAction::SetTrue)),
        )
}
