// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

fn source_arg(defaulted: bool) -> Arg {
    let a = Arg::new("source")
        .long("source")
        .help("Money source: cash | account");
    if defaulted {
        a.default_value("account")
    } else {
        a
    }
}

/// Numeric input; negatives reach the ledger so it can reject them.
fn amount_arg(name: &'static str) -> Arg {
    Arg::new(name).long(name).allow_negative_numbers(true)
}

fn list_cmd() -> Command {
    json_flags(
        Command::new("list").about("List newest first").arg(
            Arg::new("limit")
                .long("limit")
                .value_parser(value_parser!(usize))
                .help("Show at most N rows"),
        ),
    )
}

pub fn build_cli() -> Command {
    Command::new("fundkeep")
        .about("Income, expenses and savings goals with cash/account balances")
        .version(clap::crate_version!())
        .arg(
            Arg::new("remote")
                .long("remote")
                .global(true)
                .env("FUNDKEEP_URL")
                .help("Base URL of the remote spreadsheet API (uses the local store if unset)"),
        )
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("FUNDKEEP_DB")
                .help("Path of the local SQLite store"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_parser(value_parser!(u64))
                .default_value("15")
                .help("Remote request timeout in seconds"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More logging (-v, -vv)"),
        )
        .subcommand(
            Command::new("income")
                .about("Record and manage income")
                .subcommand(
                    Command::new("add")
                        .about("Record income")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(source_arg(true))
                        .arg(amount_arg("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("salary")
                                .help("salary | other"),
                        ),
                )
                .subcommand(list_cmd())
                .subcommand(
                    Command::new("update")
                        .about("Change fields of an income entry")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(source_arg(false))
                        .arg(amount_arg("amount"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("rm").about("Delete an income entry").arg(id_arg())),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and manage expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense")
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(source_arg(true))
                        .arg(amount_arg("amount").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("shopping")
                                .help("shopping | transportation | entertainment"),
                        ),
                )
                .subcommand(list_cmd())
                .subcommand(
                    Command::new("update")
                        .about("Change fields of an expense")
                        .arg(id_arg())
                        .arg(Arg::new("date").long("date"))
                        .arg(source_arg(false))
                        .arg(amount_arg("amount"))
                        .arg(Arg::new("category").long("category")),
                )
                .subcommand(Command::new("rm").about("Delete an expense").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a goal, reserving its starting amount")
                        .arg(Arg::new("label").long("label").required(true))
                        .arg(source_arg(true))
                        .arg(amount_arg("target").required(true))
                        .arg(amount_arg("current").default_value("0")),
                )
                .subcommand(json_flags(Command::new("list").about("List goals")))
                .subcommand(
                    Command::new("update")
                        .about("Edit a goal")
                        .arg(id_arg())
                        .arg(Arg::new("label").long("label"))
                        .arg(source_arg(false))
                        .arg(amount_arg("target"))
                        .arg(amount_arg("current"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .help("pending | completed; overrides the derived status"),
                        ),
                )
                .subcommand(
                    Command::new("fund")
                        .about("Move money from a source into a goal")
                        .arg(id_arg())
                        .arg(amount_arg("amount").required(true))
                        .arg(source_arg(false).help("Source to draw from, defaults to the goal's")),
                )
                .subcommand(
                    Command::new("toggle")
                        .about("Flip a goal between pending and completed")
                        .arg(id_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a goal, returning its money to the source")
                        .arg(id_arg()),
                ),
        )
        .subcommand(json_flags(
            Command::new("balance").about("Available cash and account balances"),
        ))
        .subcommand(
            Command::new("rate")
                .about("Suggested savings percentage")
                .subcommand(
                    Command::new("set").arg(
                        amount_arg("percent")
                            .required(true)
                            .help("0 to 100"),
                    ),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(json_flags(
            Command::new("summary").about("Totals, per-category sums and goal progress"),
        ))
}
