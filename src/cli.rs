// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn req(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn period_arg() -> Arg {
    Arg::new("period")
        .long("period")
        .default_value("month")
        .value_parser(["today", "week", "month", "year", "all"])
        .help("Reporting window")
}

fn type_arg(default: Option<&'static str>) -> Arg {
    let a = Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("Transaction type");
    match default {
        Some(d) => a.default_value(d),
        None => a,
    }
}

fn save_args(cmd: Command) -> Command {
    json_flags(cmd)
        .arg(
            Arg::new("save")
                .long("save")
                .action(ArgAction::SetTrue)
                .help("Keep this result in the calculator history"),
        )
        .arg(opt("name", "Label for the saved result"))
}

fn years_arg() -> Arg {
    Arg::new("years")
        .long("years")
        .required(true)
        .value_parser(value_parser!(u32))
        .help("Duration in whole years")
}

pub fn build_cli() -> Command {
    Command::new("finsight")
        .about("Personal finance ledger, calculators and insights")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the SQLite store (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(Command::new("categories").about("List the category taxonomy"))
        .subcommand(
            Command::new("profile")
                .about("User profile")
                .subcommand(
                    Command::new("set")
                        .arg(opt("name", "Display name"))
                        .arg(opt("email", "Email address"))
                        .arg(opt("currency", "Currency code, e.g. INR or USD")),
                )
                .subcommand(Command::new("show")),
        )
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(
                    Command::new("add")
                        .arg(req("title", "What the money was for"))
                        .arg(req("amount", "Positive amount"))
                        .arg(type_arg(Some("expense")))
                        .arg(opt("category", "Category id; categorized automatically if omitted"))
                        .arg(opt("date", "YYYY-MM-DD or RFC 3339; defaults to now"))
                        .arg(opt("note", "Free-text note")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(opt("category", "Only this category id"))
                        .arg(type_arg(None))
                        .arg(opt("from", "Start date, inclusive"))
                        .arg(opt("to", "End date, inclusive"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("update")
                        .arg(req("id", "Transaction id"))
                        .arg(opt("title", "New title"))
                        .arg(opt("amount", "New amount"))
                        .arg(type_arg(None))
                        .arg(opt("category", "New category id"))
                        .arg(opt("date", "New date"))
                        .arg(opt("note", "New note")),
                )
                .subcommand(Command::new("rm").arg(req("id", "Transaction id")))
                .subcommand(json_flags(
                    Command::new("categorize")
                        .about("Suggest a category without recording anything")
                        .arg(req("title", "Description to categorize"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .default_value("0"),
                        )
                        .arg(opt("note", "Free-text note")),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregates over the ledger")
                .subcommand(json_flags(Command::new("totals").arg(period_arg())))
                .subcommand(json_flags(Command::new("balance")))
                .subcommand(json_flags(
                    Command::new("breakdown")
                        .arg(type_arg(Some("expense")))
                        .arg(period_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("trend").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("6")
                            .value_parser(value_parser!(u32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("calc")
                .about("Financial calculators")
                .subcommand(save_args(
                    Command::new("sip")
                        .arg(req("monthly", "Monthly investment"))
                        .arg(req("rate", "Expected annual return, percent"))
                        .arg(years_arg()),
                ))
                .subcommand(save_args(
                    Command::new("lumpsum")
                        .arg(req("principal", "One-time investment"))
                        .arg(req("rate", "Expected annual return, percent"))
                        .arg(years_arg()),
                ))
                .subcommand(save_args(
                    Command::new("emi")
                        .arg(req("principal", "Loan amount"))
                        .arg(req("rate", "Annual interest rate, percent"))
                        .arg(years_arg()),
                ))
                .subcommand(save_args(
                    Command::new("credit")
                        .arg(req("balance", "Outstanding balance"))
                        .arg(req("apr", "Annual percentage rate"))
                        .arg(req("payment", "Fixed monthly payment")),
                ))
                .subcommand(save_args(
                    Command::new("inflation")
                        .arg(req("amount", "Amount in today's money"))
                        .arg(req("rate", "Annual inflation, percent"))
                        .arg(years_arg()),
                ))
                .subcommand(save_args(
                    Command::new("fire")
                        .arg(
                            req("current-age", "Age today")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(
                            req("retirement-age", "Target retirement age")
                                .value_parser(value_parser!(u32)),
                        )
                        .arg(req("monthly-expenses", "Monthly expenses"))
                        .arg(req("current-savings", "Savings today"))
                        .arg(req("monthly-savings", "Monthly contribution"))
                        .arg(req("return", "Expected annual return, percent")),
                ))
                .subcommand(json_flags(Command::new("history")))
                .subcommand(Command::new("rm").arg(req("id", "Saved result id"))),
        )
        .subcommand(
            Command::new("insights")
                .about("Spending insights")
                .subcommand(Command::new("generate"))
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("unread")
                            .long("unread")
                            .action(ArgAction::SetTrue),
                    ),
                ))
                .subcommand(Command::new("read").arg(req("id", "Insight id")))
                .subcommand(Command::new("clear"))
                .subcommand(Command::new("summary")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(Command::new("snapshot").arg(req("out", "Output file")))
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(req("out", "Output file")),
                ),
        )
        .subcommand(
            Command::new("reset")
                .about("Delete all transactions, insights and saved results")
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .action(ArgAction::SetTrue)
                        .help("Confirm the reset"),
                ),
        )
}
