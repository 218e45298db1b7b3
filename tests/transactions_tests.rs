// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use finsight::commands::{calc, insights, profile, reports, reset, transactions};
use finsight::models::{CalculatorKind, CategoryId, Period, TransactionType};
use finsight::{cli, store::Ledger};

fn run(ledger: &mut Ledger, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["finsight"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(ledger, sub),
        Some(("calc", sub)) => calc::handle(ledger, sub),
        Some(("insights", sub)) => insights::handle(ledger, sub),
        Some(("profile", sub)) => profile::handle(ledger, sub),
        Some(("report", sub)) => reports::handle(ledger, sub),
        Some(("reset", sub)) => reset::handle(ledger, sub),
        other => panic!("unexpected subcommand {:?}", other.map(|(n, _)| n)),
    }
}

fn list_rows(ledger: &Ledger, args: &[&str]) -> Vec<transactions::TransactionRow> {
    let mut argv = vec!["finsight", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx) = matches.subcommand().unwrap();
    let (_, sub) = tx.subcommand().unwrap();
    transactions::query_rows(ledger, sub).unwrap()
}

#[test]
fn add_without_category_runs_categorizer() {
    let mut ledger = Ledger::new();
    run(&mut ledger, &["tx", "add", "--title", "Swiggy dinner", "--amount", "450"]).unwrap();

    let tx = &ledger.transactions()[0];
    assert_eq!(tx.category, CategoryId::Food);
    assert_eq!(tx.r#type, TransactionType::Expense);
    assert!(tx.ai_categorized);
    assert_eq!(tx.ai_confidence, Some(0.75));
}

#[test]
fn add_with_explicit_category_and_date() {
    let mut ledger = Ledger::new();
    run(
        &mut ledger,
        &[
            "tx", "add", "--title", "March pay", "--amount", "85000", "--type", "income",
            "--category", "salary", "--date", "2025-03-01", "--note", "bonus incl.",
        ],
    )
    .unwrap();

    let tx = &ledger.transactions()[0];
    assert_eq!(tx.category, CategoryId::Salary);
    assert_eq!(tx.r#type, TransactionType::Income);
    assert!(!tx.ai_categorized);
    assert_eq!(tx.note.as_deref(), Some("bonus incl."));
    assert_eq!(ledger.total_income(Period::All).to_string(), "85000");
}

#[test]
fn add_rejects_bad_input() {
    let mut ledger = Ledger::new();
    assert!(run(&mut ledger, &["tx", "add", "--title", "x", "--amount", "abc"]).is_err());
    assert!(run(&mut ledger, &["tx", "add", "--title", "x", "--amount=-3"]).is_err());
    assert!(
        run(
            &mut ledger,
            &["tx", "add", "--title", "x", "--amount", "3", "--category", "groceries"]
        )
        .is_err()
    );
    assert!(ledger.transactions().is_empty());
    assert!(!ledger.is_dirty());
}

#[test]
fn list_filters_and_limits() {
    let mut ledger = Ledger::new();
    for (title, amount, cat, date) in [
        ("Lunch", "120", "food", "2025-01-05"),
        ("Cab", "300", "transport", "2025-01-10"),
        ("Dinner", "500", "food", "2025-01-20"),
        ("Pizza", "250", "food", "2025-02-02"),
    ] {
        run(
            &mut ledger,
            &[
                "tx", "add", "--title", title, "--amount", amount, "--category", cat, "--date",
                date,
            ],
        )
        .unwrap();
    }

    let food = list_rows(&ledger, &["--category", "food"]);
    let titles: Vec<_> = food.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Pizza", "Dinner", "Lunch"]);

    let january = list_rows(&ledger, &["--from", "2025-01-01", "--to", "2025-01-20"]);
    assert_eq!(january.len(), 3);

    let limited = list_rows(&ledger, &["--limit", "2"]);
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].title, "Pizza");

    assert!(list_rows(&ledger, &["--type", "income"]).is_empty());
}

#[test]
fn update_and_remove_by_id() {
    let mut ledger = Ledger::new();
    run(
        &mut ledger,
        &["tx", "add", "--title", "Groceries", "--amount", "800", "--category", "food"],
    )
    .unwrap();
    let id = ledger.transactions()[0].id.clone();

    run(
        &mut ledger,
        &["tx", "update", "--id", id.as_str(), "--amount", "950", "--category", "shopping"],
    )
    .unwrap();
    let tx = ledger.transaction(&id).unwrap();
    assert_eq!(tx.amount.to_string(), "950");
    assert_eq!(tx.category, CategoryId::Shopping);

    // nothing to change
    assert!(run(&mut ledger, &["tx", "update", "--id", id.as_str()]).is_err());
    // unknown ids are reported, not errors
    run(&mut ledger, &["tx", "update", "--id", "nope", "--title", "x"]).unwrap();

    run(&mut ledger, &["tx", "rm", "--id", id.as_str()]).unwrap();
    run(&mut ledger, &["tx", "rm", "--id", id.as_str()]).unwrap();
    assert!(ledger.transactions().is_empty());
}

#[test]
fn categorize_does_not_record() {
    let mut ledger = Ledger::new();
    run(&mut ledger, &["tx", "categorize", "--title", "Netflix", "--json"]).unwrap();
    assert!(ledger.transactions().is_empty());
    assert!(!ledger.is_dirty());
}

#[test]
fn reports_run_on_populated_ledger() {
    let mut ledger = Ledger::new();
    run(
        &mut ledger,
        &["tx", "add", "--title", "Pay", "--amount", "1000", "--type", "income"],
    )
    .unwrap();
    run(&mut ledger, &["tx", "add", "--title", "Uber", "--amount", "200"]).unwrap();

    let totals = reports::compute_totals(&ledger, Period::Month);
    assert_eq!(totals.income, "1000.00");
    assert_eq!(totals.expense, "200.00");
    assert_eq!(totals.net, "800.00");
    assert!((totals.savings_rate - 80.0).abs() < 1e-9);

    let cases: [&[&str]; 4] = [
        &["report", "totals", "--period", "all"],
        &["report", "balance", "--json"],
        &["report", "breakdown", "--period", "year"],
        &["report", "trend", "--months", "3"],
    ];
    for args in cases {
        run(&mut ledger, args).unwrap();
    }
}

#[test]
fn calculators_save_to_history_on_request() {
    let mut ledger = Ledger::new();
    run(
        &mut ledger,
        &["calc", "sip", "--monthly", "5000", "--rate", "12", "--years", "10"],
    )
    .unwrap();
    assert!(ledger.calculator_results().is_empty());

    run(
        &mut ledger,
        &[
            "calc", "emi", "--principal", "1000000", "--rate", "8.5", "--years", "20", "--save",
            "--name", "home loan",
        ],
    )
    .unwrap();
    run(
        &mut ledger,
        &[
            "calc", "credit", "--balance", "50000", "--apr", "36", "--payment", "1000", "--save",
        ],
    )
    .unwrap();

    let saved = ledger.calculator_results();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].r#type, CalculatorKind::Credit);
    assert_eq!(saved[0].results.get("payable"), Some(&0.0));
    assert_eq!(saved[1].name.as_deref(), Some("home loan"));
    assert_eq!(saved[1].inputs.get("years"), Some(&20.0));

    let id = saved[1].id.clone();
    run(&mut ledger, &["calc", "rm", "--id", id.as_str()]).unwrap();
    assert_eq!(ledger.calculator_results().len(), 1);

    assert!(
        run(
            &mut ledger,
            &["calc", "inflation", "--amount", "0", "--rate", "6", "--years", "10"]
        )
        .is_err()
    );
}

#[test]
fn fire_command_reads_ages() {
    let mut ledger = Ledger::new();
    run(
        &mut ledger,
        &[
            "calc", "fire", "--current-age", "30", "--retirement-age", "45",
            "--monthly-expenses", "50000", "--current-savings", "500000",
            "--monthly-savings", "30000", "--return", "12", "--save",
        ],
    )
    .unwrap();
    let saved = &ledger.calculator_results()[0];
    assert_eq!(saved.r#type, CalculatorKind::Fire);
    assert_eq!(saved.results.get("shortfall"), Some(&0.0));
}

#[test]
fn insights_generate_read_and_clear() {
    let mut ledger = Ledger::new();
    run(&mut ledger, &["insights", "generate"]).unwrap();
    assert_eq!(ledger.insights().len(), 1);

    let id = ledger.insights()[0].id.clone();
    run(&mut ledger, &["insights", "read", "--id", id.as_str()]).unwrap();
    assert!(ledger.unread_insights().is_empty());
    run(&mut ledger, &["insights", "summary"]).unwrap();
    run(&mut ledger, &["insights", "clear"]).unwrap();
    assert!(ledger.insights().is_empty());
}

#[test]
fn profile_then_reset_keeps_user() {
    let mut ledger = Ledger::new();
    assert!(run(&mut ledger, &["profile", "set", "--name", "Meera"]).is_err());
    run(
        &mut ledger,
        &["profile", "set", "--name", "Meera", "--email", "m@example.com", "--currency", "eur"],
    )
    .unwrap();
    assert_eq!(ledger.currency(), "EUR");
    run(&mut ledger, &["profile", "set", "--currency", "gbp"]).unwrap();
    assert_eq!(ledger.currency(), "GBP");

    run(&mut ledger, &["tx", "add", "--title", "Lunch", "--amount", "12"]).unwrap();
    assert!(run(&mut ledger, &["reset"]).is_err());
    assert_eq!(ledger.transactions().len(), 1);

    run(&mut ledger, &["reset", "--yes"]).unwrap();
    assert!(ledger.transactions().is_empty());
    assert_eq!(ledger.user().unwrap().name, "Meera");
}
