// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Period, TransactionType};
use crate::store::Ledger;
use crate::utils::{fmt_money, maybe_print_json, percentage_change, pretty_table};
use anyhow::Result;
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(ledger, sub)?,
        Some(("balance", sub)) => balance(ledger, sub)?,
        Some(("breakdown", sub)) => breakdown(ledger, sub)?,
        Some(("trend", sub)) => trend(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn period_of(sub: &clap::ArgMatches) -> Result<Period> {
    Ok(sub
        .get_one::<String>("period")
        .map(String::as_str)
        .unwrap_or("month")
        .parse()?)
}

#[derive(Serialize)]
pub struct Totals {
    pub period: &'static str,
    pub income: String,
    pub expense: String,
    pub net: String,
    pub savings_rate: f64,
}

pub fn compute_totals(ledger: &Ledger, period: Period) -> Totals {
    let now = Utc::now();
    let income = ledger.total_income_at(period, now);
    let expense = ledger.total_expense_at(period, now);
    Totals {
        period: period.as_str(),
        income: format!("{:.2}", income),
        expense: format!("{:.2}", expense),
        net: format!("{:.2}", income - expense),
        savings_rate: ledger.savings_rate_at(period, now),
    }
}

fn totals(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let t = compute_totals(ledger, period_of(sub)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        let ccy = ledger.currency();
        println!(
            "{}",
            pretty_table(
                &["Period", "Income", "Expense", "Net", "Savings Rate"],
                vec![vec![
                    t.period.to_string(),
                    format!("{} {}", ccy, t.income),
                    format!("{} {}", ccy, t.expense),
                    format!("{} {}", ccy, t.net),
                    format!("{:.1}%", t.savings_rate),
                ]],
            )
        );
    }
    Ok(())
}

fn balance(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let bal = ledger.balance();
    let data = vec![vec![
        ledger.currency().to_string(),
        format!("{:.2}", bal),
    ]];
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let sign = if bal.is_sign_negative() { "-" } else { "" };
        println!("Balance: {}{}", sign, fmt_money(&bal, ledger.currency()));
    }
    Ok(())
}

fn breakdown(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = sub
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or("expense")
        .parse()?;
    let items = ledger.category_breakdown(kind, period_of(sub)?);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
        let rows = items
            .iter()
            .map(|b| {
                vec![
                    format!("{} {}", b.category_icon, b.category_name),
                    format!("{:.2}", b.amount),
                    b.transaction_count.to_string(),
                    format!("{:.1}%", b.percentage),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Amount", "Count", "Share"], rows)
        );
    }
    Ok(())
}

fn trend(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let months = sub.get_one::<u32>("months").copied().unwrap_or(6);
    let data = ledger.monthly_trend(months, Utc::now());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let mut prev_expense: Option<f64> = None;
        let rows = data
            .iter()
            .map(|m| {
                let expense = m.expense.to_f64().unwrap_or(0.0);
                let change = prev_expense
                    .map(|p| format!("{:+.1}%", percentage_change(expense, p)))
                    .unwrap_or_default();
                prev_expense = Some(expense);
                vec![
                    format!("{} ({})", m.label, m.month),
                    format!("{:.2}", m.income),
                    format!("{:.2}", m.expense),
                    format!("{:.2}", m.balance),
                    change,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Month", "Income", "Expense", "Balance", "Expense vs Prev"],
                rows
            )
        );
    }
    Ok(())
}
