// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::calculators::{
    self, CreditPayoff, FireInputs, InvestmentProjection, LoanSchedule, named,
};
use crate::models::CalculatorKind;
use crate::store::Ledger;
use crate::utils::{fmt_amount, maybe_print_json, parse_f64, pretty_table};
use anyhow::{Context, Result};
use std::collections::BTreeMap;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("sip", sub)) => sip(ledger, sub)?,
        Some(("lumpsum", sub)) => lumpsum(ledger, sub)?,
        Some(("emi", sub)) => emi(ledger, sub)?,
        Some(("credit", sub)) => credit(ledger, sub)?,
        Some(("inflation", sub)) => inflation(ledger, sub)?,
        Some(("fire", sub)) => fire(ledger, sub)?,
        Some(("history", sub)) => history(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or("");
            if ledger.delete_calculator_result(id) {
                println!("Removed calculator result {}", id);
            } else {
                println!("No calculator result with id {}", id);
            }
        }
        _ => {}
    }
    Ok(())
}

fn number(sub: &clap::ArgMatches, name: &str) -> Result<f64> {
    let raw = sub
        .get_one::<String>(name)
        .with_context(|| format!("--{} is required", name))?;
    parse_f64(raw)
}

fn years(sub: &clap::ArgMatches) -> Result<u32> {
    sub.get_one::<u32>("years")
        .copied()
        .context("--years is required")
}

fn maybe_save(
    ledger: &mut Ledger,
    sub: &clap::ArgMatches,
    kind: CalculatorKind,
    inputs: BTreeMap<String, f64>,
    results: BTreeMap<String, f64>,
) {
    if sub.get_flag("save") {
        let name = sub.get_one::<String>("name").cloned();
        let saved = ledger.save_calculator_result(kind, inputs, results, name);
        println!("Saved {} result {}", kind.as_str(), saved.id);
    }
}

fn print_projection(p: &InvestmentProjection, ccy: &str) {
    println!(
        "{}",
        pretty_table(
            &["Invested", "Returns", "Total Value"],
            vec![vec![
                fmt_amount(p.total_investment, ccy),
                fmt_amount(p.estimated_returns, ccy),
                fmt_amount(p.total_value, ccy),
            ]],
        )
    );
    let rows = p
        .yearly_breakdown
        .iter()
        .map(|y| {
            vec![
                y.year.to_string(),
                format!("{:.2}", y.invested),
                format!("{:.2}", y.value),
                format!("{:.2}", y.returns),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Year", "Invested", "Value", "Returns"], rows)
    );
}

fn sip(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let monthly = number(sub, "monthly")?;
    let rate = number(sub, "rate")?;
    let years = years(sub)?;
    let p = calculators::sip(monthly, rate, years)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        print_projection(&p, ledger.currency());
    }
    let inputs = named(&[
        ("monthly_investment", monthly),
        ("annual_rate", rate),
        ("years", years as f64),
    ]);
    maybe_save(ledger, sub, CalculatorKind::Sip, inputs, p.results());
    Ok(())
}

fn lumpsum(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let principal = number(sub, "principal")?;
    let rate = number(sub, "rate")?;
    let years = years(sub)?;
    let p = calculators::lumpsum(principal, rate, years)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        print_projection(&p, ledger.currency());
    }
    let inputs = named(&[
        ("principal", principal),
        ("annual_rate", rate),
        ("years", years as f64),
    ]);
    maybe_save(ledger, sub, CalculatorKind::Lumpsum, inputs, p.results());
    Ok(())
}

fn print_schedule(s: &LoanSchedule, ccy: &str) {
    println!(
        "{}",
        pretty_table(
            &["Monthly EMI", "Total Interest", "Total Payment"],
            vec![vec![
                fmt_amount(s.emi, ccy),
                fmt_amount(s.total_interest, ccy),
                fmt_amount(s.total_payment, ccy),
            ]],
        )
    );
    let rows = s
        .breakdown
        .iter()
        .map(|e| {
            vec![
                e.month.to_string(),
                format!("{:.2}", e.principal),
                format!("{:.2}", e.interest),
                format!("{:.2}", e.balance),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Principal", "Interest", "Balance"], rows)
    );
}

fn emi(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let principal = number(sub, "principal")?;
    let rate = number(sub, "rate")?;
    let years = years(sub)?;
    let s = calculators::emi(principal, rate, years)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        print_schedule(&s, ledger.currency());
    }
    let inputs = named(&[
        ("principal", principal),
        ("annual_rate", rate),
        ("years", years as f64),
    ]);
    maybe_save(ledger, sub, CalculatorKind::Emi, inputs, s.results());
    Ok(())
}

fn credit(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let balance = number(sub, "balance")?;
    let apr = number(sub, "apr")?;
    let payment = number(sub, "payment")?;
    let outcome = calculators::credit_payoff(balance, apr, payment)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &outcome)? {
        let ccy = ledger.currency();
        match &outcome {
            CreditPayoff::Payable {
                months,
                total_interest,
                total_paid,
                ..
            } => println!(
                "{}",
                pretty_table(
                    &["Months to Payoff", "Total Interest", "Total Paid"],
                    vec![vec![
                        months.to_string(),
                        fmt_amount(*total_interest, ccy),
                        fmt_amount(*total_paid, ccy),
                    ]],
                )
            ),
            CreditPayoff::Unpayable { monthly_interest } => println!(
                "Cannot be paid off: monthly interest {} meets or exceeds the payment",
                fmt_amount(*monthly_interest, ccy)
            ),
        }
    }
    let inputs = named(&[
        ("balance", balance),
        ("apr", apr),
        ("monthly_payment", payment),
    ]);
    maybe_save(ledger, sub, CalculatorKind::Credit, inputs, outcome.results());
    Ok(())
}

fn inflation(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let amount = number(sub, "amount")?;
    let rate = number(sub, "rate")?;
    let years = years(sub)?;
    let impact = calculators::inflation(amount, rate, years)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &impact)? {
        let ccy = ledger.currency();
        println!(
            "{}",
            pretty_table(
                &["Today", "Worth In Future", "Purchasing Power Lost"],
                vec![vec![
                    fmt_amount(amount, ccy),
                    fmt_amount(impact.future_value, ccy),
                    fmt_amount(impact.purchasing_power_loss, ccy),
                ]],
            )
        );
    }
    let inputs = named(&[
        ("current_amount", amount),
        ("inflation_rate", rate),
        ("years", years as f64),
    ]);
    maybe_save(ledger, sub, CalculatorKind::Inflation, inputs, impact.results());
    Ok(())
}

fn fire(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let inputs = FireInputs {
        current_age: sub
            .get_one::<u32>("current-age")
            .copied()
            .context("--current-age is required")?,
        retirement_age: sub
            .get_one::<u32>("retirement-age")
            .copied()
            .context("--retirement-age is required")?,
        monthly_expenses: number(sub, "monthly-expenses")?,
        current_savings: number(sub, "current-savings")?,
        monthly_savings: number(sub, "monthly-savings")?,
        expected_return: number(sub, "return")?,
    };
    let p = calculators::fire(&inputs)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        let ccy = ledger.currency();
        println!(
            "{}",
            pretty_table(
                &["Years", "Required Corpus (25x)", "Projected Savings", "Shortfall"],
                vec![vec![
                    p.years_to_retirement.to_string(),
                    fmt_amount(p.required_corpus, ccy),
                    fmt_amount(p.projected_savings, ccy),
                    fmt_amount(p.shortfall, ccy),
                ]],
            )
        );
        if p.on_track {
            println!("On track for FIRE by age {}", inputs.retirement_age);
        } else {
            println!("Save more to reach FIRE by age {}", inputs.retirement_age);
        }
    }
    maybe_save(ledger, sub, CalculatorKind::Fire, inputs.named(), p.results());
    Ok(())
}

fn history(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let saved = ledger.calculator_results();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &saved)? {
        let fmt_map = |m: &BTreeMap<String, f64>| {
            m.iter()
                .map(|(k, v)| format!("{}={:.2}", k, v))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let rows = saved
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.r#type.as_str().to_string(),
                    r.name.clone().unwrap_or_default(),
                    fmt_map(&r.inputs),
                    fmt_map(&r.results),
                    r.created_at.format("%Y-%m-%d %H:%M").to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Type", "Name", "Inputs", "Results", "Saved"],
                rows
            )
        );
    }
    Ok(())
}
