// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorizer::Categorizer;
use crate::models::{CategoryId, NewTransaction, TransactionPatch, TransactionType};
use crate::store::Ledger;
use crate::utils::{
    fmt_money, maybe_print_json, parse_datetime, parse_decimal, parse_range_end, pretty_table,
};
use anyhow::{Result, bail};
use serde::Serialize;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("update", sub)) => update(ledger, sub)?,
        Some(("rm", sub)) => remove(ledger, sub)?,
        Some(("categorize", sub)) => categorize(sub)?,
        _ => {}
    }
    Ok(())
}

fn trimmed(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn add(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").map(String::as_str).unwrap_or("");
    let amount = parse_decimal(sub.get_one::<String>("amount").map(String::as_str).unwrap_or(""))?;
    let kind: TransactionType = sub
        .get_one::<String>("type")
        .map(String::as_str)
        .unwrap_or("expense")
        .parse()?;
    let note = trimmed(sub, "note");

    let mut data = match trimmed(sub, "category") {
        Some(cat) => NewTransaction::new(title, amount, kind, cat.parse::<CategoryId>()?),
        None => {
            let guess = Categorizer::new().categorize(title, amount, note.as_deref());
            println!(
                "Categorized as {} ({:.0}% confidence: {})",
                guess.category,
                guess.confidence * 100.0,
                guess.reasoning
            );
            NewTransaction::new(title, amount, kind, guess.category).categorized(guess.confidence)
        }
    };
    if let Some(raw) = sub.get_one::<String>("date") {
        data = data.on(parse_datetime(raw)?);
    }
    if let Some(n) = note {
        data = data.with_note(n);
    }

    let currency = ledger.currency().to_string();
    let tx = ledger.add_transaction(data)?;
    println!(
        "Recorded {} {} '{}' [{}] id {}",
        tx.r#type,
        fmt_money(&tx.amount, &currency),
        tx.title,
        tx.category,
        tx.id
    );
    Ok(())
}

fn list(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.title.clone(),
                    r.r#type.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Type", "Amount", "Category", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    pub r#type: String,
    pub amount: String,
    pub category: String,
    pub note: String,
    pub ai_categorized: bool,
}

/// Rows in ledger order (newest first), after the list filters.
pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let category = match trimmed(sub, "category") {
        Some(c) => Some(c.parse::<CategoryId>()?),
        None => None,
    };
    let kind = match trimmed(sub, "type") {
        Some(t) => Some(t.parse::<TransactionType>()?),
        None => None,
    };
    let from = match sub.get_one::<String>("from") {
        Some(s) => Some(parse_datetime(s)?),
        None => None,
    };
    let to = match sub.get_one::<String>("to") {
        Some(s) => Some(parse_range_end(s)?),
        None => None,
    };
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let data = ledger
        .transactions()
        .iter()
        .filter(|t| category.is_none_or(|c| t.category == c))
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| from.is_none_or(|f| t.date >= f))
        .filter(|t| to.is_none_or(|e| t.date <= e))
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.format("%Y-%m-%d").to_string(),
            title: t.title.clone(),
            r#type: t.r#type.to_string(),
            amount: t.amount.to_string(),
            category: t.category.to_string(),
            note: t.note.clone().unwrap_or_default(),
            ai_categorized: t.ai_categorized,
        })
        .collect();
    Ok(data)
}

fn update(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or("");
    let patch = TransactionPatch {
        title: trimmed(sub, "title"),
        amount: match sub.get_one::<String>("amount") {
            Some(raw) => Some(parse_decimal(raw)?),
            None => None,
        },
        r#type: match trimmed(sub, "type") {
            Some(t) => Some(t.parse()?),
            None => None,
        },
        category: match trimmed(sub, "category") {
            Some(c) => Some(c.parse()?),
            None => None,
        },
        date: match sub.get_one::<String>("date") {
            Some(raw) => Some(parse_datetime(raw)?),
            None => None,
        },
        note: sub.get_one::<String>("note").cloned(),
    };
    if patch.is_empty() {
        bail!("Nothing to update for transaction {}", id);
    }
    if ledger.update_transaction(id, patch)? {
        println!("Updated transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn remove(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or("");
    if ledger.delete_transaction(id) {
        println!("Removed transaction {}", id);
    } else {
        println!("No transaction with id {}", id);
    }
    Ok(())
}

fn categorize(sub: &clap::ArgMatches) -> Result<()> {
    let title = sub.get_one::<String>("title").map(String::as_str).unwrap_or("");
    let amount = parse_decimal(sub.get_one::<String>("amount").map(String::as_str).unwrap_or("0"))?;
    let note = trimmed(sub, "note");
    let result = Categorizer::new().categorize(title, amount, note.as_deref());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &result)? {
        let info = result.category.info();
        println!(
            "{}",
            pretty_table(
                &["Category", "Name", "Confidence", "Reasoning"],
                vec![vec![
                    format!("{} {}", result.category_icon, result.category),
                    info.name.to_string(),
                    format!("{:.2}", result.confidence),
                    result.reasoning.clone(),
                ]],
            )
        );
    }
    Ok(())
}
