// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Ledger;
use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde_json::json;

pub fn handle(ledger: &Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("snapshot", sub)) => export_snapshot(ledger, sub),
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        _ => Ok(()),
    }
}

fn out_path(sub: &clap::ArgMatches) -> Result<&str> {
    sub.get_one::<String>("out")
        .map(|s| s.trim())
        .context("--out is required")
}

fn export_snapshot(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let out = out_path(sub)?;
    let body = ledger.export_data(Utc::now())?;
    std::fs::write(out, body).with_context(|| format!("Write snapshot to {}", out))?;
    println!("Exported full snapshot to {}", out);
    Ok(())
}

fn export_transactions(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = out_path(sub)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "date", "title", "type", "amount", "category", "note",
            ])?;
            for t in ledger.transactions() {
                let date = t.date.to_rfc3339();
                let amount = t.amount.to_string();
                wtr.write_record([
                    t.id.as_str(),
                    date.as_str(),
                    t.title.as_str(),
                    t.r#type.as_str(),
                    amount.as_str(),
                    t.category.as_str(),
                    t.note.as_deref().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = ledger
                .transactions()
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id, "date": t.date, "title": t.title, "type": t.r#type,
                        "amount": t.amount, "category": t.category, "note": t.note
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported transactions to {}", out);
    Ok(())
}
