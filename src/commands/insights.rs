// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::insights::{build_insights, generate_insights, transaction_summary};
use crate::store::Ledger;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::Utc;

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("generate", _)) => {
            let fresh = build_insights(ledger, Utc::now());
            let count = fresh.len();
            for insight in fresh {
                let added = ledger.add_insight(insight);
                println!("[{}] {}: {}", added.r#type.as_str(), added.title, added.message);
            }
            println!("Generated {} insight(s)", count);
        }
        Some(("list", sub)) => {
            let items: Vec<_> = if sub.get_flag("unread") {
                ledger.unread_insights()
            } else {
                ledger.insights().iter().collect()
            };
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &items)? {
                let rows = items
                    .iter()
                    .map(|i| {
                        vec![
                            i.id.clone(),
                            i.r#type.as_str().to_string(),
                            i.title.clone(),
                            i.message.clone(),
                            if i.read { "yes".into() } else { "no".into() },
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Type", "Title", "Message", "Read"], rows)
                );
            }
        }
        Some(("read", sub)) => {
            let id = sub.get_one::<String>("id").map(|s| s.trim()).unwrap_or("");
            if ledger.mark_insight_read(id) {
                println!("Marked insight {} as read", id);
            } else {
                println!("No insight with id {}", id);
            }
        }
        Some(("clear", _)) => {
            ledger.clear_insights();
            println!("Cleared insights");
        }
        Some(("summary", _)) => {
            println!("{}", transaction_summary(ledger.transactions(), ledger.currency()));
            for line in generate_insights(ledger.transactions(), ledger.currency()) {
                println!("- {}", line);
            }
        }
        _ => {}
    }
    Ok(())
}
