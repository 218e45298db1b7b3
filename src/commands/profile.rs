// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{User, UserSettings};
use crate::store::Ledger;
use crate::utils::pretty_table;
use anyhow::{Result, bail};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(ledger, sub)?,
        Some(("show", _)) => show(ledger),
        _ => {}
    }
    Ok(())
}

fn set(ledger: &mut Ledger, sub: &clap::ArgMatches) -> Result<()> {
    let settings = UserSettings {
        name: sub.get_one::<String>("name").map(|s| s.trim().to_string()),
        email: sub.get_one::<String>("email").map(|s| s.trim().to_string()),
        currency: sub.get_one::<String>("currency").map(|s| s.trim().to_string()),
    };
    if ledger.user().is_some() {
        ledger.update_user_settings(settings);
    } else {
        let (Some(name), Some(email)) = (settings.name, settings.email) else {
            bail!("A new profile needs both --name and --email");
        };
        ledger.set_user(Some(User::new(name, email, settings.currency)));
    }
    show(ledger);
    Ok(())
}

fn show(ledger: &Ledger) {
    match ledger.user() {
        Some(u) => println!(
            "{}",
            pretty_table(
                &["Name", "Email", "Currency", "Since"],
                vec![vec![
                    u.name.clone(),
                    u.email.clone(),
                    u.currency.clone(),
                    u.created_at.format("%Y-%m-%d").to_string(),
                ]],
            )
        ),
        None => println!("No profile yet; create one with `profile set --name .. --email ..`"),
    }
}
