// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Ledger;
use anyhow::{Result, bail};

pub fn handle(ledger: &mut Ledger, m: &clap::ArgMatches) -> Result<()> {
    if !m.get_flag("yes") {
        bail!("Refusing to reset without --yes");
    }
    ledger.reset_all_data();
    println!("All transactions, insights and saved results deleted");
    Ok(())
}
