// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::CATEGORIES;
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle() -> Result<()> {
    let data = CATEGORIES
        .iter()
        .map(|c| {
            vec![
                c.id.to_string(),
                format!("{} {}", c.icon, c.name),
                c.color.to_string(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["ID", "Category", "Color"], data));
    Ok(())
}
