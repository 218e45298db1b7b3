// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use finsight::{cli, commands, db};

fn init_logging(verbose: bool) {
    // RUST_LOG wins over --verbose, which wins over the default
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    init_logging(matches.get_flag("verbose"));

    let path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::db_path()?,
    };
    let conn = db::open_at(&path)?;
    let mut ledger = db::load_ledger(&conn)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store initialized at {}", path.display());
        }
        Some(("categories", _)) => commands::categories::handle()?,
        Some(("profile", sub)) => commands::profile::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("calc", sub)) => commands::calc::handle(&mut ledger, sub)?,
        Some(("insights", sub)) => commands::insights::handle(&mut ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if ledger.is_dirty() {
        db::save_ledger(&conn, &mut ledger)?;
    }
    Ok(())
}
