// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use log::info;

use fundkeep::config::{Config, Store};
use fundkeep::gateway::{Gateway, HttpGateway, SqliteGateway};
use fundkeep::{cli, commands, Ledger};

fn run<G: Gateway>(gateway: G, matches: &clap::ArgMatches) -> Result<()> {
    let mut ledger = Ledger::open(gateway).context("Failed to load ledger")?;

    match matches.subcommand() {
        Some(("income", sub)) => commands::income::handle(&mut ledger, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&mut ledger, sub)?,
        Some(("goal", sub)) => commands::goals::handle(&mut ledger, sub)?,
        Some(("balance", sub)) => commands::balance::handle(&ledger, sub)?,
        Some(("rate", sub)) => commands::rate::handle(&mut ledger, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    if matches.subcommand().is_none() {
        cli::build_cli().print_help()?;
        println!();
        return Ok(());
    }
    let config = Config::from_matches(&matches)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level()))
        .init();

    match &config.store {
        Store::Remote(url) => {
            info!("using remote store {}", url);
            run(HttpGateway::new(url, config.timeout)?, &matches)
        }
        Store::Local(path) => {
            info!("using local store {}", path.display());
            run(SqliteGateway::open(path)?, &matches)
        }
    }
}
