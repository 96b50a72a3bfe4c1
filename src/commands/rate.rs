// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::required;
use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::utils::parse_decimal;
use anyhow::Result;

pub fn handle<G: Gateway>(ledger: &mut Ledger<G>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let pct = parse_decimal(required(sub, "percent")?)?;
            ledger.update_savings_percentage(pct)?;
            println!("Savings percentage updated to {}%", pct);
        }
        Some(("show", _)) => {
            println!("Savings percentage: {}%", ledger.savings_percentage());
        }
        _ => {}
    }
    Ok(())
}
