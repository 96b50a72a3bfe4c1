// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::models::SourceType;
use crate::utils::{fmt_amount, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<G: Gateway>(ledger: &Ledger<G>, m: &clap::ArgMatches) -> Result<()> {
    let balances = ledger.balances();
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &balances)? {
        return Ok(());
    }
    let mut rows: Vec<Vec<String>> = SourceType::ALL
        .iter()
        .map(|s| {
            vec![
                s.to_string(),
                fmt_amount(&balances.get(*s)),
                fmt_percent(&balances.share_percent(*s), 1),
            ]
        })
        .collect();
    rows.push(vec![
        "total".into(),
        fmt_amount(&balances.total()),
        String::new(),
    ]);
    println!("{}", pretty_table(&["Source", "Available", "Share"], rows));
    Ok(())
}
