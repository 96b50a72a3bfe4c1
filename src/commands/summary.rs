// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::summary::Summary;
use crate::utils::{fmt_amount, fmt_percent, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<G: Gateway>(ledger: &Ledger<G>, m: &clap::ArgMatches) -> Result<()> {
    let s = Summary::from_snapshot(ledger.snapshot());
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &s)? {
        return Ok(());
    }

    let mut rows = vec![vec!["Total income".to_string(), fmt_amount(&s.total_income)]];
    for (cat, amt) in &s.income_by_category {
        rows.push(vec![format!("  {}", cat), fmt_amount(amt)]);
    }
    rows.push(vec!["Total expenses".into(), fmt_amount(&s.total_expenses)]);
    for (cat, amt) in &s.expenses_by_category {
        rows.push(vec![format!("  {}", cat), fmt_amount(amt)]);
    }
    rows.push(vec!["Cash".into(), fmt_amount(&s.balances.cash)]);
    rows.push(vec!["Account".into(), fmt_amount(&s.balances.account)]);
    rows.push(vec![
        "Saved".into(),
        format!(
            "{} of {} ({})",
            fmt_amount(&s.total_saved),
            fmt_amount(&s.total_target),
            fmt_percent(&s.savings_progress, 0)
        ),
    ]);
    rows.push(vec![
        "Goals".into(),
        format!("{} pending, {} completed", s.pending_goals, s.completed_goals),
    ]);
    rows.push(vec![
        format!("Suggested saving ({}%)", s.savings_percentage),
        fmt_amount(&s.suggested_saving),
    ]);
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}
