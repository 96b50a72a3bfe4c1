// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{opt_decimal, opt_tag, optional, required};
use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::models::{NewSavingsGoal, SavingsPatch, SourceType};
use crate::utils::{
    fmt_amount, fmt_percent, maybe_print_json, parse_decimal, parse_tag, pretty_table,
};
use anyhow::Result;

pub fn handle<G: Gateway>(ledger: &mut Ledger<G>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("update", sub)) => update(ledger, sub)?,
        Some(("fund", sub)) => fund(ledger, sub)?,
        Some(("toggle", sub)) => {
            let id = required(sub, "id")?;
            ledger.toggle_goal_status(id)?;
            if let Some(g) = ledger.snapshot().find_goal(id) {
                println!("Goal '{}' is now {}", g.goal, g.status);
            }
        }
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            let label = ledger
                .snapshot()
                .find_goal(id)
                .map(|g| g.goal.clone())
                .unwrap_or_else(|| id.to_string());
            ledger.delete_savings(id)?;
            println!("Deleted goal '{}'", label);
        }
        _ => {}
    }
    Ok(())
}

fn add<G: Gateway>(ledger: &mut Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let goal = NewSavingsGoal {
        goal: required(sub, "label")?.to_string(),
        income_type: parse_tag::<SourceType>(required(sub, "source")?)?,
        target_amount: parse_decimal(required(sub, "target")?)?,
        current_amount: parse_decimal(required(sub, "current")?)?,
    };
    let label = goal.goal.clone();
    ledger.add_savings(goal)?;
    println!("Goal \"{}\" created successfully", label);
    Ok(())
}

fn update<G: Gateway>(ledger: &mut Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = SavingsPatch {
        goal: optional(sub, "label").map(str::to_string),
        income_type: opt_tag(sub, "source")?,
        target_amount: opt_decimal(sub, "target")?,
        current_amount: opt_decimal(sub, "current")?,
        status: opt_tag(sub, "status")?,
    };
    ledger.update_savings(id, patch)?;
    println!("Goal updated successfully");
    Ok(())
}

fn fund<G: Gateway>(ledger: &mut Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let amount = parse_decimal(required(sub, "amount")?)?;
    // Unknown ids are left to the ledger so its checks keep their order.
    let source = match opt_tag::<SourceType>(sub, "source")? {
        Some(s) => s,
        None => ledger
            .snapshot()
            .find_goal(id)
            .map(|g| g.income_type)
            .unwrap_or(SourceType::Account),
    };
    ledger.add_amount_to_goal(id, amount, source)?;
    if let Some(g) = ledger.snapshot().find_goal(id) {
        println!(
            "{} added to {} ({} / {}, {})",
            fmt_amount(&amount),
            g.goal,
            fmt_amount(&g.current_amount),
            fmt_amount(&g.target_amount),
            g.status
        );
    }
    Ok(())
}

fn list<G: Gateway>(ledger: &Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let goals = ledger.savings();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &goals)? {
        let balances = ledger.balances();
        let data = goals
            .iter()
            .map(|g| {
                vec![
                    g.id.clone(),
                    g.goal.clone(),
                    g.income_type.to_string(),
                    g.status.to_string(),
                    format!(
                        "{} / {}",
                        fmt_amount(&g.current_amount),
                        fmt_amount(&g.target_amount)
                    ),
                    fmt_percent(&g.progress_percent(), 0),
                    fmt_amount(&balances.get(g.income_type)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Goal", "Source", "Status", "Saved", "Progress", "Available"],
                data
            )
        );
    }
    Ok(())
}
