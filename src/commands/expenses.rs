// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{date_or_today, opt_date, opt_decimal, opt_tag, required};
use crate::gateway::Gateway;
use crate::ledger::Ledger;
use crate::models::{ExpenseCategory, ExpensePatch, NewExpense, SourceType};
use crate::summary::recent_expenses;
use crate::utils::{fmt_amount, maybe_print_json, parse_decimal, parse_tag, pretty_table};
use anyhow::Result;

pub fn handle<G: Gateway>(ledger: &mut Ledger<G>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        Some(("update", sub)) => update(ledger, sub)?,
        Some(("rm", sub)) => {
            let id = required(sub, "id")?;
            ledger.delete_expense(id)?;
            println!("Removed expense {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add<G: Gateway>(ledger: &mut Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let expense = NewExpense {
        date: date_or_today(sub)?,
        payment_type: parse_tag::<SourceType>(required(sub, "source")?)?,
        amount: parse_decimal(required(sub, "amount")?)?,
        category: parse_tag::<ExpenseCategory>(required(sub, "category")?)?,
    };
    let (amount, source) = (expense.amount, expense.payment_type);
    ledger.add_expense(expense)?;
    println!(
        "Recorded expense {} ({}). {} balance: {}",
        fmt_amount(&amount),
        source,
        source,
        fmt_amount(&ledger.balance(source))
    );
    Ok(())
}

fn update<G: Gateway>(ledger: &mut Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = ExpensePatch {
        date: opt_date(sub, "date")?,
        payment_type: opt_tag(sub, "source")?,
        amount: opt_decimal(sub, "amount")?,
        category: opt_tag(sub, "category")?,
    };
    ledger.update_expense(id, patch)?;
    println!("Updated expense {}", id);
    Ok(())
}

fn list<G: Gateway>(ledger: &Ledger<G>, sub: &clap::ArgMatches) -> Result<()> {
    let rows = recent_expenses(ledger.expenses(), sub.get_one::<usize>("limit").copied());
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        let data = rows
            .iter()
            .map(|e| {
                vec![
                    e.id.clone(),
                    e.date.to_string(),
                    e.payment_type.to_string(),
                    e.category.to_string(),
                    fmt_amount(&e.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Paid from", "Category", "Amount"], data)
        );
    }
    Ok(())
}
