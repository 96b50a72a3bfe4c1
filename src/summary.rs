// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balance::{percent_of, saturating_sum, Balances};
use crate::ledger::Snapshot;
use crate::models::{Expense, ExpenseCategory, GoalStatus, Income, IncomeCategory};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Dashboard figures derived from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_income: Decimal,
    pub income_by_category: BTreeMap<IncomeCategory, Decimal>,
    pub total_expenses: Decimal,
    pub expenses_by_category: BTreeMap<ExpenseCategory, Decimal>,
    pub balances: Balances,
    pub total_saved: Decimal,
    pub total_target: Decimal,
    pub savings_progress: Decimal,
    pub completed_goals: usize,
    pub pending_goals: usize,
    pub savings_percentage: Decimal,
    pub suggested_saving: Decimal,
}

impl Summary {
    pub fn from_snapshot(s: &Snapshot) -> Self {
        let mut income_by_category: BTreeMap<IncomeCategory, Decimal> = IncomeCategory::ALL
            .iter()
            .map(|c| (*c, Decimal::ZERO))
            .collect();
        for i in &s.income {
            let sum = income_by_category.entry(i.category).or_default();
            *sum = sum.saturating_add(i.amount);
        }
        let mut expenses_by_category: BTreeMap<ExpenseCategory, Decimal> = ExpenseCategory::ALL
            .iter()
            .map(|c| (*c, Decimal::ZERO))
            .collect();
        for e in &s.expenses {
            let sum = expenses_by_category.entry(e.category).or_default();
            *sum = sum.saturating_add(e.amount);
        }

        let total_income = saturating_sum(income_by_category.values().copied());
        let total_expenses = saturating_sum(expenses_by_category.values().copied());
        let total_saved = saturating_sum(s.savings.iter().map(|g| g.current_amount));
        let total_target = saturating_sum(s.savings.iter().map(|g| g.target_amount));
        let savings_progress = percent_of(total_saved, total_target);
        let completed_goals = s
            .savings
            .iter()
            .filter(|g| g.status == GoalStatus::Completed)
            .count();
        let savings_percentage = s.savings_percentage();

        Summary {
            total_income,
            income_by_category,
            total_expenses,
            expenses_by_category,
            balances: s.balances(),
            total_saved,
            total_target,
            savings_progress,
            completed_goals,
            pending_goals: s.savings.len() - completed_goals,
            savings_percentage,
            suggested_saving: (total_income / Decimal::ONE_HUNDRED).saturating_mul(savings_percentage),
        }
    }
}

/// Newest first; same-day entries by id, newest first.
pub fn recent_income(income: &[Income], limit: Option<usize>) -> Vec<Income> {
    let mut rows = income.to_vec();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| id_order(&b.id, &a.id)));
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}

pub fn recent_expenses(expenses: &[Expense], limit: Option<usize>) -> Vec<Expense> {
    let mut rows = expenses.to_vec();
    rows.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| id_order(&b.id, &a.id)));
    if let Some(n) = limit {
        rows.truncate(n);
    }
    rows
}

// Numeric ids compare numerically so "10" sorts after "9".
fn id_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
