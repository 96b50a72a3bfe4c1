// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Available balance per source, derived from the three collections:
//! income minus expenses minus the current amount held by savings goals.

use crate::models::{Expense, Income, SavingsGoal, SourceType};
use rust_decimal::Decimal;
use serde::Serialize;

/// Balance of `source`. Negative results are returned as-is; totals past
/// what `Decimal` can hold saturate instead of overflowing.
pub fn balance(
    source: SourceType,
    income: &[Income],
    expenses: &[Expense],
    savings: &[SavingsGoal],
) -> Decimal {
    let (earned, spent, reserved) = source_totals(source, income, expenses, savings);
    let earned = saturating_sum(earned);
    earned
        .saturating_sub(saturating_sum(spent))
        .saturating_sub(saturating_sum(reserved))
}

/// Like [`balance`], but `None` when any intermediate total overflows.
pub fn checked_balance(
    source: SourceType,
    income: &[Income],
    expenses: &[Expense],
    savings: &[SavingsGoal],
) -> Option<Decimal> {
    let (earned, spent, reserved) = source_totals(source, income, expenses, savings);
    checked_sum(earned)?
        .checked_sub(checked_sum(spent)?)?
        .checked_sub(checked_sum(reserved)?)
}

fn source_totals<'a>(
    source: SourceType,
    income: &'a [Income],
    expenses: &'a [Expense],
    savings: &'a [SavingsGoal],
) -> (
    impl Iterator<Item = Decimal> + 'a,
    impl Iterator<Item = Decimal> + 'a,
    impl Iterator<Item = Decimal> + 'a,
) {
    (
        income
            .iter()
            .filter(move |i| i.income_type == source)
            .map(|i| i.amount),
        expenses
            .iter()
            .filter(move |e| e.payment_type == source)
            .map(|e| e.amount),
        savings
            .iter()
            .filter(move |g| g.income_type == source)
            .map(|g| g.current_amount),
    )
}

pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

pub fn checked_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// `part` as a percentage of `whole`; 0 when `whole` is not positive.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .map(|share| share.saturating_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part < Decimal::ZERO { Decimal::MIN } else { Decimal::MAX })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balances {
    pub cash: Decimal,
    pub account: Decimal,
}

impl Balances {
    pub fn compute(income: &[Income], expenses: &[Expense], savings: &[SavingsGoal]) -> Self {
        Balances {
            cash: balance(SourceType::Cash, income, expenses, savings),
            account: balance(SourceType::Account, income, expenses, savings),
        }
    }

    pub fn get(&self, source: SourceType) -> Decimal {
        match source {
            SourceType::Cash => self.cash,
            SourceType::Account => self.account,
        }
    }

    pub fn total(&self) -> Decimal {
        self.cash.saturating_add(self.account)
    }

    /// Share of the total held in `source`, 0 when nothing is held.
    pub fn share_percent(&self, source: SourceType) -> Decimal {
        percent_of(self.get(source), self.total())
    }
}
