// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a closed set of lowercase tags that round-trip through
/// `FromStr`/`Display` and serde with the same spelling.
macro_rules! tag_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "Invalid {} '{}', expected one of: {}",
                        stringify!($name),
                        other,
                        [$($text),+].join(", ")
                    )),
                }
            }
        }
    };
}

tag_enum! {
    /// Money pool an entry draws from or pays into.
    SourceType { Cash => "cash", Account => "account" }
}

tag_enum! {
    IncomeCategory { Salary => "salary", Other => "other" }
}

tag_enum! {
    ExpenseCategory {
        Shopping => "shopping",
        Transportation => "transportation",
        Entertainment => "entertainment",
    }
}

tag_enum! {
    GoalStatus { Pending => "pending", Completed => "completed" }
}

impl GoalStatus {
    /// Status implied by the amounts alone.
    pub fn for_amounts(current: Decimal, target: Decimal) -> Self {
        if current >= target {
            GoalStatus::Completed
        } else {
            GoalStatus::Pending
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            GoalStatus::Pending => GoalStatus::Completed,
            GoalStatus::Completed => GoalStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Income {
    pub id: String,
    pub date: NaiveDate,
    pub income_type: SourceType,
    pub amount: Decimal,
    pub category: IncomeCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub date: NaiveDate,
    pub payment_type: SourceType,
    pub amount: Decimal,
    pub category: ExpenseCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub goal: String,
    pub income_type: SourceType,
    pub status: GoalStatus,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

impl SavingsGoal {
    pub fn progress_percent(&self) -> Decimal {
        crate::balance::percent_of(self.current_amount, self.target_amount)
    }

    pub fn remaining(&self) -> Decimal {
        self.target_amount
            .saturating_sub(self.current_amount)
            .max(Decimal::ZERO)
    }
}

/// The single configuration row kept next to the collections. `cash` and
/// `account` are informational copies of the derived balances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankRow {
    pub id: String,
    pub cash: Decimal,
    pub account: Decimal,
    pub savings_percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    pub date: NaiveDate,
    pub income_type: SourceType,
    pub amount: Decimal,
    pub category: IncomeCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub payment_type: SourceType,
    pub amount: Decimal,
    pub category: ExpenseCategory,
}

/// Goal creation input. Status is derived from the amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavingsGoal {
    pub goal: String,
    pub income_type: SourceType,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomePatch {
    pub date: Option<NaiveDate>,
    pub income_type: Option<SourceType>,
    pub amount: Option<Decimal>,
    pub category: Option<IncomeCategory>,
}

impl IncomePatch {
    pub fn apply(&self, income: &Income) -> Income {
        Income {
            id: income.id.clone(),
            date: self.date.unwrap_or(income.date),
            income_type: self.income_type.unwrap_or(income.income_type),
            amount: self.amount.unwrap_or(income.amount),
            category: self.category.unwrap_or(income.category),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpensePatch {
    pub date: Option<NaiveDate>,
    pub payment_type: Option<SourceType>,
    pub amount: Option<Decimal>,
    pub category: Option<ExpenseCategory>,
}

impl ExpensePatch {
    pub fn apply(&self, expense: &Expense) -> Expense {
        Expense {
            id: expense.id.clone(),
            date: self.date.unwrap_or(expense.date),
            payment_type: self.payment_type.unwrap_or(expense.payment_type),
            amount: self.amount.unwrap_or(expense.amount),
            category: self.category.unwrap_or(expense.category),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavingsPatch {
    pub goal: Option<String>,
    pub income_type: Option<SourceType>,
    pub target_amount: Option<Decimal>,
    pub current_amount: Option<Decimal>,
    /// Manual override; wins over the status derived from the amounts.
    pub status: Option<GoalStatus>,
}

impl SavingsPatch {
    pub fn apply(&self, goal: &SavingsGoal) -> SavingsGoal {
        let target_amount = self.target_amount.unwrap_or(goal.target_amount);
        let current_amount = self.current_amount.unwrap_or(goal.current_amount);
        let amounts_changed = self.target_amount.is_some() || self.current_amount.is_some();
        let status = match self.status {
            Some(s) => s,
            None if amounts_changed => GoalStatus::for_amounts(current_amount, target_amount),
            None => goal.status,
        };
        SavingsGoal {
            id: goal.id.clone(),
            goal: self.goal.clone().unwrap_or_else(|| goal.goal.clone()),
            income_type: self.income_type.unwrap_or(goal.income_type),
            status,
            target_amount,
            current_amount,
        }
    }
}
