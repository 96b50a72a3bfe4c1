// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Remote record shapes. Field names are snake_case on the wire
//! (`income_type`, `payment_type`, `target_amount`, `current_amount`,
//! `savings_percentage`) and amounts travel as JSON numbers.

use crate::models::{
    BankRow, Expense, ExpenseCategory, GoalStatus, Income, IncomeCategory, NewExpense, NewIncome,
    NewSavingsGoal, SavingsGoal, SourceType,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
}

/// Ids come back as strings or bare numbers depending on the sheet.
fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("invalid id {}", other))),
    }
}

/// Accepts `YYYY-MM-DD` and full ISO timestamps such as
/// `2025-01-15T00:00:00.000Z`.
fn wire_date<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
    let s = String::deserialize(d)?;
    let head = s.get(..10).unwrap_or(&s);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").map_err(de::Error::custom)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiIncome {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "wire_date")]
    pub date: NaiveDate,
    pub income_type: SourceType,
    pub amount: Decimal,
    pub category: IncomeCategory,
}

impl From<ApiIncome> for Income {
    fn from(a: ApiIncome) -> Self {
        Income {
            id: a.id,
            date: a.date,
            income_type: a.income_type,
            amount: a.amount,
            category: a.category,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiExpense {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "wire_date")]
    pub date: NaiveDate,
    pub payment_type: SourceType,
    pub amount: Decimal,
    pub category: ExpenseCategory,
}

impl From<ApiExpense> for Expense {
    fn from(a: ApiExpense) -> Self {
        Expense {
            id: a.id,
            date: a.date,
            payment_type: a.payment_type,
            amount: a.amount,
            category: a.category,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSaving {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub goal: String,
    pub income_type: SourceType,
    pub status: GoalStatus,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
}

impl From<ApiSaving> for SavingsGoal {
    fn from(a: ApiSaving) -> Self {
        SavingsGoal {
            id: a.id,
            goal: a.goal,
            income_type: a.income_type,
            status: a.status,
            target_amount: a.target_amount,
            current_amount: a.current_amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiBank {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub cash: Decimal,
    pub account: Decimal,
    pub savings_percentage: Decimal,
}

impl From<ApiBank> for BankRow {
    fn from(a: ApiBank) -> Self {
        BankRow {
            id: a.id,
            cash: a.cash,
            account: a.account,
            savings_percentage: a.savings_percentage,
        }
    }
}

// Request bodies. `id` is left out on create.

#[derive(Debug, Serialize)]
pub struct IncomeBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub date: String,
    pub income_type: SourceType,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub category: IncomeCategory,
}

impl<'a> IncomeBody<'a> {
    pub fn create(i: &NewIncome) -> Self {
        IncomeBody {
            id: None,
            date: i.date.to_string(),
            income_type: i.income_type,
            amount: i.amount,
            category: i.category,
        }
    }

    pub fn update(i: &'a Income) -> Self {
        IncomeBody {
            id: Some(&i.id),
            date: i.date.to_string(),
            income_type: i.income_type,
            amount: i.amount,
            category: i.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExpenseBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub date: String,
    pub payment_type: SourceType,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub category: ExpenseCategory,
}

impl<'a> ExpenseBody<'a> {
    pub fn create(e: &NewExpense) -> Self {
        ExpenseBody {
            id: None,
            date: e.date.to_string(),
            payment_type: e.payment_type,
            amount: e.amount,
            category: e.category,
        }
    }

    pub fn update(e: &'a Expense) -> Self {
        ExpenseBody {
            id: Some(&e.id),
            date: e.date.to_string(),
            payment_type: e.payment_type,
            amount: e.amount,
            category: e.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SavingBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub goal: &'a str,
    pub income_type: SourceType,
    pub status: GoalStatus,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub target_amount: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub current_amount: Decimal,
}

impl<'a> SavingBody<'a> {
    pub fn create(g: &'a NewSavingsGoal, status: GoalStatus) -> Self {
        SavingBody {
            id: None,
            goal: &g.goal,
            income_type: g.income_type,
            status,
            target_amount: g.target_amount,
            current_amount: g.current_amount,
        }
    }

    pub fn update(g: &'a SavingsGoal) -> Self {
        SavingBody {
            id: Some(&g.id),
            goal: &g.goal,
            income_type: g.income_type,
            status: g.status,
            target_amount: g.target_amount,
            current_amount: g.current_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BankBody<'a> {
    pub id: &'a str,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub cash: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub account: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub savings_percentage: Decimal,
}

impl<'a> From<&'a BankRow> for BankBody<'a> {
    fn from(b: &'a BankRow) -> Self {
        BankBody {
            id: &b.id,
            cash: b.cash,
            account: b.account,
            savings_percentage: b.savings_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IdBody<'a> {
    pub id: &'a str,
}
