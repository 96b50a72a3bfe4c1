// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable stores the ledger writes to and reloads from.
//!
//! A gateway makes at most one attempt per call. Fetches of a collection the
//! store reports as unavailable (`success: false`) come back empty; transport
//! and decoding failures are returned as
//! [`GatewayUnavailable`](crate::error::LedgerError::GatewayUnavailable).

pub mod http;
pub mod sqlite;
pub mod wire;

pub use http::HttpGateway;
pub use sqlite::SqliteGateway;

use crate::error::Result;
use crate::models::{
    BankRow, Expense, GoalStatus, Income, NewExpense, NewIncome, NewSavingsGoal, SavingsGoal,
};

pub trait Gateway {
    fn fetch_income(&self) -> Result<Vec<Income>>;
    fn fetch_expenses(&self) -> Result<Vec<Expense>>;
    fn fetch_savings(&self) -> Result<Vec<SavingsGoal>>;
    fn fetch_bank(&self) -> Result<Option<BankRow>>;

    fn create_income(&mut self, income: &NewIncome) -> Result<()>;
    fn update_income(&mut self, income: &Income) -> Result<()>;
    fn delete_income(&mut self, id: &str) -> Result<()>;

    fn create_expense(&mut self, expense: &NewExpense) -> Result<()>;
    fn update_expense(&mut self, expense: &Expense) -> Result<()>;
    fn delete_expense(&mut self, id: &str) -> Result<()>;

    fn create_saving(&mut self, goal: &NewSavingsGoal, status: GoalStatus) -> Result<()>;
    fn update_saving(&mut self, goal: &SavingsGoal) -> Result<()>;
    fn delete_saving(&mut self, id: &str) -> Result<()>;

    fn update_bank(&mut self, bank: &BankRow) -> Result<()>;
}
