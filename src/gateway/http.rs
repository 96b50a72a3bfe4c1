// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Spreadsheet-backed remote API. Every request targets
//! `{base}?ruta=api/v1/...` and answers with a `{success, data}` envelope.

use super::Gateway;
use super::wire::{
    ApiBank, ApiExpense, ApiIncome, ApiSaving, BankBody, Envelope, ExpenseBody, IdBody,
    IncomeBody, SavingBody,
};
use crate::error::{LedgerError, Result};
use crate::models::{
    BankRow, Expense, GoalStatus, Income, NewExpense, NewIncome, NewSavingsGoal, SavingsGoal,
};
use crate::utils::http_client;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

const INCOME: &str = "api/v1/income";
const EXPENSE: &str = "api/v1/expense";
const SAVING: &str = "api/v1/saving";
const BANK: &str = "api/v1/bank";

pub struct HttpGateway {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(LedgerError::GatewayUnavailable(
                "No API URL configured".to_string(),
            ));
        }
        Ok(HttpGateway {
            base_url: base_url.to_string(),
            client: http_client(timeout)?,
        })
    }

    pub fn url(&self, route: &str) -> String {
        format!("{}?ruta={}", self.base_url, route)
    }

    /// GET a collection; `success: false` yields no data.
    fn fetch<T: DeserializeOwned>(&self, route: &str) -> Result<Option<T>> {
        let url = self.url(route);
        debug!("GET {}", url);
        let body = self.client.get(&url).send()?.error_for_status()?.text()?;
        let env: Envelope<T> = serde_json::from_str(&body)?;
        if !env.success {
            debug!("{} answered success=false", route);
            return Ok(None);
        }
        Ok(env.data)
    }

    fn post<B: Serialize>(&self, route: &str, action: &str, body: &B) -> Result<()> {
        let url = self.url(&format!("{}/{}", route, action));
        debug!("POST {}", url);
        let text = self
            .client
            .post(&url)
            .json(body)
            .send()?
            .error_for_status()?
            .text()?;
        let env: Envelope<Value> = serde_json::from_str(&text)?;
        if !env.success {
            return Err(LedgerError::GatewayUnavailable(format!(
                "{}/{} was rejected by the store",
                route, action
            )));
        }
        Ok(())
    }
}

impl Gateway for HttpGateway {
    fn fetch_income(&self) -> Result<Vec<Income>> {
        let rows: Vec<ApiIncome> = self.fetch(INCOME)?.unwrap_or_default();
        Ok(rows.into_iter().map(Income::from).collect())
    }

    fn fetch_expenses(&self) -> Result<Vec<Expense>> {
        let rows: Vec<ApiExpense> = self.fetch(EXPENSE)?.unwrap_or_default();
        Ok(rows.into_iter().map(Expense::from).collect())
    }

    fn fetch_savings(&self) -> Result<Vec<SavingsGoal>> {
        let rows: Vec<ApiSaving> = self.fetch(SAVING)?.unwrap_or_default();
        Ok(rows.into_iter().map(SavingsGoal::from).collect())
    }

    fn fetch_bank(&self) -> Result<Option<BankRow>> {
        let rows: Vec<ApiBank> = self.fetch(BANK)?.unwrap_or_default();
        Ok(rows.into_iter().next().map(BankRow::from))
    }

    fn create_income(&mut self, income: &NewIncome) -> Result<()> {
        self.post(INCOME, "create", &IncomeBody::create(income))
    }

    fn update_income(&mut self, income: &Income) -> Result<()> {
        self.post(INCOME, "update", &IncomeBody::update(income))
    }

    fn delete_income(&mut self, id: &str) -> Result<()> {
        self.post(INCOME, "delete", &IdBody { id })
    }

    fn create_expense(&mut self, expense: &NewExpense) -> Result<()> {
        self.post(EXPENSE, "create", &ExpenseBody::create(expense))
    }

    fn update_expense(&mut self, expense: &Expense) -> Result<()> {
        self.post(EXPENSE, "update", &ExpenseBody::update(expense))
    }

    fn delete_expense(&mut self, id: &str) -> Result<()> {
        self.post(EXPENSE, "delete", &IdBody { id })
    }

    fn create_saving(&mut self, goal: &NewSavingsGoal, status: GoalStatus) -> Result<()> {
        self.post(SAVING, "create", &SavingBody::create(goal, status))
    }

    fn update_saving(&mut self, goal: &SavingsGoal) -> Result<()> {
        self.post(SAVING, "update", &SavingBody::update(goal))
    }

    fn delete_saving(&mut self, id: &str) -> Result<()> {
        self.post(SAVING, "delete", &IdBody { id })
    }

    fn update_bank(&mut self, bank: &BankRow) -> Result<()> {
        self.post(BANK, "update", &BankBody::from(bank))
    }
}
