// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local SQLite store. Amounts and dates are kept as TEXT; ids are
//! AUTOINCREMENT integers surfaced as strings.

use super::Gateway;
use crate::db;
use crate::error::{LedgerError, Result};
use crate::models::{
    BankRow, Expense, GoalStatus, Income, NewExpense, NewIncome, NewSavingsGoal, SavingsGoal,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(SqliteGateway {
            conn: db::open_or_init(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        db::init_schema(&conn)?;
        Ok(SqliteGateway { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn remove(&self, table: &str, kind: &'static str, id: &str) -> Result<()> {
        let n = self
            .conn
            .execute(&format!("DELETE FROM {} WHERE id=?1", table), params![key(kind, id)?])?;
        if n == 0 {
            return Err(LedgerError::NotFound {
                kind,
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn key(kind: &'static str, id: &str) -> Result<i64> {
    id.trim().parse::<i64>().map_err(|_| LedgerError::NotFound {
        kind,
        id: id.to_string(),
    })
}

fn touched(n: usize, kind: &'static str, id: &str) -> Result<()> {
    if n == 0 {
        Err(LedgerError::NotFound {
            kind,
            id: id.to_string(),
        })
    } else {
        Ok(())
    }
}

fn column<T: FromStr>(r: &Row, idx: usize, what: &str) -> Result<T> {
    let s: String = r.get(idx)?;
    s.parse::<T>()
        .map_err(|_| LedgerError::GatewayUnavailable(format!("Invalid {} '{}' in store", what, s)))
}

fn date_column(r: &Row, idx: usize) -> Result<NaiveDate> {
    let s: String = r.get(idx)?;
    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|_| LedgerError::GatewayUnavailable(format!("Invalid date '{}' in store", s)))
}

impl Gateway for SqliteGateway {
    fn fetch_income(&self) -> Result<Vec<Income>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, date, income_type, amount, category FROM income ORDER BY id")?;
        let mut cur = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            out.push(Income {
                id: id.to_string(),
                date: date_column(r, 1)?,
                income_type: column(r, 2, "source")?,
                amount: column::<Decimal>(r, 3, "amount")?,
                category: column(r, 4, "category")?,
            });
        }
        Ok(out)
    }

    fn fetch_expenses(&self) -> Result<Vec<Expense>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, payment_type, amount, category FROM expenses ORDER BY id",
        )?;
        let mut cur = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            out.push(Expense {
                id: id.to_string(),
                date: date_column(r, 1)?,
                payment_type: column(r, 2, "source")?,
                amount: column::<Decimal>(r, 3, "amount")?,
                category: column(r, 4, "category")?,
            });
        }
        Ok(out)
    }

    fn fetch_savings(&self) -> Result<Vec<SavingsGoal>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, goal, income_type, status, target_amount, current_amount FROM savings ORDER BY id",
        )?;
        let mut cur = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = cur.next()? {
            let id: i64 = r.get(0)?;
            out.push(SavingsGoal {
                id: id.to_string(),
                goal: r.get(1)?,
                income_type: column(r, 2, "source")?,
                status: column(r, 3, "status")?,
                target_amount: column::<Decimal>(r, 4, "target amount")?,
                current_amount: column::<Decimal>(r, 5, "current amount")?,
            });
        }
        Ok(out)
    }

    fn fetch_bank(&self) -> Result<Option<BankRow>> {
        let row: Option<(i64, String, String, String)> = self
            .conn
            .query_row(
                "SELECT id, cash, account, savings_percentage FROM bank WHERE id=1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?;
        let Some((id, cash, account, pct)) = row else {
            return Ok(None);
        };
        let dec = |s: &str| {
            s.parse::<Decimal>().map_err(|_| {
                LedgerError::GatewayUnavailable(format!("Invalid bank value '{}' in store", s))
            })
        };
        Ok(Some(BankRow {
            id: id.to_string(),
            cash: dec(&cash)?,
            account: dec(&account)?,
            savings_percentage: dec(&pct)?,
        }))
    }

    fn create_income(&mut self, income: &NewIncome) -> Result<()> {
        self.conn.execute(
            "INSERT INTO income(date, income_type, amount, category) VALUES (?1, ?2, ?3, ?4)",
            params![
                income.date.to_string(),
                income.income_type.as_str(),
                income.amount.to_string(),
                income.category.as_str()
            ],
        )?;
        Ok(())
    }

    fn update_income(&mut self, income: &Income) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE income SET date=?2, income_type=?3, amount=?4, category=?5 WHERE id=?1",
            params![
                key("income", &income.id)?,
                income.date.to_string(),
                income.income_type.as_str(),
                income.amount.to_string(),
                income.category.as_str()
            ],
        )?;
        touched(n, "income", &income.id)
    }

    fn delete_income(&mut self, id: &str) -> Result<()> {
        self.remove("income", "income", id)
    }

    fn create_expense(&mut self, expense: &NewExpense) -> Result<()> {
        self.conn.execute(
            "INSERT INTO expenses(date, payment_type, amount, category) VALUES (?1, ?2, ?3, ?4)",
            params![
                expense.date.to_string(),
                expense.payment_type.as_str(),
                expense.amount.to_string(),
                expense.category.as_str()
            ],
        )?;
        Ok(())
    }

    fn update_expense(&mut self, expense: &Expense) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE expenses SET date=?2, payment_type=?3, amount=?4, category=?5 WHERE id=?1",
            params![
                key("expense", &expense.id)?,
                expense.date.to_string(),
                expense.payment_type.as_str(),
                expense.amount.to_string(),
                expense.category.as_str()
            ],
        )?;
        touched(n, "expense", &expense.id)
    }

    fn delete_expense(&mut self, id: &str) -> Result<()> {
        self.remove("expenses", "expense", id)
    }

    fn create_saving(&mut self, goal: &NewSavingsGoal, status: GoalStatus) -> Result<()> {
        self.conn.execute(
            "INSERT INTO savings(goal, income_type, status, target_amount, current_amount)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                goal.goal,
                goal.income_type.as_str(),
                status.as_str(),
                goal.target_amount.to_string(),
                goal.current_amount.to_string()
            ],
        )?;
        Ok(())
    }

    fn update_saving(&mut self, goal: &SavingsGoal) -> Result<()> {
        let n = self.conn.execute(
            "UPDATE savings SET goal=?2, income_type=?3, status=?4, target_amount=?5, current_amount=?6
             WHERE id=?1",
            params![
                key("goal", &goal.id)?,
                goal.goal,
                goal.income_type.as_str(),
                goal.status.as_str(),
                goal.target_amount.to_string(),
                goal.current_amount.to_string()
            ],
        )?;
        touched(n, "goal", &goal.id)
    }

    fn delete_saving(&mut self, id: &str) -> Result<()> {
        self.remove("savings", "goal", id)
    }

    fn update_bank(&mut self, bank: &BankRow) -> Result<()> {
        self.conn.execute(
            "INSERT INTO bank(id, cash, account, savings_percentage) VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET cash=excluded.cash, account=excluded.account,
             savings_percentage=excluded.savings_percentage",
            params![
                bank.cash.to_string(),
                bank.account.to_string(),
                bank.savings_percentage.to_string()
            ],
        )?;
        Ok(())
    }
}
