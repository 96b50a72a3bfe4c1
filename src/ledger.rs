// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger owns the income, expense and savings collections plus the
//! bank/configuration row, and keeps per-source balances consistent.
//!
//! The gateway is the source of truth. Every mutation validates against the
//! current snapshot, issues exactly one write and then reloads all four
//! collections. A failed write leaves the snapshot untouched.

use crate::balance::{balance, checked_balance, checked_sum, Balances};
use crate::error::{LedgerError, Result};
use crate::gateway::Gateway;
use crate::models::{
    BankRow, Expense, ExpensePatch, GoalStatus, Income, IncomePatch, NewExpense, NewIncome,
    NewSavingsGoal, SavingsGoal, SavingsPatch, SourceType,
};
use log::{debug, info, warn};
use rust_decimal::Decimal;

/// Last successfully reloaded state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub income: Vec<Income>,
    pub expenses: Vec<Expense>,
    pub savings: Vec<SavingsGoal>,
    pub bank: Option<BankRow>,
}

impl Snapshot {
    pub fn balance(&self, source: SourceType) -> Decimal {
        balance(source, &self.income, &self.expenses, &self.savings)
    }

    pub fn balances(&self) -> Balances {
        Balances::compute(&self.income, &self.expenses, &self.savings)
    }

    pub fn savings_percentage(&self) -> Decimal {
        self.bank
            .as_ref()
            .map(|b| b.savings_percentage)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn find_income(&self, id: &str) -> Option<&Income> {
        self.income.iter().find(|i| i.id == id)
    }

    pub fn find_expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn find_goal(&self, id: &str) -> Option<&SavingsGoal> {
        self.savings.iter().find(|g| g.id == id)
    }

    /// False when a collection total or a balance no longer fits in a
    /// `Decimal`.
    pub fn totals_in_range(&self) -> bool {
        let totals = || -> Option<Decimal> {
            checked_sum(self.income.iter().map(|i| i.amount))?;
            checked_sum(self.expenses.iter().map(|e| e.amount))?;
            checked_sum(self.savings.iter().map(|g| g.current_amount))?;
            checked_sum(self.savings.iter().map(|g| g.target_amount))?;
            let per_source = |source| {
                checked_balance(source, &self.income, &self.expenses, &self.savings)
            };
            per_source(SourceType::Cash)?.checked_add(per_source(SourceType::Account)?)
        };
        totals().is_some()
    }

    // An empty id stands for a record the store has not assigned one yet.
    fn with_income(&self, row: Income) -> Snapshot {
        let mut next = self.clone();
        match next.income.iter_mut().find(|i| !row.id.is_empty() && i.id == row.id) {
            Some(slot) => *slot = row,
            None => next.income.push(row),
        }
        next
    }

    fn with_expense(&self, row: Expense) -> Snapshot {
        let mut next = self.clone();
        match next.expenses.iter_mut().find(|e| !row.id.is_empty() && e.id == row.id) {
            Some(slot) => *slot = row,
            None => next.expenses.push(row),
        }
        next
    }

    fn with_goal(&self, row: SavingsGoal) -> Snapshot {
        let mut next = self.clone();
        match next.savings.iter_mut().find(|g| !row.id.is_empty() && g.id == row.id) {
            Some(slot) => *slot = row,
            None => next.savings.push(row),
        }
        next
    }
}

pub struct Ledger<G: Gateway> {
    gateway: G,
    snapshot: Snapshot,
}

fn not_found(kind: &'static str, id: &str) -> LedgerError {
    warn!("{} '{}' not found", kind, id);
    LedgerError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn rejected(e: LedgerError) -> LedgerError {
    warn!("rejected: {}", e);
    e
}

fn non_negative(what: &str, amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(rejected(LedgerError::InvalidAmount(format!(
            "{} must not be negative (got {})",
            what, amount
        ))));
    }
    Ok(())
}

fn positive(what: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(rejected(LedgerError::InvalidAmount(format!(
            "{} must be greater than zero (got {})",
            what, amount
        ))));
    }
    Ok(())
}

fn ensure_in_range(next: &Snapshot) -> Result<()> {
    if !next.totals_in_range() {
        return Err(rejected(LedgerError::InvalidAmount(
            "amount is too large: ledger totals would overflow".to_string(),
        )));
    }
    Ok(())
}

fn ensure_available(source: SourceType, amount: Decimal, available: Decimal) -> Result<()> {
    if amount > available {
        return Err(rejected(LedgerError::InsufficientFunds {
            source_type: source,
            available,
        }));
    }
    Ok(())
}

impl<G: Gateway> Ledger<G> {
    /// Wraps `gateway` with an empty snapshot; call [`Ledger::reload`]
    /// before reading.
    pub fn new(gateway: G) -> Self {
        Ledger {
            gateway,
            snapshot: Snapshot::default(),
        }
    }

    pub fn open(gateway: G) -> Result<Self> {
        let mut ledger = Ledger::new(gateway);
        ledger.reload()?;
        Ok(ledger)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn income(&self) -> &[Income] {
        &self.snapshot.income
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.snapshot.expenses
    }

    pub fn savings(&self) -> &[SavingsGoal] {
        &self.snapshot.savings
    }

    pub fn savings_percentage(&self) -> Decimal {
        self.snapshot.savings_percentage()
    }

    pub fn balance(&self, source: SourceType) -> Decimal {
        self.snapshot.balance(source)
    }

    pub fn balances(&self) -> Balances {
        self.snapshot.balances()
    }

    /// Replaces the snapshot with a fresh read of all four collections.
    /// All-or-nothing: on any failure the previous snapshot is kept.
    pub fn reload(&mut self) -> Result<()> {
        let fresh = Snapshot {
            income: self.gateway.fetch_income()?,
            expenses: self.gateway.fetch_expenses()?,
            savings: self.gateway.fetch_savings()?,
            bank: self.gateway.fetch_bank()?,
        };
        debug!(
            "reloaded {} income, {} expenses, {} goals",
            fresh.income.len(),
            fresh.expenses.len(),
            fresh.savings.len()
        );
        self.snapshot = fresh;
        Ok(())
    }

    /// Runs one gateway write, then refreshes. The write is never retried.
    fn commit<F>(&mut self, what: &str, write: F) -> Result<()>
    where
        F: FnOnce(&mut G) -> Result<()>,
    {
        debug!("{}: writing", what);
        if let Err(e) = write(&mut self.gateway) {
            warn!("{}: write failed: {}", what, e);
            return Err(e);
        }
        if let Err(e) = self.reload() {
            warn!("{}: applied but refresh failed: {}", what, e);
            return Err(LedgerError::GatewayUnavailable(format!(
                "{} was saved but reloading failed: {}",
                what, e
            )));
        }
        info!("{}: done", what);
        Ok(())
    }

    pub fn add_income(&mut self, income: NewIncome) -> Result<()> {
        non_negative("Income amount", income.amount)?;
        ensure_in_range(&self.snapshot.with_income(Income {
            id: String::new(),
            date: income.date,
            income_type: income.income_type,
            amount: income.amount,
            category: income.category,
        }))?;
        self.commit("add income", |g| g.create_income(&income))
    }

    pub fn update_income(&mut self, id: &str, patch: IncomePatch) -> Result<()> {
        let current = self
            .snapshot
            .find_income(id)
            .ok_or_else(|| not_found("income", id))?;
        let updated = patch.apply(current);
        non_negative("Income amount", updated.amount)?;
        ensure_in_range(&self.snapshot.with_income(updated.clone()))?;
        self.commit("update income", |g| g.update_income(&updated))
    }

    pub fn delete_income(&mut self, id: &str) -> Result<()> {
        if self.snapshot.find_income(id).is_none() {
            return Err(not_found("income", id));
        }
        self.commit("delete income", |g| g.delete_income(id))
    }

    pub fn add_expense(&mut self, expense: NewExpense) -> Result<()> {
        non_negative("Expense amount", expense.amount)?;
        let available = self.balance(expense.payment_type);
        ensure_available(expense.payment_type, expense.amount, available)?;
        ensure_in_range(&self.snapshot.with_expense(Expense {
            id: String::new(),
            date: expense.date,
            payment_type: expense.payment_type,
            amount: expense.amount,
            category: expense.category,
        }))?;
        self.commit("add expense", |g| g.create_expense(&expense))
    }

    /// Only checks funds when the update draws more from a source than the
    /// old record did.
    pub fn update_expense(&mut self, id: &str, patch: ExpensePatch) -> Result<()> {
        let current = self
            .snapshot
            .find_expense(id)
            .ok_or_else(|| not_found("expense", id))?;
        let updated = patch.apply(current);
        non_negative("Expense amount", updated.amount)?;

        let source = updated.payment_type;
        let old_draw = if current.payment_type == source {
            current.amount
        } else {
            Decimal::ZERO
        };
        if updated.amount > old_draw {
            let available = self.balance(source).saturating_add(old_draw);
            ensure_available(source, updated.amount, available)?;
        }
        ensure_in_range(&self.snapshot.with_expense(updated.clone()))?;
        self.commit("update expense", |g| g.update_expense(&updated))
    }

    pub fn delete_expense(&mut self, id: &str) -> Result<()> {
        if self.snapshot.find_expense(id).is_none() {
            return Err(not_found("expense", id));
        }
        self.commit("delete expense", |g| g.delete_expense(id))
    }

    pub fn add_savings(&mut self, goal: NewSavingsGoal) -> Result<()> {
        positive("Target amount", goal.target_amount)?;
        non_negative("Current amount", goal.current_amount)?;
        let available = self.balance(goal.income_type);
        ensure_available(goal.income_type, goal.current_amount, available)?;
        let status = GoalStatus::for_amounts(goal.current_amount, goal.target_amount);
        ensure_in_range(&self.snapshot.with_goal(SavingsGoal {
            id: String::new(),
            goal: goal.goal.clone(),
            income_type: goal.income_type,
            status,
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
        }))?;
        self.commit("add goal", |g| g.create_saving(&goal, status))
    }

    /// Applies `patch`. Status follows the amounts unless the patch sets it.
    pub fn update_savings(&mut self, id: &str, patch: SavingsPatch) -> Result<()> {
        let current = self
            .snapshot
            .find_goal(id)
            .ok_or_else(|| not_found("goal", id))?;
        let updated = patch.apply(current);
        positive("Target amount", updated.target_amount)?;
        non_negative("Current amount", updated.current_amount)?;

        let source = updated.income_type;
        let old_draw = if current.income_type == source {
            current.current_amount
        } else {
            Decimal::ZERO
        };
        if updated.current_amount > old_draw {
            let available = self.balance(source).saturating_add(old_draw);
            ensure_available(source, updated.current_amount, available)?;
        }
        ensure_in_range(&self.snapshot.with_goal(updated.clone()))?;
        self.commit("update goal", |g| g.update_saving(&updated))
    }

    /// Flips pending/completed as a manual override.
    pub fn toggle_goal_status(&mut self, id: &str) -> Result<()> {
        let status = self
            .snapshot
            .find_goal(id)
            .ok_or_else(|| not_found("goal", id))?
            .status
            .toggled();
        self.update_savings(
            id,
            SavingsPatch {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    /// Removing a goal releases its current amount back to its source.
    pub fn delete_savings(&mut self, id: &str) -> Result<()> {
        if self.snapshot.find_goal(id).is_none() {
            return Err(not_found("goal", id));
        }
        self.commit("delete goal", |g| g.delete_saving(id))
    }

    /// Moves `amount` from `source` into the goal. Checks run in order:
    /// amount, goal lookup, source match, live balance.
    pub fn add_amount_to_goal(
        &mut self,
        id: &str,
        amount: Decimal,
        source: SourceType,
    ) -> Result<()> {
        positive("Amount", amount)?;
        let goal = self
            .snapshot
            .find_goal(id)
            .ok_or_else(|| not_found("goal", id))?;
        if goal.income_type != source {
            return Err(rejected(LedgerError::SourceMismatch {
                required: goal.income_type,
                attempted: source,
            }));
        }
        let available = balance(
            source,
            &self.snapshot.income,
            &self.snapshot.expenses,
            &self.snapshot.savings,
        );
        ensure_available(source, amount, available)?;

        let current_amount = goal.current_amount.checked_add(amount).ok_or_else(|| {
            rejected(LedgerError::InvalidAmount(format!(
                "goal '{}' cannot hold {} more",
                id, amount
            )))
        })?;
        let funded = SavingsPatch {
            current_amount: Some(current_amount),
            ..Default::default()
        }
        .apply(goal);
        ensure_in_range(&self.snapshot.with_goal(funded.clone()))?;
        self.commit("fund goal", |g| g.update_saving(&funded))
    }

    /// Advisory only; stored with the current balances in the bank row.
    pub fn update_savings_percentage(&mut self, value: Decimal) -> Result<()> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(rejected(LedgerError::InvalidAmount(format!(
                "savings percentage must be between 0 and 100 (got {})",
                value
            ))));
        }
        let balances = self.balances();
        let row = BankRow {
            id: self
                .snapshot
                .bank
                .as_ref()
                .map(|b| b.id.clone())
                .unwrap_or_else(|| "1".to_string()),
            cash: balances.cash,
            account: balances.account,
            savings_percentage: value,
        };
        self.commit("update savings percentage", |g| g.update_bank(&row))
    }
}
