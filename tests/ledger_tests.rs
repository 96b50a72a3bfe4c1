// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fundkeep::gateway::SqliteGateway;
use fundkeep::models::{
    ExpenseCategory, ExpensePatch, GoalStatus, IncomeCategory, IncomePatch, NewExpense,
    NewIncome, NewSavingsGoal, SavingsPatch, SourceType,
};
use fundkeep::{Ledger, LedgerError};
use rust_decimal::Decimal;

fn setup() -> Ledger<SqliteGateway> {
    Ledger::open(SqliteGateway::open_in_memory().unwrap()).unwrap()
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn income(source: SourceType, amount: &str) -> NewIncome {
    NewIncome {
        date: day(),
        income_type: source,
        amount: dec(amount),
        category: IncomeCategory::Salary,
    }
}

fn expense(source: SourceType, amount: &str) -> NewExpense {
    NewExpense {
        date: day(),
        payment_type: source,
        amount: dec(amount),
        category: ExpenseCategory::Shopping,
    }
}

fn goal(source: SourceType, target: &str, current: &str) -> NewSavingsGoal {
    NewSavingsGoal {
        goal: "Emergency fund".into(),
        income_type: source,
        target_amount: dec(target),
        current_amount: dec(current),
    }
}

/// income - expenses - reserved, recomputed by hand for one source.
fn expected(l: &Ledger<SqliteGateway>, source: SourceType) -> Decimal {
    let inc: Decimal = l
        .income()
        .iter()
        .filter(|i| i.income_type == source)
        .map(|i| i.amount)
        .sum();
    let exp: Decimal = l
        .expenses()
        .iter()
        .filter(|e| e.payment_type == source)
        .map(|e| e.amount)
        .sum();
    let sav: Decimal = l
        .savings()
        .iter()
        .filter(|g| g.income_type == source)
        .map(|g| g.current_amount)
        .sum();
    inc - exp - sav
}

fn assert_invariant(l: &Ledger<SqliteGateway>) {
    for s in SourceType::ALL {
        assert_eq!(l.balance(*s), expected(l, *s), "balance drift for {}", s);
    }
}

#[test]
fn funding_scenario_end_to_end() {
    let mut l = setup();
    assert!(l.balance(SourceType::Cash).is_zero());
    assert!(l.balance(SourceType::Account).is_zero());

    l.add_income(income(SourceType::Account, "500")).unwrap();
    assert_eq!(l.balance(SourceType::Account), dec("500"));

    l.add_expense(expense(SourceType::Account, "200")).unwrap();
    assert_eq!(l.balance(SourceType::Account), dec("300"));

    l.add_savings(goal(SourceType::Account, "1000", "100")).unwrap();
    assert_eq!(l.balance(SourceType::Account), dec("200"));
    let id = l.savings()[0].id.clone();
    assert_eq!(l.savings()[0].status, GoalStatus::Pending);

    l.add_amount_to_goal(&id, dec("200"), SourceType::Account)
        .unwrap();
    let g = l.snapshot().find_goal(&id).unwrap();
    assert_eq!(g.current_amount, dec("300"));
    assert_eq!(g.status, GoalStatus::Pending);
    assert!(l.balance(SourceType::Account).is_zero());

    let err = l
        .add_amount_to_goal(&id, dec("50"), SourceType::Account)
        .unwrap_err();
    assert_eq!(
        err,
        LedgerError::InsufficientFunds {
            source_type: SourceType::Account,
            available: Decimal::ZERO
        }
    );
    assert_eq!(
        err.to_string(),
        "Insufficient funds in account. Available: 0.00"
    );

    let err = l
        .add_amount_to_goal(&id, dec("50"), SourceType::Cash)
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::SourceMismatch {
            required: SourceType::Account,
            attempted: SourceType::Cash
        }
    ));
    assert_invariant(&l);

    // deleting the goal releases its 300 back to the account
    l.delete_savings(&id).unwrap();
    assert!(l.savings().is_empty());
    assert_eq!(l.balance(SourceType::Account), dec("300"));
    assert_invariant(&l);
}

#[test]
fn expense_over_balance_is_rejected_with_available_amount() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "80.5")).unwrap();
    let err = l
        .add_expense(expense(SourceType::Cash, "100"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Insufficient funds in cash. Available: 80.50"
    );
    assert!(l.expenses().is_empty());
}

#[test]
fn expense_may_use_the_whole_balance() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "40")).unwrap();
    l.add_expense(expense(SourceType::Cash, "40")).unwrap();
    assert!(l.balance(SourceType::Cash).is_zero());
}

#[test]
fn goal_creation_checks_its_own_source() {
    let mut l = setup();
    l.add_income(income(SourceType::Account, "1000")).unwrap();
    let err = l
        .add_savings(goal(SourceType::Cash, "500", "10"))
        .unwrap_err();
    assert!(matches!(
        err,
        LedgerError::InsufficientFunds {
            source_type: SourceType::Cash,
            ..
        }
    ));
    // a zero starting amount needs no funds
    l.add_savings(goal(SourceType::Cash, "500", "0")).unwrap();
    assert_eq!(l.savings().len(), 1);
}

#[test]
fn goal_created_at_target_is_completed() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "300")).unwrap();
    l.add_savings(goal(SourceType::Cash, "250", "250")).unwrap();
    assert_eq!(l.savings()[0].status, GoalStatus::Completed);
    assert_eq!(l.balance(SourceType::Cash), dec("50"));
}

#[test]
fn funding_to_exact_target_completes_and_one_cent_short_does_not() {
    let mut l = setup();
    l.add_income(income(SourceType::Account, "1000")).unwrap();
    l.add_savings(goal(SourceType::Account, "100", "0")).unwrap();
    l.add_savings(goal(SourceType::Account, "100", "0")).unwrap();
    let exact = l.savings()[0].id.clone();
    let short = l.savings()[1].id.clone();

    l.add_amount_to_goal(&exact, dec("100"), SourceType::Account)
        .unwrap();
    l.add_amount_to_goal(&short, dec("99.99"), SourceType::Account)
        .unwrap();

    assert_eq!(
        l.snapshot().find_goal(&exact).unwrap().status,
        GoalStatus::Completed
    );
    assert_eq!(
        l.snapshot().find_goal(&short).unwrap().status,
        GoalStatus::Pending
    );
    assert_eq!(l.balance(SourceType::Account), dec("800.01"));
}

#[test]
fn cash_goal_never_draws_from_account() {
    let mut l = setup();
    l.add_income(income(SourceType::Account, "1000000")).unwrap();
    l.add_savings(goal(SourceType::Cash, "10", "0")).unwrap();
    let id = l.savings()[0].id.clone();
    let err = l
        .add_amount_to_goal(&id, dec("1"), SourceType::Account)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("cash") && msg.contains("account"), "{}", msg);
}

#[test]
fn funding_checks_run_in_order() {
    let mut l = setup();
    // invalid amount wins over unknown goal
    assert!(matches!(
        l.add_amount_to_goal("nope", Decimal::ZERO, SourceType::Cash),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(matches!(
        l.add_amount_to_goal("nope", dec("-5"), SourceType::Cash),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(matches!(
        l.add_amount_to_goal("nope", dec("5"), SourceType::Cash),
        Err(LedgerError::NotFound { kind: "goal", .. })
    ));
    // mismatch is reported even when the source is also empty
    l.add_savings(goal(SourceType::Account, "10", "0")).unwrap();
    let id = l.savings()[0].id.clone();
    assert!(matches!(
        l.add_amount_to_goal(&id, dec("5"), SourceType::Cash),
        Err(LedgerError::SourceMismatch { .. })
    ));
}

#[test]
fn delete_then_recreate_restores_balances() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "120")).unwrap();
    l.add_income(income(SourceType::Account, "60")).unwrap();
    l.add_expense(expense(SourceType::Cash, "20")).unwrap();
    l.add_savings(goal(SourceType::Account, "100", "25")).unwrap();
    let before = l.balances();

    let inc_id = l.income()[1].id.clone();
    l.delete_income(&inc_id).unwrap();
    assert_eq!(l.balance(SourceType::Account), dec("-25"));
    l.add_income(income(SourceType::Account, "60")).unwrap();
    assert_eq!(l.balances(), before);

    let exp_id = l.expenses()[0].id.clone();
    l.delete_expense(&exp_id).unwrap();
    assert_eq!(l.balance(SourceType::Cash), dec("120"));
    l.add_expense(expense(SourceType::Cash, "20")).unwrap();
    assert_eq!(l.balances(), before);

    let goal_id = l.savings()[0].id.clone();
    l.delete_savings(&goal_id).unwrap();
    l.add_savings(goal(SourceType::Account, "100", "25")).unwrap();
    assert_eq!(l.balances(), before);
    assert_invariant(&l);
}

#[test]
fn income_update_moves_contribution_between_sources() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "50")).unwrap();
    let id = l.income()[0].id.clone();
    l.update_income(
        &id,
        IncomePatch {
            income_type: Some(SourceType::Account),
            amount: Some(dec("70")),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(l.balance(SourceType::Cash).is_zero());
    assert_eq!(l.balance(SourceType::Account), dec("70"));
    assert_eq!(l.income()[0].category, IncomeCategory::Salary);
}

#[test]
fn expense_update_only_checks_the_extra_draw() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "100")).unwrap();
    l.add_expense(expense(SourceType::Cash, "60")).unwrap();
    let id = l.expenses()[0].id.clone();

    // 60 -> 100 fits: 40 left plus the 60 already drawn
    l.update_expense(
        &id,
        ExpensePatch {
            amount: Some(dec("100")),
            ..Default::default()
        },
    )
    .unwrap();
    assert!(l.balance(SourceType::Cash).is_zero());

    let err = l
        .update_expense(
            &id,
            ExpensePatch {
                amount: Some(dec("100.01")),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Insufficient funds in cash. Available: 100.00"
    );

    // moving it to an empty source is refused
    assert!(matches!(
        l.update_expense(
            &id,
            ExpensePatch {
                payment_type: Some(SourceType::Account),
                ..Default::default()
            },
        ),
        Err(LedgerError::InsufficientFunds {
            source_type: SourceType::Account,
            ..
        })
    ));

    // lowering is always allowed
    l.update_expense(
        &id,
        ExpensePatch {
            amount: Some(dec("10")),
            category: Some(ExpenseCategory::Entertainment),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(l.balance(SourceType::Cash), dec("90"));
    assert_eq!(l.expenses()[0].category, ExpenseCategory::Entertainment);
}

#[test]
fn goal_update_recomputes_status_unless_overridden() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "500")).unwrap();
    l.add_savings(goal(SourceType::Cash, "200", "50")).unwrap();
    let id = l.savings()[0].id.clone();

    l.update_savings(
        &id,
        SavingsPatch {
            target_amount: Some(dec("50")),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(l.savings()[0].status, GoalStatus::Completed);

    l.update_savings(
        &id,
        SavingsPatch {
            target_amount: Some(dec("40")),
            status: Some(GoalStatus::Pending),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(l.savings()[0].status, GoalStatus::Pending);

    let err = l
        .update_savings(
            &id,
            SavingsPatch {
                current_amount: Some(dec("600")),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
    assert_invariant(&l);
}

#[test]
fn toggle_flips_status_without_touching_amounts() {
    let mut l = setup();
    l.add_savings(goal(SourceType::Cash, "100", "0")).unwrap();
    let id = l.savings()[0].id.clone();
    l.toggle_goal_status(&id).unwrap();
    assert_eq!(l.savings()[0].status, GoalStatus::Completed);
    assert!(l.savings()[0].current_amount.is_zero());
    l.toggle_goal_status(&id).unwrap();
    assert_eq!(l.savings()[0].status, GoalStatus::Pending);
}

#[test]
fn missing_ids_are_not_found() {
    let mut l = setup();
    assert!(matches!(
        l.update_income("7", IncomePatch::default()),
        Err(LedgerError::NotFound { kind: "income", .. })
    ));
    assert!(matches!(
        l.delete_expense("7"),
        Err(LedgerError::NotFound { kind: "expense", .. })
    ));
    assert!(matches!(
        l.delete_savings("7"),
        Err(LedgerError::NotFound { kind: "goal", .. })
    ));
    assert!(matches!(
        l.toggle_goal_status("7"),
        Err(LedgerError::NotFound { .. })
    ));
}

#[test]
fn negative_amounts_are_invalid() {
    let mut l = setup();
    assert!(matches!(
        l.add_income(income(SourceType::Cash, "-1")),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(matches!(
        l.add_savings(goal(SourceType::Cash, "0", "0")),
        Err(LedgerError::InvalidAmount(_))
    ));
    // zero-amount income is accepted
    l.add_income(income(SourceType::Cash, "0")).unwrap();
    assert_eq!(l.income().len(), 1);
}

#[test]
fn savings_percentage_is_range_checked_and_stored() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "10")).unwrap();
    assert!(matches!(
        l.update_savings_percentage(dec("100.5")),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(matches!(
        l.update_savings_percentage(dec("-1")),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert!(l.savings_percentage().is_zero());

    l.update_savings_percentage(dec("15")).unwrap();
    assert_eq!(l.savings_percentage(), dec("15"));
    let bank = l.snapshot().bank.clone().unwrap();
    assert_eq!(bank.cash, dec("10"));

    l.update_savings_percentage(Decimal::ONE_HUNDRED).unwrap();
    l.update_savings_percentage(Decimal::ZERO).unwrap();
    assert!(l.savings_percentage().is_zero());
    // advisory only
    assert_eq!(l.balance(SourceType::Cash), dec("10"));
}

#[test]
fn state_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let mut l = Ledger::open(SqliteGateway::open(&path).unwrap()).unwrap();
        l.add_income(income(SourceType::Account, "75")).unwrap();
        l.add_savings(goal(SourceType::Account, "100", "25")).unwrap();
    }
    let l = Ledger::open(SqliteGateway::open(&path).unwrap()).unwrap();
    assert_eq!(l.balance(SourceType::Account), dec("50"));
    assert_eq!(l.savings()[0].goal, "Emergency fund");
}

#[test]
fn amounts_past_decimal_range_are_rejected_before_writing() {
    let mut l = setup();
    let mut huge = income(SourceType::Cash, "0");
    huge.amount = Decimal::MAX;
    l.add_income(huge.clone()).unwrap();
    assert!(matches!(
        l.add_income(huge),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert_eq!(l.income().len(), 1);
    assert_eq!(l.balance(SourceType::Cash), Decimal::MAX);

    // the dashboard total spans both sources
    assert!(matches!(
        l.add_income(income(SourceType::Account, "1")),
        Err(LedgerError::InvalidAmount(_))
    ));
    let summary = fundkeep::summary::Summary::from_snapshot(l.snapshot());
    assert_eq!(summary.total_income, Decimal::MAX);
}

#[test]
fn updates_and_goals_past_decimal_range_are_rejected() {
    let mut l = setup();
    l.add_income(income(SourceType::Cash, "10")).unwrap();
    l.add_income(income(SourceType::Cash, "10")).unwrap();
    let id = l.income()[0].id.clone();
    assert!(matches!(
        l.update_income(
            &id,
            IncomePatch {
                amount: Some(Decimal::MAX),
                ..Default::default()
            }
        ),
        Err(LedgerError::InvalidAmount(_))
    ));

    let mut big_target = goal(SourceType::Cash, "1", "1");
    big_target.target_amount = Decimal::MAX;
    l.add_savings(big_target).unwrap();
    assert!(matches!(
        l.add_savings(goal(SourceType::Cash, "1", "0")),
        Err(LedgerError::InvalidAmount(_))
    ));
    assert_eq!(l.savings().len(), 1);
    assert_eq!(l.balance(SourceType::Cash), dec("19"));
}
