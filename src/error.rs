// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the ledger and its persistence gateways.
//!
//! Validation failures ([`InvalidAmount`], [`InsufficientFunds`],
//! [`SourceMismatch`], [`NotFound`]) are detected before any write.
//! [`GatewayUnavailable`] means the store could not be reached or answered
//! with something unusable.
//!
//! [`InvalidAmount`]: LedgerError::InvalidAmount
//! [`InsufficientFunds`]: LedgerError::InsufficientFunds
//! [`SourceMismatch`]: LedgerError::SourceMismatch
//! [`NotFound`]: LedgerError::NotFound
//! [`GatewayUnavailable`]: LedgerError::GatewayUnavailable

use crate::models::SourceType;
use crate::utils::fmt_amount;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient funds in {source_type}. Available: {}", fmt_amount(.available))]
    InsufficientFunds {
        source_type: SourceType,
        available: Decimal,
    },
    #[error("This goal is funded from {required}; cannot add money from {attempted}")]
    SourceMismatch {
        required: SourceType,
        attempted: SourceType,
    },
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },
    #[error("Store unavailable: {0}")]
    GatewayUnavailable(String),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        !matches!(self, LedgerError::GatewayUnavailable(_))
    }

    pub(crate) fn gateway(e: impl std::fmt::Display) -> Self {
        LedgerError::GatewayUnavailable(e.to_string())
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        LedgerError::gateway(e)
    }
}

impl From<rusqlite::Error> for LedgerError {
    fn from(e: rusqlite::Error) -> Self {
        LedgerError::gateway(e)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::GatewayUnavailable(format!("malformed response: {}", e))
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
