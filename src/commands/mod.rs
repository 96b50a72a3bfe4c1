// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod balance;
pub mod expenses;
pub mod goals;
pub mod income;
pub mod rate;
pub mod summary;

use crate::utils::{parse_date, parse_decimal, parse_tag};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub(crate) fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .ok_or_else(|| anyhow!("Missing --{}", name))
}

pub(crate) fn optional<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(|s| s.trim())
}

pub(crate) fn opt_decimal(sub: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    optional(sub, name).map(parse_decimal).transpose()
}

pub(crate) fn opt_date(sub: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    optional(sub, name).map(parse_date).transpose()
}

pub(crate) fn opt_tag<T>(sub: &clap::ArgMatches, name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    optional(sub, name).map(parse_tag::<T>).transpose()
}

/// `--date` or today.
pub(crate) fn date_or_today(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    Ok(opt_date(sub, "date")?.unwrap_or_else(|| chrono::Local::now().date_naive()))
}
