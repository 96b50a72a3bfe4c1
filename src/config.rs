// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Where the ledger persists its records.
#[derive(Debug, Clone, PartialEq)]
pub enum Store {
    Remote(String),
    Local(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub store: Store,
    pub timeout: Duration,
    pub verbosity: u8,
}

impl Config {
    /// Flags win over `FUNDKEEP_URL`/`FUNDKEEP_DB`; with neither set the
    /// platform data dir is used.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let remote = m
            .get_one::<String>("remote")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let store = match remote {
            Some(url) => Store::Remote(url),
            None => match m.get_one::<String>("db").map(|s| s.trim()) {
                Some(p) if !p.is_empty() => Store::Local(PathBuf::from(p)),
                _ => Store::Local(crate::db::default_db_path()?),
            },
        };
        Ok(Config {
            store,
            timeout: Duration::from_secs(*m.get_one::<u64>("timeout").unwrap_or(&15)),
            verbosity: m.get_count("verbose"),
        })
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::build_cli;

    #[test]
    fn remote_flag_selects_remote_store() {
        let m = build_cli().get_matches_from([
            "fundkeep",
            "--remote",
            " https://script.example/exec ",
            "--timeout",
            "3",
            "-vv",
            "balance",
        ]);
        let cfg = Config::from_matches(&m).unwrap();
        assert_eq!(
            cfg.store,
            Store::Remote("https://script.example/exec".into())
        );
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.log_level(), "debug");
    }

    #[test]
    fn db_flag_selects_local_store() {
        let m = build_cli().get_matches_from(["fundkeep", "balance", "--db", "/tmp/fk.sqlite"]);
        let cfg = Config::from_matches(&m).unwrap();
        assert_eq!(cfg.store, Store::Local(PathBuf::from("/tmp/fk.sqlite")));
        assert_eq!(cfg.log_level(), "warn");
    }
}
