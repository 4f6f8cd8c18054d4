//! Balance snapshot shown on the dashboard.

use std::fmt;

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::wallet::units;

const DISPLAY_PLACES: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub raw: U256,
    pub decimals: u8,
    pub symbol: String,
}

impl TokenAmount {
    pub fn new(raw: U256, decimals: u8, symbol: impl Into<String>) -> Self {
        Self {
            raw,
            decimals,
            symbol: symbol.into(),
        }
    }

    /// Two-decimal representation used on screen.
    pub fn display(&self) -> String {
        units::to_fixed(self.raw, self.decimals, DISPLAY_PLACES)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.display(), self.symbol)
    }
}

/// Result of one successful balance read. Each read replaces the previous
/// snapshot as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSnapshot {
    pub token: TokenAmount,
    pub native: TokenAmount,
    pub fetched_at: DateTime<Utc>,
}
