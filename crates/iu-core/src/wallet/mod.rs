//! Wallet-side value types: token descriptors, transaction requests and the
//! input validation applied before anything is sent to a wallet.

pub mod erc20;
pub mod units;

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{address, Address, Bytes, U256};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address regex"));

/// Native USDC on Polygon PoS.
pub const POLYGON_USDC: Address = address!("3c499c542cEF5E3811e1192ce70d8cC03d5c3359");
pub const POLYGON_CHAIN_ID: u64 = 137;

/// ERC-20 token the dashboard reads and transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Erc20Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for Erc20Token {
    fn default() -> Self {
        Self {
            address: POLYGON_USDC,
            symbol: "USDC".to_string(),
            decimals: 6,
        }
    }
}

/// Native gas currency of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            symbol: "POL".to_string(),
            decimals: 18,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Identifier returned by a wallet after submission: a transaction hash for
/// embedded wallets, a call-bundle id for relayed smart wallets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(pub String);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Checks the `0x` + 40 hex characters shape and parses the address.
///
/// Mixed-case input is accepted without enforcing the EIP-55 checksum.
pub fn parse_address(input: &str) -> Option<Address> {
    let trimmed = input.trim();
    if !ADDRESS_RE.is_match(trimmed) {
        return None;
    }
    Address::from_str(trimmed).ok()
}

/// `0x1234…abcd` form used in activity descriptions.
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}…{}", &full[..6], &full[full.len() - 4..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_addresses() {
        let parsed = parse_address("0x3c499c542cef5e3811e1192ce70d8cc03d5c3359");
        assert_eq!(parsed, Some(POLYGON_USDC));
        assert!(parse_address("  0x3C499C542CEF5E3811E1192CE70D8CC03D5C3359 ").is_some());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(parse_address("").is_none());
        assert!(parse_address("3c499c542cEF5E3811e1192ce70d8cC03d5c3359").is_none());
        assert!(parse_address("0x3c499c542cEF5E3811e1192ce70d8cC03d5c335").is_none());
        assert!(parse_address("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359aa").is_none());
        assert!(parse_address("0xZZ499c542cEF5E3811e1192ce70d8cC03d5c3359").is_none());
        assert!(parse_address("alice.eth").is_none());
    }

    #[test]
    fn short_address_keeps_prefix_and_suffix() {
        assert_eq!(short_address(&POLYGON_USDC), "0x3c49…3359");
    }
}
