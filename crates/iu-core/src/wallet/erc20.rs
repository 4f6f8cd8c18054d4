//! ERC-20 call encoding.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    function balanceOf(address account) external view returns (uint256);
    function transfer(address to, uint256 value) external returns (bool);
}

#[derive(Debug, thiserror::Error)]
#[error("invalid uint256 return data: {0}")]
pub struct DecodeError(#[from] alloy_sol_types::Error);

pub fn encode_balance_of(owner: Address) -> Bytes {
    balanceOfCall { account: owner }.abi_encode().into()
}

pub fn encode_transfer(to: Address, value: U256) -> Bytes {
    transferCall { to, value }.abi_encode().into()
}

/// Decodes the return data of `balanceOf`.
pub fn decode_balance(data: &[u8]) -> Result<U256, DecodeError> {
    Ok(balanceOfCall::abi_decode_returns(data, true)?._0)
}
