//! JSON-RPC access to the chain node and wallet endpoints.

mod chain_reader;
mod client;

pub use chain_reader::JsonRpcChainReader;
pub use client::{parse_quantity, JsonRpcClient, RpcError};
