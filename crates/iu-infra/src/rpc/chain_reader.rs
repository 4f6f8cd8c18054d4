use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use iu_core::ports::ChainReaderPort;
use iu_core::wallet::erc20;
use iu_core::{Address, U256};
use serde_json::json;
use tracing::debug;

use super::client::{parse_quantity, JsonRpcClient};

/// Balance reads against a public chain node.
pub struct JsonRpcChainReader {
    client: Arc<JsonRpcClient>,
}

impl JsonRpcChainReader {
    pub fn new(client: Arc<JsonRpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChainReaderPort for JsonRpcChainReader {
    async fn native_balance(&self, owner: Address) -> anyhow::Result<U256> {
        let raw: String = self
            .client
            .call("eth_getBalance", json!([owner, "latest"]))
            .await?;
        let balance = parse_quantity("eth_getBalance", &raw)?;
        debug!(%owner, %balance, "native balance read");
        Ok(balance)
    }

    async fn token_balance(&self, token: Address, owner: Address) -> anyhow::Result<U256> {
        let call = json!({
            "to": token,
            "data": erc20::encode_balance_of(owner),
        });
        let raw: String = self.client.call("eth_call", json!([call, "latest"])).await?;
        let bytes = hex::decode(raw.trim_start_matches("0x"))
            .with_context(|| format!("eth_call returned non-hex data {raw:?}"))?;
        let balance = erc20::decode_balance(&bytes)?;
        debug!(%owner, %token, %balance, "token balance read");
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn reader(server: &Server) -> JsonRpcChainReader {
        let client = JsonRpcClient::new(&server.url(), Duration::from_secs(5)).unwrap();
        JsonRpcChainReader::new(Arc::new(client))
    }

    #[tokio::test]
    async fn reads_native_balance() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({ "method": "eth_getBalance" })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1bc16d674ec80000"}"#)
            .create_async()
            .await;

        let balance = reader(&server)
            .native_balance(Address::repeat_byte(1))
            .await
            .unwrap();

        assert_eq!(balance, U256::from(2_000_000_000_000_000_000u128));
    }

    #[tokio::test]
    async fn reads_token_balance_through_balance_of() {
        let mut server = Server::new_async().await;
        let word = format!("0x{:064x}", 12_345_678u64);
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::Regex(r#""data":"0x70a08231"#.to_string()))
            .with_header("content-type", "application/json")
            .with_body(json!({ "jsonrpc": "2.0", "id": 1, "result": word }).to_string())
            .create_async()
            .await;

        let balance = reader(&server)
            .token_balance(Address::repeat_byte(2), Address::repeat_byte(3))
            .await
            .unwrap();

        assert_eq!(balance, U256::from(12_345_678u64));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn short_return_data_is_an_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/")
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x"}"#)
            .create_async()
            .await;

        let result = reader(&server)
            .token_balance(Address::repeat_byte(2), Address::repeat_byte(3))
            .await;

        assert!(result.is_err());
    }
}
