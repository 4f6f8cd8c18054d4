//! Fiat on/off-ramp link launcher.

use anyhow::Context;
use async_trait::async_trait;
use iu_core::ports::RampPort;
use iu_core::Address;
use reqwest::Url;
use tracing::info;

/// Builds ramp URLs for the wallet and prints them for the user to open.
/// A ramp without a configured link reports an error when opened.
pub struct TerminalRampLauncher {
    on_ramp: Option<Url>,
    off_ramp: Option<Url>,
    network: String,
    currency: String,
}

impl TerminalRampLauncher {
    pub fn new(
        on_ramp_url: Option<&str>,
        off_ramp_url: Option<&str>,
        network: impl Into<String>,
        currency: impl Into<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            on_ramp: parse_link("on-ramp", on_ramp_url)?,
            off_ramp: parse_link("off-ramp", off_ramp_url)?,
            network: network.into(),
            currency: currency.into(),
        })
    }

    fn link(&self, base: Option<&Url>, key: &str, address: Address) -> anyhow::Result<Url> {
        let base = base.ok_or_else(|| anyhow::anyhow!("no link configured, set [links] {key}"))?;
        let mut url = base.clone();
        url.query_pairs_mut()
            .append_pair("address", &address.to_string())
            .append_pair("network", &self.network)
            .append_pair("currency", &self.currency);
        Ok(url)
    }

    fn launch(&self, label: &str, url: Url) -> String {
        info!(%url, "{label} link opened");
        println!("Open this link to {label}: {url}");
        url.into()
    }
}

#[async_trait]
impl RampPort for TerminalRampLauncher {
    async fn open_on_ramp(&self, address: Address) -> anyhow::Result<String> {
        let url = self.link(self.on_ramp.as_ref(), "on_ramp_url", address)?;
        Ok(self.launch("add funds", url))
    }

    async fn open_off_ramp(&self, address: Address) -> anyhow::Result<String> {
        let url = self.link(self.off_ramp.as_ref(), "off_ramp_url", address)?;
        Ok(self.launch("withdraw", url))
    }
}

fn parse_link(label: &str, raw: Option<&str>) -> anyhow::Result<Option<Url>> {
    raw.map(|raw| Url::parse(raw).with_context(|| format!("invalid {label} url {raw:?}")))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn links_carry_wallet_network_and_currency() {
        let launcher = TerminalRampLauncher::new(
            Some("https://ramp.example/buy?ref=investup"),
            Some("https://ramp.example/sell"),
            "polygon",
            "USDC",
        )
        .unwrap();

        let url = launcher
            .open_off_ramp(Address::repeat_byte(0x11))
            .await
            .unwrap();

        assert_eq!(
            url,
            "https://ramp.example/sell?address=0x1111111111111111111111111111111111111111&network=polygon&currency=USDC"
        );
        let on = launcher.open_on_ramp(Address::ZERO).await.unwrap();
        assert!(on.starts_with("https://ramp.example/buy?ref=investup&address="));
    }

    #[test]
    fn rejects_malformed_urls() {
        assert!(
            TerminalRampLauncher::new(Some("nope"), None, "polygon", "USDC").is_err()
        );
    }

    #[tokio::test]
    async fn unconfigured_link_is_an_error() {
        let launcher = TerminalRampLauncher::new(None, None, "polygon", "USDC").unwrap();

        let err = launcher.open_on_ramp(Address::ZERO).await.unwrap_err();

        assert!(err.to_string().contains("on_ramp_url"));
    }
}
