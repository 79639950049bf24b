//! Gateway client configuration

use eyre::{eyre, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::evm::client::GatewayClientConfig;
use crate::redact::Redacted;

/// Default confirmation timeout when `TX_TIMEOUT_SECS` is unset
pub const DEFAULT_TX_TIMEOUT_SECS: u64 = 120;

/// Environment-driven configuration for the gateway client
#[derive(Debug, Clone)]
pub struct Config {
    /// Ethereum JSON-RPC endpoint
    pub rpc_url: String,
    /// Native chain ID (e.g. 1 for mainnet, 31337 for Anvil)
    pub chain_id: u64,
    /// Deployed gateway contract address
    pub gateway_address: String,
    /// Private key for deposit/withdrawal transactions
    pub private_key: Redacted<String>,
    /// Seconds to wait for a transaction confirmation
    pub tx_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded .env from {:?}", path);
        }

        let rpc_url = env::var("GATEWAY_RPC_URL").map_err(|_| eyre!("GATEWAY_RPC_URL required"))?;
        Url::parse(&rpc_url).map_err(|e| eyre!("Invalid GATEWAY_RPC_URL: {}", e))?;

        Ok(Self {
            rpc_url,
            chain_id: env::var("GATEWAY_CHAIN_ID")
                .map_err(|_| eyre!("GATEWAY_CHAIN_ID required"))?
                .parse()
                .map_err(|_| eyre!("Invalid GATEWAY_CHAIN_ID"))?,
            gateway_address: env::var("GATEWAY_ADDRESS")
                .map_err(|_| eyre!("GATEWAY_ADDRESS required"))?,
            private_key: Redacted(
                env::var("GATEWAY_PRIVATE_KEY")
                    .map_err(|_| eyre!("GATEWAY_PRIVATE_KEY required"))?,
            ),
            tx_timeout_secs: parse_timeout_secs(env::var("TX_TIMEOUT_SECS").ok()),
        })
    }

    /// Confirmation timeout as a `Duration`
    pub fn tx_timeout(&self) -> Duration {
        Duration::from_secs(self.tx_timeout_secs)
    }

    /// Build the client configuration, validating the gateway address
    pub fn client_config(&self) -> Result<GatewayClientConfig> {
        let gateway_address = alloy::primitives::Address::from_str(&self.gateway_address)
            .map_err(|e| eyre!("Invalid GATEWAY_ADDRESS: {}", e))?;

        Ok(GatewayClientConfig {
            rpc_url: self.rpc_url.clone(),
            chain_id: self.chain_id,
            gateway_address,
            private_key: self.private_key.expose().clone(),
            tx_timeout: self.tx_timeout(),
        })
    }
}

fn parse_timeout_secs(raw: Option<String>) -> u64 {
    raw.and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_TX_TIMEOUT_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout_default() {
        assert_eq!(parse_timeout_secs(None), DEFAULT_TX_TIMEOUT_SECS);
        assert_eq!(
            parse_timeout_secs(Some("garbage".to_string())),
            DEFAULT_TX_TIMEOUT_SECS
        );
    }

    #[test]
    fn test_parse_timeout_explicit() {
        assert_eq!(parse_timeout_secs(Some("30".to_string())), 30);
    }

    #[test]
    fn test_client_config_rejects_bad_address() {
        let config = Config {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            gateway_address: "not-an-address".to_string(),
            private_key: Redacted(
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ),
            tx_timeout_secs: 60,
        };
        assert!(config.client_config().is_err());
    }

    #[test]
    fn test_client_config_valid_address() {
        let config = Config {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            gateway_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            private_key: Redacted(
                "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80".to_string(),
            ),
            tx_timeout_secs: 60,
        };
        let client_config = config.client_config().unwrap();
        assert_eq!(client_config.chain_id, 31337);
        assert_eq!(client_config.tx_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_private_key_redacted_in_debug() {
        let config = Config {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 1,
            gateway_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            private_key: Redacted("0xsecret".to_string()),
            tx_timeout_secs: 60,
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("0xsecret"));
        assert!(debug.contains("<redacted>"));
    }
}
