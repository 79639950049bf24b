//! ERC20/ERC721 preflight helpers
//!
//! The gateway pulls ERC20 deposits via `transferFrom`, so callers must
//! approve the gateway first; ERC721 deposits go through the token's own
//! `safeTransferFrom` into the gateway. These helpers cover that preflight
//! plus balance and metadata lookups.

use crate::evm::contracts::{ERC20, ERC721};
use alloy::{
    primitives::{Address, FixedBytes, U256},
    providers::Provider,
};
use eyre::{eyre, Result};
use std::sync::Arc;
use std::time::Duration;

/// Approve a spender (typically the gateway) for an ERC20 amount.
///
/// The provider must carry a wallet; returns the approve tx hash. The whole
/// send-and-confirm flow is bounded by `timeout`.
pub async fn approve_erc20<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
    spender: Address,
    amount: U256,
    timeout: Duration,
) -> Result<FixedBytes<32>> {
    let contract = ERC20::new(token_address, provider);
    let receipt = tokio::time::timeout(timeout, async {
        let pending = contract
            .approve(spender, amount)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send approve: {}", e))?;
        pending
            .get_receipt()
            .await
            .map_err(|e| eyre!("Failed to get approve receipt: {}", e))
    })
    .await
    .map_err(|_| eyre!("Timed out waiting for approve confirmation"))??;

    if !receipt.status() {
        return Err(eyre!("ERC20 approve transaction reverted"));
    }

    Ok(receipt.transaction_hash)
}

/// Approve a spender for a specific ERC721 token id, bounded by `timeout`
pub async fn approve_erc721<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
    to: Address,
    token_id: U256,
    timeout: Duration,
) -> Result<FixedBytes<32>> {
    let contract = ERC721::new(token_address, provider);
    let receipt = tokio::time::timeout(timeout, async {
        let pending = contract
            .approve(to, token_id)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send ERC721 approve: {}", e))?;
        pending
            .get_receipt()
            .await
            .map_err(|e| eyre!("Failed to get ERC721 approve receipt: {}", e))
    })
    .await
    .map_err(|_| eyre!("Timed out waiting for ERC721 approve confirmation"))??;

    if !receipt.status() {
        return Err(eyre!("ERC721 approve transaction reverted"));
    }

    Ok(receipt.transaction_hash)
}

/// Get the ERC20 token balance of an address
pub async fn get_token_balance<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
    account: Address,
) -> Result<U256> {
    let contract = ERC20::new(token_address, provider);
    let balance = contract
        .balanceOf(account)
        .call()
        .await
        .map_err(|e| eyre!("Failed to get balance: {}", e))?;
    Ok(balance._0)
}

/// Get the ERC20 token allowance
pub async fn get_token_allowance<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
    owner: Address,
    spender: Address,
) -> Result<U256> {
    let contract = ERC20::new(token_address, provider);
    let allowance = contract
        .allowance(owner, spender)
        .call()
        .await
        .map_err(|e| eyre!("Failed to get allowance: {}", e))?;
    Ok(allowance._0)
}

/// Get token decimals
pub async fn get_token_decimals<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
) -> Result<u8> {
    let contract = ERC20::new(token_address, provider);
    let decimals = contract
        .decimals()
        .call()
        .await
        .map_err(|e| eyre!("Failed to get decimals: {}", e))?;
    Ok(decimals._0)
}

/// Get token symbol
pub async fn get_token_symbol<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
) -> Result<String> {
    let contract = ERC20::new(token_address, provider);
    let symbol = contract
        .symbol()
        .call()
        .await
        .map_err(|e| eyre!("Failed to get symbol: {}", e))?;
    Ok(symbol._0)
}

/// Get the owner of an ERC721 token
pub async fn get_erc721_owner<P: Provider>(
    provider: Arc<P>,
    token_address: Address,
    token_id: U256,
) -> Result<Address> {
    let contract = ERC721::new(token_address, provider);
    let owner = contract
        .ownerOf(token_id)
        .call()
        .await
        .map_err(|e| eyre!("Failed to get ERC721 owner: {}", e))?;
    Ok(owner._0)
}

/// Convert a human-readable amount to raw token units.
///
/// Nonstandard decimals beyond u128 range saturate instead of panicking.
pub fn to_token_units(amount: f64, decimals: u8) -> U256 {
    let multiplier = 10u128.checked_pow(decimals as u32).unwrap_or(u128::MAX);
    let raw = (amount * multiplier as f64) as u128;
    U256::from(raw)
}

/// Convert raw token units to a human-readable amount
pub fn from_token_units(raw: U256, decimals: u8) -> f64 {
    let divisor = 10u128.checked_pow(decimals as u32).unwrap_or(u128::MAX);
    let raw_u128: u128 = raw.try_into().unwrap_or(u128::MAX);
    raw_u128 as f64 / divisor as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_token_units() {
        // 1.5 tokens with 18 decimals
        let result = to_token_units(1.5, 18);
        assert_eq!(result, U256::from(1_500_000_000_000_000_000u128));

        // 100 tokens with 6 decimals (like USDC)
        let result = to_token_units(100.0, 6);
        assert_eq!(result, U256::from(100_000_000u64));
    }

    #[test]
    fn test_from_token_units() {
        // 1.5 ETH in wei
        let result = from_token_units(U256::from(1_500_000_000_000_000_000u128), 18);
        assert!((result - 1.5).abs() < 0.0001);

        // 100 USDC in raw units
        let result = from_token_units(U256::from(100_000_000u64), 6);
        assert!((result - 100.0).abs() < 0.0001);
    }

    #[test]
    fn test_token_units_nonstandard_decimals() {
        // Tokens with more than 19 decimals exist in the wild
        let result = to_token_units(1.0, 20);
        assert_eq!(result, U256::from(10u128.pow(20)));

        let back = from_token_units(result, 20);
        assert!((back - 1.0).abs() < 0.0001);

        // Absurd decimals saturate rather than panic
        assert_eq!(to_token_units(0.0, 77), U256::ZERO);
    }

    #[tokio::test]
    async fn test_approve_is_bounded_by_timeout() {
        use alloy::providers::ProviderBuilder;

        // Black-hole endpoint; the call must error within the timeout
        // instead of waiting on a receipt that will never arrive
        let provider = Arc::new(
            ProviderBuilder::new()
                .on_http("http://10.255.255.1:8545".parse().unwrap())
                .boxed(),
        );
        let result = approve_erc20(
            provider,
            Address::ZERO,
            Address::ZERO,
            U256::from(1u64),
            Duration::from_millis(100),
        )
        .await;
        assert!(result.is_err());
    }
}
