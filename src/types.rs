//! Common types for gateway operations

use alloy::primitives::{FixedBytes, U256};
use alloy::rpc::types::TransactionReceipt;
use eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of token a gateway operation targets.
///
/// The discriminants match the on-chain `TokenKind` enum, which is also the
/// numbering used in the `TokenWithdrawn` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Native ETH held by the gateway
    Eth,
    /// Fungible ERC20 token
    Erc20,
    /// Non-fungible ERC721 token (single uid)
    Erc721,
    /// Semi-fungible ERC721X token (uid + amount)
    Erc721X,
}

impl TokenKind {
    /// Get the kind as a lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Eth => "eth",
            TokenKind::Erc20 => "erc20",
            TokenKind::Erc721 => "erc721",
            TokenKind::Erc721X => "erc721x",
        }
    }

    /// The on-chain enum discriminant
    pub fn to_u8(self) -> u8 {
        match self {
            TokenKind::Eth => 0,
            TokenKind::Erc20 => 1,
            TokenKind::Erc721 => 2,
            TokenKind::Erc721X => 3,
        }
    }

    /// Create from the on-chain enum discriminant
    pub fn from_u8(value: u8) -> Result<Self> {
        match value {
            0 => Ok(TokenKind::Eth),
            1 => Ok(TokenKind::Erc20),
            2 => Ok(TokenKind::Erc721),
            3 => Ok(TokenKind::Erc721X),
            other => Err(eyre!("Unknown token kind discriminant: {}", other)),
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Confirmation details for a mined gateway transaction.
///
/// ETH-moving operations return this so callers can account for the tx fee
/// alongside the transferred value.
#[derive(Debug, Clone)]
pub struct TxReceiptInfo {
    /// Transaction hash
    pub tx_hash: FixedBytes<32>,
    /// Block the transaction was mined in
    pub block_number: u64,
    /// Gas consumed by the transaction
    pub gas_used: u128,
    /// Total fee paid: gas_used * effective_gas_price
    pub fee: U256,
}

impl TxReceiptInfo {
    /// Extract confirmation details from a mined receipt
    pub fn from_receipt(receipt: &TransactionReceipt) -> Self {
        let gas_used = receipt.gas_used as u128;
        let fee = U256::from(gas_used) * U256::from(receipt.effective_gas_price);
        Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number.unwrap_or_default(),
            gas_used,
            fee,
        }
    }
}
