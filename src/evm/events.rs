//! Gateway event parsing
//!
//! Typed event structures for the gateway contract's deposit and withdrawal
//! events, decoded from raw receipt logs.

use crate::types::TokenKind;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::{Log, TransactionReceipt};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// ETH deposited into gateway custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EthReceivedEvent {
    /// Depositor address
    pub from: Address,
    /// Amount of ETH deposited (wei)
    pub amount: U256,
    /// Block number where the event was emitted
    pub block_number: u64,
    /// Transaction hash
    pub tx_hash: [u8; 32],
    /// Log index within the block
    pub log_index: u64,
}

/// ERC20 tokens deposited into gateway custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erc20ReceivedEvent {
    /// Depositor address
    pub from: Address,
    /// Amount deposited
    pub amount: U256,
    /// Token contract address
    pub token: Address,
    /// Block number where the event was emitted
    pub block_number: u64,
    /// Transaction hash
    pub tx_hash: [u8; 32],
    /// Log index within the block
    pub log_index: u64,
}

/// ERC721 token deposited into gateway custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erc721ReceivedEvent {
    pub from: Address,
    pub token_id: U256,
    pub token: Address,
    pub block_number: u64,
    pub tx_hash: [u8; 32],
    pub log_index: u64,
}

/// ERC721X tokens deposited into gateway custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Erc721xReceivedEvent {
    pub from: Address,
    pub token_id: U256,
    pub amount: U256,
    pub token: Address,
    pub block_number: u64,
    pub tx_hash: [u8; 32],
    pub log_index: u64,
}

/// Tokens withdrawn from gateway custody
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenWithdrawnEvent {
    /// Withdrawer (indexed)
    pub owner: Address,
    /// Which custody pool the withdrawal came from
    pub kind: TokenKind,
    /// Token contract address (zero for ETH)
    pub token: Address,
    /// Amount or token id, depending on the kind
    pub value: U256,
    pub block_number: u64,
    pub tx_hash: [u8; 32],
    pub log_index: u64,
}

/// Any event the gateway contract emits
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    EthReceived(EthReceivedEvent),
    Erc20Received(Erc20ReceivedEvent),
    Erc721Received(Erc721ReceivedEvent),
    Erc721xReceived(Erc721xReceivedEvent),
    TokenWithdrawn(TokenWithdrawnEvent),
}

// ============================================================================
// Raw Log Parsing
// ============================================================================

/// Common log metadata; None when the log is still pending
fn log_meta(log: &Log) -> Option<(u64, [u8; 32], u64)> {
    let block_number = log.block_number?;
    let tx_hash = log.transaction_hash?;
    let log_index = log.log_index?;
    Some((block_number, tx_hash.0, log_index))
}

/// Extract a right-aligned address from a 32-byte ABI word
fn word_address(data: &[u8], word: usize) -> Option<Address> {
    let start = word * 32;
    let bytes: [u8; 20] = data.get(start + 12..start + 32)?.try_into().ok()?;
    Some(Address::from(bytes))
}

/// Extract a uint256 from a 32-byte ABI word
fn word_uint(data: &[u8], word: usize) -> Option<U256> {
    let start = word * 32;
    Some(U256::from_be_slice(data.get(start..start + 32)?))
}

/// Parse an ETHReceived event from a raw log
pub fn parse_eth_received_log(log: &Log) -> Option<EthReceivedEvent> {
    let (block_number, tx_hash, log_index) = log_meta(log)?;

    // data: [0..32] from (right-aligned), [32..64] amount
    let data = log.data().data.as_ref();
    if data.len() < 64 {
        return None;
    }

    Some(EthReceivedEvent {
        from: word_address(data, 0)?,
        amount: word_uint(data, 1)?,
        block_number,
        tx_hash,
        log_index,
    })
}

/// Parse an ERC20Received event from a raw log
pub fn parse_erc20_received_log(log: &Log) -> Option<Erc20ReceivedEvent> {
    let (block_number, tx_hash, log_index) = log_meta(log)?;

    // data: [0..32] from, [32..64] amount, [64..96] contractAddress
    let data = log.data().data.as_ref();
    if data.len() < 96 {
        return None;
    }

    Some(Erc20ReceivedEvent {
        from: word_address(data, 0)?,
        amount: word_uint(data, 1)?,
        token: word_address(data, 2)?,
        block_number,
        tx_hash,
        log_index,
    })
}

/// Parse an ERC721Received event from a raw log
pub fn parse_erc721_received_log(log: &Log) -> Option<Erc721ReceivedEvent> {
    let (block_number, tx_hash, log_index) = log_meta(log)?;

    // data: [0..32] from, [32..64] uid, [64..96] contractAddress
    let data = log.data().data.as_ref();
    if data.len() < 96 {
        return None;
    }

    Some(Erc721ReceivedEvent {
        from: word_address(data, 0)?,
        token_id: word_uint(data, 1)?,
        token: word_address(data, 2)?,
        block_number,
        tx_hash,
        log_index,
    })
}

/// Parse an ERC721XReceived event from a raw log
pub fn parse_erc721x_received_log(log: &Log) -> Option<Erc721xReceivedEvent> {
    let (block_number, tx_hash, log_index) = log_meta(log)?;

    // data: [0..32] from, [32..64] uid, [64..96] amount, [96..128] contractAddress
    let data = log.data().data.as_ref();
    if data.len() < 128 {
        return None;
    }

    Some(Erc721xReceivedEvent {
        from: word_address(data, 0)?,
        token_id: word_uint(data, 1)?,
        amount: word_uint(data, 2)?,
        token: word_address(data, 3)?,
        block_number,
        tx_hash,
        log_index,
    })
}

/// Parse a TokenWithdrawn event from a raw log
pub fn parse_token_withdrawn_log(log: &Log) -> Option<TokenWithdrawnEvent> {
    let topics = log.topics();
    if topics.len() < 2 {
        return None;
    }

    let (block_number, tx_hash, log_index) = log_meta(log)?;

    // topic[1] = owner (address, left-padded to bytes32)
    let owner_bytes: [u8; 20] = topics[1][12..32].try_into().ok()?;
    let owner = Address::from(owner_bytes);

    // data: [0..32] kind (uint8, right-aligned), [32..64] contractAddress, [64..96] value
    let data = log.data().data.as_ref();
    if data.len() < 96 {
        return None;
    }

    let kind = TokenKind::from_u8(data[31]).ok()?;

    Some(TokenWithdrawnEvent {
        owner,
        kind,
        token: word_address(data, 1)?,
        value: word_uint(data, 2)?,
        block_number,
        tx_hash,
        log_index,
    })
}

// ============================================================================
// Receipt Scanning
// ============================================================================

/// Decode all gateway events out of a batch of raw logs.
///
/// Logs whose topic0 matches a gateway event but whose payload fails to
/// decode are skipped with a warning.
pub fn parse_gateway_logs(logs: &[Log]) -> Vec<GatewayEvent> {
    let eth_topic = crate::hash::keccak256(b"ETHReceived(address,uint256)");
    let erc20_topic = crate::hash::keccak256(b"ERC20Received(address,uint256,address)");
    let erc721_topic = crate::hash::keccak256(b"ERC721Received(address,uint256,address)");
    let erc721x_topic = crate::hash::keccak256(b"ERC721XReceived(address,uint256,uint256,address)");
    let withdrawn_topic = crate::hash::keccak256(b"TokenWithdrawn(address,uint8,address,uint256)");

    let mut events = Vec::new();

    for log in logs {
        let topic0 = log.topic0().copied().unwrap_or_default().0;

        let parsed = if topic0 == eth_topic {
            parse_eth_received_log(log).map(GatewayEvent::EthReceived)
        } else if topic0 == erc20_topic {
            parse_erc20_received_log(log).map(GatewayEvent::Erc20Received)
        } else if topic0 == erc721_topic {
            parse_erc721_received_log(log).map(GatewayEvent::Erc721Received)
        } else if topic0 == erc721x_topic {
            parse_erc721x_received_log(log).map(GatewayEvent::Erc721xReceived)
        } else if topic0 == withdrawn_topic {
            parse_token_withdrawn_log(log).map(GatewayEvent::TokenWithdrawn)
        } else {
            continue;
        };

        match parsed {
            Some(event) => events.push(event),
            None => warn!(
                block = ?log.block_number,
                tx = ?log.transaction_hash,
                data_len = log.data().data.len(),
                "Failed to parse gateway event from log"
            ),
        }
    }

    events
}

/// Decode the gateway events emitted by a single mined transaction
pub fn events_from_receipt(receipt: &TransactionReceipt) -> Vec<GatewayEvent> {
    parse_gateway_logs(receipt.inner.logs())
}
