//! Gateway-RS: Client SDK for the Mainnet Transfer Gateway
//!
//! This crate wraps a pre-deployed token-bridge ("gateway") contract on an
//! Ethereum-compatible chain. It lets an off-chain caller:
//!
//! - **Deposit** ERC20 tokens or ETH into the gateway's custody
//! - **Query** custody state: ERC20/ETH balances, ERC721 deposit flags,
//!   ERC721X balances, and per-account withdrawal nonces
//! - **Withdraw** tokens with a multi-signature proof produced by the
//!   external validator oracle network
//! - **Compute** the deterministic withdrawal-authorization digest that
//!   validators sign off-chain
//!
//! All custody accounting, signature threshold checks, and nonce-based replay
//! protection execute inside the deployed contract. This SDK only marshals
//! arguments, submits transactions, and waits for confirmation.
//!
//! ## Modules
//!
//! - [`hash`] - keccak256 and the withdrawal-authorization digest
//! - [`sigs`] - validator multisig proof parsing and signer recovery
//! - [`evm`] - gateway client, contract bindings, event parsing, token helpers
//! - [`config`] - environment-driven configuration
//! - [`types`] - shared types (`TokenKind`, `TxReceiptInfo`)

pub mod config;
pub mod hash;
pub mod redact;
pub mod sigs;
pub mod types;

pub mod evm;

// Re-export commonly used items at the crate root
pub use config::Config;
pub use hash::{eth_signed_message_hash, keccak256, withdrawal_hash};
pub use redact::Redacted;
pub use sigs::{parse_signatures, SigProofError, WithdrawalProof, SIGNATURE_LEN};
pub use types::{TokenKind, TxReceiptInfo};

pub use evm::{GatewayClient, GatewayClientConfig, GatewayReader};
