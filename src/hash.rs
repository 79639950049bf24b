//! Withdrawal-authorization digest computation
//!
//! The gateway contract verifies validator signatures over a deterministic
//! digest of the withdrawal parameters. This module reproduces the contract's
//! digest exactly, using `abi.encodePacked` layout (no padding between fields):
//!
//! 1. An inner digest over the token parameters, whose layout depends on the
//!    token kind:
//!    - ERC721:  `keccak256(packed(tokenId, token))`
//!    - ERC721X: `keccak256(packed(tokenId, amount, token))`
//!    - ERC20:   `keccak256(packed(amount, token))`
//!    - ETH:     `keccak256(packed(amount))`
//! 2. A replay-binding wrap over the withdrawer, their current gateway nonce,
//!    and the gateway contract address:
//!    `keccak256(packed(withdrawer, nonce, gateway, inner))`
//! 3. The EIP-191 personal-message prefix:
//!    `keccak256("\x19Ethereum Signed Message:\n32" || step2)`

use alloy::primitives::{Address, U256};
use tiny_keccak::{Hasher, Keccak};

use crate::types::TokenKind;

/// EIP-191 prefix for a 32-byte signed message
pub const ETH_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Compute keccak256 hash of data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Append a uint256 in packed encoding (32 bytes, big-endian)
fn pack_uint256(out: &mut Vec<u8>, value: U256) {
    out.extend_from_slice(&value.to_be_bytes::<32>());
}

/// Append an address in packed encoding (20 bytes, no padding)
fn pack_address(out: &mut Vec<u8>, addr: Address) {
    out.extend_from_slice(addr.as_slice());
}

/// Inner digest over the token parameters of a withdrawal.
///
/// `token_id` is ignored for ERC20/ETH, `amount` is ignored for ERC721, and
/// `token` is ignored for ETH, matching the contract's per-kind layouts.
pub fn token_params_digest(
    kind: TokenKind,
    token_id: U256,
    amount: U256,
    token: Address,
) -> [u8; 32] {
    let mut data = Vec::with_capacity(84);
    match kind {
        TokenKind::Erc721 => {
            pack_uint256(&mut data, token_id);
            pack_address(&mut data, token);
        }
        TokenKind::Erc721X => {
            pack_uint256(&mut data, token_id);
            pack_uint256(&mut data, amount);
            pack_address(&mut data, token);
        }
        TokenKind::Erc20 => {
            pack_uint256(&mut data, amount);
            pack_address(&mut data, token);
        }
        TokenKind::Eth => {
            pack_uint256(&mut data, amount);
        }
    }
    keccak256(&data)
}

/// Full withdrawal-authorization digest that validators sign.
///
/// Binds the token parameters to the withdrawer, their current gateway nonce,
/// and the gateway contract address, then applies the EIP-191 prefix.
#[allow(clippy::too_many_arguments)]
pub fn withdrawal_hash(
    kind: TokenKind,
    token_id: U256,
    amount: U256,
    token: Address,
    withdrawer: Address,
    nonce: U256,
    gateway: Address,
) -> [u8; 32] {
    let inner = token_params_digest(kind, token_id, amount, token);

    // Replay binding: packed(withdrawer, nonce, gateway, inner) = 20+32+20+32
    let mut data = Vec::with_capacity(104);
    pack_address(&mut data, withdrawer);
    pack_uint256(&mut data, nonce);
    pack_address(&mut data, gateway);
    data.extend_from_slice(&inner);
    let bound = keccak256(&data);

    eth_signed_message_hash(&bound)
}

/// Apply the EIP-191 personal-message prefix to a 32-byte digest
pub fn eth_signed_message_hash(digest: &[u8; 32]) -> [u8; 32] {
    let mut data = Vec::with_capacity(ETH_SIGN_PREFIX.len() + 32);
    data.extend_from_slice(ETH_SIGN_PREFIX);
    data.extend_from_slice(digest);
    keccak256(&data)
}

/// Convert a 32-byte digest to a hex string with 0x prefix
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_keccak256() {
        let result = keccak256(b"hello");
        assert_eq!(
            bytes32_to_hex(&result),
            "0x1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_eth_signed_message_hash_matches_manual_prefix() {
        let digest = keccak256(b"withdrawal");
        let mut manual = Vec::new();
        manual.extend_from_slice(b"\x19Ethereum Signed Message:\n32");
        manual.extend_from_slice(&digest);
        assert_eq!(eth_signed_message_hash(&digest), keccak256(&manual));
    }

    #[test]
    fn test_token_params_digest_layouts_differ() {
        let token = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let uid = U256::from(7u64);
        let amount = U256::from(1_000_000u64);

        let erc20 = token_params_digest(TokenKind::Erc20, U256::ZERO, amount, token);
        let erc721 = token_params_digest(TokenKind::Erc721, uid, U256::ZERO, token);
        let erc721x = token_params_digest(TokenKind::Erc721X, uid, amount, token);
        let eth = token_params_digest(TokenKind::Eth, U256::ZERO, amount, Address::ZERO);

        assert_ne!(erc20, erc721);
        assert_ne!(erc20, erc721x);
        assert_ne!(erc721, erc721x);
        assert_ne!(erc20, eth);
    }

    #[test]
    fn test_erc721_digest_ignores_amount() {
        let token = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let uid = U256::from(42u64);

        let a = token_params_digest(TokenKind::Erc721, uid, U256::ZERO, token);
        let b = token_params_digest(TokenKind::Erc721, uid, U256::from(999u64), token);
        assert_eq!(a, b);
    }

    #[test]
    fn test_withdrawal_hash_deterministic() {
        let token = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let withdrawer = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let gateway = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let amount = U256::from(1_000_000u64);

        let a = withdrawal_hash(
            TokenKind::Erc20,
            U256::ZERO,
            amount,
            token,
            withdrawer,
            U256::from(1u64),
            gateway,
        );
        let b = withdrawal_hash(
            TokenKind::Erc20,
            U256::ZERO,
            amount,
            token,
            withdrawer,
            U256::from(1u64),
            gateway,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_withdrawal_hash_changes_with_nonce() {
        let token = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let withdrawer = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let gateway = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
        let amount = U256::from(1_000_000u64);

        let a = withdrawal_hash(
            TokenKind::Erc20,
            U256::ZERO,
            amount,
            token,
            withdrawer,
            U256::from(1u64),
            gateway,
        );
        let b = withdrawal_hash(
            TokenKind::Erc20,
            U256::ZERO,
            amount,
            token,
            withdrawer,
            U256::from(2u64),
            gateway,
        );
        assert_ne!(a, b);
    }

    #[test]
    fn test_withdrawal_hash_changes_with_gateway() {
        let token = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let withdrawer = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
        let amount = U256::from(1_000_000u64);

        let a = withdrawal_hash(
            TokenKind::Eth,
            U256::ZERO,
            amount,
            Address::ZERO,
            withdrawer,
            U256::from(1u64),
            address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
        );
        let b = withdrawal_hash(
            TokenKind::Eth,
            U256::ZERO,
            amount,
            Address::ZERO,
            withdrawer,
            U256::from(1u64),
            address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
        );
        assert_ne!(a, b);
    }
}
