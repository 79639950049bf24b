//! Offline withdrawal-authorization flow tests
//!
//! Exercises the full client-side path that precedes the on-chain call:
//! compute the withdrawal digest, collect validator signatures over it, and
//! parse the concatenated proof blob into the arrays the gateway consumes.
//! No RPC endpoint is required.

use alloy::primitives::{address, Address, B256, U256};
use alloy::signers::{local::PrivateKeySigner, SignerSync};
use gateway_rs::{parse_signatures, withdrawal_hash, SigProofError, TokenKind, SIGNATURE_LEN};

fn test_addresses() -> (Address, Address, Address) {
    (
        // token, withdrawer, gateway
        address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
        address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
    )
}

fn sign_blob(signers: &[&PrivateKeySigner], digest: &[u8; 32]) -> Vec<u8> {
    let mut blob = Vec::with_capacity(signers.len() * SIGNATURE_LEN);
    for signer in signers {
        let sig = signer.sign_hash_sync(&B256::from(*digest)).unwrap();
        blob.extend_from_slice(&sig.as_bytes());
    }
    blob
}

#[test]
fn erc20_withdrawal_proof_round_trip() {
    let (token, withdrawer, gateway) = test_addresses();
    let amount = U256::from(2_500_000u64);

    let digest = withdrawal_hash(
        TokenKind::Erc20,
        U256::ZERO,
        amount,
        token,
        withdrawer,
        U256::from(4u64),
        gateway,
    );

    let validators: Vec<PrivateKeySigner> = (0..5).map(|_| PrivateKeySigner::random()).collect();
    let addresses: Vec<Address> = validators.iter().map(|v| v.address()).collect();

    // Only three of the five validators signed
    let blob = sign_blob(
        &[&validators[0], &validators[2], &validators[4]],
        &digest,
    );

    let proof = parse_signatures(&blob, &digest, &addresses).unwrap();
    assert_eq!(proof.len(), 3);
    assert_eq!(proof.signer_indexes[0], U256::ZERO);
    assert_eq!(proof.signer_indexes[1], U256::from(2u64));
    assert_eq!(proof.signer_indexes[2], U256::from(4u64));

    // Parallel arrays stay aligned with the blob segments
    for (i, segment) in blob.chunks_exact(SIGNATURE_LEN).enumerate() {
        assert_eq!(proof.r[i].as_slice(), &segment[..32]);
        assert_eq!(proof.s[i].as_slice(), &segment[32..64]);
        assert!(proof.v[i] == 27 || proof.v[i] == 28);
    }
}

#[test]
fn eth_withdrawal_digest_binds_zero_token_address() {
    let (token, withdrawer, gateway) = test_addresses();
    let amount = U256::from(1_000_000_000_000_000_000u128); // 1 ETH

    let eth_digest = withdrawal_hash(
        TokenKind::Eth,
        U256::ZERO,
        amount,
        Address::ZERO,
        withdrawer,
        U256::from(1u64),
        gateway,
    );
    let erc20_digest = withdrawal_hash(
        TokenKind::Erc20,
        U256::ZERO,
        amount,
        token,
        withdrawer,
        U256::from(1u64),
        gateway,
    );

    // A proof signed for an ETH withdrawal must not authorize an ERC20 one
    assert_ne!(eth_digest, erc20_digest);

    let validator = PrivateKeySigner::random();
    let blob = sign_blob(&[&validator], &eth_digest);

    let err = parse_signatures(&blob, &erc20_digest, &[validator.address()]).unwrap_err();
    assert!(matches!(err, SigProofError::NoValidatorSignatures));
}

#[test]
fn erc721x_digest_binds_both_uid_and_amount() {
    let (token, withdrawer, gateway) = test_addresses();
    let uid = U256::from(77u64);

    let base = withdrawal_hash(
        TokenKind::Erc721X,
        uid,
        U256::from(10u64),
        token,
        withdrawer,
        U256::ZERO,
        gateway,
    );
    let other_amount = withdrawal_hash(
        TokenKind::Erc721X,
        uid,
        U256::from(11u64),
        token,
        withdrawer,
        U256::ZERO,
        gateway,
    );
    let other_uid = withdrawal_hash(
        TokenKind::Erc721X,
        U256::from(78u64),
        U256::from(10u64),
        token,
        withdrawer,
        U256::ZERO,
        gateway,
    );

    assert_ne!(base, other_amount);
    assert_ne!(base, other_uid);
}

#[test]
fn proof_survives_mixed_known_and_unknown_signers() {
    let (token, withdrawer, gateway) = test_addresses();
    let digest = withdrawal_hash(
        TokenKind::Erc721,
        U256::from(9u64),
        U256::ZERO,
        token,
        withdrawer,
        U256::from(3u64),
        gateway,
    );

    let known = PrivateKeySigner::random();
    let unknown = PrivateKeySigner::random();

    let blob = sign_blob(&[&unknown, &known, &unknown], &digest);
    let proof = parse_signatures(&blob, &digest, &[known.address()]).unwrap();

    assert_eq!(proof.len(), 1);
    assert_eq!(proof.signer_indexes[0], U256::ZERO);
}

#[test]
fn garbage_blob_is_rejected() {
    let digest = [0x11u8; 32];
    let validators = [PrivateKeySigner::random().address()];

    // Not a multiple of 65
    assert!(matches!(
        parse_signatures(&[0u8; 66], &digest, &validators),
        Err(SigProofError::InvalidLength(66))
    ));

    // Valid length but an impossible recovery id
    let mut blob = vec![0u8; SIGNATURE_LEN];
    blob[64] = 99;
    assert!(matches!(
        parse_signatures(&blob, &digest, &validators),
        Err(SigProofError::InvalidRecoveryId(99))
    ));
}
