//! Validator multisig proof parsing
//!
//! The validator oracle network authorizes a withdrawal by signing the
//! withdrawal digest; the caller receives the signatures as one concatenated
//! blob of 65-byte `[r || s || v]` segments. The gateway contract expects the
//! proof split into parallel arrays plus the index of each signer in the
//! contract's validator set, so it can check the threshold without recovering
//! keys on-chain.

use alloy::primitives::{Address, FixedBytes, Signature, B256, U256};
use thiserror::Error;
use tracing::{debug, warn};

/// Length of a single `[r || s || v]` signature segment
pub const SIGNATURE_LEN: usize = 65;

/// Errors from parsing a validator signature blob
#[derive(Debug, Error)]
pub enum SigProofError {
    #[error("signature blob length {0} is not a non-zero multiple of 65")]
    InvalidLength(usize),
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),
    #[error("signature recovery failed: {0}")]
    Recovery(#[from] alloy::primitives::SignatureError),
    #[error("no signatures from known validators")]
    NoValidatorSignatures,
}

/// A withdrawal proof in the shape the gateway contract consumes.
///
/// The four vectors are parallel: entry `i` of each belongs to the same
/// validator signature.
#[derive(Debug, Clone, Default)]
pub struct WithdrawalProof {
    /// Index of each signer in the contract's validator set
    pub signer_indexes: Vec<U256>,
    /// Recovery ids, normalized to 27/28
    pub v: Vec<u8>,
    /// Signature r components
    pub r: Vec<FixedBytes<32>>,
    /// Signature s components
    pub s: Vec<FixedBytes<32>>,
}

impl WithdrawalProof {
    /// Number of validator signatures in the proof
    pub fn len(&self) -> usize {
        self.signer_indexes.len()
    }

    /// Whether the proof carries no signatures
    pub fn is_empty(&self) -> bool {
        self.signer_indexes.is_empty()
    }
}

/// Parse a concatenated signature blob against a validator set.
///
/// Each 65-byte segment is recovered against `digest` (already prefixed per
/// EIP-191) and matched to its position in `validators`. Signatures from
/// addresses outside the validator set are skipped with a warning, as is a
/// second signature from the same validator. Threshold enforcement is the
/// contract's job; an empty surviving set is still an error because the
/// submission would revert.
pub fn parse_signatures(
    sigs: &[u8],
    digest: &[u8; 32],
    validators: &[Address],
) -> Result<WithdrawalProof, SigProofError> {
    if sigs.is_empty() || sigs.len() % SIGNATURE_LEN != 0 {
        return Err(SigProofError::InvalidLength(sigs.len()));
    }

    let prehash = B256::from(*digest);
    let mut proof = WithdrawalProof::default();

    for segment in sigs.chunks_exact(SIGNATURE_LEN) {
        let v_raw = segment[64];
        // Geth-style signers emit 27/28, some tooling emits 0/1
        let v = if v_raw < 27 { v_raw + 27 } else { v_raw };
        if v != 27 && v != 28 {
            return Err(SigProofError::InvalidRecoveryId(v_raw));
        }

        let signature = Signature::try_from(segment)?;
        let signer = signature.recover_address_from_prehash(&prehash)?;

        match validators.iter().position(|val| *val == signer) {
            Some(index) => {
                let index = U256::from(index);
                if proof.signer_indexes.contains(&index) {
                    warn!(signer = %signer, "Duplicate validator signature, skipping");
                    continue;
                }
                proof.signer_indexes.push(index);
                proof.v.push(v);
                proof.r.push(FixedBytes::from_slice(&segment[..32]));
                proof.s.push(FixedBytes::from_slice(&segment[32..64]));
            }
            None => {
                warn!(signer = %signer, "Signature from unknown validator, skipping");
            }
        }
    }

    if proof.is_empty() {
        return Err(SigProofError::NoValidatorSignatures);
    }

    debug!(
        signatures = proof.len(),
        validators = validators.len(),
        "Parsed withdrawal proof"
    );

    Ok(proof)
}
