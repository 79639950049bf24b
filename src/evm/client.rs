//! Mainnet gateway client
//!
//! Provides the high-level client for the deployed transfer gateway: deposits,
//! custody queries, and multisig-authorized withdrawals. Every state-changing
//! operation submits a transaction and blocks until it is mined or the
//! configured timeout elapses.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{Provider, ProviderBuilder, RootProvider},
    signers::local::PrivateKeySigner,
    transports::http::{Client, Http},
};
use eyre::{eyre, Result};
use std::time::Duration;
use tracing::info;

use crate::evm::contracts::Gateway;
use crate::hash::withdrawal_hash;
use crate::sigs::parse_signatures;
use crate::types::{TokenKind, TxReceiptInfo};

/// Gateway client configuration
#[derive(Debug, Clone)]
pub struct GatewayClientConfig {
    /// RPC URL (e.g., "http://localhost:8545")
    pub rpc_url: String,
    /// Native chain ID
    pub chain_id: u64,
    /// Deployed gateway contract address
    pub gateway_address: Address,
    /// Private key for signing transactions
    pub private_key: String,
    /// How long to wait for a transaction confirmation
    pub tx_timeout: Duration,
}

/// Gateway client with signing capabilities
pub struct GatewayClient {
    /// The alloy provider with wallet
    #[allow(clippy::type_complexity)]
    provider: alloy::providers::fillers::FillProvider<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            alloy::providers::fillers::WalletFiller<EthereumWallet>,
        >,
        RootProvider<Http<Client>>,
        Http<Client>,
        alloy::network::Ethereum,
    >,
    /// Gateway contract address
    gateway_address: Address,
    /// Address of the transaction signer
    caller: Address,
    /// Chain ID
    pub chain_id: u64,
    /// Confirmation timeout
    tx_timeout: Duration,
}

impl GatewayClient {
    /// Connect to the gateway with a signing key
    pub fn connect(config: GatewayClientConfig) -> Result<Self> {
        let signer: PrivateKeySigner = config
            .private_key
            .parse()
            .map_err(|e| eyre!("Invalid private key: {}", e))?;

        let caller = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).on_http(
            config
                .rpc_url
                .parse()
                .map_err(|e| eyre!("Invalid RPC URL: {}", e))?,
        );

        info!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            gateway = %config.gateway_address,
            caller = %caller,
            "Connected to mainnet gateway"
        );

        Ok(Self {
            provider,
            gateway_address: config.gateway_address,
            caller,
            chain_id: config.chain_id,
            tx_timeout: config.tx_timeout,
        })
    }

    /// The gateway contract address
    pub fn gateway_address(&self) -> Address {
        self.gateway_address
    }

    /// The address submitting transactions
    pub fn caller_address(&self) -> Address {
        self.caller
    }

    /// Get a reference to the underlying wallet provider
    #[allow(clippy::type_complexity)]
    pub fn provider(
        &self,
    ) -> &alloy::providers::fillers::FillProvider<
        alloy::providers::fillers::JoinFill<
            alloy::providers::Identity,
            alloy::providers::fillers::WalletFiller<EthereumWallet>,
        >,
        RootProvider<Http<Client>>,
        Http<Client>,
        alloy::network::Ethereum,
    > {
        &self.provider
    }

    // =========================================================================
    // Deposits
    // =========================================================================

    /// Deposit ERC20 tokens into gateway custody.
    ///
    /// The gateway must already be approved to spend `amount` of the token
    /// (see [`crate::evm::tokens::approve_erc20`]).
    pub async fn deposit_erc20(&self, amount: U256, token: Address) -> Result<TxReceiptInfo> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);

        let pending = gateway
            .depositERC20(amount, token)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send depositERC20: {}", e))?;

        let receipt = tokio::time::timeout(self.tx_timeout, pending.get_receipt())
            .await
            .map_err(|_| eyre!("depositERC20 not confirmed within {:?}", self.tx_timeout))?
            .map_err(|e| eyre!("Failed to get depositERC20 receipt: {}", e))?;

        if !receipt.status() {
            return Err(eyre!("depositERC20 transaction reverted"));
        }

        info!(
            amount = %amount,
            token = %token,
            tx = %receipt.transaction_hash,
            "ERC20 deposit confirmed"
        );

        Ok(TxReceiptInfo::from_receipt(&receipt))
    }

    /// Deposit ETH into gateway custody.
    ///
    /// Returns the confirmation details including the tx fee paid.
    pub async fn deposit_eth(&self, amount: U256) -> Result<TxReceiptInfo> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);

        let pending = gateway
            .depositEthToGateway()
            .value(amount)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send depositEthToGateway: {}", e))?;

        let receipt = tokio::time::timeout(self.tx_timeout, pending.get_receipt())
            .await
            .map_err(|_| eyre!("depositEthToGateway not confirmed within {:?}", self.tx_timeout))?
            .map_err(|e| eyre!("Failed to get depositEthToGateway receipt: {}", e))?;

        if !receipt.status() {
            return Err(eyre!("depositEthToGateway transaction reverted"));
        }

        let details = TxReceiptInfo::from_receipt(&receipt);
        info!(
            amount = %amount,
            tx = %receipt.transaction_hash,
            fee = %details.fee,
            "ETH deposit confirmed"
        );

        Ok(details)
    }

    // =========================================================================
    // Custody Queries
    // =========================================================================

    /// Total ERC20 balance the gateway holds for a token contract
    pub async fn erc20_balance(&self, token: Address) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getERC20(token)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getERC20: {}", e))?;

        Ok(result._0)
    }

    /// Whether the gateway holds a specific ERC721 token
    pub async fn erc721_deposited(&self, token_id: U256, token: Address) -> Result<bool> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getERC721(token_id, token)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getERC721: {}", e))?;

        Ok(result._0)
    }

    /// ERC721X balance the gateway holds for a token id
    pub async fn erc721x_balance(&self, token_id: U256, token: Address) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getERC721X(token_id, token)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getERC721X: {}", e))?;

        Ok(result._0)
    }

    /// Total ETH the gateway holds
    pub async fn eth_balance(&self) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getETH()
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getETH: {}", e))?;

        Ok(result._0)
    }

    /// Current withdrawal nonce for an account
    pub async fn nonces(&self, owner: Address) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .nonces(owner)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query nonces: {}", e))?;

        Ok(result._0)
    }

    /// Compute the withdrawal-authorization digest for the caller at their
    /// current on-chain nonce. This is the digest to hand to the validator
    /// oracle for signing.
    pub async fn withdrawal_authorization_hash(
        &self,
        kind: TokenKind,
        token_id: U256,
        amount: U256,
        token: Address,
    ) -> Result<[u8; 32]> {
        let nonce = self.nonces(self.caller).await?;
        Ok(withdrawal_hash(
            kind,
            token_id,
            amount,
            token,
            self.caller,
            nonce,
            self.gateway_address,
        ))
    }

    // =========================================================================
    // Withdrawals
    // =========================================================================

    /// Withdraw ERC20 tokens with a validator multisig proof
    pub async fn withdraw_erc20(
        &self,
        amount: U256,
        token: Address,
        sigs: &[u8],
        validators: &[Address],
    ) -> Result<TxReceiptInfo> {
        let digest = self
            .withdrawal_authorization_hash(TokenKind::Erc20, U256::ZERO, amount, token)
            .await?;
        let proof = parse_signatures(sigs, &digest, validators)?;

        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let pending = gateway
            .withdrawERC20(amount, token, proof.signer_indexes, proof.v, proof.r, proof.s)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send withdrawERC20: {}", e))?;

        let receipt = tokio::time::timeout(self.tx_timeout, pending.get_receipt())
            .await
            .map_err(|_| eyre!("withdrawERC20 not confirmed within {:?}", self.tx_timeout))?
            .map_err(|e| eyre!("Failed to get withdrawERC20 receipt: {}", e))?;

        if !receipt.status() {
            return Err(eyre!("withdrawERC20 transaction reverted"));
        }

        info!(
            amount = %amount,
            token = %token,
            tx = %receipt.transaction_hash,
            "ERC20 withdrawal confirmed"
        );

        Ok(TxReceiptInfo::from_receipt(&receipt))
    }

    /// Withdraw a specific ERC721 token with a validator multisig proof
    pub async fn withdraw_erc721(
        &self,
        token_id: U256,
        token: Address,
        sigs: &[u8],
        validators: &[Address],
    ) -> Result<TxReceiptInfo> {
        let digest = self
            .withdrawal_authorization_hash(TokenKind::Erc721, token_id, U256::ZERO, token)
            .await?;
        let proof = parse_signatures(sigs, &digest, validators)?;

        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let pending = gateway
            .withdrawERC721(
                token_id,
                token,
                proof.signer_indexes,
                proof.v,
                proof.r,
                proof.s,
            )
            .send()
            .await
            .map_err(|e| eyre!("Failed to send withdrawERC721: {}", e))?;

        let receipt = tokio::time::timeout(self.tx_timeout, pending.get_receipt())
            .await
            .map_err(|_| eyre!("withdrawERC721 not confirmed within {:?}", self.tx_timeout))?
            .map_err(|e| eyre!("Failed to get withdrawERC721 receipt: {}", e))?;

        if !receipt.status() {
            return Err(eyre!("withdrawERC721 transaction reverted"));
        }

        info!(
            token_id = %token_id,
            token = %token,
            tx = %receipt.transaction_hash,
            "ERC721 withdrawal confirmed"
        );

        Ok(TxReceiptInfo::from_receipt(&receipt))
    }

    /// Withdraw an amount of an ERC721X token id with a validator multisig proof
    pub async fn withdraw_erc721x(
        &self,
        token_id: U256,
        amount: U256,
        token: Address,
        sigs: &[u8],
        validators: &[Address],
    ) -> Result<TxReceiptInfo> {
        let digest = self
            .withdrawal_authorization_hash(TokenKind::Erc721X, token_id, amount, token)
            .await?;
        let proof = parse_signatures(sigs, &digest, validators)?;

        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let pending = gateway
            .withdrawERC721X(
                token_id,
                amount,
                token,
                proof.signer_indexes,
                proof.v,
                proof.r,
                proof.s,
            )
            .send()
            .await
            .map_err(|e| eyre!("Failed to send withdrawERC721X: {}", e))?;

        let receipt = tokio::time::timeout(self.tx_timeout, pending.get_receipt())
            .await
            .map_err(|_| eyre!("withdrawERC721X not confirmed within {:?}", self.tx_timeout))?
            .map_err(|e| eyre!("Failed to get withdrawERC721X receipt: {}", e))?;

        if !receipt.status() {
            return Err(eyre!("withdrawERC721X transaction reverted"));
        }

        info!(
            token_id = %token_id,
            amount = %amount,
            token = %token,
            tx = %receipt.transaction_hash,
            "ERC721X withdrawal confirmed"
        );

        Ok(TxReceiptInfo::from_receipt(&receipt))
    }

    /// Withdraw ETH with a validator multisig proof.
    ///
    /// The digest binds the zero token address; returns confirmation details
    /// including the tx fee paid.
    pub async fn withdraw_eth(
        &self,
        amount: U256,
        sigs: &[u8],
        validators: &[Address],
    ) -> Result<TxReceiptInfo> {
        let digest = self
            .withdrawal_authorization_hash(TokenKind::Eth, U256::ZERO, amount, Address::ZERO)
            .await?;
        let proof = parse_signatures(sigs, &digest, validators)?;

        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let pending = gateway
            .withdrawETH(amount, proof.signer_indexes, proof.v, proof.r, proof.s)
            .send()
            .await
            .map_err(|e| eyre!("Failed to send withdrawETH: {}", e))?;

        let receipt = tokio::time::timeout(self.tx_timeout, pending.get_receipt())
            .await
            .map_err(|_| eyre!("withdrawETH not confirmed within {:?}", self.tx_timeout))?
            .map_err(|e| eyre!("Failed to get withdrawETH receipt: {}", e))?;

        if !receipt.status() {
            return Err(eyre!("withdrawETH transaction reverted"));
        }

        let details = TxReceiptInfo::from_receipt(&receipt);
        info!(
            amount = %amount,
            tx = %receipt.transaction_hash,
            fee = %details.fee,
            "ETH withdrawal confirmed"
        );

        Ok(details)
    }

    // =========================================================================
    // Chain Queries
    // =========================================================================

    /// Get the current block number
    pub async fn get_block_number(&self) -> Result<u64> {
        let block = self.provider.get_block_number().await?;
        Ok(block)
    }

    /// Get the ETH balance of the caller's own account
    pub async fn caller_balance(&self) -> Result<U256> {
        let balance = self.provider.get_balance(self.caller).await?;
        Ok(balance)
    }
}

/// Read-only gateway client for query-only use (no signing key)
pub struct GatewayReader {
    /// Read-only provider
    provider: RootProvider<Http<Client>>,
    /// Gateway contract address
    gateway_address: Address,
}

impl GatewayReader {
    /// Create a new read-only gateway client
    pub fn new(rpc_url: &str, gateway_address: Address) -> Result<Self> {
        let provider = ProviderBuilder::new().on_http(
            rpc_url
                .parse()
                .map_err(|e| eyre!("Invalid RPC URL: {}", e))?,
        );

        Ok(Self {
            provider,
            gateway_address,
        })
    }

    /// The gateway contract address
    pub fn gateway_address(&self) -> Address {
        self.gateway_address
    }

    /// Total ERC20 balance the gateway holds for a token contract
    pub async fn erc20_balance(&self, token: Address) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getERC20(token)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getERC20: {}", e))?;

        Ok(result._0)
    }

    /// Whether the gateway holds a specific ERC721 token
    pub async fn erc721_deposited(&self, token_id: U256, token: Address) -> Result<bool> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getERC721(token_id, token)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getERC721: {}", e))?;

        Ok(result._0)
    }

    /// ERC721X balance the gateway holds for a token id
    pub async fn erc721x_balance(&self, token_id: U256, token: Address) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getERC721X(token_id, token)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getERC721X: {}", e))?;

        Ok(result._0)
    }

    /// Total ETH the gateway holds
    pub async fn eth_balance(&self) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .getETH()
            .call()
            .await
            .map_err(|e| eyre!("Failed to query getETH: {}", e))?;

        Ok(result._0)
    }

    /// Current withdrawal nonce for an account
    pub async fn nonces(&self, owner: Address) -> Result<U256> {
        let gateway = Gateway::new(self.gateway_address, &self.provider);
        let result = gateway
            .nonces(owner)
            .call()
            .await
            .map_err(|e| eyre!("Failed to query nonces: {}", e))?;

        Ok(result._0)
    }

    /// Get the current block number
    pub async fn get_block_number(&self) -> Result<u64> {
        let block = self.provider.get_block_number().await?;
        Ok(block)
    }
}
