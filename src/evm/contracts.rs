//! Gateway contract ABI definitions
//!
//! Uses alloy's sol! macro to generate type-safe bindings for the deployed
//! mainnet transfer gateway, plus the ERC20/ERC721 interfaces needed for
//! deposit preflight.
//!
//! Withdrawal methods take the multisig proof as parallel arrays: the index
//! of each signer in the contract's validator set, and the v/r/s components
//! of each signature. The contract recomputes the withdrawal digest, checks
//! the signatures against its validator set, and enforces the threshold.

#![allow(clippy::too_many_arguments)]

use alloy::sol;

sol! {
    /// Mainnet transfer gateway contract interface
    #[sol(rpc)]
    contract Gateway {
        // ====================================================================
        // Deposit Methods
        // ====================================================================

        /// Deposit ERC20 tokens into gateway custody (requires prior approve)
        function depositERC20(uint256 amount, address contractAddress) external;

        /// Deposit ETH into gateway custody (amount = msg.value)
        function depositEthToGateway() external payable;

        // ====================================================================
        // Custody Queries
        // ====================================================================

        /// Total ERC20 balance held for a token contract
        function getERC20(address contractAddress) external view returns (uint256);

        /// Whether a specific ERC721 token is held by the gateway
        function getERC721(uint256 uid, address contractAddress) external view returns (bool);

        /// ERC721X balance held for a token id
        function getERC721X(uint256 uid, address contractAddress) external view returns (uint256);

        /// Total ETH held by the gateway
        function getETH() external view returns (uint256);

        /// Per-account withdrawal nonce (binds each authorization digest)
        function nonces(address owner) external view returns (uint256);

        // ====================================================================
        // Withdrawal Methods (validator multisig proof)
        // ====================================================================

        /// Withdraw ERC20 tokens
        function withdrawERC20(
            uint256 amount,
            address contractAddress,
            uint256[] calldata _signersIndexes,
            uint8[] calldata _v,
            bytes32[] calldata _r,
            bytes32[] calldata _s
        ) external;

        /// Withdraw a specific ERC721 token
        function withdrawERC721(
            uint256 uid,
            address contractAddress,
            uint256[] calldata _signersIndexes,
            uint8[] calldata _v,
            bytes32[] calldata _r,
            bytes32[] calldata _s
        ) external;

        /// Withdraw an amount of an ERC721X token id
        function withdrawERC721X(
            uint256 uid,
            uint256 amount,
            address contractAddress,
            uint256[] calldata _signersIndexes,
            uint8[] calldata _v,
            bytes32[] calldata _r,
            bytes32[] calldata _s
        ) external;

        /// Withdraw ETH
        function withdrawETH(
            uint256 amount,
            uint256[] calldata _signersIndexes,
            uint8[] calldata _v,
            bytes32[] calldata _r,
            bytes32[] calldata _s
        ) external;

        // ====================================================================
        // Events
        // ====================================================================

        /// ETH deposited into custody
        event ETHReceived(address from, uint256 amount);

        /// ERC20 tokens deposited into custody
        event ERC20Received(address from, uint256 amount, address contractAddress);

        /// ERC721 token deposited into custody
        event ERC721Received(address from, uint256 uid, address contractAddress);

        /// ERC721X tokens deposited into custody
        event ERC721XReceived(address from, uint256 uid, uint256 amount, address contractAddress);

        /// Tokens withdrawn from custody (kind is the TokenKind discriminant)
        event TokenWithdrawn(address indexed owner, uint8 kind, address contractAddress, uint256 value);
    }

    // ========================================================================
    // ERC20 Interface for deposit preflight
    // ========================================================================

    /// Standard ERC20 interface
    #[sol(rpc)]
    contract ERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function totalSupply() external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function transferFrom(address from, address to, uint256 amount) external returns (bool);

        event Transfer(address indexed from, address indexed to, uint256 value);
        event Approval(address indexed owner, address indexed spender, uint256 value);
    }

    // ========================================================================
    // ERC721 Interface (deposits go through the token's safeTransferFrom)
    // ========================================================================

    /// Standard ERC721 interface
    #[sol(rpc)]
    contract ERC721 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function ownerOf(uint256 tokenId) external view returns (address);
        function balanceOf(address owner) external view returns (uint256);
        function approve(address to, uint256 tokenId) external;
        function getApproved(uint256 tokenId) external view returns (address);
        function safeTransferFrom(address from, address to, uint256 tokenId) external;
        function transferFrom(address from, address to, uint256 tokenId) external;

        event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);
        event Approval(address indexed owner, address indexed approved, uint256 indexed tokenId);
    }
}
