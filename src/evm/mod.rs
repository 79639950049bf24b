//! EVM-side gateway support
//!
//! Everything that talks to the chain lives here:
//!
//! - `contracts` - gateway/ERC20/ERC721 bindings using the alloy sol! macro
//! - `client` - the gateway client (deposits, queries, withdrawals)
//! - `events` - typed parsing of gateway contract events
//! - `tokens` - ERC20/ERC721 preflight helpers (approve, balances, metadata)

pub mod client;
pub mod contracts;
pub mod events;
pub mod tokens;

// Re-export commonly used items
pub use client::{GatewayClient, GatewayClientConfig, GatewayReader};
pub use contracts::{Gateway, ERC20, ERC721};
pub use events::{Erc20ReceivedEvent, EthReceivedEvent, GatewayEvent, TokenWithdrawnEvent};
