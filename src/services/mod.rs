pub mod contracts;
pub mod provider;

pub use contracts::ContractBindings;
pub use provider::{EthereumProvider, WalletProvider, UNRECOGNIZED_CHAIN_CODE};
