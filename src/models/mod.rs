pub mod chain;
pub mod delegation;
pub mod error;
pub mod session;

pub use delegation::{DelegationInfo, DelegationRequest, UndelegationInitiator};
pub use error::WalletError;
pub use session::{ApprovalState, TransactionOutcome, TxStatus, WalletEvent, WalletSession};
