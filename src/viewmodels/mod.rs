// ============================================================================
// VIEWMODELS - Estado + lógica UI
// ============================================================================

pub mod wallet_viewmodel;

pub use wallet_viewmodel::{EventOutcome, WalletViewModel};
