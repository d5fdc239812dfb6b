// ============================================================================
// WALLET ERROR - Taxonomía de errores del controlador
// ============================================================================
// (a) validación de entrada  (b) wallet/provider  (c) contrato  (d) config
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    // --- Validación (antes de cualquier llamada de red) ---
    #[error("Invalid operator address")]
    InvalidAddress(String),

    #[error("Please enter token IDs")]
    MissingTokenIds,

    #[error("Please enter at least one token ID")]
    EmptyTokenIds,

    #[error("Invalid token ID: {0}")]
    InvalidTokenId(String),

    // --- Wallet / provider ---
    #[error("Please install MetaMask or another Ethereum wallet.")]
    ProviderMissing,

    #[error("No account found. Please ensure your wallet has at least one account.")]
    NoAccounts,

    #[error("{message}")]
    Provider { code: Option<i64>, message: String },

    #[error("Failed to add {chain_name} network to wallet")]
    AddChainFailed { chain_name: String },

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),

    // --- Contratos ---
    #[error("{0}")]
    Contract(String),

    // --- Configuración ---
    #[error("Contract not initialized. Please add contract address.")]
    NotInitialized(String),

    // --- Gating de UI ---
    #[error("Wallet not connected")]
    NotConnected,

    #[error("Please approve the contract first")]
    NotApproved,

    #[error("Another transaction is still pending")]
    Busy,
}

impl WalletError {
    /// Código EIP-1193 si el error viene del provider
    pub fn provider_code(&self) -> Option<i64> {
        match self {
            WalletError::Provider { code, .. } => *code,
            _ => None,
        }
    }

    /// Errores detectados localmente, sin tocar la red
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidAddress(_)
                | WalletError::MissingTokenIds
                | WalletError::EmptyTokenIds
                | WalletError::InvalidTokenId(_)
        )
    }
}
