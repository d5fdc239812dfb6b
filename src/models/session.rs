use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Sesión de wallet activa (cuenta + chain)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub account: Address,
    pub chain_id: u64,
}

/// ¿Está el contrato de permisos aprobado para todos los NFTs del usuario?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApprovalState {
    #[default]
    Unknown,
    Approved,
    NotApproved,
}

impl ApprovalState {
    pub fn from_flag(approved: bool) -> Self {
        if approved {
            ApprovalState::Approved
        } else {
            ApprovalState::NotApproved
        }
    }

    pub fn is_approved(self) -> bool {
        matches!(self, ApprovalState::Approved)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Success,
    Error,
}

impl TxStatus {
    /// Clase CSS del mensaje de estado
    pub fn css_class(self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Success => "success",
            TxStatus::Error => "error",
        }
    }
}

/// Resultado de la última acción (se reemplaza con cada acción nueva)
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionOutcome {
    pub status: TxStatus,
    pub message: String,
    pub tx_hash: Option<B256>,
}

impl TransactionOutcome {
    pub fn pending(message: impl Into<String>) -> Self {
        Self { status: TxStatus::Pending, message: message.into(), tx_hash: None }
    }

    pub fn success(message: impl Into<String>, tx_hash: Option<B256>) -> Self {
        Self { status: TxStatus::Success, message: message.into(), tx_hash }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: TxStatus::Error, message: message.into(), tx_hash: None }
    }
}

/// Eventos que emite el wallet (stream tipado, ver `EthereumProvider::subscribe`)
#[derive(Clone, Debug, PartialEq)]
pub enum WalletEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(Option<u64>),
}
