/// Elemento raíz donde se monta la aplicación
pub const APP_ROOT_ID: &str = "app";

pub const MISSING_WALLET_ALERT: &str = "Please install MetaMask to use this application!";

pub const HASH_COPIED_ALERT: &str = "Transaction hash copied to clipboard!";

/// Tooltip de los botones delegate / undelegate sin aprobación
pub const APPROVAL_REQUIRED_TOOLTIP: &str = "Please approve the contract first";
