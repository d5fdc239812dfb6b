use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub permission_contract_address: String,
    pub nft_contract_address: String,
    pub chain: ChainConfig,
    pub enable_logging: bool,
    pub receipt_poll_interval_ms: u32,
    pub receipt_poll_attempts: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            permission_contract_address: "0xdD158B8A76566bC0c342893568e8fd3F08A9dAac".to_string(),
            nft_contract_address: "0xd0f4E1265Edd221b5bb0e8667a59f31B587B2197".to_string(),
            chain: ChainConfig::default(),
            enable_logging: true,
            receipt_poll_interval_ms: 1000,
            receipt_poll_attempts: 750,
        }
    }
}

/// Parámetros de la red objetivo (los mismos que se envían a `wallet_addEthereumChain`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_url: String,
    pub block_explorer_url: String,
    pub currency_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: 42161,
            chain_name: "Arbitrum One".to_string(),
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            block_explorer_url: "https://arbiscan.io".to_string(),
            currency_name: "Ethereum".to_string(),
            currency_symbol: "ETH".to_string(),
            currency_decimals: 18,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let chain_defaults = ChainConfig::default();
        Self {
            permission_contract_address: option_env!("PERMISSION_CONTRACT_ADDRESS")
                .map(|s| s.to_string())
                .unwrap_or(defaults.permission_contract_address),
            nft_contract_address: option_env!("NFT_CONTRACT_ADDRESS")
                .map(|s| s.to_string())
                .unwrap_or(defaults.nft_contract_address),
            chain: ChainConfig {
                chain_id: option_env!("CHAIN_ID")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(chain_defaults.chain_id),
                chain_name: option_env!("CHAIN_NAME")
                    .map(|s| s.to_string())
                    .unwrap_or(chain_defaults.chain_name),
                rpc_url: option_env!("RPC_URL")
                    .map(|s| s.to_string())
                    .unwrap_or(chain_defaults.rpc_url),
                block_explorer_url: option_env!("BLOCK_EXPLORER_URL")
                    .map(|s| s.to_string())
                    .unwrap_or(chain_defaults.block_explorer_url),
                currency_name: option_env!("NATIVE_CURRENCY_NAME")
                    .map(|s| s.to_string())
                    .unwrap_or(chain_defaults.currency_name),
                currency_symbol: option_env!("NATIVE_CURRENCY_SYMBOL")
                    .map(|s| s.to_string())
                    .unwrap_or(chain_defaults.currency_symbol),
                currency_decimals: option_env!("NATIVE_CURRENCY_DECIMALS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(chain_defaults.currency_decimals),
            },
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            receipt_poll_interval_ms: option_env!("RECEIPT_POLL_INTERVAL_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.receipt_poll_interval_ms),
            receipt_poll_attempts: option_env!("RECEIPT_POLL_ATTEMPTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.receipt_poll_attempts),
        }
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

impl ChainConfig {
    /// Chain id en el formato hexadecimal que esperan los wallets (`0xa4b1`)
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
