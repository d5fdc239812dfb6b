// ============================================================================
// CHAIN / RPC PAYLOADS - Estructuras JSON que viajan al wallet (EIP-1193)
// ============================================================================

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::config::ChainConfig;

/// Parámetro de `wallet_switchEthereumChain`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParameter {
    pub chain_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parámetro de `wallet_addEthereumChain` (EIP-3085)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl From<&ChainConfig> for AddChainParameter {
    fn from(chain: &ChainConfig) -> Self {
        Self {
            chain_id: chain.chain_id_hex(),
            chain_name: chain.chain_name.clone(),
            native_currency: NativeCurrency {
                name: chain.currency_name.clone(),
                symbol: chain.currency_symbol.clone(),
                decimals: chain.currency_decimals,
            },
            rpc_urls: vec![chain.rpc_url.clone()],
            block_explorer_urls: vec![chain.block_explorer_url.clone()],
        }
    }
}

/// Llamada de solo lectura (`eth_call`)
#[derive(Debug, Clone, Serialize)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
}

/// Transacción firmada por el wallet (`eth_sendTransaction`)
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

/// Subconjunto del receipt que necesitamos
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub status: Option<String>,
}

impl TransactionReceipt {
    /// Post-Byzantium: `0x1` éxito, `0x0` revert
    pub fn succeeded(&self) -> bool {
        !matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}

/// `"0xa4b1"` -> 42161
pub fn parse_chain_id(hex: &str) -> Option<u64> {
    let digits = hex.trim().strip_prefix("0x").unwrap_or(hex.trim());
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_chain_parameter_uses_wallet_field_names() {
        let param = AddChainParameter::from(&ChainConfig::default());
        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["chainId"], "0xa4b1");
        assert_eq!(json["chainName"], "Arbitrum One");
        assert_eq!(json["nativeCurrency"]["symbol"], "ETH");
        assert_eq!(json["nativeCurrency"]["decimals"], 18);
        assert_eq!(json["rpcUrls"][0], "https://arb1.arbitrum.io/rpc");
        assert_eq!(json["blockExplorerUrls"][0], "https://arbiscan.io");
    }

    #[test]
    fn chain_id_hex_is_parsed() {
        assert_eq!(parse_chain_id("0xa4b1"), Some(42161));
        assert_eq!(parse_chain_id("0x1"), Some(1));
        assert_eq!(parse_chain_id("nope"), None);
    }

    #[test]
    fn receipt_status_zero_is_a_revert() {
        let receipt: TransactionReceipt = serde_json::from_value(serde_json::json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "status": "0x0"
        }))
        .unwrap();
        assert!(!receipt.succeeded());
    }
}
