// ============================================================================
// CONTRACT BINDINGS - Contrato de permisos + contrato NFT (ERC-721)
// ============================================================================
// Codifica calldata con `sol!`, lee con `eth_call` y envía transacciones con
// `eth_sendTransaction` a través del wallet. Stateless.
// ============================================================================

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use serde_json::Value;

use crate::config::AppConfig;
use crate::models::chain::{CallRequest, TransactionReceipt, TransactionRequest};
use crate::models::delegation::parse_address;
use crate::models::{DelegationRequest, UndelegationInitiator, WalletError};
use crate::services::provider::{to_params, WalletProvider};

sol! {
    /// Contrato de delegación de NFTs a operadores
    interface INftDelegation {
        function delegateNfts(address operator, uint256[] calldata tokenIds) external;
        function undelegateNfts(address target, uint256[] calldata tokenIds, bool byOperator) external;
        function getDelegatorInfo(address delegator, address operator) external view returns (uint256[] memory);
    }

    /// Subconjunto ERC-721 para la aprobación global
    interface IErc721Approval {
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function setApprovalForAll(address operator, bool approved) external;
    }
}

#[derive(Clone, Debug)]
pub struct ContractBindings {
    permission_contract: Address,
    nft_contract: Address,
    poll_interval_ms: u32,
    poll_attempts: u32,
}

impl ContractBindings {
    /// Construir bindings desde la configuración; direcciones vacías o
    /// inválidas dejan los contratos sin inicializar
    pub fn new(config: &AppConfig) -> Result<Self, WalletError> {
        let permission_contract = parse_address(&config.permission_contract_address)
            .map_err(|_| WalletError::NotInitialized("permission contract address".to_string()))?;
        let nft_contract = parse_address(&config.nft_contract_address)
            .map_err(|_| WalletError::NotInitialized("NFT contract address".to_string()))?;

        Ok(Self {
            permission_contract,
            nft_contract,
            poll_interval_ms: config.receipt_poll_interval_ms,
            poll_attempts: config.receipt_poll_attempts.max(1),
        })
    }

    pub fn permission_contract(&self) -> Address {
        self.permission_contract
    }

    pub fn nft_contract(&self) -> Address {
        self.nft_contract
    }

    // ------------------------------------------------------------------
    // Lecturas
    // ------------------------------------------------------------------

    /// `isApprovedForAll(owner, permissionContract)` en el contrato NFT
    pub async fn is_approved_for_all<P: WalletProvider>(
        &self,
        provider: &P,
        owner: Address,
    ) -> Result<bool, WalletError> {
        let call = IErc721Approval::isApprovedForAllCall {
            owner,
            operator: self.permission_contract,
        };
        let result = self.call(provider, self.nft_contract, &call).await?;
        Ok(result._0)
    }

    /// Token ids que `delegator` tiene delegados a `operator`
    pub async fn delegator_info<P: WalletProvider>(
        &self,
        provider: &P,
        delegator: Address,
        operator: Address,
    ) -> Result<Vec<U256>, WalletError> {
        let call = INftDelegation::getDelegatorInfoCall { delegator, operator };
        let result = self.call(provider, self.permission_contract, &call).await?;
        Ok(result._0)
    }

    // ------------------------------------------------------------------
    // Escrituras (devuelven el hash una vez minada la transacción)
    // ------------------------------------------------------------------

    pub async fn delegate<P: WalletProvider>(
        &self,
        provider: &P,
        from: Address,
        request: &DelegationRequest,
    ) -> Result<B256, WalletError> {
        let call = INftDelegation::delegateNftsCall {
            operator: request.operator,
            tokenIds: request.token_ids.clone(),
        };
        self.send(provider, from, self.permission_contract, &call).await
    }

    pub async fn undelegate<P: WalletProvider>(
        &self,
        provider: &P,
        from: Address,
        request: &DelegationRequest,
        initiator: UndelegationInitiator,
    ) -> Result<B256, WalletError> {
        let call = INftDelegation::undelegateNftsCall {
            target: request.operator,
            tokenIds: request.token_ids.clone(),
            byOperator: initiator.by_operator(),
        };
        self.send(provider, from, self.permission_contract, &call).await
    }

    /// `setApprovalForAll(permissionContract, true)` en el contrato NFT
    pub async fn approve_all<P: WalletProvider>(
        &self,
        provider: &P,
        from: Address,
    ) -> Result<B256, WalletError> {
        let call = IErc721Approval::setApprovalForAllCall {
            operator: self.permission_contract,
            approved: true,
        };
        self.send(provider, from, self.nft_contract, &call).await
    }

    // ------------------------------------------------------------------
    // Helpers JSON-RPC
    // ------------------------------------------------------------------

    async fn call<P: WalletProvider, C: SolCall>(
        &self,
        provider: &P,
        to: Address,
        call: &C,
    ) -> Result<C::Return, WalletError> {
        let request = CallRequest { to, data: Bytes::from(call.abi_encode()) };
        let params = Value::Array(vec![to_params(&request)?, Value::from("latest")]);

        let raw: Bytes = provider.request_as("eth_call", params).await?;
        C::abi_decode_returns(&raw, true)
            .map_err(|e| WalletError::Contract(format!("Failed to decode {} result: {}", C::SIGNATURE, e)))
    }

    async fn send<P: WalletProvider, C: SolCall>(
        &self,
        provider: &P,
        from: Address,
        to: Address,
        call: &C,
    ) -> Result<B256, WalletError> {
        let request = TransactionRequest { from, to, data: Bytes::from(call.abi_encode()) };
        let params = Value::Array(vec![to_params(&request)?]);

        log::info!("✍️ [CONTRACT] Enviando {} a {}", C::SIGNATURE, to);
        let hash: B256 = provider.request_as("eth_sendTransaction", params).await?;
        log::info!("📨 [CONTRACT] Transacción enviada: {}", hash);

        let receipt = self.wait_for_receipt(provider, hash).await?;
        Ok(receipt.transaction_hash)
    }

    async fn wait_for_receipt<P: WalletProvider>(
        &self,
        provider: &P,
        hash: B256,
    ) -> Result<TransactionReceipt, WalletError> {
        for attempt in 1..=self.poll_attempts {
            let params = Value::Array(vec![to_params(&hash)?]);
            let receipt: Option<TransactionReceipt> =
                provider.request_as("eth_getTransactionReceipt", params).await?;

            if let Some(receipt) = receipt {
                if !receipt.succeeded() {
                    return Err(WalletError::Contract(format!("Transaction {} reverted", hash)));
                }
                log::info!("✅ [CONTRACT] Transacción minada: {} (intento {})", hash, attempt);
                return Ok(receipt);
            }

            if attempt < self.poll_attempts {
                provider.sleep(self.poll_interval_ms).await;
            }
        }

        Err(WalletError::Contract(format!(
            "Transaction {} was not mined after {} receipt checks",
            hash, self.poll_attempts
        )))
    }
}
