// ============================================================================
// WALLET VIEWMODEL - Controlador de sesión de wallet
// ============================================================================
// Conecta wallet, gestiona la aprobación y despacha delegate / undelegate /
// check. Todo resultado (éxito o error) termina en `WalletState.outcome`.
// ============================================================================

use alloy_primitives::{Address, B256};

use crate::config::{AppConfig, ChainConfig};
use crate::models::delegation::parse_address;
use crate::models::{
    ApprovalState, DelegationInfo, DelegationRequest, TransactionOutcome, UndelegationInitiator,
    WalletError, WalletEvent,
};
use crate::services::{ContractBindings, WalletProvider, UNRECOGNIZED_CHAIN_CODE};
use crate::state::{ReactiveState, WalletAction, WalletState};

/// Qué debe hacer la página después de procesar un evento del wallet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    Reload,
}

/// Todo lo necesario para enviar algo en nombre de la cuenta activa
struct ActionContext<'a, P> {
    provider: &'a P,
    contracts: &'a ContractBindings,
    account: Address,
}

pub struct WalletViewModel<P: WalletProvider> {
    provider: Option<P>,
    contracts: Result<ContractBindings, WalletError>,
    chain: ChainConfig,
    state: ReactiveState<WalletState>,
}

impl<P: WalletProvider> WalletViewModel<P> {
    pub fn new(provider: Option<P>, config: &AppConfig) -> Self {
        let contracts = ContractBindings::new(config);
        if let Err(e) = &contracts {
            log::error!("❌ [WALLET] Contratos sin inicializar: {:?}", e);
        }
        Self {
            provider,
            contracts,
            chain: config.chain.clone(),
            state: ReactiveState::new(WalletState::default()),
        }
    }

    pub fn state(&self) -> &ReactiveState<WalletState> {
        &self.state
    }

    pub fn snapshot(&self) -> WalletState {
        self.state.snapshot()
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    // ------------------------------------------------------------------
    // Ciclo de conexión
    // ------------------------------------------------------------------

    /// Reconexión silenciosa al cargar la página (`eth_accounts`, sin popup)
    pub async fn initialize(&self) -> Result<(), WalletError> {
        let Some(provider) = self.provider.as_ref() else {
            return Ok(());
        };

        let accounts = provider.accounts().await.map_err(|e| {
            log::warn!("⚠️ [WALLET] eth_accounts falló al cargar: {}", e);
            e
        })?;
        if accounts.is_empty() {
            log::info!("👛 [WALLET] Wallet presente pero sin cuentas autorizadas");
            return Ok(());
        }
        self.on_accounts_changed(&accounts).await
    }

    pub async fn connect(&self) -> Result<(), WalletError> {
        log::info!("🔌 [WALLET] Conectando wallet...");
        if let Err(e) = self.begin(WalletAction::Connect, None) {
            return Err(self.fail("Failed to connect wallet", e));
        }

        let result = self.connect_inner().await;
        self.end(WalletAction::Connect);

        match result {
            Ok(()) => {
                // La aprobación se lee después de soltar el flag de Connect
                self.refresh_approval_state().await?;
                Ok(())
            }
            Err(e) => Err(self.fail("Failed to connect wallet", e)),
        }
    }

    async fn connect_inner(&self) -> Result<(), WalletError> {
        let provider = self.provider.as_ref().ok_or(WalletError::ProviderMissing)?;

        let accounts = provider.request_accounts().await?;
        let account = *accounts.first().ok_or(WalletError::NoAccounts)?;
        log::info!("👛 [WALLET] Cuentas conectadas: {:?}", accounts);

        let current_chain = provider.chain_id().await?;
        if current_chain != self.chain.chain_id {
            log::info!(
                "⛓️ [WALLET] Chain actual {} != {}, cambiando red",
                current_chain, self.chain.chain_id
            );
            self.ensure_chain(provider).await?;
        }

        self.state
            .update(|s| *s = s.with_account(account, self.chain.chain_id));
        log::info!("✅ [WALLET] Conectado: {}", account);
        Ok(())
    }

    /// `wallet_switchEthereumChain`; si la red no existe en el wallet (4902) se añade
    async fn ensure_chain(&self, provider: &P) -> Result<(), WalletError> {
        match provider.switch_chain(&self.chain).await {
            Ok(()) => Ok(()),
            Err(e) if e.provider_code() == Some(UNRECOGNIZED_CHAIN_CODE) => {
                log::info!("➕ [WALLET] Red {} desconocida para el wallet, añadiéndola", self.chain.chain_name);
                provider.add_chain(&self.chain).await.map_err(|add_error| {
                    log::error!("❌ [WALLET] wallet_addEthereumChain falló: {}", add_error);
                    WalletError::AddChainFailed { chain_name: self.chain.chain_name.clone() }
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Local: sin llamadas de red
    pub fn disconnect(&self) {
        log::info!("👋 [WALLET] Desconectando");
        self.state.update(|s| *s = s.disconnected());
    }

    /// Adoptar la primera cuenta de la lista (o desconectar si está vacía).
    /// La cuenta se adopta aunque falle la lectura de `eth_chainId`: el wallet
    /// ya firma con ella.
    pub async fn on_accounts_changed(&self, accounts: &[Address]) -> Result<(), WalletError> {
        let Some(account) = accounts.first().copied() else {
            self.disconnect();
            return Ok(());
        };

        let chain_id = match self.provider.as_ref() {
            Some(provider) => provider.chain_id().await,
            None => Err(WalletError::ProviderMissing),
        };
        let chain_id = chain_id.unwrap_or_else(|e| {
            let fallback = self
                .state
                .with(|s| s.session.as_ref().map(|session| session.chain_id))
                .unwrap_or(self.chain.chain_id);
            log::warn!("⚠️ [WALLET] eth_chainId falló ({}), usando chain {}", e, fallback);
            fallback
        });

        self.state
            .update(|s| *s = s.on_accounts_changed(accounts, chain_id));
        log::info!("👛 [WALLET] Cuenta activa: {}", account);

        self.refresh_approval_state().await?;
        Ok(())
    }

    pub fn on_chain_changed(&self) -> EventOutcome {
        log::warn!("⛓️ [WALLET] Chain cambiada, invalidando sesión");
        self.state.update(|s| *s = s.on_chain_changed());
        EventOutcome::Reload
    }

    /// Punto de entrada del stream de eventos del wallet
    pub async fn handle_event(&self, event: WalletEvent) -> EventOutcome {
        match event {
            WalletEvent::AccountsChanged(accounts) => {
                if let Err(e) = self.on_accounts_changed(&accounts).await {
                    log::warn!("⚠️ [WALLET] accountsChanged no aplicado por completo: {}", e);
                }
                EventOutcome::Continue
            }
            WalletEvent::ChainChanged(_) => self.on_chain_changed(),
        }
    }

    // ------------------------------------------------------------------
    // Aprobación
    // ------------------------------------------------------------------

    pub async fn refresh_approval_state(&self) -> Result<ApprovalState, WalletError> {
        let result = async {
            let contracts = self.contracts()?;
            let provider = self.provider.as_ref().ok_or(WalletError::ProviderMissing)?;
            let account = self.state.with(|s| s.account()).ok_or(WalletError::NotConnected)?;

            let approved = contracts.is_approved_for_all(provider, account).await?;
            Ok((account, ApprovalState::from_flag(approved)))
        }
        .await;

        match result {
            Ok((account, approval)) => {
                self.state.update(|s| {
                    // La cuenta pudo cambiar mientras esperábamos
                    if s.account() == Some(account) {
                        s.approval = approval;
                    }
                });
                log::info!("🔐 [WALLET] Aprobación del contrato: {:?}", approval);
                Ok(approval)
            }
            Err(e) => {
                self.state.update(|s| s.approval = ApprovalState::Unknown);
                Err(self.fail("Failed to check approval status", e))
            }
        }
    }

    /// `setApprovalForAll(permissionContract, true)` y relectura de la aprobación
    pub async fn approve_all(&self) -> Result<B256, WalletError> {
        const FAILURE: &str = "Failed to approve NFTs";

        let prepared = self.context(false).and_then(|ctx| {
            self.begin(WalletAction::Approve, Some("Preparing approval transaction..."))?;
            Ok(ctx)
        });
        let ctx = match prepared {
            Ok(ctx) => ctx,
            Err(e) => return Err(self.fail(FAILURE, e)),
        };

        let result = ctx.contracts.approve_all(ctx.provider, ctx.account).await;
        let hash = self.complete(WalletAction::Approve, result, "NFTs approved successfully!", FAILURE)?;

        // Exactamente una relectura antes de volver
        if let Err(e) = self.refresh_approval_state().await {
            log::warn!("⚠️ [WALLET] Aprobación enviada pero relectura falló: {}", e);
        }
        Ok(hash)
    }

    // ------------------------------------------------------------------
    // Delegación
    // ------------------------------------------------------------------

    pub async fn delegate(&self, operator: &str, token_ids: &str) -> Result<B256, WalletError> {
        const FAILURE: &str = "Failed to delegate NFTs";

        let prepared = self.prepare_delegation(
            operator,
            token_ids,
            WalletAction::Delegate,
            "Preparing delegation transaction...",
        );
        let (request, ctx) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.fail(FAILURE, e)),
        };

        log::info!(
            "📤 [WALLET] delegate operator={} tokens={:?}",
            request.operator, request.token_ids
        );
        let result = ctx.contracts.delegate(ctx.provider, ctx.account, &request).await;
        self.complete(WalletAction::Delegate, result, "NFTs delegated successfully!", FAILURE)
    }

    pub async fn undelegate(&self, operator: &str, token_ids: &str) -> Result<B256, WalletError> {
        const FAILURE: &str = "Failed to undelegate NFTs";

        let prepared = self.prepare_delegation(
            operator,
            token_ids,
            WalletAction::Undelegate,
            "Preparing undelegate transaction...",
        );
        let (request, ctx) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.fail(FAILURE, e)),
        };

        // Este frontend solo inicia undelegates del lado del usuario
        let initiator = UndelegationInitiator::User;
        log::info!(
            "📥 [WALLET] undelegate operator={} tokens={:?} by_operator={} from={}",
            request.operator, request.token_ids, initiator.by_operator(), ctx.account
        );
        let result = ctx
            .contracts
            .undelegate(ctx.provider, ctx.account, &request, initiator)
            .await;
        self.complete(WalletAction::Undelegate, result, "NFTs undelegated successfully!", FAILURE)
    }

    /// Validación completa antes de tocar la red: operador, token ids,
    /// contratos, sesión y aprobación (en ese orden)
    fn prepare_delegation(
        &self,
        operator: &str,
        token_ids: &str,
        action: WalletAction,
        pending: &str,
    ) -> Result<(DelegationRequest, ActionContext<'_, P>), WalletError> {
        let request = DelegationRequest::from_form(operator, token_ids)?;
        let ctx = self.context(true)?;
        self.begin(action, Some(pending))?;
        Ok((request, ctx))
    }

    pub async fn check_delegation(&self, operator: &str) -> Result<DelegationInfo, WalletError> {
        const FAILURE: &str = "Failed to check delegation";

        let prepared = parse_address(operator).and_then(|operator| {
            let ctx = self.context(false)?;
            self.begin(WalletAction::CheckDelegation, None)?;
            Ok((operator, ctx))
        });
        let (operator, ctx) = match prepared {
            Ok(prepared) => prepared,
            Err(e) => return Err(self.fail(FAILURE, e)),
        };

        let result = ctx.contracts.delegator_info(ctx.provider, ctx.account, operator).await;
        self.end(WalletAction::CheckDelegation);

        match result {
            Ok(token_ids) => {
                let info = DelegationInfo { operator, token_ids };
                log::info!("🔎 [WALLET] {} token(s) delegados a {}", info.token_ids.len(), operator);
                self.state.update(|s| s.delegation = Some(info.clone()));
                Ok(info)
            }
            Err(e) => Err(self.fail(FAILURE, e)),
        }
    }

    // ------------------------------------------------------------------
    // Helpers internos
    // ------------------------------------------------------------------

    pub fn contracts(&self) -> Result<&ContractBindings, WalletError> {
        self.contracts.as_ref().map_err(|e| e.clone())
    }

    fn context(&self, require_approval: bool) -> Result<ActionContext<'_, P>, WalletError> {
        let contracts = self.contracts()?;
        let provider = self.provider.as_ref().ok_or(WalletError::ProviderMissing)?;
        let (account, approval) = self.state.with(|s| (s.account(), s.approval));
        let account = account.ok_or(WalletError::NotConnected)?;
        if require_approval && !approval.is_approved() {
            return Err(WalletError::NotApproved);
        }
        Ok(ActionContext { provider, contracts, account })
    }

    /// Marcar acción en vuelo; rechaza si ya hay otra
    fn begin(&self, action: WalletAction, pending: Option<&str>) -> Result<(), WalletError> {
        if let Some(current) = self.state.with(|s| s.in_flight) {
            log::warn!("⏳ [WALLET] {:?} rechazada: {:?} sigue pendiente", action, current);
            return Err(WalletError::Busy);
        }
        self.state.update(|s| {
            s.in_flight = Some(action);
            if let Some(message) = pending {
                s.outcome = Some(TransactionOutcome::pending(message));
            }
        });
        Ok(())
    }

    fn end(&self, action: WalletAction) {
        self.state.update(|s| {
            if s.in_flight == Some(action) {
                s.in_flight = None;
            }
        });
    }

    fn complete(
        &self,
        action: WalletAction,
        result: Result<B256, WalletError>,
        success: &str,
        failure: &str,
    ) -> Result<B256, WalletError> {
        self.end(action);
        match result {
            Ok(hash) => {
                log::info!("✅ [WALLET] {} ({})", success, hash);
                self.state
                    .update(|s| s.outcome = Some(TransactionOutcome::success(success, Some(hash))));
                Ok(hash)
            }
            Err(e) => Err(self.fail(failure, e)),
        }
    }

    /// Registrar error como outcome visible. `Busy` solo se loguea para no
    /// tapar el estado de la acción que sigue en vuelo.
    fn fail(&self, prefix: &str, error: WalletError) -> WalletError {
        if error.is_validation() {
            log::warn!("⚠️ [WALLET] {}: {}", prefix, error);
        } else {
            log::error!("❌ [WALLET] {}: {}", prefix, error);
        }
        if error != WalletError::Busy {
            let message = match &error {
                WalletError::ProviderMissing => error.to_string(),
                _ => format!("{}: {}", prefix, error),
            };
            self.state.update(|s| s.outcome = Some(TransactionOutcome::error(message)));
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use alloy_primitives::U256;
    use futures::executor::block_on;
    use serde_json::{json, Value};

    use super::*;
    use crate::models::TxStatus;
    use crate::services::provider::mock::MockProvider;

    const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";
    const OPERATOR: &str = "0x00000000000000000000000000000000000000bb";

    fn tx_hash() -> String {
        format!("0x{}", "22".repeat(32))
    }

    fn abi_bool(value: bool) -> Value {
        json!(format!("0x{:064x}", value as u8))
    }

    fn abi_uint_array(values: &[u64]) -> Value {
        let mut hex = format!("{:064x}{:064x}", 32, values.len());
        for v in values {
            hex.push_str(&format!("{:064x}", v));
        }
        json!(format!("0x{}", hex))
    }

    /// Wallet ya en la chain correcta y contrato aprobado según `approved`
    fn wallet(approved: Rc<Cell<bool>>) -> Rc<MockProvider> {
        Rc::new(MockProvider::new(move |method, _| match method {
            "eth_requestAccounts" | "eth_accounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0xa4b1")),
            "eth_call" => Ok(abi_bool(approved.get())),
            "eth_sendTransaction" => Ok(json!(tx_hash())),
            "eth_getTransactionReceipt" => Ok(json!({ "transactionHash": tx_hash(), "status": "0x1" })),
            other => panic!("unexpected {other}"),
        }))
    }

    fn viewmodel(provider: &Rc<MockProvider>) -> WalletViewModel<Rc<MockProvider>> {
        WalletViewModel::new(Some(provider.clone()), &AppConfig::default())
    }

    fn connected(approved: bool) -> (Rc<MockProvider>, WalletViewModel<Rc<MockProvider>>) {
        let provider = wallet(Rc::new(Cell::new(approved)));
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();
        (provider, vm)
    }

    fn outcome(vm: &WalletViewModel<Rc<MockProvider>>) -> TransactionOutcome {
        vm.snapshot().outcome.expect("outcome recorded")
    }

    #[test]
    fn connect_adopts_first_account_and_reads_approval() {
        let (provider, vm) = connected(true);
        let state = vm.snapshot();

        assert_eq!(state.account(), Some(parse_address(ACCOUNT).unwrap()));
        assert_eq!(state.approval, ApprovalState::Approved);
        assert_eq!(state.in_flight, None);
        assert_eq!(provider.count("wallet_switchEthereumChain"), 0);
        assert_eq!(provider.count("eth_call"), 1);
    }

    #[test]
    fn connect_without_provider_records_setup_error() {
        let vm: WalletViewModel<Rc<MockProvider>> = WalletViewModel::new(None, &AppConfig::default());
        assert_eq!(block_on(vm.connect()), Err(WalletError::ProviderMissing));

        let outcome = outcome(&vm);
        assert_eq!(outcome.status, TxStatus::Error);
        assert_eq!(outcome.message, "Please install MetaMask or another Ethereum wallet.");
        assert!(!vm.snapshot().is_connected());
    }

    #[test]
    fn connect_switches_to_the_configured_chain() {
        let provider = Rc::new(MockProvider::new(|method, _| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0x1")),
            "wallet_switchEthereumChain" => Ok(Value::Null),
            "eth_call" => Ok(abi_bool(false)),
            other => panic!("unexpected {other}"),
        }));
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();

        assert_eq!(provider.count("wallet_switchEthereumChain"), 1);
        assert_eq!(provider.count("wallet_addEthereumChain"), 0);
        assert_eq!(vm.snapshot().session.unwrap().chain_id, 42161);
    }

    #[test]
    fn unknown_chain_is_added_to_the_wallet() {
        let provider = Rc::new(MockProvider::new(|method, _| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0x1")),
            "wallet_switchEthereumChain" => Err(WalletError::Provider {
                code: Some(4902),
                message: "Unrecognized chain ID".into(),
            }),
            "wallet_addEthereumChain" => Ok(Value::Null),
            "eth_call" => Ok(abi_bool(true)),
            other => panic!("unexpected {other}"),
        }));
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();

        let added = provider.params_of("wallet_addEthereumChain");
        assert_eq!(added.len(), 1);
        assert_eq!(added[0][0]["chainId"], "0xa4b1");
        assert_eq!(added[0][0]["chainName"], "Arbitrum One");
        assert!(vm.snapshot().is_connected());
    }

    #[test]
    fn failed_chain_add_keeps_prior_session_state() {
        let provider = Rc::new(MockProvider::new(|method, _| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0x1")),
            "wallet_switchEthereumChain" => Err(WalletError::Provider { code: Some(4902), message: "x".into() }),
            "wallet_addEthereumChain" => Err(WalletError::Provider { code: Some(4001), message: "rejected".into() }),
            other => panic!("unexpected {other}"),
        }));
        let vm = viewmodel(&provider);
        let err = block_on(vm.connect()).unwrap_err();

        assert_eq!(err, WalletError::AddChainFailed { chain_name: "Arbitrum One".into() });
        assert!(!vm.snapshot().is_connected());
        assert_eq!(vm.snapshot().in_flight, None);
        assert_eq!(
            outcome(&vm).message,
            "Failed to connect wallet: Failed to add Arbitrum One network to wallet"
        );
    }

    #[test]
    fn user_rejection_is_surfaced_not_thrown() {
        let provider = Rc::new(MockProvider::new(|_, _| {
            Err(WalletError::Provider { code: Some(4001), message: "User rejected the request.".into() })
        }));
        let vm = viewmodel(&provider);
        assert!(block_on(vm.connect()).is_err());
        assert_eq!(outcome(&vm).message, "Failed to connect wallet: User rejected the request.");
    }

    #[test]
    fn malformed_operator_never_reaches_the_provider() {
        let (provider, vm) = connected(true);
        let before = provider.methods().len();

        for operator in ["0x123", "not-an-address"] {
            let err = block_on(vm.delegate(operator, "1,2")).unwrap_err();
            assert!(matches!(err, WalletError::InvalidAddress(_)));
            assert_eq!(outcome(&vm).message, "Failed to delegate NFTs: Invalid operator address");
        }
        assert_eq!(provider.methods().len(), before);
    }

    #[test]
    fn invalid_token_list_is_rejected_before_any_call() {
        let (provider, vm) = connected(true);
        let err = block_on(vm.undelegate(OPERATOR, "1,-2")).unwrap_err();

        assert_eq!(err, WalletError::InvalidTokenId("-2".into()));
        assert_eq!(provider.count("eth_sendTransaction"), 0);
        assert_eq!(outcome(&vm).message, "Failed to undelegate NFTs: Invalid token ID: -2");
    }

    #[test]
    fn delegate_is_refused_until_approved() {
        let (provider, vm) = connected(false);
        assert_eq!(block_on(vm.delegate(OPERATOR, "1")), Err(WalletError::NotApproved));
        assert_eq!(block_on(vm.undelegate(OPERATOR, "1")), Err(WalletError::NotApproved));
        assert_eq!(provider.count("eth_sendTransaction"), 0);
    }

    #[test]
    fn delegate_requires_a_session() {
        let provider = wallet(Rc::new(Cell::new(true)));
        let vm = viewmodel(&provider);
        assert_eq!(block_on(vm.delegate(OPERATOR, "1")), Err(WalletError::NotConnected));
        assert!(provider.methods().is_empty());
    }

    #[test]
    fn missing_contract_address_is_a_configuration_error() {
        let provider = wallet(Rc::new(Cell::new(true)));
        let config = AppConfig { permission_contract_address: String::new(), ..AppConfig::default() };
        let vm = WalletViewModel::new(Some(provider.clone()), &config);

        let err = block_on(vm.delegate(OPERATOR, "1")).unwrap_err();
        assert!(matches!(err, WalletError::NotInitialized(_)));
        assert_eq!(
            outcome(&vm).message,
            "Failed to delegate NFTs: Contract not initialized. Please add contract address."
        );
    }

    #[test]
    fn delegate_records_transaction_hash() {
        let (provider, vm) = connected(true);
        let hash = block_on(vm.delegate(OPERATOR, "3, 1,3")).unwrap();

        assert_eq!(format!("{:#x}", hash), tx_hash());
        let outcome = outcome(&vm);
        assert_eq!(outcome.status, TxStatus::Success);
        assert_eq!(outcome.message, "NFTs delegated successfully!");
        assert_eq!(outcome.tx_hash, Some(hash));
        assert_eq!(vm.snapshot().in_flight, None);

        let sent = provider.params_of("eth_sendTransaction");
        assert_eq!(sent[0][0]["from"].as_str().unwrap().to_lowercase(), ACCOUNT);
    }

    #[test]
    fn second_action_while_pending_is_refused() {
        let (provider, vm) = connected(true);
        vm.state().update(|s| {
            s.in_flight = Some(WalletAction::Delegate);
            s.outcome = Some(TransactionOutcome::pending("Preparing delegation transaction..."));
        });

        assert_eq!(block_on(vm.delegate(OPERATOR, "1")), Err(WalletError::Busy));
        assert_eq!(provider.count("eth_sendTransaction"), 0);
        // El outcome pendiente no se pisa
        assert_eq!(outcome(&vm).status, TxStatus::Pending);
        assert_eq!(vm.snapshot().in_flight, Some(WalletAction::Delegate));
    }

    #[test]
    fn approve_all_refreshes_approval_exactly_once() {
        let approved = Rc::new(Cell::new(false));
        let provider = wallet(approved.clone());
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();
        assert_eq!(vm.snapshot().approval, ApprovalState::NotApproved);
        let reads_before = provider.count("eth_call");

        approved.set(true);
        block_on(vm.approve_all()).unwrap();

        assert_eq!(provider.count("eth_call"), reads_before + 1);
        let state = vm.snapshot();
        assert_eq!(state.approval, ApprovalState::Approved);
        assert!(state.availability().can_delegate);
        assert_eq!(outcome(&vm).message, "NFTs approved successfully!");
    }

    #[test]
    fn failed_approval_does_not_refresh() {
        let provider = Rc::new(MockProvider::new(|method, _| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0xa4b1")),
            "eth_call" => Ok(abi_bool(false)),
            "eth_sendTransaction" => Err(WalletError::Provider { code: Some(4001), message: "denied".into() }),
            other => panic!("unexpected {other}"),
        }));
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();
        let reads_before = provider.count("eth_call");

        assert!(block_on(vm.approve_all()).is_err());
        assert_eq!(provider.count("eth_call"), reads_before);
        assert_eq!(outcome(&vm).message, "Failed to approve NFTs: denied");
    }

    /// Responde a `eth_call` según el selector: aprobación o listado de tokens
    fn listing(token_ids: &'static [u64]) -> Rc<MockProvider> {
        Rc::new(MockProvider::new(move |method, params| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0xa4b1")),
            "eth_call" => {
                let data = params[0]["data"].as_str().unwrap_or_default();
                if data.starts_with("0xe985e9c5") {
                    Ok(abi_bool(true))
                } else {
                    assert!(data.starts_with("0xeecefef8"));
                    Ok(abi_uint_array(token_ids))
                }
            }
            other => panic!("unexpected {other}"),
        }))
    }

    #[test]
    fn check_delegation_with_no_tokens() {
        let provider = listing(&[]);
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();

        let info = block_on(vm.check_delegation(OPERATOR)).unwrap();
        assert!(info.is_empty());
        assert_eq!(info.operator, parse_address(OPERATOR).unwrap());
        assert_eq!(vm.snapshot().delegation, Some(info));
        assert_eq!(provider.count("eth_sendTransaction"), 0);
    }

    #[test]
    fn check_delegation_preserves_order_and_duplicates() {
        let provider = listing(&[9, 2, 9]);
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();

        let info = block_on(vm.check_delegation(OPERATOR)).unwrap();
        assert_eq!(info.token_ids, vec![U256::from(9), U256::from(2), U256::from(9)]);
        assert_eq!(info.token_list(), "9, 2, 9");
    }

    #[test]
    fn check_delegation_validates_operator() {
        let provider = listing(&[]);
        let vm = viewmodel(&provider);
        block_on(vm.connect()).unwrap();
        let calls = provider.count("eth_call");

        assert!(block_on(vm.check_delegation("0x123")).is_err());
        assert_eq!(provider.count("eth_call"), calls);
        assert_eq!(outcome(&vm).message, "Failed to check delegation: Invalid operator address");
    }

    #[test]
    fn empty_accounts_event_disconnects_idempotently() {
        let (_provider, vm) = connected(true);

        let first = block_on(vm.handle_event(WalletEvent::AccountsChanged(vec![])));
        let after_first = vm.snapshot();
        let second = block_on(vm.handle_event(WalletEvent::AccountsChanged(vec![])));

        assert_eq!(first, EventOutcome::Continue);
        assert_eq!(second, EventOutcome::Continue);
        assert_eq!(after_first, vm.snapshot());
        let availability = after_first.availability();
        assert!(!availability.connected);
        assert!(!availability.can_delegate);
        assert!(!availability.can_undelegate);
        assert!(!availability.can_check);
    }

    #[test]
    fn account_switch_survives_chain_id_failure() {
        let provider = Rc::new(MockProvider::new(|method, _| match method {
            "eth_chainId" => Err(WalletError::Provider { code: Some(-32603), message: "internal".into() }),
            "eth_call" => Ok(abi_bool(true)),
            other => panic!("unexpected {other}"),
        }));
        let vm = viewmodel(&provider);
        let previous = parse_address(ACCOUNT).unwrap();
        vm.state().update(|s| *s = s.with_account(previous, 1));

        let next = parse_address(OPERATOR).unwrap();
        let outcome = block_on(vm.handle_event(WalletEvent::AccountsChanged(vec![next])));

        assert_eq!(outcome, EventOutcome::Continue);
        let state = vm.snapshot();
        assert_eq!(state.account(), Some(next));
        assert_eq!(state.session.unwrap().chain_id, 1);
        assert_eq!(state.approval, ApprovalState::Approved);
    }

    #[test]
    fn chain_change_requests_reload() {
        let (_provider, vm) = connected(true);
        let outcome = block_on(vm.handle_event(WalletEvent::ChainChanged(Some(1))));
        assert_eq!(outcome, EventOutcome::Reload);
        assert!(!vm.snapshot().is_connected());
    }

    #[test]
    fn initialize_restores_authorized_account() {
        let provider = wallet(Rc::new(Cell::new(true)));
        let vm = viewmodel(&provider);
        block_on(vm.initialize()).unwrap();

        assert!(vm.snapshot().is_connected());
        assert_eq!(provider.count("eth_requestAccounts"), 0);
        assert_eq!(vm.snapshot().approval, ApprovalState::Approved);
    }

    #[test]
    fn approval_read_failure_is_surfaced() {
        let provider = Rc::new(MockProvider::new(|method, _| match method {
            "eth_requestAccounts" => Ok(json!([ACCOUNT])),
            "eth_chainId" => Ok(json!("0xa4b1")),
            "eth_call" => Err(WalletError::Provider { code: Some(-32000), message: "execution reverted".into() }),
            other => panic!("unexpected {other}"),
        }));
        let vm = viewmodel(&provider);
        assert!(block_on(vm.connect()).is_err());

        let state = vm.snapshot();
        assert!(state.is_connected());
        assert_eq!(state.approval, ApprovalState::Unknown);
        assert_eq!(outcome(&vm).message, "Failed to check approval status: execution reverted");
    }
}
