// ============================================================================
// WALLET STATE - Contexto de sesión explícito + transiciones puras
// ============================================================================
// estado anterior + evento -> estado nuevo. Sin provider, sin DOM.
// ============================================================================

use alloy_primitives::Address;

use crate::models::{ApprovalState, DelegationInfo, TransactionOutcome, WalletSession};

/// Acción de usuario que puede estar en vuelo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalletAction {
    Connect,
    Approve,
    Delegate,
    Undelegate,
    CheckDelegation,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalletState {
    pub session: Option<WalletSession>,
    pub approval: ApprovalState,
    pub in_flight: Option<WalletAction>,
    pub outcome: Option<TransactionOutcome>,
    pub delegation: Option<DelegationInfo>,
}

/// Qué botones están habilitados / visibles
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionAvailability {
    pub connected: bool,
    pub can_connect: bool,
    pub can_delegate: bool,
    pub can_undelegate: bool,
    pub can_check: bool,
    pub show_approval: bool,
    pub can_approve: bool,
    pub pending: Option<WalletAction>,
}

impl WalletState {
    /// Sesión limpia. Una acción en vuelo sigue marcada hasta que termine.
    pub fn disconnected(&self) -> Self {
        Self {
            in_flight: self.in_flight,
            ..Self::default()
        }
    }

    /// Adoptar cuenta. Misma cuenta conserva la aprobación conocida;
    /// cuenta distinta vuelve a `Unknown` y descarta la info de delegación.
    pub fn with_account(&self, account: Address, chain_id: u64) -> Self {
        let same_account = self.account() == Some(account);
        Self {
            session: Some(WalletSession { account, chain_id }),
            approval: if same_account { self.approval } else { ApprovalState::Unknown },
            delegation: if same_account { self.delegation.clone() } else { None },
            in_flight: self.in_flight,
            outcome: self.outcome.clone(),
        }
    }

    /// `accountsChanged`: lista vacía = desconexión, si no la primera cuenta
    pub fn on_accounts_changed(&self, accounts: &[Address], chain_id: u64) -> Self {
        match accounts.first() {
            None => self.disconnected(),
            Some(account) => self.with_account(*account, chain_id),
        }
    }

    /// `chainChanged`: los bindings dependen de la chain, se invalida todo
    pub fn on_chain_changed(&self) -> Self {
        Self {
            outcome: self.outcome.clone(),
            ..self.disconnected()
        }
    }

    pub fn account(&self) -> Option<Address> {
        self.session.as_ref().map(|s| s.account)
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    pub fn availability(&self) -> ActionAvailability {
        let connected = self.is_connected();
        let idle = self.in_flight.is_none();
        let approved = self.approval.is_approved();

        ActionAvailability {
            connected,
            can_connect: idle,
            can_delegate: connected && approved && idle,
            can_undelegate: connected && approved && idle,
            can_check: connected && idle,
            show_approval: connected && self.approval == ApprovalState::NotApproved,
            can_approve: connected && idle,
            pending: self.in_flight,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy_primitives::U256;

    use super::*;
    use crate::models::TxStatus;

    fn alice() -> Address {
        Address::from_str("0x00000000000000000000000000000000000000a1").unwrap()
    }

    fn bob() -> Address {
        Address::from_str("0x00000000000000000000000000000000000000b0").unwrap()
    }

    fn approved_session() -> WalletState {
        WalletState {
            approval: ApprovalState::Approved,
            ..WalletState::default().with_account(alice(), 42161)
        }
    }

    #[test]
    fn no_session_disables_every_action() {
        let availability = WalletState::default().availability();
        assert!(!availability.connected);
        assert!(!availability.can_delegate);
        assert!(!availability.can_undelegate);
        assert!(!availability.can_check);
        assert!(!availability.can_approve);
        assert!(availability.can_connect);
    }

    #[test]
    fn approval_gates_delegate_and_undelegate() {
        let mut state = WalletState::default().with_account(alice(), 42161);

        // Unknown cuenta como no aprobado
        assert!(!state.availability().can_delegate);
        assert!(!state.availability().show_approval);

        state.approval = ApprovalState::NotApproved;
        let availability = state.availability();
        assert!(!availability.can_delegate);
        assert!(!availability.can_undelegate);
        assert!(availability.can_check);
        assert!(availability.show_approval);

        state.approval = ApprovalState::Approved;
        let availability = state.availability();
        assert!(availability.can_delegate);
        assert!(availability.can_undelegate);
        assert!(!availability.show_approval);
    }

    #[test]
    fn in_flight_action_disables_all_triggers() {
        let state = WalletState {
            in_flight: Some(WalletAction::Delegate),
            ..approved_session()
        };
        let availability = state.availability();
        assert!(!availability.can_delegate);
        assert!(!availability.can_undelegate);
        assert!(!availability.can_check);
        assert!(!availability.can_approve);
        assert!(!availability.can_connect);
        assert_eq!(availability.pending, Some(WalletAction::Delegate));
    }

    #[test]
    fn empty_accounts_clears_session_idempotently() {
        let state = WalletState {
            outcome: Some(TransactionOutcome::success("done", None)),
            ..approved_session()
        };
        let once = state.on_accounts_changed(&[], 0);
        let twice = once.on_accounts_changed(&[], 0);

        assert_eq!(once.session, None);
        assert_eq!(once.approval, ApprovalState::Unknown);
        assert_eq!(once.outcome, None);
        assert_eq!(once, twice);
        assert!(!twice.availability().can_check);
    }

    #[test]
    fn same_account_notification_keeps_approval() {
        let state = approved_session();
        let next = state.on_accounts_changed(&[alice(), bob()], 42161);
        assert_eq!(next, state);
    }

    #[test]
    fn new_account_resets_approval_and_delegation_info() {
        let state = WalletState {
            delegation: Some(DelegationInfo { operator: bob(), token_ids: vec![U256::from(1)] }),
            ..approved_session()
        };
        let next = state.on_accounts_changed(&[bob()], 42161);
        assert_eq!(next.account(), Some(bob()));
        assert_eq!(next.approval, ApprovalState::Unknown);
        assert_eq!(next.delegation, None);
    }

    #[test]
    fn chain_change_invalidates_session_but_keeps_last_outcome() {
        let state = WalletState {
            outcome: Some(TransactionOutcome::error("boom")),
            ..approved_session()
        };
        let next = state.on_chain_changed();
        assert_eq!(next.session, None);
        assert_eq!(next.approval, ApprovalState::Unknown);
        assert_eq!(next.outcome.map(|o| o.status), Some(TxStatus::Error));
    }
}
