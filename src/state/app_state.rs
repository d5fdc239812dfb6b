// ============================================================================
// APP STATE - Estado global de la aplicación
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::services::EthereumProvider;
use crate::viewmodels::WalletViewModel;

/// Estado global de la aplicación
#[derive(Clone)]
pub struct AppState {
    pub wallet: Rc<WalletViewModel<EthereumProvider>>,

    // Formulario de delegación. Escribir en los inputs NO re-renderiza;
    // los valores se reinyectan en cada render.
    pub operator_input: Rc<RefCell<String>>,
    pub token_ids_input: Rc<RefCell<String>>,
}

impl AppState {
    pub fn new(provider: Option<EthereumProvider>, config: &AppConfig) -> Self {
        Self {
            wallet: Rc::new(WalletViewModel::new(provider, config)),
            operator_input: Rc::new(RefCell::new(String::new())),
            token_ids_input: Rc::new(RefCell::new(String::new())),
        }
    }

    /// Suscribirse a cambios (solo el estado del wallet dispara renders)
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.wallet.state().subscribe(callback);
    }

    pub fn set_operator(&self, value: String) {
        *self.operator_input.borrow_mut() = value;
    }

    pub fn set_token_ids(&self, value: String) {
        *self.token_ids_input.borrow_mut() = value;
    }

    pub fn operator(&self) -> String {
        self.operator_input.borrow().clone()
    }

    pub fn token_ids(&self) -> String {
        self.token_ids_input.borrow().clone()
    }

    /// Al desconectar se vacía el formulario
    pub fn clear_form(&self) {
        self.operator_input.borrow_mut().clear();
        self.token_ids_input.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::state::WalletAction;

    #[test]
    fn form_values_are_shared_between_clones() {
        let state = AppState::new(None, &AppConfig::default());
        let other = state.clone();

        state.set_operator("0xabc".to_string());
        state.set_token_ids("1, 2".to_string());
        assert_eq!(other.operator(), "0xabc");
        assert_eq!(other.token_ids(), "1, 2");

        other.clear_form();
        assert!(state.operator().is_empty());
        assert!(state.token_ids().is_empty());
    }

    #[test]
    fn only_wallet_changes_notify_subscribers() {
        let state = AppState::new(None, &AppConfig::default());
        let renders = Rc::new(Cell::new(0));
        {
            let renders = renders.clone();
            state.subscribe_to_changes(move || renders.set(renders.get() + 1));
        }

        state.set_operator("0x1".to_string());
        assert_eq!(renders.get(), 0);

        state.wallet.state().update(|s| s.in_flight = Some(WalletAction::Connect));
        assert_eq!(renders.get(), 1);
    }
}
