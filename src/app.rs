// ============================================================================
// APP - Aplicación principal
// ============================================================================

use futures::StreamExt;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, get_element_by_id, set_inner_html};
use crate::services::EthereumProvider;
use crate::state::AppState;
use crate::utils::{alert, reload_page, APP_ROOT_ID, MISSING_WALLET_ALERT};
use crate::viewmodels::EventOutcome;
use crate::views::render_app;

/// Aplicación principal
pub struct App {
    state: AppState,
    root: Element,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id(APP_ROOT_ID)
            .ok_or_else(|| JsValue::from_str("No #app element found"))?;

        let provider = EthereumProvider::detect();
        if provider.is_none() {
            alert(MISSING_WALLET_ALERT);
        }

        let state = AppState::new(provider, &CONFIG);

        // Suscribirse a cambios de estado para re-renderizar automáticamente
        state.subscribe_to_changes(move || {
            // Usar gloo_timers para batchear múltiples updates
            use gloo_timers::callback::Timeout;
            Timeout::new(0, move || {
                crate::rerender_app();
            })
            .forget();
        });

        Ok(Self { state, root })
    }

    /// Reconexión silenciosa + bucle de eventos del wallet
    pub fn start(&self) {
        let wallet = self.state.wallet.clone();
        let events = wallet.provider().and_then(EthereumProvider::subscribe);

        spawn_local(async move {
            let _ = wallet.initialize().await;

            let Some(mut events) = events else { return };
            while let Some(event) = events.next().await {
                if wallet.handle_event(event).await == EventOutcome::Reload {
                    log::info!("🔄 [APP] Recargando página");
                    reload_page();
                    break;
                }
            }
            log::warn!("⚠️ [APP] Stream de eventos del wallet cerrado");
        });
    }

    /// Renderizar aplicación
    pub fn render(&mut self) -> Result<(), JsValue> {
        log::debug!("🎬 [APP] App::render() llamado");

        // Limpiar contenido anterior
        set_inner_html(&self.root, "");

        let app_view = render_app(&self.state)?;
        append_child(&self.root, &app_view)?;
        Ok(())
    }
}
