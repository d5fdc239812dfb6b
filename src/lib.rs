// ============================================================================
// NFT DELEGATION APP - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: SOLO comunicación con el wallet y los contratos
// - State: State Management con Rc<RefCell>
// - Models: Tipos del dominio y errores
// ============================================================================

mod app;
mod config;
mod dom;
mod models;
mod services;
mod state;
mod utils;
mod viewmodels;
mod views;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::app::App;
use crate::config::CONFIG;

// Variable estática global para mantener la instancia de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Inicializar panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Inicializar logging
    let level = if CONFIG.is_logging_enabled() { log::Level::Debug } else { log::Level::Warn };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🚀 NFT Delegation App - Rust + MVVM");
    log::info!(
        "⚙️ [APP] Chain {} ({}), contrato de permisos {}",
        CONFIG.chain.chain_name, CONFIG.chain.chain_id, CONFIG.permission_contract_address
    );

    // Crear y renderizar app
    let mut app = App::new()?;
    app.render()?;
    app.start();

    // Guardar app en variable global
    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        // Un render puede coincidir con otro en curso; se reintenta en el próximo cambio
        let Ok(mut app) = app_cell.try_borrow_mut() else {
            log::warn!("⚠️ [RERENDER] Render en curso, ignorando");
            return;
        };
        match app.as_mut() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        }
    });
}

/// Re-render llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}
