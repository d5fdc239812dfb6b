// ============================================================================
// BROWSER - alert, reload y portapapeles
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::dom::window;
use crate::utils::constants::HASH_COPIED_ALERT;

pub fn alert(message: &str) {
    if let Some(win) = window() {
        if let Err(e) = win.alert_with_message(message) {
            log::warn!("⚠️ [BROWSER] alert falló: {:?}", e);
        }
    }
}

/// Recargar la página (cambio de chain)
pub fn reload_page() {
    let Some(win) = window() else { return };
    if let Err(e) = win.location().reload() {
        log::error!("❌ [BROWSER] No se pudo recargar la página: {:?}", e);
    }
}

/// `navigator.clipboard.writeText(text)`
async fn write_clipboard(text: &str) -> Result<(), JsValue> {
    let navigator = window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
    if clipboard.is_undefined() {
        return Err(JsValue::from_str("Clipboard API not available"));
    }
    let write_text: js_sys::Function =
        js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))?.dyn_into()?;
    let promise: js_sys::Promise = write_text.call1(&clipboard, &JsValue::from_str(text))?.dyn_into()?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Copiar hash de transacción; los fallos solo se loguean
pub async fn copy_to_clipboard(text: String) {
    match write_clipboard(&text).await {
        Ok(()) => {
            log::info!("📋 [BROWSER] Copiado al portapapeles: {}", text);
            alert(HASH_COPIED_ALERT);
        }
        Err(e) => log::error!("❌ [BROWSER] Error copiando al portapapeles: {:?}", e),
    }
}
