// ============================================================================
// TRANSACTION STATUS VIEW - Mensaje de la última acción + hash
// ============================================================================

use alloy_primitives::B256;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::AppState;
use crate::utils::copy_to_clipboard;

/// `https://arbiscan.io/tx/0x...`
pub fn explorer_tx_url(explorer: &str, hash: &B256) -> String {
    format!("{}/tx/{:#x}", explorer.trim_end_matches('/'), hash)
}

fn render_tx_hash(hash: &B256) -> Result<Element, JsValue> {
    let hash_text = format!("{:#x}", hash);

    // Click en el hash = copiar
    let copy_link = ElementBuilder::new("a")?
        .attr("href", "#")?
        .class("tx-hash-link")
        .text(&hash_text)
        .build();
    on_click(&copy_link, move |e| {
        e.prevent_default();
        spawn_local(copy_to_clipboard(hash_text.clone()));
    })?;

    let explorer_link = ElementBuilder::new("a")?
        .attr("href", &explorer_tx_url(&CONFIG.chain.block_explorer_url, hash))?
        .attr("target", "_blank")?
        .attr("rel", "noopener noreferrer")?
        .class("explorer-link")
        .text("View on explorer")
        .build();

    let container = ElementBuilder::new("div")?.id("txHash")?.build();
    append_child(&container, &ElementBuilder::new("span")?.text("Transaction Hash: ").build())?;
    append_child(&container, &copy_link)?;
    append_child(&container, &explorer_link)?;
    Ok(container)
}

/// Retorna None si todavía no hubo ninguna acción
pub fn render_transaction_status(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(outcome) = state.wallet.snapshot().outcome else {
        return Ok(None);
    };

    let message = ElementBuilder::new("p")?
        .id("statusMessage")?
        .class(&format!("status-message {}", outcome.status.css_class()))
        .text(&outcome.message)
        .build();

    let status = ElementBuilder::new("div")?
        .id("transactionStatus")?
        .class("card transaction-status")
        .child(message)?
        .build();

    if let Some(hash) = outcome.tx_hash {
        append_child(&status, &render_tx_hash(&hash)?)?;
    }

    Ok(Some(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_url_ignores_trailing_slash() {
        let hash = B256::repeat_byte(0xab);
        let expected = format!("https://arbiscan.io/tx/0x{}", "ab".repeat(32));
        assert_eq!(explorer_tx_url("https://arbiscan.io/", &hash), expected);
        assert_eq!(explorer_tx_url("https://arbiscan.io", &hash), expected);
    }
}
