// ============================================================================
// HEADER VIEW - Título + botón conectar / desconectar
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::models::delegation::short_address;
use crate::state::{AppState, WalletAction, WalletState};

pub fn connect_button_label(wallet: &WalletState) -> &'static str {
    if wallet.in_flight == Some(WalletAction::Connect) {
        "Connecting..."
    } else if wallet.is_connected() {
        "Disconnect"
    } else {
        "Connect Wallet"
    }
}

pub fn render_header(state: &AppState) -> Result<Element, JsValue> {
    let wallet = state.wallet.snapshot();
    let availability = wallet.availability();

    let header = ElementBuilder::new("header")?
        .class("header")
        .child(ElementBuilder::new("h1")?.text("NFT Delegation").build())?
        .build();

    let address_text = wallet.account().map(|a| short_address(&a)).unwrap_or_default();
    let address = ElementBuilder::new("span")?
        .id("walletAddress")?
        .class("wallet-address")
        .text(&address_text)
        .build();

    // Desconectar siempre está permitido; conectar solo sin acciones en vuelo
    let button = ElementBuilder::new("button")?
        .id("connectWallet")?
        .class("btn btn-primary")
        .text(connect_button_label(&wallet))
        .disabled(!availability.connected && !availability.can_connect)?
        .build();

    {
        let app = state.clone();
        on_click(&button, move |_| {
            if app.wallet.snapshot().is_connected() {
                app.clear_form();
                app.wallet.disconnect();
            } else {
                let wallet = app.wallet.clone();
                spawn_local(async move {
                    let _ = wallet.connect().await;
                });
            }
        })?;
    }

    let wallet_info = ElementBuilder::new("div")?
        .class("wallet-info")
        .child(address)?
        .child(button)?
        .build();
    append_child(&header, &wallet_info)?;

    Ok(header)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy_primitives::Address;

    use super::*;

    #[test]
    fn label_follows_session() {
        let mut wallet = WalletState::default();
        assert_eq!(connect_button_label(&wallet), "Connect Wallet");

        wallet.in_flight = Some(WalletAction::Connect);
        assert_eq!(connect_button_label(&wallet), "Connecting...");

        let account = Address::from_str("0x00000000000000000000000000000000000000a1").unwrap();
        let wallet = WalletState::default().with_account(account, 42161);
        assert_eq!(connect_button_label(&wallet), "Disconnect");
    }
}
