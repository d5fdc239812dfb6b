// ============================================================================
// APPROVAL CARD VIEW - setApprovalForAll cuando falta la aprobación
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{append_child, on_click, ElementBuilder};
use crate::state::{AppState, WalletAction};

/// Retorna None cuando no hace falta aprobar (o no hay sesión)
pub fn render_approval_card(state: &AppState) -> Result<Option<Element>, JsValue> {
    let wallet = state.wallet.snapshot();
    let availability = wallet.availability();
    if !availability.show_approval {
        return Ok(None);
    }

    let approving = wallet.in_flight == Some(WalletAction::Approve);
    let button = ElementBuilder::new("button")?
        .id("approveBtn")?
        .class("btn btn-warning")
        .text(if approving { "Approving..." } else { "Approve All NFTs" })
        .disabled(!availability.can_approve)?
        .build();

    {
        let wallet = state.wallet.clone();
        on_click(&button, move |_| {
            let wallet = wallet.clone();
            spawn_local(async move {
                let _ = wallet.approve_all().await;
            });
        })?;
    }

    let card = ElementBuilder::new("div")?
        .id("approvalCard")?
        .class("card approval-card")
        .child(ElementBuilder::new("h2")?.text("Approval Required").build())?
        .child(
            ElementBuilder::new("p")?
                .text("The delegation contract needs approval to manage your NFTs before you can delegate or undelegate.")
                .build(),
        )?
        .build();

    if let Ok(contracts) = state.wallet.contracts() {
        let details = ElementBuilder::new("p")?
            .class("contract-address")
            .text(&format!(
                "Operator: {} on collection {}",
                contracts.permission_contract(),
                contracts.nft_contract()
            ))
            .build();
        append_child(&card, &details)?;
    }
    append_child(&card, &button)?;

    Ok(Some(card))
}
