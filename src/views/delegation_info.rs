// ============================================================================
// DELEGATION INFO VIEW - Resultado de getDelegatorInfo
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::models::delegation::short_address;
use crate::models::DelegationInfo;
use crate::state::AppState;

/// Línea de texto + clase CSS del párrafo
#[derive(Debug, PartialEq, Eq)]
pub struct SummaryLine {
    pub class: &'static str,
    pub text: String,
}

pub fn summary_lines(info: &DelegationInfo) -> Vec<SummaryLine> {
    if info.is_empty() {
        return vec![SummaryLine {
            class: "empty",
            text: format!("No tokens delegated to {}", info.operator),
        }];
    }

    vec![
        SummaryLine {
            class: "token-heading",
            text: format!("Delegated Tokens to {}:", short_address(&info.operator)),
        },
        SummaryLine {
            class: "token-list",
            text: format!("Token IDs: {}", info.token_list()),
        },
        SummaryLine {
            class: "token-count",
            text: format!("Total: {} token(s)", info.token_ids.len()),
        },
    ]
}

/// Retorna None hasta la primera consulta
pub fn render_delegation_info(state: &AppState) -> Result<Option<Element>, JsValue> {
    let Some(info) = state.wallet.snapshot().delegation else {
        return Ok(None);
    };

    let status = ElementBuilder::new("div")?.id("delegationStatus")?.build();
    for line in summary_lines(&info) {
        let paragraph = ElementBuilder::new("p")?
            .class(line.class)
            .text(&line.text)
            .build();
        append_child(&status, &paragraph)?;
    }

    let card = ElementBuilder::new("div")?
        .id("delegationInfo")?
        .class("card delegation-info")
        .child(ElementBuilder::new("h2")?.text("Delegation Info").build())?
        .child(status)?
        .build();

    Ok(Some(card))
}
