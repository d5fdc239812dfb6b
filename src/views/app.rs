// ============================================================================
// APP VIEW - COMPONENTE PRINCIPAL
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom::{append_child, ElementBuilder};
use crate::state::AppState;
use crate::views::{
    render_approval_card, render_delegation_form, render_delegation_info, render_header,
    render_transaction_status,
};

/// Renderizar aplicación completa
pub fn render_app(state: &AppState) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("container")
        .child(render_header(state)?)?
        .build();

    let main = ElementBuilder::new("main")?.class("main-content").build();

    if let Some(card) = render_approval_card(state)? {
        append_child(&main, &card)?;
    }
    append_child(&main, &render_delegation_form(state)?)?;
    if let Some(status) = render_transaction_status(state)? {
        append_child(&main, &status)?;
    }
    if let Some(info) = render_delegation_info(state)? {
        append_child(&main, &info)?;
    }

    append_child(&container, &main)?;
    Ok(container)
}
