// ============================================================================
// DELEGATION FORM VIEW - Operador + token ids + acciones
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::dom::{input_value, on_click, on_input, ElementBuilder};
use crate::state::{AppState, WalletAction, WalletState};
use crate::utils::APPROVAL_REQUIRED_TOOLTIP;

/// Tooltip de delegate / undelegate
pub fn action_tooltip(wallet: &WalletState) -> Option<&'static str> {
    let availability = wallet.availability();
    if availability.connected && !wallet.approval.is_approved() {
        Some(APPROVAL_REQUIRED_TOOLTIP)
    } else {
        None
    }
}

fn render_input(
    id: &str,
    label: &str,
    placeholder: &str,
    value: &str,
    on_change: impl Fn(String) + 'static,
) -> Result<Element, JsValue> {
    let input = ElementBuilder::new("input")?
        .id(id)?
        .attr("type", "text")?
        .attr("placeholder", placeholder)?
        .attr("value", value)?
        .build();
    on_input(&input, move |e| {
        if let Some(value) = input_value(&e) {
            on_change(value);
        }
    })?;

    ElementBuilder::new("div")?
        .class("form-group")
        .child(ElementBuilder::new("label")?.attr("for", id)?.text(label).build())?
        .child(input)
        .map(ElementBuilder::build)
}

fn render_action_button(
    id: &str,
    label: &str,
    pending_label: &str,
    pending: bool,
    enabled: bool,
    tooltip: Option<&str>,
) -> Result<Element, JsValue> {
    let mut builder = ElementBuilder::new("button")?
        .id(id)?
        .class("btn")
        .text(if pending { pending_label } else { label })
        .disabled(!enabled)?;
    if let Some(tooltip) = tooltip {
        builder = builder.attr("title", tooltip)?;
    }
    Ok(builder.build())
}

pub fn render_delegation_form(state: &AppState) -> Result<Element, JsValue> {
    let wallet = state.wallet.snapshot();
    let availability = wallet.availability();
    let tooltip = action_tooltip(&wallet);

    let operator_group = {
        let app = state.clone();
        render_input(
            "operatorAddress",
            "Operator Address",
            "0x...",
            &state.operator(),
            move |value| app.set_operator(value),
        )?
    };
    let token_group = {
        let app = state.clone();
        render_input(
            "tokenIds",
            "Token IDs (comma separated)",
            "1, 2, 3",
            &state.token_ids(),
            move |value| app.set_token_ids(value),
        )?
    };

    let pending = availability.pending;
    let delegate_btn = render_action_button(
        "delegateBtn",
        "Delegate",
        "Delegating...",
        pending == Some(WalletAction::Delegate),
        availability.can_delegate,
        tooltip,
    )?;
    let undelegate_btn = render_action_button(
        "undelegateBtn",
        "Undelegate",
        "Undelegating...",
        pending == Some(WalletAction::Undelegate),
        availability.can_undelegate,
        tooltip,
    )?;
    let check_btn = render_action_button(
        "checkDelegationBtn",
        "Check Delegation",
        "Checking...",
        pending == Some(WalletAction::CheckDelegation),
        availability.can_check,
        None,
    )?;

    {
        let app = state.clone();
        on_click(&delegate_btn, move |_| {
            let (wallet, operator, token_ids) = (app.wallet.clone(), app.operator(), app.token_ids());
            spawn_local(async move {
                let _ = wallet.delegate(&operator, &token_ids).await;
            });
        })?;
    }
    {
        let app = state.clone();
        on_click(&undelegate_btn, move |_| {
            let (wallet, operator, token_ids) = (app.wallet.clone(), app.operator(), app.token_ids());
            spawn_local(async move {
                let _ = wallet.undelegate(&operator, &token_ids).await;
            });
        })?;
    }
    {
        let app = state.clone();
        on_click(&check_btn, move |_| {
            let (wallet, operator) = (app.wallet.clone(), app.operator());
            spawn_local(async move {
                let _ = wallet.check_delegation(&operator).await;
            });
        })?;
    }

    let buttons = ElementBuilder::new("div")?
        .class("button-group")
        .child(delegate_btn)?
        .child(undelegate_btn)?
        .child(check_btn)?
        .build();

    let card = ElementBuilder::new("div")?
        .class("card")
        .child(ElementBuilder::new("h2")?.text("Manage Delegation").build())?
        .child(operator_group)?
        .child(token_group)?
        .child(buttons)?
        .build();

    Ok(card)
}
