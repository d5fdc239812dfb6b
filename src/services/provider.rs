// ============================================================================
// WALLET PROVIDER - Binding EIP-1193 sobre `window.ethereum`
// ============================================================================
// SOLO comunicación con el wallet: requests JSON-RPC + eventos.
// Sin estado de UI, sin lógica de negocio.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;
use std::str::FromStr;

use alloy_primitives::Address;
use futures::channel::mpsc::{self, UnboundedReceiver};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::ChainConfig;
use crate::models::chain::{parse_chain_id, AddChainParameter, SwitchChainParameter};
use crate::models::{WalletError, WalletEvent};

/// Código EIP-1193 / MetaMask: la chain no está registrada en el wallet
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

#[wasm_bindgen]
extern "C" {
    /// Objeto inyectado por la extensión (MetaMask, Rabby, ...)
    #[wasm_bindgen(extends = js_sys::Object)]
    #[derive(Clone, Debug)]
    pub type Eip1193;

    #[wasm_bindgen(method, catch)]
    async fn request(this: &Eip1193, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Eip1193, event: &str, handler: &js_sys::Function);
}

/// Superficie del wallet que usa el controlador.
/// `EthereumProvider` en el navegador, `MockProvider` en tests.
#[allow(async_fn_in_trait)]
pub trait WalletProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;

    async fn request_as<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, WalletError> {
        let value = self.request(method, params).await?;
        serde_json::from_value(value)
            .map_err(|e| WalletError::InvalidResponse(format!("{}: {}", method, e)))
    }

    /// `eth_requestAccounts` (abre el popup del wallet)
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let accounts: Vec<String> = self.request_as("eth_requestAccounts", Value::Null).await?;
        Ok(parse_accounts(&accounts))
    }

    /// `eth_accounts` (sin popup, para reconectar al cargar)
    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        let accounts: Vec<String> = self.request_as("eth_accounts", Value::Null).await?;
        Ok(parse_accounts(&accounts))
    }

    async fn chain_id(&self) -> Result<u64, WalletError> {
        let hex: String = self.request_as("eth_chainId", Value::Null).await?;
        parse_chain_id(&hex).ok_or_else(|| WalletError::InvalidResponse(format!("eth_chainId: {}", hex)))
    }

    async fn switch_chain(&self, chain: &ChainConfig) -> Result<(), WalletError> {
        let param = SwitchChainParameter { chain_id: chain.chain_id_hex() };
        self.request("wallet_switchEthereumChain", to_params(&[param])?).await?;
        Ok(())
    }

    async fn add_chain(&self, chain: &ChainConfig) -> Result<(), WalletError> {
        let param = AddChainParameter::from(chain);
        self.request("wallet_addEthereumChain", to_params(&[param])?).await?;
        Ok(())
    }

    /// Pausa entre consultas de receipt (timer del navegador)
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

impl<P: WalletProvider> WalletProvider for Rc<P> {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        (**self).request(method, params).await
    }

    async fn sleep(&self, ms: u32) {
        (**self).sleep(ms).await
    }
}

/// Serializar parámetros JSON-RPC
pub fn to_params<T: Serialize + ?Sized>(params: &T) -> Result<Value, WalletError> {
    serde_json::to_value(params).map_err(|e| WalletError::InvalidResponse(format!("params: {}", e)))
}

/// Las cuentas llegan en minúsculas; las que no parsean se descartan
fn parse_accounts(accounts: &[String]) -> Vec<Address> {
    accounts
        .iter()
        .filter_map(|account| match Address::from_str(account) {
            Ok(address) => Some(address),
            Err(_) => {
                log::warn!("⚠️ [PROVIDER] Cuenta inválida ignorada: {}", account);
                None
            }
        })
        .collect()
}

#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    #[serde(skip_serializing_if = "Value::is_null")]
    params: Value,
}

/// Wallet inyectado en la página
#[derive(Clone)]
pub struct EthereumProvider {
    inner: Eip1193,
    // Flag para prevenir múltiples registros de listeners
    subscribed: Rc<Cell<bool>>,
}

impl EthereumProvider {
    /// Detectar `window.ethereum`; `None` si no hay wallet instalado
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if value.is_undefined() || value.is_null() {
            log::warn!("⚠️ [PROVIDER] window.ethereum no encontrado");
            return None;
        }
        log::info!("🦊 [PROVIDER] Wallet inyectado detectado");
        Some(Self {
            inner: value.unchecked_into(),
            subscribed: Rc::new(Cell::new(false)),
        })
    }

    /// Suscribirse a `accountsChanged` / `chainChanged`.
    /// Solo se registra una vez; llamadas posteriores devuelven `None`.
    pub fn subscribe(&self) -> Option<UnboundedReceiver<WalletEvent>> {
        if self.subscribed.replace(true) {
            log::warn!("⚠️ [PROVIDER] subscribe ya fue llamado, ignorando llamada duplicada");
            return None;
        }

        let (tx, rx) = mpsc::unbounded();

        let accounts_tx = tx.clone();
        let on_accounts = Closure::wrap(Box::new(move |value: JsValue| {
            let raw: Vec<String> = serde_wasm_bindgen::from_value(value).unwrap_or_default();
            let accounts = parse_accounts(&raw);
            log::info!("👛 [PROVIDER] accountsChanged: {} cuenta(s)", accounts.len());
            let _ = accounts_tx.unbounded_send(WalletEvent::AccountsChanged(accounts));
        }) as Box<dyn FnMut(JsValue)>);

        let on_chain = Closure::wrap(Box::new(move |value: JsValue| {
            let chain_id = value.as_string().as_deref().and_then(parse_chain_id);
            log::info!("⛓️ [PROVIDER] chainChanged: {:?}", chain_id);
            let _ = tx.unbounded_send(WalletEvent::ChainChanged(chain_id));
        }) as Box<dyn FnMut(JsValue)>);

        self.inner.on("accountsChanged", on_accounts.as_ref().unchecked_ref());
        self.inner.on("chainChanged", on_chain.as_ref().unchecked_ref());

        // Listeners globales: viven toda la vida de la página
        on_accounts.forget();
        on_chain.forget();

        log::info!("✅ [PROVIDER] Listeners registrados (solo una vez)");
        Some(rx)
    }
}

impl WalletProvider for EthereumProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let args = RequestArguments { method, params };
        let js_args = args
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| WalletError::InvalidResponse(format!("{}: {}", method, e)))?;

        log::debug!("📡 [PROVIDER] {}", method);
        let result = self.inner.request(js_args).await.map_err(decode_js_error)?;

        if result.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| WalletError::InvalidResponse(format!("{}: {}", method, e)))
    }
}

/// Extraer `code` y `message` del error JS (MetaMask móvil anida el código
/// en `data.originalError.code`)
fn decode_js_error(error: JsValue) -> WalletError {
    let get = |target: &JsValue, key: &str| js_sys::Reflect::get(target, &JsValue::from_str(key)).ok();

    let code = get(&error, "code")
        .and_then(|v| v.as_f64())
        .or_else(|| {
            get(&error, "data")
                .and_then(|data| get(&data, "originalError"))
                .and_then(|original| get(&original, "code"))
                .and_then(|v| v.as_f64())
        })
        .map(|c| c as i64);

    let message = get(&error, "message")
        .and_then(|v| v.as_string())
        .or_else(|| error.as_string())
        .unwrap_or_else(|| format!("{:?}", error));

    WalletError::Provider { code, message }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::cell::RefCell;

    use serde_json::Value;

    use super::WalletProvider;
    use crate::models::WalletError;

    type Handler = Box<dyn Fn(&str, &Value) -> Result<Value, WalletError>>;

    /// Provider con respuestas programadas; registra cada request
    pub struct MockProvider {
        handler: Handler,
        calls: RefCell<Vec<(String, Value)>>,
        sleeps: RefCell<Vec<u32>>,
    }

    impl MockProvider {
        pub fn new(handler: impl Fn(&str, &Value) -> Result<Value, WalletError> + 'static) -> Self {
            Self {
                handler: Box::new(handler),
                calls: RefCell::new(Vec::new()),
                sleeps: RefCell::new(Vec::new()),
            }
        }

        /// Pausas pedidas (ms), en orden
        pub fn sleeps(&self) -> Vec<u32> {
            self.sleeps.borrow().clone()
        }

        pub fn methods(&self) -> Vec<String> {
            self.calls.borrow().iter().map(|(m, _)| m.clone()).collect()
        }

        pub fn count(&self, method: &str) -> usize {
            self.calls.borrow().iter().filter(|(m, _)| m == method).count()
        }

        pub fn params_of(&self, method: &str) -> Vec<Value> {
            self.calls
                .borrow()
                .iter()
                .filter(|(m, _)| m == method)
                .map(|(_, p)| p.clone())
                .collect()
        }
    }

    impl WalletProvider for MockProvider {
        async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
            self.calls.borrow_mut().push((method.to_string(), params.clone()));
            (self.handler)(method, &params)
        }

        // Sin timers fuera del navegador: solo se registra
        async fn sleep(&self, ms: u32) {
            self.sleeps.borrow_mut().push(ms);
        }
    }
}
