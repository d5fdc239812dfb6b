use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::models::error::WalletError;

/// Quién inicia el undelegate. El contrato acepta ambos; este frontend solo usa `User`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UndelegationInitiator {
    User,
    Operator,
}

impl UndelegationInitiator {
    /// Valor del parámetro `_byOperator` del contrato
    pub fn by_operator(self) -> bool {
        matches!(self, UndelegationInitiator::Operator)
    }
}

/// Request de delegación construido por cada click (operador + token ids)
#[derive(Clone, Debug, PartialEq)]
pub struct DelegationRequest {
    pub operator: Address,
    pub token_ids: Vec<U256>,
}

impl DelegationRequest {
    /// Validar formulario: primero el operador, luego los token ids
    pub fn from_form(operator: &str, token_ids: &str) -> Result<Self, WalletError> {
        let operator = parse_address(operator)?;

        let token_ids_text = token_ids.trim();
        if token_ids_text.is_empty() {
            return Err(WalletError::MissingTokenIds);
        }

        let token_ids = parse_token_ids(token_ids_text)?;
        Ok(Self { operator, token_ids })
    }
}

/// Resultado de `getDelegatorInfo` para un operador
#[derive(Clone, Debug, PartialEq)]
pub struct DelegationInfo {
    pub operator: Address,
    pub token_ids: Vec<U256>,
}

impl DelegationInfo {
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    /// "1, 2, 3"
    pub fn token_list(&self) -> String {
        self.token_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parsear lista de token ids separada por comas.
/// Conserva orden y duplicados; los fragmentos vacíos se ignoran, pero
/// al menos uno debe quedar.
pub fn parse_token_ids(input: &str) -> Result<Vec<U256>, WalletError> {
    let token_ids = input
        .split(',')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| {
            if !fragment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(WalletError::InvalidTokenId(fragment.to_string()));
            }
            U256::from_str_radix(fragment, 10)
                .map_err(|_| WalletError::InvalidTokenId(fragment.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if token_ids.is_empty() {
        return Err(WalletError::EmptyTokenIds);
    }
    Ok(token_ids)
}

/// Validar dirección de cuenta: 40 dígitos hex con prefijo `0x` opcional.
/// Si mezcla mayúsculas y minúsculas, el checksum EIP-55 debe ser correcto.
pub fn parse_address(input: &str) -> Result<Address, WalletError> {
    let trimmed = input.trim();
    let invalid = || WalletError::InvalidAddress(trimmed.to_string());

    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if body.len() != 40 || !body.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());

    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", body), None).map_err(|_| invalid())
    } else {
        Address::from_str(body).map_err(|_| invalid())
    }
}

/// `0x1234...abcd` (6 primeros caracteres + últimos 4)
pub fn short_address(address: &Address) -> String {
    let full = address.to_checksum(None);
    format!("{}...{}", &full[..6], &full[38..])
}
