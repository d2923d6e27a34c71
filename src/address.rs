use crate::errors::ApiError;
use bech32::{FromBase32, Variant, decode};
use serde::Deserialize;

pub const ADDRESS_HRP: &str = "erd";
pub const ADDRESS_PUBKEY_LENGTH: usize = 32;

#[derive(Deserialize, Clone, Debug)]
pub struct AddressPath {
    pub address: String,
}

/// A bech32 account address, `erd1…`, carrying a 32-byte public key.
pub fn is_valid_address(input: &str) -> bool {
    let Ok((hrp, words, variant)) = decode(input) else {
        return false;
    };

    if hrp != ADDRESS_HRP || variant != Variant::Bech32 {
        return false;
    }

    Vec::<u8>::from_base32(&words)
        .map(|bytes| bytes.len() == ADDRESS_PUBKEY_LENGTH)
        .unwrap_or(false)
}

/// Returns the address in its canonical lowercase form.
pub fn validate_address(input: &str) -> Result<String, ApiError> {
    if is_valid_address(input) {
        Ok(input.to_lowercase())
    } else {
        Err(ApiError::invalid_address(input))
    }
}

/// Optional single address from the query string. Empty values count as absent.
pub fn get_address_param(param: Option<String>) -> Result<Option<String>, ApiError> {
    match param.as_deref() {
        None | Some("") => Ok(None),
        Some(address) => validate_address(address).map(Some),
    }
}

/// Comma-separated address list from the query string. Empty values count as absent.
pub fn get_address_list_param(param: Option<String>) -> Result<Option<Vec<String>>, ApiError> {
    match param.as_deref() {
        None | Some("") => Ok(None),
        Some(list) => list
            .split(',')
            .map(validate_address)
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
    }
}
