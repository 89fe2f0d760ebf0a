//! The four pre-submission validators: size, gas limit, gas price and
//! intrinsic gas, plus the balance-sufficiency check against a resolved
//! sender.

use alloy_primitives::U256;

use crate::config::ChainConfig;
use crate::error::{Error, ValidationKind};
use crate::quantity::Quantity;

const TX_DATA_ZERO_GAS: u64 = 4;
const TX_DATA_NON_ZERO_GAS: u64 = 68;
const TX_BASE_GAS: u64 = 21_000;
const TX_CREATE_GAS: u64 = 32_000;

pub fn validate_size(encoded_len: usize, cfg: &ChainConfig) -> Result<(), Error> {
    if encoded_len > cfg.max_transaction_size {
        return Err(Error::validation(
            ValidationKind::Size,
            format!(
                "encoded transaction is {encoded_len} bytes, exceeds limit {}",
                cfg.max_transaction_size
            ),
        ));
    }
    Ok(())
}

/// Validates `gas_limit` fits a `u64` and falls within the configured
/// bounds, returning the extracted value.
pub fn validate_gas_limit(gas_limit: &Quantity, cfg: &ChainConfig) -> Result<u64, Error> {
    let value = gas_limit.to_u64().ok_or_else(|| {
        Error::validation(ValidationKind::GasLimit, "gas limit does not fit in 64 bits")
    })?;
    if value < cfg.min_gas_limit || value > cfg.max_gas_limit {
        return Err(Error::validation(
            ValidationKind::GasLimit,
            format!(
                "gas limit {value} out of bounds [{}, {}]",
                cfg.min_gas_limit, cfg.max_gas_limit
            ),
        ));
    }
    Ok(value)
}

/// Validates `gas_price` fits a `u128` and falls within the configured
/// bounds, returning the extracted value.
pub fn validate_gas_price(gas_price: &Quantity, cfg: &ChainConfig) -> Result<u128, Error> {
    let value = gas_price.to_u128().ok_or_else(|| {
        Error::validation(ValidationKind::GasPrice, "gas price does not fit in 128 bits")
    })?;
    if value < cfg.min_gas_price || value > cfg.max_gas_price {
        return Err(Error::validation(
            ValidationKind::GasPrice,
            format!(
                "gas price {value} out of bounds [{}, {}]",
                cfg.min_gas_price, cfg.max_gas_price
            ),
        ));
    }
    Ok(value)
}

/// The minimum gas a transaction must pay for, per the classic intrinsic
/// gas formula: a base cost plus a per-byte cost for call data (zero bytes
/// are cheaper than non-zero ones), plus a contract-creation surcharge.
pub fn intrinsic_gas(data: &[u8], is_create: bool) -> u64 {
    let zero_bytes = data.iter().filter(|&&b| b == 0).count() as u64;
    let non_zero_bytes = data.len() as u64 - zero_bytes;
    let mut gas = TX_BASE_GAS + zero_bytes * TX_DATA_ZERO_GAS + non_zero_bytes * TX_DATA_NON_ZERO_GAS;
    if is_create {
        gas += TX_CREATE_GAS;
    }
    gas
}

pub fn validate_intrinsic_gas(gas_limit: u64, data: &[u8], is_create: bool) -> Result<(), Error> {
    let required = intrinsic_gas(data, is_create);
    if gas_limit < required {
        return Err(Error::validation(
            ValidationKind::IntrinsicGas,
            format!("gas limit {gas_limit} below intrinsic cost {required}"),
        ));
    }
    Ok(())
}

/// Validates that `balance` covers `value + gas_limit * gas_price`.
pub fn validate_balance(
    address: [u8; 20],
    balance: U256,
    value: U256,
    gas_limit: u64,
    gas_price: u128,
) -> Result<(), Error> {
    let required = value + U256::from(gas_limit) * U256::from(gas_price);
    if balance < required {
        return Err(Error::InsufficientBalance {
            address: format!("0x{}", hex::encode(address)),
            available: balance,
            required,
        });
    }
    Ok(())
}
