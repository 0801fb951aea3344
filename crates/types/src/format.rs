// Path: crates/types/src/format.rs
//! Display helpers shared by every view.

use crate::error::ClientError;
use alloy_primitives::{
    utils::{format_ether, parse_ether},
    Address, U256,
};

/// Shortens an address to `0x1234...abcd`.
pub fn format_address(address: &str) -> String {
    if address.is_empty() {
        return String::new();
    }
    let head: String = address.chars().take(6).collect();
    let count = address.chars().count();
    let tail: String = address.chars().skip(count.saturating_sub(4)).collect();
    format!("{head}...{tail}")
}

/// Shortens a checksummed address.
pub fn short_address(address: &Address) -> String {
    format_address(&address.to_checksum(None))
}

/// Renders wei as a decimal ether string without trailing zeros (`1.5`, `2.0`).
pub fn format_amount(wei: U256) -> String {
    let full = format_ether(wei);
    match full.split_once('.') {
        Some((whole, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                format!("{whole}.0")
            } else {
                format!("{whole}.{frac}")
            }
        }
        None => format!("{full}.0"),
    }
}

/// Parses a user-entered ether amount into wei. The amount must be positive.
pub fn parse_amount(input: &str) -> Result<U256, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        return Err(ClientError::InvalidAmount(input.to_string()));
    }
    let wei = parse_ether(trimmed).map_err(|_| ClientError::InvalidAmount(input.to_string()))?;
    if wei.is_zero() {
        return Err(ClientError::InvalidAmount(input.to_string()));
    }
    Ok(wei)
}

/// Compacts a decimal string for display: `<0.0001`, `0.1234`, `12.34`, `1.23K`, `4.56M`, `7.89B`.
pub fn format_number(value: &str) -> String {
    if value.is_empty() {
        return "0".into();
    }
    let num: f64 = match value.trim().parse() {
        Ok(n) => n,
        Err(_) => return "0".into(),
    };
    if num.is_nan() {
        return "0".into();
    }
    if num > 0.0 && num < 0.0001 {
        return "<0.0001".into();
    }
    if num < 1.0 {
        return format!("{num:.4}");
    }
    if num < 1_000.0 {
        return format!("{num:.2}");
    }
    if num < 1_000_000.0 {
        return format!("{:.2}K", num / 1_000.0);
    }
    if num < 1_000_000_000.0 {
        return format!("{:.2}M", num / 1_000_000.0);
    }
    format!("{:.2}B", num / 1_000_000_000.0)
}

/// Compacts a wei amount for display.
pub fn format_token(wei: U256) -> String {
    format_number(&format_amount(wei))
}

/// Upper-cases the first character.
pub fn titlecase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}
