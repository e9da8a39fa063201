// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! General purpose utilities.

use std::path::Path;

use alloy::primitives::U256;
use color::Color;

pub mod color;

/// Pretty-prints a gas amount.
pub fn format_gas(gas: u128) -> String {
    let text = format!("{gas} gas");
    if gas <= 3_000_000 {
        text.mint()
    } else if gas <= 7_000_000 {
        text.yellow()
    } else {
        text.pink()
    }
}

/// Pretty-prints a wei amount as ETH (or the native token of the network).
pub fn format_wei(wei: U256) -> String {
    let Ok(gwei): Result<u64, _> = (wei / U256::from(1_000_000_000u64)).try_into() else {
        return "???".red();
    };
    format!("{:.6} ETH", gwei as f64 / 1e9)
}

/// Converts a decimal gwei string into wei.
pub fn convert_gwei_to_wei(fee_str: &str) -> eyre::Result<u128> {
    let gwei = match fee_str.parse::<f64>() {
        Ok(fee) if fee >= 0.0 => fee,
        Ok(_) => eyre::bail!("max fee per gas must be non-negative"),
        Err(_) => eyre::bail!("invalid max fee per gas value: {fee_str}"),
    };
    if !gwei.is_finite() {
        eyre::bail!("invalid gwei value: must be finite");
    }

    let wei = gwei * 1e9;
    if !wei.is_finite() || wei >= u128::MAX as f64 {
        eyre::bail!("result outside valid range for wei");
    }
    Ok(wei as u128)
}

/// Decodes hex text, tolerating surrounding whitespace and a `0x` prefix.
pub fn decode0x(text: impl AsRef<str>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref().trim();
    let text = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(text)
}

/// Displays a path in canonical form when it exists.
pub fn display_path(path: &Path) -> String {
    path.canonicalize()
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}
