// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use auction_tools::core::{
    network::{GasPricing, PROFILES},
    signers::SignerMode,
};

use crate::{
    error::CliResult,
    utils::style::{BOLD, DIM},
};

#[derive(Debug, clap::Args)]
pub struct Args {}

pub fn exec(_args: Args) -> CliResult {
    for profile in PROFILES {
        let mode = match SignerMode::for_chain(profile.chain_id) {
            SignerMode::Plain => "plain",
            SignerMode::Confidential => "confidential",
        };
        let gas = match profile.gas_pricing {
            GasPricing::Auto => "auto".to_owned(),
            GasPricing::Fixed(wei) => format!("{wei} wei"),
        };
        println!(
            "{BOLD}{:<16}{BOLD:#} {:<36} {:>6}  {DIM}{mode}, gas {gas}{DIM:#}",
            profile.name, profile.url, profile.chain_id,
        );
    }
    Ok(())
}
