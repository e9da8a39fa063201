// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use auction_tools::ops;

use crate::{
    common_args::{ProviderArgs, SignerArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    signers: SignerArgs,
}

pub async fn exec(args: Args) -> CliResult {
    ops::print_accounts(&args.provider.target()?, &args.signers.provisioner()).await?;
    Ok(())
}
