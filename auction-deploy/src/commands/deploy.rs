// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use auction_tools::ops::{self, DeployConfig};

use crate::{
    common_args::{ArtifactArgs, EnvelopeArgs, ProviderArgs, SignerArgs},
    error::CliResult,
};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    provider: ProviderArgs,
    #[command(flatten)]
    signers: SignerArgs,
    #[command(flatten)]
    artifact: ArtifactArgs,
    /// Calldata sealing for confidential networks.
    #[command(flatten)]
    envelope: EnvelopeArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let config = DeployConfig {
        contract_path: args.artifact.contract.clone(),
        artifact_path: args.artifact.output(),
        signers: args.signers.provisioner(),
        envelope: args.envelope.envelope(),
        ..DeployConfig::new(args.provider.target()?)
    };
    ops::deploy(&config).await?;
    Ok(())
}
