// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::{path::PathBuf, sync::Arc};

use auction_tools::{
    core::{
        artifact::{self, DEFAULT_CONTRACT_KEY},
        envelope::{CalldataEnvelope, CommandEnvelope},
        network::{self, GasPricing, NetworkTarget},
        signers::SignerProvisioner,
    },
    utils::convert_gwei_to_wei,
};

use crate::constants::{DEFAULT_ARTIFACT_PATH, DEFAULT_NETWORK, DEFAULT_SIGNER_COUNT, TEST_MNEMONIC};

#[derive(Debug, clap::Args)]
pub struct ProviderArgs {
    /// Named network profile to deploy to
    #[arg(short, long, default_value = DEFAULT_NETWORK)]
    pub network: String,
    /// JSON-RPC endpoint, bypassing the network profiles
    #[arg(short, long)]
    pub endpoint: Option<String>,
    /// Optional fixed gas price in gwei units, replacing the node's price.
    #[arg(long)]
    max_fee_per_gas_gwei: Option<String>,
}

impl ProviderArgs {
    pub fn target(&self) -> eyre::Result<NetworkTarget> {
        let mut target = match &self.endpoint {
            Some(endpoint) => NetworkTarget::endpoint(endpoint),
            None => network::profile(&self.network)?.into(),
        };
        if let Some(wei) = self.get_max_fee_per_gas_wei()? {
            target.gas_pricing = GasPricing::Fixed(wei);
        }
        Ok(target)
    }

    pub fn get_max_fee_per_gas_wei(&self) -> eyre::Result<Option<u128>> {
        self.max_fee_per_gas_gwei
            .as_ref()
            .map(|fee_str| convert_gwei_to_wei(fee_str))
            .transpose()
    }
}

#[derive(Debug, clap::Args)]
pub struct SignerArgs {
    /// Seed phrase the signers are derived from
    #[arg(long, default_value = TEST_MNEMONIC, hide_default_value = true)]
    mnemonic: String,
    /// Number of signers to derive
    #[arg(long, default_value_t = DEFAULT_SIGNER_COUNT)]
    accounts: u32,
}

impl SignerArgs {
    pub fn provisioner(&self) -> SignerProvisioner {
        SignerProvisioner::new(&self.mnemonic, self.accounts)
    }
}

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Compiled contract artifact holding the ABI and creation bytecode
    #[arg(long, default_value = DEFAULT_ARTIFACT_PATH)]
    pub contract: PathBuf,
    /// The output file (defaults to the parent directory of the working directory).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ArtifactArgs {
    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| artifact::default_path(DEFAULT_CONTRACT_KEY))
    }
}

#[derive(Debug, clap::Args)]
pub struct EnvelopeArgs {
    /// Helper program that seals calldata for confidential networks
    #[arg(long)]
    envelope_program: Option<PathBuf>,
    /// Extra argument passed to the envelope program before the operation.
    #[arg(long = "envelope-arg", value_name = "ARG", allow_hyphen_values = true)]
    envelope_args: Vec<String>,
}

impl EnvelopeArgs {
    pub fn envelope(&self) -> Option<Arc<dyn CalldataEnvelope>> {
        let program = self.envelope_program.as_ref()?;
        let envelope = CommandEnvelope::new(program).with_args(self.envelope_args.iter());
        Some(Arc::new(envelope))
    }
}
