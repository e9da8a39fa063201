// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use std::{path::PathBuf, sync::Arc};

use alloy::providers::{Provider, ProviderBuilder};

use crate::{
    core::{
        artifact::{self, DEFAULT_CONTRACT_KEY},
        deployment::RpcContractFactory,
        envelope::CalldataEnvelope,
        factory::{CompiledContract, DEFAULT_ARTIFACT_PATH},
        network::{self, NetworkTarget},
        pipeline::{DeploymentOutcome, DeploymentPipeline},
        signers::{SignerMode, SignerProvisioner},
    },
    utils::{color::DebugColor, format_wei},
    Result,
};

#[derive(Debug)]
pub struct DeployConfig {
    pub target: NetworkTarget,
    /// Compiled Hardhat artifact of the contract.
    pub contract_path: PathBuf,
    /// Where the deployment artifact is written.
    pub artifact_path: PathBuf,
    pub signers: SignerProvisioner,
    pub envelope: Option<Arc<dyn CalldataEnvelope>>,
}

impl DeployConfig {
    pub fn new(target: NetworkTarget) -> Self {
        Self {
            target,
            contract_path: DEFAULT_ARTIFACT_PATH.into(),
            artifact_path: artifact::default_path(DEFAULT_CONTRACT_KEY),
            signers: SignerProvisioner::default(),
            envelope: None,
        }
    }
}

/// Deploys the auction contract and writes its artifact.
pub async fn deploy(config: &DeployConfig) -> Result<DeploymentOutcome> {
    let contract = CompiledContract::load(&config.contract_path)?;
    let provider = ProviderBuilder::new()
        .connect(&config.target.rpc_url)
        .await?;
    let factory = RpcContractFactory::new(
        contract,
        config.target.rpc_url.clone(),
        config.target.gas_pricing,
    );

    let pipeline = DeploymentPipeline::builder()
        .provider(provider)
        .factory(factory)
        .target(config.target.clone())
        .artifact_path(config.artifact_path.clone())
        .signers(config.signers.clone());
    let outcome = match &config.envelope {
        Some(envelope) => pipeline.envelope(envelope.clone()).build().run().await?,
        None => pipeline.build().run().await?,
    };
    Ok(outcome)
}

/// Prints the signers a deployment to `target` would use.
pub async fn print_accounts(target: &NetworkTarget, signers: &SignerProvisioner) -> Result<()> {
    let provider = ProviderBuilder::new().connect(&target.rpc_url).await?;
    let chain_id = target.resolve_chain_id(&provider).await?;
    let mode = SignerMode::for_chain(chain_id);
    greyln!("chain {}: {:?} signers", chain_id.debug_lavender(), mode);

    for (index, signer) in signers.derive()?.iter().enumerate() {
        let address = signer.address();
        let balance = provider.get_balance(address).await?;
        let role = match index {
            0 => "deployer",
            1 => "service wallet",
            _ => "",
        };
        greyln!("{index:>2}  {address}  {}  {role}", format_wei(balance));
    }
    let height = network::block_height(&provider).await?;
    greyln!("current block: {}", height);
    Ok(())
}
