// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! The deployment run.
//!
//! ```text
//! START → ResolveChain → ProvisionSigners → Deploy → ConfirmReceipt → BuildArtifact → WriteFile → DONE
//! ```
//!
//! Any error ends the run. The artifact file is only touched in the last stage, so a failed run
//! leaves it exactly as it was.

use std::{fmt, path::PathBuf, sync::Arc};

use alloy::{
    primitives::{Address, ChainId, TxHash},
    providers::Provider,
};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        artifact::{
            ArtifactError, ContractRecord, DeploymentArtifact, PreviousArtifact,
            DEFAULT_CONTRACT_KEY,
        },
        deployment::{DeployedContract, DeploymentError, DeploymentParameters},
        envelope::CalldataEnvelope,
        factory::ContractFactory,
        network::{self, NetworkError, NetworkTarget},
        signers::{SignerError, SignerMode, SignerProvisioner},
    },
    utils::{color::DebugColor, display_path},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveChain,
    ProvisionSigners,
    Deploy,
    ConfirmReceipt,
    BuildArtifact,
    WriteFile,
    Done,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Signers(#[from] SignerError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error(
        "contract deployed at {} (tx {}) but the artifact was not written, reconcile manually: {source}",
        .address.debug_lavender(),
        .tx_hash.debug_lavender(),
    )]
    Artifact {
        address: Address,
        tx_hash: TxHash,
        source: ArtifactError,
    },
}

#[derive(Debug, Clone)]
pub struct DeploymentOutcome {
    pub chain_id: ChainId,
    pub contract_key: String,
    pub signer_mode: SignerMode,
    pub start_block: u64,
    pub deployed: DeployedContract,
    pub artifact: DeploymentArtifact,
    pub artifact_path: PathBuf,
}

impl fmt::Display for DeploymentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "deployed {} at {} (tx {}, start block {})",
            self.contract_key, self.deployed.address, self.deployed.tx_hash, self.start_block
        )
    }
}

#[derive(TypedBuilder)]
pub struct DeploymentPipeline<P, F> {
    provider: P,
    factory: F,
    target: NetworkTarget,
    #[builder(setter(into))]
    artifact_path: PathBuf,
    #[builder(default)]
    signers: SignerProvisioner,
    #[builder(default, setter(strip_option))]
    envelope: Option<Arc<dyn CalldataEnvelope>>,
    #[builder(default = DEFAULT_CONTRACT_KEY.to_owned(), setter(into))]
    contract_key: String,
}

impl<P: Provider, F: ContractFactory> DeploymentPipeline<P, F> {
    pub async fn run(&self) -> Result<DeploymentOutcome, PipelineError> {
        enter(Stage::ResolveChain);
        let chain_id = self.target.resolve_chain_id(&self.provider).await?;
        greyln!(
            "deploying {} to {} (chain {})",
            self.contract_key,
            self.target.label(),
            chain_id.debug_lavender()
        );

        enter(Stage::ProvisionSigners);
        let signers = self.signers.provision(chain_id, self.envelope.clone())?;
        if signers.mode() == SignerMode::Confidential {
            greyln!("confidential network, signers are wrapped");
        }

        let previous = PreviousArtifact::read(&self.artifact_path);
        previous.log(&self.artifact_path);

        // must be read before the deployment is submitted
        let start_block = network::block_height(&self.provider).await?;
        let params = DeploymentParameters::builder()
            .service_wallet(signers.service_wallet().address())
            .chain_id(chain_id)
            .build();

        enter(Stage::Deploy);
        let pending = self.factory.submit(signers.deployer(), &params).await?;

        enter(Stage::ConfirmReceipt);
        let deployed = self.factory.confirm(pending).await?;
        debug!(@grey, "start block {}, mined in block {:?}", start_block, deployed.block_number);

        enter(Stage::BuildArtifact);
        let record = ContractRecord::builder()
            .address(deployed.address)
            .abi(deployed.abi.clone())
            .start_block(start_block)
            .config(&params)
            .build();
        let artifact = DeploymentArtifact::new(
            chain_id,
            self.contract_key.clone(),
            record,
            self.target.rpc_url.clone(),
        );

        enter(Stage::WriteFile);
        artifact
            .write(&self.artifact_path)
            .map_err(|source| PipelineError::Artifact {
                address: deployed.address,
                tx_hash: deployed.tx_hash,
                source,
            })?;
        greyln!("wrote {}", display_path(&self.artifact_path));

        enter(Stage::Done);
        let outcome = DeploymentOutcome {
            chain_id,
            contract_key: self.contract_key.clone(),
            signer_mode: signers.mode(),
            start_block,
            deployed,
            artifact,
            artifact_path: self.artifact_path.clone(),
        };
        mintln!("{}", outcome);
        Ok(outcome)
    }
}

fn enter(stage: Stage) {
    debug!(@grey, "stage: {:?}", stage);
}
