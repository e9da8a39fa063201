// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::{
    json_abi::JsonAbi,
    network::Ethereum,
    primitives::{Address, ChainId, TxHash},
    providers::{PendingTransactionBuilder, ProviderBuilder},
    rpc::types::TransactionReceipt,
};
use typed_builder::TypedBuilder;

use crate::{
    core::{
        envelope::EnvelopeError,
        factory::{format_abi, CompiledContract, ContractFactory},
        network::GasPricing,
        signers::ProvisionedSigner,
    },
    utils::color::{Color, DebugColor},
};
use request::DeploymentRequest;

pub mod request;

pub const DEFAULT_REVEAL_DURATION: u64 = 1000;
pub const DEFAULT_MAX_BIDS: u64 = 1000;
pub const DEFAULT_FEE_PERCENT: u64 = 1;
/// Denominator of `fee_percent`. Recorded in the artifact, not passed to the constructor.
pub const FEE_BASE: u64 = 100;

/// Constructor parameters of the auction contract, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct DeploymentParameters {
    pub service_wallet: Address,
    pub chain_id: ChainId,
    #[builder(default = DEFAULT_REVEAL_DURATION)]
    pub reveal_duration: u64,
    #[builder(default = DEFAULT_MAX_BIDS)]
    pub max_bids: u64,
    #[builder(default = DEFAULT_FEE_PERCENT)]
    pub fee_percent: u64,
    #[builder(default = FEE_BASE)]
    pub fee_base: u64,
}

impl DeploymentParameters {
    /// Constructor arguments in declaration order.
    pub fn constructor_args(&self) -> Vec<String> {
        vec![
            self.service_wallet.to_string(),
            self.chain_id.to_string(),
            self.reveal_duration.to_string(),
            self.max_bids.to_string(),
            self.fee_percent.to_string(),
        ]
    }
}

/// Handle to a confirmed deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedContract {
    pub address: Address,
    pub tx_hash: TxHash,
    /// Block the deployment transaction was mined in.
    pub block_number: Option<u64>,
    pub abi: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),
    #[error("{0}")]
    Envelope(#[from] EnvelopeError),
    #[error("{0:?}")]
    LoadContract(eyre::Report),

    #[error("deploy tx {} did not complete: {reason}", .tx_hash.debug_red())]
    FailedToComplete { tx_hash: TxHash, reason: String },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("missing contract address in receipt of {}", .0.debug_red())]
    NoContractAddress(TxHash),
    #[error("compiled contract {} has no creation bytecode", .0.red())]
    MissingBytecode(String),
    #[error("invalid constructor: {0}")]
    InvalidConstructor(String),
}

/// Deploys a compiled contract through a JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcContractFactory {
    contract: CompiledContract,
    rpc_url: String,
    gas_pricing: GasPricing,
}

impl RpcContractFactory {
    pub fn new(
        contract: CompiledContract,
        rpc_url: impl Into<String>,
        gas_pricing: GasPricing,
    ) -> Self {
        Self {
            contract,
            rpc_url: rpc_url.into(),
            gas_pricing,
        }
    }
}

impl ContractFactory for RpcContractFactory {
    type Pending = PendingTransactionBuilder<Ethereum>;

    fn abi(&self) -> &JsonAbi {
        &self.contract.abi
    }

    async fn submit(
        &self,
        signer: &ProvisionedSigner,
        params: &DeploymentParameters,
    ) -> Result<Self::Pending, DeploymentError> {
        let code = signer.seal(self.contract.creation_code(params)?)?;
        let sender = signer.address();
        debug!(@grey, "sender address: {}", sender.debug_lavender());

        let provider = ProviderBuilder::new()
            .wallet(signer.wallet(params.chain_id))
            .connect(&self.rpc_url)
            .await?;
        DeploymentRequest::new(sender, code, self.gas_pricing)
            .send(&provider)
            .await
    }

    async fn confirm(&self, pending: Self::Pending) -> Result<DeployedContract, DeploymentError> {
        let receipt = request::confirm(pending).await?;
        deployed_contract(&receipt, self.abi())
    }
}

/// Extracts the created contract from a successful deployment receipt.
fn deployed_contract(
    receipt: &TransactionReceipt,
    abi: &JsonAbi,
) -> Result<DeployedContract, DeploymentError> {
    let address = receipt
        .contract_address
        .ok_or(DeploymentError::NoContractAddress(receipt.transaction_hash))?;

    info!(@grey, "deployed code at address: {}", address.debug_lavender());
    info!(@grey, "deployment tx hash: {}", receipt.transaction_hash.debug_lavender());
    Ok(DeployedContract {
        address,
        tx_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        abi: format_abi(abi),
    })
}
