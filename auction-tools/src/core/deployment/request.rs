// Copyright 2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract creation transaction

use alloy::{
    network::{Ethereum, TransactionBuilder},
    primitives::{Address, Bytes},
    providers::{PendingTransactionBuilder, Provider},
    rpc::types::{TransactionReceipt, TransactionRequest},
};

use super::DeploymentError;
use crate::{
    core::network::GasPricing,
    utils::{color::DebugColor, format_gas},
};

/// Contract creation transaction for the deployer account
#[derive(Debug)]
pub struct DeploymentRequest {
    tx: TransactionRequest,
    gas_pricing: GasPricing,
}

impl DeploymentRequest {
    /// `code` is the (possibly sealed) creation bytecode with constructor arguments appended.
    pub fn new(sender: Address, code: Bytes, gas_pricing: GasPricing) -> Self {
        Self {
            tx: TransactionRequest::default()
                .with_from(sender)
                .with_deploy_code(code),
            gas_pricing,
        }
    }

    pub async fn estimate_gas(&self, provider: &impl Provider) -> Result<u64, DeploymentError> {
        Ok(provider.estimate_gas(self.tx.clone()).await?)
    }

    /// Prices and sends the transaction without waiting for it to be mined.
    pub async fn send(
        self,
        provider: &impl Provider,
    ) -> Result<PendingTransactionBuilder<Ethereum>, DeploymentError> {
        let gas = self.estimate_gas(provider).await?;
        let gas_price = self.gas_price(provider).await?;
        debug!(@grey, "estimated deployment gas: {}", format_gas(gas.into()));

        let mut tx = self.tx;
        tx.gas = Some(gas);
        tx.gas_price = Some(gas_price);

        let pending = provider.send_transaction(tx).await?;
        debug!(@grey, "sent deploy tx: {}", pending.tx_hash().debug_lavender());
        Ok(pending)
    }

    async fn gas_price(&self, provider: &impl Provider) -> Result<u128, DeploymentError> {
        match self.gas_pricing {
            GasPricing::Fixed(wei) => Ok(wei),
            GasPricing::Auto => Ok(provider.get_gas_price().await?),
        }
    }
}

/// Waits for the receipt of a sent deployment.
///
/// There is no timeout: the wait ends when the node reports a receipt or an error.
pub async fn confirm(
    pending: PendingTransactionBuilder<Ethereum>,
) -> Result<TransactionReceipt, DeploymentError> {
    let tx_hash = *pending.tx_hash();
    let receipt = pending
        .get_receipt()
        .await
        .map_err(|err| DeploymentError::FailedToComplete {
            tx_hash,
            reason: err.to_string(),
        })?;
    if !receipt.status() {
        return Err(DeploymentError::Reverted { tx_hash });
    }
    Ok(receipt)
}

#[cfg(test)]
pub(crate) mod tests {
    use alloy::{
        primitives::{address, TxHash},
        providers::{mock::Asserter, ProviderBuilder},
    };
    use serde_json::{json, Value};

    use super::*;

    pub(crate) const SENDER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    pub(crate) const CREATED: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");

    pub(crate) fn tx_hash() -> TxHash {
        TxHash::repeat_byte(0x11)
    }

    /// Receipt of the deployment as a node would report it.
    pub(crate) fn receipt_json(status: bool, contract_address: Option<Address>) -> Value {
        json!({
            "transactionHash": tx_hash(),
            "transactionIndex": "0x0",
            "blockHash": TxHash::repeat_byte(0x22),
            "blockNumber": "0x11",
            "from": SENDER,
            "to": null,
            "cumulativeGasUsed": "0x5208",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x3b9aca00",
            "contractAddress": contract_address,
            "logs": [],
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "type": "0x0",
            "status": if status { "0x1" } else { "0x0" },
        })
    }

    fn request(gas_pricing: GasPricing) -> DeploymentRequest {
        DeploymentRequest::new(SENDER, Bytes::from_static(&[0x60, 0x80]), gas_pricing)
    }

    /// Mocked node answering gas estimation, gas price and submission.
    fn node() -> (Asserter, impl Provider) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        asserter.push_success(&"0x5208");
        asserter.push_success(&"0x3b9aca00");
        asserter.push_success(&tx_hash());
        (asserter, provider)
    }

    #[tokio::test]
    async fn mined_deployment_returns_receipt() {
        let (asserter, provider) = node();
        asserter.push_success(&receipt_json(true, Some(CREATED)));

        let pending = request(GasPricing::Auto).send(&provider).await.unwrap();
        assert_eq!(*pending.tx_hash(), tx_hash());
        let receipt = confirm(pending).await.unwrap();
        assert_eq!(receipt.contract_address, Some(CREATED));
        assert_eq!(receipt.block_number, Some(17));
    }

    #[tokio::test]
    async fn failed_status_is_a_revert() {
        let (asserter, provider) = node();
        asserter.push_success(&receipt_json(false, Some(CREATED)));

        let pending = request(GasPricing::Auto).send(&provider).await.unwrap();
        let err = confirm(pending).await.unwrap_err();
        assert!(matches!(err, DeploymentError::Reverted { tx_hash: hash } if hash == tx_hash()));
    }

    #[tokio::test]
    async fn fixed_gas_price_skips_node_price() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        asserter.push_success(&"0x5208");
        asserter.push_success(&tx_hash());
        asserter.push_success(&receipt_json(true, Some(CREATED)));

        let pending = request(GasPricing::Fixed(2_000_000_000))
            .send(&provider)
            .await
            .unwrap();
        let receipt = confirm(pending).await.unwrap();
        assert_eq!(receipt.contract_address, Some(CREATED));
    }

    #[tokio::test]
    async fn rejected_estimate_is_fatal() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone());
        asserter.push_failure_msg("execution reverted");

        let err = request(GasPricing::Auto).send(&provider).await.unwrap_err();
        assert!(matches!(err, DeploymentError::Rpc(_)));
    }
}
