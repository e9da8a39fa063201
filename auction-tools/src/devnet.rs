// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use eyre::{Result, WrapErr};
use reqwest::{header::HeaderValue, Method, Response};
use testcontainers::{
    core::{wait::HttpWaitStrategy, IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::core::network::NetworkTarget;

const SAPPHIRE_IMAGE_NAME: &str = "ghcr.io/oasisprotocol/sapphire-localnet";
const SAPPHIRE_IMAGE_TAG: &str = "latest";
const SAPPHIRE_PORT: u16 = 8545;

/// Manage a Sapphire localnet whose accounts are funded from the test mnemonic.
pub struct Node {
    _container: ContainerAsync<GenericImage>,
    rpc: String,
}

impl Node {
    /// Starts a new Sapphire localnet in the background.
    /// The node is shut down when this struct is dropped.
    pub async fn new() -> Result<Self> {
        let wait_strategy = HttpWaitStrategy::new("/")
            .with_port(SAPPHIRE_PORT.into())
            .with_method(Method::POST)
            .with_header("Content-Type", HeaderValue::from_static("application/json"))
            .with_body(r#"{"jsonrpc":"2.0","method":"eth_chainId","params":[],"id":1}"#)
            .with_response_matcher_async(rpc_response_matcher);
        let container = GenericImage::new(SAPPHIRE_IMAGE_NAME, SAPPHIRE_IMAGE_TAG)
            .with_exposed_port(SAPPHIRE_PORT.tcp())
            .with_wait_for(WaitFor::Http(wait_strategy))
            .with_cmd(vec!["-test-mnemonic"])
            .start()
            .await
            .wrap_err("failed to start Sapphire localnet container")?;
        let port = container
            .get_host_port_ipv4(SAPPHIRE_PORT)
            .await
            .wrap_err("failed to get Sapphire RPC port")?;
        Ok(Node {
            _container: container,
            rpc: format!("http://localhost:{port}"),
        })
    }

    /// Get the localnet RPC.
    pub fn rpc(&self) -> &str {
        &self.rpc
    }

    /// Network target pointing at this node.
    pub fn target(&self) -> NetworkTarget {
        NetworkTarget {
            name: Some("sapphire_localnet".to_owned()),
            ..NetworkTarget::endpoint(self.rpc())
        }
    }
}

async fn rpc_response_matcher(response: Response) -> bool {
    let Ok(text) = response.text().await else {
        return false;
    };
    text.contains("result")
}
