// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network profiles and chain identity resolution.

use alloy::{primitives::ChainId, providers::Provider};

use crate::utils::color::{Color, DebugColor};

/// Chain id of the Sapphire localnet, the only network whose signers get wrapped.
pub const CONFIDENTIAL_CHAIN_ID: ChainId = 23293;

/// Chain id of the default local development node.
pub const LOCAL_CHAIN_ID: ChainId = 31337;

pub const DEFAULT_NETWORK: &str = "hardhat";

/// How the gas price of a deployment transaction is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GasPricing {
    /// Ask the node for its current gas price.
    #[default]
    Auto,
    /// Use a fixed price in wei.
    Fixed(u128),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub name: &'static str,
    pub url: &'static str,
    pub chain_id: ChainId,
    pub gas_pricing: GasPricing,
}

pub static PROFILES: &[NetworkProfile] = &[
    NetworkProfile {
        name: "hardhat",
        url: "http://127.0.0.1:8545",
        chain_id: LOCAL_CHAIN_ID,
        gas_pricing: GasPricing::Auto,
    },
    NetworkProfile {
        name: "sapphire_local",
        url: "http://localhost:8545",
        chain_id: CONFIDENTIAL_CHAIN_ID,
        gas_pricing: GasPricing::Auto,
    },
    NetworkProfile {
        name: "sapphire_vps",
        url: "https://nodesap.appdev.pp.ua",
        chain_id: CONFIDENTIAL_CHAIN_ID,
        gas_pricing: GasPricing::Auto,
    },
    NetworkProfile {
        name: "sapphireTestnet",
        url: "https://testnet.sapphire.oasis.io",
        chain_id: 23295,
        gas_pricing: GasPricing::Auto,
    },
    NetworkProfile {
        name: "local2",
        url: "http://127.0.0.1:31225",
        chain_id: 225,
        gas_pricing: GasPricing::Auto,
    },
];

/// Looks up a network profile by name.
pub fn profile(name: &str) -> Result<&'static NetworkProfile, NetworkError> {
    PROFILES
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| NetworkError::UnknownNetwork {
            name: name.to_owned(),
            known: PROFILES
                .iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// The endpoint a run talks to, either taken from a profile or given explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkTarget {
    pub name: Option<String>,
    pub rpc_url: String,
    pub expected_chain_id: Option<ChainId>,
    pub gas_pricing: GasPricing,
}

impl NetworkTarget {
    pub fn endpoint(rpc_url: impl Into<String>) -> Self {
        Self {
            name: None,
            rpc_url: rpc_url.into(),
            expected_chain_id: None,
            gas_pricing: GasPricing::Auto,
        }
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.rpc_url)
    }

    /// Queries the endpoint for its chain id.
    ///
    /// The node-reported id is authoritative; a mismatch with the profile only warns.
    pub async fn resolve_chain_id(&self, provider: &impl Provider) -> Result<ChainId, NetworkError> {
        let chain_id = resolve_chain_id(provider).await?;
        if let Some(expected) = self.expected_chain_id {
            if expected != chain_id {
                warn!(@yellow,
                    "network {} is configured for chain {} but the node reports {}",
                    self.label(),
                    expected,
                    chain_id
                );
            }
        }
        Ok(chain_id)
    }
}

impl From<&NetworkProfile> for NetworkTarget {
    fn from(profile: &NetworkProfile) -> Self {
        Self {
            name: Some(profile.name.to_owned()),
            rpc_url: profile.url.to_owned(),
            expected_chain_id: Some(profile.chain_id),
            gas_pricing: profile.gas_pricing,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("unknown network {}, expected one of: {known}", .name.red())]
    UnknownNetwork { name: String, known: String },
}

/// Queries the active endpoint for its chain identity. No retries.
pub async fn resolve_chain_id(provider: &impl Provider) -> Result<ChainId, NetworkError> {
    let chain_id = provider.get_chain_id().await?;
    debug!(@grey, "resolved chain id: {}", chain_id.debug_lavender());
    Ok(chain_id)
}

/// Reads the current chain height.
pub async fn block_height(provider: &impl Provider) -> Result<u64, NetworkError> {
    Ok(provider.get_block_number().await?)
}

#[cfg(test)]
mod tests {
    use alloy::providers::{mock::Asserter, ProviderBuilder};

    use super::*;

    #[test]
    fn finds_profiles_by_name() {
        let sapphire = profile("sapphire_local").unwrap();
        assert_eq!(sapphire.chain_id, CONFIDENTIAL_CHAIN_ID);
        assert_eq!(profile("sapphireTestnet").unwrap().chain_id, 23295);
        assert_eq!(profile(DEFAULT_NETWORK).unwrap().chain_id, LOCAL_CHAIN_ID);
    }

    #[test]
    fn unknown_profile_lists_known_names() {
        let err = profile("mainnet").unwrap_err();
        let NetworkError::UnknownNetwork { known, .. } = err else {
            panic!("unexpected error: {err}");
        };
        assert!(known.contains("sapphire_vps"));
        assert!(known.contains("local2"));
    }

    #[test]
    fn target_from_profile() {
        let target = NetworkTarget::from(profile("local2").unwrap());
        assert_eq!(target.rpc_url, "http://127.0.0.1:31225");
        assert_eq!(target.expected_chain_id, Some(225));
        assert_eq!(target.label(), "local2");

        let target = NetworkTarget::endpoint("http://node:8545");
        assert_eq!(target.label(), "http://node:8545");
        assert_eq!(target.gas_pricing, GasPricing::Auto);
    }

    #[tokio::test]
    async fn resolves_reported_chain_id() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_success(&"0x5afd");

        let chain_id = resolve_chain_id(&provider).await.unwrap();
        assert_eq!(chain_id, CONFIDENTIAL_CHAIN_ID);
    }

    #[tokio::test]
    async fn node_reported_id_wins_over_profile() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_success(&"0x7a69");

        let target = NetworkTarget::from(profile("sapphire_local").unwrap());
        let chain_id = target.resolve_chain_id(&provider).await.unwrap();
        assert_eq!(chain_id, LOCAL_CHAIN_ID);
    }

    #[tokio::test]
    async fn transport_error_is_fatal() {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        asserter.push_failure_msg("connection refused");

        let err = resolve_chain_id(&provider).await.unwrap_err();
        assert!(matches!(err, NetworkError::Rpc(_)));
    }
}
