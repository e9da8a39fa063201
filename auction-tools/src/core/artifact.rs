// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deployment artifact consumed by front-end, indexer and backend services.
//!
//! ```json
//! {
//!     "chainId": 23295,
//!     "auction": {
//!         "address": "0x...",
//!         "abi": ["constructor(...)", "function bid(bytes32 commitment) payable"],
//!         "startBlock": 1234,
//!         "config": { "revealDuration": 1000, "maxBids": 1000, "feePercent": 1, "feeBase": 100 }
//!     },
//!     "rpcUrl": "https://testnet.sapphire.oasis.io"
//! }
//! ```

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use alloy::primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};
use serde_json::{ser::PrettyFormatter, Map, Value};
use tempfile::NamedTempFile;
use typed_builder::TypedBuilder;

use crate::core::deployment::DeploymentParameters;

pub const DEFAULT_CONTRACT_KEY: &str = "auction";

/// File name of the artifact for a contract key, e.g. `bcConfig_auction.json`.
pub fn file_name(contract_key: &str) -> String {
    format!("bcConfig_{contract_key}.json")
}

/// Default artifact location: the parent of the working directory.
pub fn default_path(contract_key: &str) -> PathBuf {
    Path::new("..").join(file_name(contract_key))
}

/// Auction settings recorded next to the deployed address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionConfig {
    pub reveal_duration: u64,
    pub max_bids: u64,
    pub fee_percent: u64,
    pub fee_base: u64,
}

impl From<&DeploymentParameters> for AuctionConfig {
    fn from(params: &DeploymentParameters) -> Self {
        Self {
            reveal_duration: params.reveal_duration,
            max_bids: params.max_bids,
            fee_percent: params.fee_percent,
            fee_base: params.fee_base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ContractRecord {
    pub address: Address,
    pub abi: Vec<String>,
    /// Chain height observed before the deployment was submitted.
    pub start_block: u64,
    #[builder(setter(into))]
    pub config: AuctionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentArtifact {
    #[serde(rename = "chainId")]
    pub chain_id: ChainId,
    #[serde(flatten)]
    pub contracts: BTreeMap<String, ContractRecord>,
    #[serde(rename = "rpcUrl")]
    pub rpc_url: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to write artifact {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to serialize artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DeploymentArtifact {
    /// A fresh record for `chain_id` holding a single contract entry.
    ///
    /// Nothing from a previously written artifact is carried over.
    pub fn new(
        chain_id: ChainId,
        contract_key: impl Into<String>,
        record: ContractRecord,
        rpc_url: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            contracts: BTreeMap::from([(contract_key.into(), record)]),
            rpc_url: rpc_url.into(),
        }
    }

    /// Serializes with 4-space indentation.
    pub fn to_json(&self) -> Result<Vec<u8>, ArtifactError> {
        let mut out = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(out)
    }

    /// Writes the artifact to a temporary file next to `path`, then renames it over `path`.
    ///
    /// The file keeps the permissions of the artifact it replaces, or gets `0o644` on unix when
    /// there is none.
    pub fn write(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = self.to_json()?;
        let write_err = |source| ArtifactError::Write {
            path: path.to_path_buf(),
            source,
        };
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
        if let Some(permissions) = target_permissions(path) {
            file.as_file()
                .set_permissions(permissions)
                .map_err(write_err)?;
        }
        io::Write::write_all(&mut file, &json).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(path).map_err(|err| write_err(err.error))?;
        debug!(@grey, "wrote artifact to {}", path.display());
        Ok(())
    }
}

/// Permissions the written artifact should end up with.
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Outcome of reading whatever artifact a previous run left behind.
#[derive(Debug)]
pub enum PreviousArtifact {
    Missing,
    Unreadable(io::Error),
    Invalid(serde_json::Error),
    Found(Map<String, Value>),
}

impl PreviousArtifact {
    /// Reads the artifact at `path`. Never fails: every problem is a named fallback.
    pub fn read(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => Self::Found(map),
                Err(err) => Self::Invalid(err),
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Self::Missing,
            Err(err) => Self::Unreadable(err),
        }
    }

    /// Top-level keys that the new record will drop.
    pub fn discarded_keys(&self) -> Vec<&str> {
        match self {
            Self::Found(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn log(&self, path: &Path) {
        let path = path.display();
        match self {
            Self::Missing => {
                debug!(@grey, "no previous artifact at {}, starting from an empty record", path)
            }
            Self::Unreadable(err) => {
                warn!(@yellow, "could not read previous artifact {}: {}; starting from an empty record", path, err)
            }
            Self::Invalid(err) => {
                warn!(@yellow, "previous artifact {} is not a JSON object: {}; starting from an empty record", path, err)
            }
            Self::Found(_) => {
                debug!(@grey, "resetting previous artifact {}, discarding keys: {}", path, self.discarded_keys().join(", "))
            }
        }
    }
}
