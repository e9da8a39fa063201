// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts and the factory seam used by the deployer.

use std::{fs, path::Path};

use alloy::{
    dyn_abi::{DynSolValue, JsonAbiExt, Specifier},
    json_abi::{Constructor, JsonAbi, Param, StateMutability},
    primitives::Bytes,
};
use eyre::WrapErr;
use serde::Deserialize;

use crate::core::{
    deployment::{DeployedContract, DeploymentError, DeploymentParameters},
    signers::ProvisionedSigner,
};

/// Default location of the compiled auction contract, relative to the project root.
pub const DEFAULT_ARTIFACT_PATH: &str = "artifacts/contracts/Auction.sol/Auction.json";

/// Something that can put a contract on chain.
///
/// The orchestrator never looks inside the contract: it only needs the ABI and a way to deploy
/// it with a parameter tuple. Deployment is split in two so the caller can tell a rejected
/// submission from a wait on the receipt.
#[allow(async_fn_in_trait)]
pub trait ContractFactory {
    /// Handle to a sent but not yet confirmed deployment.
    type Pending;

    fn abi(&self) -> &JsonAbi;

    async fn submit(
        &self,
        signer: &ProvisionedSigner,
        params: &DeploymentParameters,
    ) -> Result<Self::Pending, DeploymentError>;

    async fn confirm(&self, pending: Self::Pending) -> Result<DeployedContract, DeploymentError>;
}

/// Hardhat-format compiled contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledContract {
    #[serde(default)]
    pub contract_name: String,
    pub abi: JsonAbi,
    #[serde(default)]
    pub bytecode: Bytes,
}

impl CompiledContract {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeploymentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("could not read compiled contract {}", path.display()))
            .map_err(DeploymentError::LoadContract)?;
        let contract: Self = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("could not parse compiled contract {}", path.display()))
            .map_err(DeploymentError::LoadContract)?;
        debug!(@grey, "loaded compiled contract {} from {}", contract.contract_name, path.display());
        Ok(contract)
    }

    /// Creation bytecode followed by the ABI-encoded constructor arguments.
    pub fn creation_code(&self, params: &DeploymentParameters) -> Result<Bytes, DeploymentError> {
        if self.bytecode.is_empty() {
            return Err(DeploymentError::MissingBytecode(self.contract_name.clone()));
        }
        let args = encode_constructor_args(self.abi.constructor(), &params.constructor_args())?;
        let mut code = self.bytecode.to_vec();
        code.extend(args);
        Ok(code.into())
    }
}

/// Encodes string arguments against the constructor's declared input types.
pub fn encode_constructor_args(
    constructor: Option<&Constructor>,
    args: &[String],
) -> Result<Vec<u8>, DeploymentError> {
    let Some(constructor) = constructor else {
        if args.is_empty() {
            return Ok(Vec::new());
        }
        return Err(DeploymentError::InvalidConstructor(format!(
            "contract has no constructor but {} arguments were given",
            args.len()
        )));
    };
    if args.len() != constructor.inputs.len() {
        return Err(DeploymentError::InvalidConstructor(format!(
            "wrong number of constructor arguments (want {}; got {})",
            constructor.inputs.len(),
            args.len(),
        )));
    }

    let mut values = Vec::<DynSolValue>::with_capacity(args.len());
    for (arg, param) in args.iter().zip(constructor.inputs.iter()) {
        let value = param
            .resolve()
            .and_then(|ty| ty.coerce_str(arg))
            .map_err(|err| {
                DeploymentError::InvalidConstructor(format!(
                    "could not encode {arg} as {} {}: {err}",
                    param.ty, param.name
                ))
            })?;
        values.push(value);
    }
    constructor
        .abi_encode_input(&values)
        .map_err(|err| DeploymentError::InvalidConstructor(err.to_string()))
}

/// Human-readable signatures of every ABI entry.
///
/// The constructor comes first, then fallback and receive, then functions, events and errors.
/// Within each kind entries are sorted by name, since [`JsonAbi`] does not keep the order of the
/// compiled artifact.
pub fn format_abi(abi: &JsonAbi) -> Vec<String> {
    let mut entries = Vec::new();
    if let Some(constructor) = &abi.constructor {
        let payable = if constructor.state_mutability == StateMutability::Payable {
            " payable"
        } else {
            ""
        };
        entries.push(format!(
            "constructor({}){payable}",
            format_params(&constructor.inputs)
        ));
    }
    if let Some(fallback) = &abi.fallback {
        let payable = if fallback.state_mutability == StateMutability::Payable {
            " payable"
        } else {
            ""
        };
        entries.push(format!("fallback(){payable}"));
    }
    if abi.receive.is_some() {
        entries.push("receive() payable".to_owned());
    }
    entries.extend(abi.functions().map(|f| f.full_signature()));
    entries.extend(abi.events().map(|e| e.full_signature()));
    entries.extend(
        abi.errors()
            .map(|e| format!("error {}({})", e.name, format_params(&e.inputs))),
    );
    entries
}

fn format_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| {
            let ty = param.selector_type();
            if param.name.is_empty() {
                ty.into_owned()
            } else {
                format!("{ty} {}", param.name)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod tests {
    use alloy::primitives::{address, U256};

    use super::*;

    pub(crate) const AUCTION_ABI: &str = r#"[
        {
            "type": "constructor",
            "stateMutability": "nonpayable",
            "inputs": [
                {"name": "_serviceWallet", "type": "address", "internalType": "address"},
                {"name": "_chainId", "type": "uint256", "internalType": "uint256"},
                {"name": "_revealDuration", "type": "uint256", "internalType": "uint256"},
                {"name": "_maxBids", "type": "uint256", "internalType": "uint256"},
                {"name": "_feePercent", "type": "uint256", "internalType": "uint256"}
            ]
        },
        {
            "type": "function",
            "name": "bid",
            "stateMutability": "payable",
            "inputs": [{"name": "commitment", "type": "bytes32", "internalType": "bytes32"}],
            "outputs": []
        },
        {
            "type": "function",
            "name": "maxBids",
            "stateMutability": "view",
            "inputs": [],
            "outputs": [{"name": "", "type": "uint256", "internalType": "uint256"}]
        },
        {
            "type": "event",
            "name": "BidPlaced",
            "anonymous": false,
            "inputs": [
                {"name": "bidder", "type": "address", "indexed": true, "internalType": "address"},
                {"name": "commitment", "type": "bytes32", "indexed": false, "internalType": "bytes32"}
            ]
        },
        {
            "type": "error",
            "name": "TooManyBids",
            "inputs": [{"name": "maxBids", "type": "uint256", "internalType": "uint256"}]
        }
    ]"#;

    pub(crate) fn auction_abi() -> JsonAbi {
        serde_json::from_str(AUCTION_ABI).unwrap()
    }

    fn params() -> DeploymentParameters {
        DeploymentParameters::builder()
            .service_wallet(address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8"))
            .chain_id(23295)
            .build()
    }

    #[test]
    fn loads_hardhat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Auction.json");
        let json = format!(
            r#"{{"_format": "hh-sol-artifact-1", "contractName": "Auction", "abi": {AUCTION_ABI}, "bytecode": "0x6080", "deployedBytecode": "0x"}}"#
        );
        fs::write(&path, json).unwrap();

        let contract = CompiledContract::load(&path).unwrap();
        assert_eq!(contract.contract_name, "Auction");
        assert_eq!(contract.bytecode, Bytes::from_static(&[0x60, 0x80]));
        assert_eq!(contract.abi.constructor().unwrap().inputs.len(), 5);
    }

    #[test]
    fn missing_artifact_is_an_error() {
        let err = CompiledContract::load("/nonexistent/Auction.json").unwrap_err();
        assert!(matches!(err, DeploymentError::LoadContract(_)));
    }

    #[test]
    fn creation_code_appends_constructor_args() {
        let contract = CompiledContract {
            contract_name: "Auction".to_owned(),
            abi: auction_abi(),
            bytecode: Bytes::from_static(&[0x60, 0x80]),
        };
        let code = contract.creation_code(&params()).unwrap();
        assert_eq!(code.len(), 2 + 5 * 32);
        assert_eq!(&code[..2], &[0x60, 0x80]);

        let words: Vec<U256> = code[2..]
            .chunks(32)
            .map(|word| U256::from_be_slice(word))
            .collect();
        assert_eq!(
            words[0],
            U256::from_be_slice(
                address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8").as_slice()
            )
        );
        assert_eq!(words[1], U256::from(23295));
        assert_eq!(words[2], U256::from(1000));
        assert_eq!(words[3], U256::from(1000));
        assert_eq!(words[4], U256::from(1));
    }

    #[test]
    fn empty_bytecode_is_rejected() {
        let contract = CompiledContract {
            contract_name: "IAuction".to_owned(),
            abi: auction_abi(),
            bytecode: Bytes::new(),
        };
        let err = contract.creation_code(&params()).unwrap_err();
        assert!(matches!(err, DeploymentError::MissingBytecode(name) if name == "IAuction"));
    }

    #[test]
    fn constructor_arity_is_checked() {
        let abi = auction_abi();
        let err = encode_constructor_args(abi.constructor(), &["1".to_owned()]).unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidConstructor(_)));

        let err = encode_constructor_args(None, &["1".to_owned()]).unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidConstructor(_)));
        assert!(encode_constructor_args(None, &[]).unwrap().is_empty());
    }

    #[test]
    fn constructor_types_are_checked() {
        let abi = auction_abi();
        let args = ["not-an-address", "1", "2", "3", "4"].map(str::to_owned);
        let err = encode_constructor_args(abi.constructor(), &args).unwrap_err();
        assert!(matches!(err, DeploymentError::InvalidConstructor(_)));
    }

    #[test]
    fn formats_abi_in_order() {
        let entries = format_abi(&auction_abi());
        assert_eq!(entries.len(), 5);
        assert_eq!(
            entries[0],
            "constructor(address _serviceWallet, uint256 _chainId, uint256 _revealDuration, \
             uint256 _maxBids, uint256 _feePercent)"
        );
        assert!(entries[1].starts_with("function bid(bytes32 commitment)"));
        assert!(entries[2].starts_with("function maxBids()"));
        assert!(entries[3].starts_with("event BidPlaced("));
        assert_eq!(entries[4], "error TooManyBids(uint256 maxBids)");
    }
}
