// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Deterministic signer provisioning.
//!
//! Signers are derived from a seed phrase along `m/44'/60'/0'/0/{index}`. Whether they are
//! wrapped with a [`CalldataEnvelope`] is decided once per run by [`SignerMode::for_chain`] and
//! applied to the whole set.

use std::sync::Arc;

use alloy::{
    network::EthereumWallet,
    primitives::{Address, Bytes, ChainId},
    signers::{
        local::{coins_bip39::English, LocalSignerError, MnemonicBuilder, PrivateKeySigner},
        Signer,
    },
};

use crate::core::{
    envelope::{CalldataEnvelope, EnvelopeError},
    network::CONFIDENTIAL_CHAIN_ID,
};

/// Public development mnemonic shared by every network profile.
pub const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

/// Deployer, service wallet and six auxiliary accounts.
pub const DEFAULT_SIGNER_COUNT: u32 = 8;

/// Chains whose signers must be wrapped with a confidentiality envelope.
static CONFIDENTIAL_CHAINS: &[ChainId] = &[CONFIDENTIAL_CHAIN_ID];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignerMode {
    Plain,
    Confidential,
}

impl SignerMode {
    pub fn for_chain(chain_id: ChainId) -> Self {
        if CONFIDENTIAL_CHAINS.contains(&chain_id) {
            Self::Confidential
        } else {
            Self::Plain
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("failed to derive signer {index}: {source}")]
    Derivation {
        index: u32,
        source: LocalSignerError,
    },
    #[error("at least 2 signers are required (deployer and service wallet), got {0}")]
    TooFewSigners(u32),
    #[error(
        "chain {0} requires a confidentiality envelope, refusing to provision plaintext signers"
    )]
    MissingEnvelope(ChainId),
}

/// Signer paired with the envelope of a confidential network.
#[derive(Debug, Clone)]
pub struct ConfidentialSigner {
    signer: PrivateKeySigner,
    envelope: Arc<dyn CalldataEnvelope>,
}

impl ConfidentialSigner {
    pub fn wrap(signer: PrivateKeySigner, envelope: Arc<dyn CalldataEnvelope>) -> Self {
        Self { signer, envelope }
    }

    pub fn envelope(&self) -> &dyn CalldataEnvelope {
        self.envelope.as_ref()
    }
}

#[derive(Debug, Clone)]
pub enum ProvisionedSigner {
    Plain(PrivateKeySigner),
    Confidential(ConfidentialSigner),
}

impl ProvisionedSigner {
    pub fn address(&self) -> Address {
        self.signer().address()
    }

    pub fn signer(&self) -> &PrivateKeySigner {
        match self {
            Self::Plain(signer) => signer,
            Self::Confidential(wrapped) => &wrapped.signer,
        }
    }

    pub fn is_confidential(&self) -> bool {
        matches!(self, Self::Confidential(_))
    }

    /// Wallet signing with this key, bound to `chain_id`.
    pub fn wallet(&self, chain_id: ChainId) -> EthereumWallet {
        EthereumWallet::new(self.signer().clone().with_chain_id(Some(chain_id)))
    }

    /// Prepares an outgoing payload, sealing it on a confidential network.
    pub fn seal(&self, calldata: Bytes) -> Result<Bytes, EnvelopeError> {
        match self {
            Self::Plain(_) => Ok(calldata),
            Self::Confidential(wrapped) => wrapped.envelope.seal(&calldata),
        }
    }

    /// Decodes returned data, opening it on a confidential network.
    pub fn open(&self, data: Bytes) -> Result<Bytes, EnvelopeError> {
        match self {
            Self::Plain(_) => Ok(data),
            Self::Confidential(wrapped) => wrapped.envelope.open(&data),
        }
    }
}

/// Ordered signers of a run: deployer first, service wallet second.
#[derive(Debug, Clone)]
pub struct SignerSet {
    mode: SignerMode,
    signers: Vec<ProvisionedSigner>,
}

impl SignerSet {
    pub fn mode(&self) -> SignerMode {
        self.mode
    }

    pub fn deployer(&self) -> &ProvisionedSigner {
        &self.signers[0]
    }

    pub fn service_wallet(&self) -> &ProvisionedSigner {
        &self.signers[1]
    }

    pub fn auxiliary(&self) -> &[ProvisionedSigner] {
        &self.signers[2..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProvisionedSigner> {
        self.signers.iter()
    }

    pub fn addresses(&self) -> Vec<Address> {
        self.iter().map(ProvisionedSigner::address).collect()
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct SignerProvisioner {
    mnemonic: String,
    count: u32,
}

impl Default for SignerProvisioner {
    fn default() -> Self {
        Self::new(TEST_MNEMONIC, DEFAULT_SIGNER_COUNT)
    }
}

impl SignerProvisioner {
    pub fn new(mnemonic: impl Into<String>, count: u32) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            count,
        }
    }

    /// Derives the unwrapped keys in index order.
    pub fn derive(&self) -> Result<Vec<PrivateKeySigner>, SignerError> {
        if self.count < 2 {
            return Err(SignerError::TooFewSigners(self.count));
        }
        (0..self.count)
            .map(|index| {
                MnemonicBuilder::<English>::default()
                    .phrase(self.mnemonic.as_str())
                    .index(index)
                    .and_then(|builder| builder.build())
                    .map_err(|source| SignerError::Derivation { index, source })
            })
            .collect()
    }

    /// Derives the signer set for `chain_id`, wrapping every signer on a confidential chain.
    pub fn provision(
        &self,
        chain_id: ChainId,
        envelope: Option<Arc<dyn CalldataEnvelope>>,
    ) -> Result<SignerSet, SignerError> {
        let mode = SignerMode::for_chain(chain_id);
        let wrap: Box<dyn Fn(PrivateKeySigner) -> ProvisionedSigner> = match (mode, envelope) {
            (SignerMode::Plain, _) => Box::new(ProvisionedSigner::Plain),
            (SignerMode::Confidential, Some(envelope)) => Box::new(move |signer| {
                ProvisionedSigner::Confidential(ConfidentialSigner::wrap(signer, envelope.clone()))
            }),
            (SignerMode::Confidential, None) => return Err(SignerError::MissingEnvelope(chain_id)),
        };
        let signers = self.derive()?.into_iter().map(wrap).collect();
        debug!(@grey, "provisioned {} {:?} signers for chain {}", self.count, mode, chain_id);
        Ok(SignerSet { mode, signers })
    }
}
