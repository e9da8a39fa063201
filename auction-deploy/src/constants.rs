// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use auction_tools::core::{
    factory::DEFAULT_ARTIFACT_PATH,
    network::DEFAULT_NETWORK,
    signers::{DEFAULT_SIGNER_COUNT, TEST_MNEMONIC},
};
