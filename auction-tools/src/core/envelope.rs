// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Confidential-execution envelopes.
//!
//! On a confidential network every outgoing payload is sealed before it leaves the process and
//! every returned payload is opened on the way back. The envelope never touches keys: a wrapped
//! signer keeps the address and signature of the key it wraps.

use std::{
    fmt::Debug,
    path::PathBuf,
    process::{Command, Stdio},
};

use alloy::primitives::Bytes;

use crate::{error::CommandFailure, utils::decode0x};

/// Seals outgoing payloads and opens returned data for a confidential network.
pub trait CalldataEnvelope: Debug + Send + Sync {
    fn seal(&self, calldata: &Bytes) -> Result<Bytes, EnvelopeError>;

    fn open(&self, data: &Bytes) -> Result<Bytes, EnvelopeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("failed to run envelope helper {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },
    #[error("{0}")]
    CommandFailure(#[from] CommandFailure),
    #[error("envelope helper returned invalid hex: {0}")]
    InvalidOutput(#[from] hex::FromHexError),
}

/// Envelope backed by an external helper program.
///
/// The helper is invoked as `<program> [args..] seal <hex>` or `<program> [args..] open <hex>`
/// and prints the transformed payload as hex on stdout.
#[derive(Debug, Clone)]
pub struct CommandEnvelope {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandEnvelope {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn call(&self, op: &str, payload: &Bytes) -> Result<Bytes, EnvelopeError> {
        let program = self.program.display().to_string();
        debug!(@grey, "running envelope helper: {} {}", program, op);
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(op)
            .arg(hex::encode(payload))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| EnvelopeError::Spawn {
                program: program.clone(),
                source,
            })?;
        let stdout = CommandFailure::check(format!("{program} {op}"), output)?;
        Ok(decode0x(stdout)?.into())
    }
}

impl CalldataEnvelope for CommandEnvelope {
    fn seal(&self, calldata: &Bytes) -> Result<Bytes, EnvelopeError> {
        self.call("seal", calldata)
    }

    fn open(&self, data: &Bytes) -> Result<Bytes, EnvelopeError> {
        self.call("open", data)
    }
}
