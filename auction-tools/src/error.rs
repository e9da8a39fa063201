// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::core::{
    deployment::DeploymentError, network::NetworkError, pipeline::PipelineError,
    signers::SignerError,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("{0}")]
    Network(#[from] NetworkError),
    #[error("{0}")]
    Signer(#[from] SignerError),
    #[error("{0}")]
    Deployment(#[from] DeploymentError),
    #[error("{0}")]
    Pipeline(#[from] PipelineError),
}

/// Captured output of an external helper process.
#[derive(Debug)]
pub struct ProcessOutput {
    pub process_name: String,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

#[derive(Debug, thiserror::Error)]
#[error(
    "{name} failed (exit code: {code:?}): {stderr}",
    name = .0.process_name,
    code = .0.exit_code,
    stderr = .0.stderr.trim(),
)]
pub struct CommandFailure(pub ProcessOutput);

impl CommandFailure {
    pub fn check(
        process_name: impl Into<String>,
        output: std::process::Output,
    ) -> Result<String, Self> {
        let process_output = ProcessOutput {
            process_name: process_name.into(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };
        if output.status.success() {
            Ok(process_output.stdout)
        } else {
            Err(CommandFailure(process_output))
        }
    }
}
