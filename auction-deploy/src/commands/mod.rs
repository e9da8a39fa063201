// Copyright 2025-2026, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::CliResult;

mod accounts;
mod deploy;
mod networks;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the signers derived for a network
    #[clap(visible_alias = "a")]
    Accounts(accounts::Args),
    /// Deploy the Auction contract and write its artifact
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List the known network profiles
    #[clap(visible_alias = "n")]
    Networks(networks::Args),
}

pub async fn exec(cmd: Command) -> CliResult {
    match cmd {
        Command::Accounts(args) => accounts::exec(args).await,
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Networks(args) => networks::exec(args),
    }
}
