// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk
//! Main entry points for the command line interface.

use clap::{Parser, Subcommand};

use crate::{Config, Result, cmd_convert, cmd_file, cmd_path, cmd_string};

#[cfg(test)]
#[path = "./cli_test.rs"]
mod cli_test;

/// Trait all cli commands must implement to be runnable.
pub trait Run {
    /// Execute the command, returning the process exit code
    fn run(&mut self, config: &Config) -> Result<i32>;
}

/// Compute and convert content hashes
#[derive(Debug, Parser)]
#[clap(name = "cas-hash", about)]
pub struct Opt {
    /// Make output more verbose, can be specified more than once
    #[clap(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[clap(subcommand)]
    pub cmd: Command,
}

impl Run for Opt {
    fn run(&mut self, config: &Config) -> Result<i32> {
        self.cmd.run(config)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    File(cmd_file::CmdFile),
    Path(cmd_path::CmdPath),
    Convert(cmd_convert::CmdConvert),
    #[clap(name = "string")]
    Text(cmd_string::CmdString),
}

impl Run for Command {
    fn run(&mut self, config: &Config) -> Result<i32> {
        match self {
            Command::File(cmd) => cmd.run(config),
            Command::Path(cmd) => cmd.run(config),
            Command::Convert(cmd) => cmd.run(config),
            Command::Text(cmd) => cmd.run(config),
        }
    }
}
