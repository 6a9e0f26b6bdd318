// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use cas_encoding::{Algorithm, Hash, HashFormat};
use clap::Args;

use crate::{Config, Result, Run};

#[cfg(test)]
#[path = "./cmd_convert_test.rs"]
mod cmd_convert_test;

/// Print existing hashes in a different format
#[derive(Debug, Args)]
pub struct CmdConvert {
    /// The algorithm of any hashes given without a type prefix
    #[clap(long = "hash-algo", value_name = "ALGO")]
    pub algorithm: Option<Algorithm>,

    /// The format to convert to
    ///
    /// Defaults to the configured hash.format
    #[clap(long, value_name = "FORMAT")]
    pub to: Option<HashFormat>,

    /// The hashes to convert, in any supported format
    #[clap(required = true, value_name = "HASH")]
    pub hashes: Vec<String>,
}

impl CmdConvert {
    /// Convert each hash, in order.
    pub fn lines(&self, config: &Config) -> Result<Vec<String>> {
        let to = self.to.unwrap_or(config.hash.format);
        self.hashes
            .iter()
            .map(|input| -> Result<String> {
                let hash = Hash::parse_any(input, self.algorithm)?;
                tracing::debug!(%input, ?hash, "parsed hash");
                Ok(hash.encode(to, false))
            })
            .collect()
    }
}

impl Run for CmdConvert {
    fn run(&mut self, config: &Config) -> Result<i32> {
        for line in self.lines(config)? {
            println!("{line}");
        }
        Ok(0)
    }
}
