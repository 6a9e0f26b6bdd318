// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use clap::Args;

use crate::flags::HashOptions;
use crate::{Config, Result, Run};

/// Print the hash of some literal text
#[derive(Debug, Args)]
pub struct CmdString {
    #[clap(flatten)]
    pub hash: HashOptions,

    /// The text to hash, exactly as given
    pub text: String,
}

impl CmdString {
    pub fn line(&self, config: &Config) -> String {
        let hash = cas_encoding::hash_string(self.hash.algorithm(config), &self.text);
        self.hash.render(&hash, config)
    }
}

impl Run for CmdString {
    fn run(&mut self, config: &Config) -> Result<i32> {
        println!("{}", self.line(config));
        Ok(0)
    }
}
