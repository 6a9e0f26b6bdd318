// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::path::PathBuf;

use clap::Args;

use crate::flags::HashOptions;
use crate::{Config, Result, Run};

/// Print the hash of the contents of each file
#[derive(Debug, Args)]
pub struct CmdFile {
    #[clap(flatten)]
    pub hash: HashOptions,

    /// The files to hash
    #[clap(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl CmdFile {
    /// Compute the output line for each file, in order.
    pub fn lines(&self, config: &Config) -> Result<Vec<String>> {
        let algorithm = self.hash.algorithm(config);
        let mut lines = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let hash = cas_encoding::hash_file(algorithm, path)?;
            lines.push(self.hash.render(&hash, config));
        }
        Ok(lines)
    }
}

impl Run for CmdFile {
    fn run(&mut self, config: &Config) -> Result<i32> {
        for line in self.lines(config)? {
            println!("{line}");
        }
        Ok(0)
    }
}
