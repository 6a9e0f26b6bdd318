// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use cas_encoding::{Algorithm, Hash, HashFormat};
use clap::Args;

use crate::Config;

/// Command line flags for choosing how hashes are computed and printed
#[derive(Args, Debug, Clone, Default)]
pub struct HashOptions {
    /// The hash algorithm to use (md5, sha1, sha256, sha512)
    ///
    /// Defaults to the configured hash.algorithm
    #[clap(long = "type", short = 't', value_name = "ALGO")]
    pub algorithm: Option<Algorithm>,

    /// The format to print hashes in (base16, nix32, base64, sri)
    ///
    /// Defaults to the configured hash.format
    #[clap(long, short = 'f', value_name = "FORMAT")]
    pub format: Option<HashFormat>,
}

impl HashOptions {
    /// The algorithm requested on the command line, or the configured default
    pub fn algorithm(&self, config: &Config) -> Algorithm {
        self.algorithm.unwrap_or(config.hash.algorithm)
    }

    /// The format requested on the command line, or the configured default
    pub fn format(&self, config: &Config) -> HashFormat {
        self.format.unwrap_or(config.hash.format)
    }

    /// Render a hash as requested.
    ///
    /// Only SRI output carries the algorithm name.
    pub fn render(&self, hash: &Hash, config: &Config) -> String {
        hash.encode(self.format(config), false)
    }
}
