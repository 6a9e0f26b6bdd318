// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[cfg(test)]
#[path = "./format_test.rs"]
mod format_test;

/// The textual encodings that a hash can be written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFormat {
    /// Padded, standard-alphabet base-64 (RFC 4648, section 4)
    Base64,
    /// The store's own base-32 alphabet and bit packing
    #[serde(alias = "base32")]
    Nix32,
    /// Lowercase hexadecimal
    Base16,
    /// `<algorithm>-<base64>`, as in a Subresource Integrity attribute
    #[default]
    Sri,
}

impl HashFormat {
    pub const ALL: [HashFormat; 4] = [
        HashFormat::Base64,
        HashFormat::Nix32,
        HashFormat::Base16,
        HashFormat::Sri,
    ];

    /// The canonical name of this format
    pub const fn name(&self) -> &'static str {
        match self {
            HashFormat::Base64 => "base64",
            HashFormat::Nix32 => "nix32",
            HashFormat::Base16 => "base16",
            HashFormat::Sri => "sri",
        }
    }

    /// Parse a format from its name.
    ///
    /// `base32` is still accepted as a legacy name for [`HashFormat::Nix32`].
    pub fn parse<S: AsRef<str>>(name: S) -> Result<Self> {
        let name = name.as_ref();
        match name {
            "base32" => Ok(HashFormat::Nix32),
            _ => Self::ALL
                .into_iter()
                .find(|format| format.name() == name)
                .ok_or_else(|| Error::bad_hash(format!("unknown hash format '{name}'"))),
        }
    }
}

impl Display for HashFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a string naming a hash format.
pub fn parse_hash_format<S: AsRef<str>>(name: S) -> Result<HashFormat> {
    HashFormat::parse(name)
}

/// Like [`parse_hash_format`], but yields nothing for unknown names.
pub fn parse_hash_format_opt<S: AsRef<str>>(name: S) -> Option<HashFormat> {
    HashFormat::parse(name).ok()
}

/// The reverse of [`parse_hash_format`].
pub fn print_hash_format(format: HashFormat) -> &'static str {
    format.name()
}
