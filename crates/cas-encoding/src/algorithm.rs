// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./algorithm_test.rs"]
mod algorithm_test;

/// The number of bytes in an md5 digest
pub const MD5_SIZE: usize = 16;
/// The number of bytes in a sha1 digest
pub const SHA1_SIZE: usize = 20;
/// The number of bytes in a sha256 digest
pub const SHA256_SIZE: usize = ring::digest::SHA256_OUTPUT_LEN;
/// The number of bytes in a sha512 digest
pub const SHA512_SIZE: usize = ring::digest::SHA512_OUTPUT_LEN;

/// The largest digest produced by any supported [`Algorithm`]
pub const MAX_DIGEST_SIZE: usize = SHA512_SIZE;

/// A supported digest algorithm.
///
/// The declaration order here is also the sort order
/// of [`crate::Hash`] values with different algorithms.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Md5,
    Sha1,
    #[default]
    Sha256,
    Sha512,
}

impl Algorithm {
    /// Every supported algorithm, in sort order
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Md5,
        Algorithm::Sha1,
        Algorithm::Sha256,
        Algorithm::Sha512,
    ];

    /// The number of bytes in a digest of this algorithm
    pub const fn size(&self) -> usize {
        match self {
            Algorithm::Md5 => MD5_SIZE,
            Algorithm::Sha1 => SHA1_SIZE,
            Algorithm::Sha256 => SHA256_SIZE,
            Algorithm::Sha512 => SHA512_SIZE,
        }
    }

    /// The canonical, lowercase name of this algorithm
    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::Md5 => "md5",
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// The length of a base-16 representation of a digest
    pub const fn base16_len(&self) -> usize {
        codec::base16_len(self.size())
    }

    /// The length of a nix32 representation of a digest
    pub const fn base32_len(&self) -> usize {
        codec::base32_len(self.size())
    }

    /// The length of a (padded) base-64 representation of a digest
    pub const fn base64_len(&self) -> usize {
        codec::base64_len(self.size())
    }

    /// Parse an algorithm from its canonical name.
    ///
    /// Names are case-sensitive, eg: `sha256` but not `SHA256`.
    pub fn parse<S: AsRef<str>>(name: S) -> Result<Self> {
        let name = name.as_ref();
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == name)
            .ok_or_else(|| Error::bad_hash(format!("unknown hash algorithm '{name}'")))
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Parse a string naming a hash algorithm.
pub fn parse_hash_type<S: AsRef<str>>(name: S) -> Result<Algorithm> {
    Algorithm::parse(name)
}

/// Like [`parse_hash_type`], but yields nothing for unknown names.
pub fn parse_hash_type_opt<S: AsRef<str>>(name: S) -> Option<Algorithm> {
    Algorithm::parse(name).ok()
}

/// The reverse of [`parse_hash_type`].
pub fn print_hash_type(algorithm: Algorithm) -> &'static str {
    algorithm.name()
}
