// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::algorithm::MAX_DIGEST_SIZE;
use crate::{Algorithm, Error, HashFormat, Result, codec};

#[cfg(test)]
#[path = "./hash_test.rs"]
mod hash_test;

/// The number of base-16 characters in a short git-style revision
const SHORT_REV_LEN: usize = 7;

/// Hash is the digest of some data along with the algorithm that produced it.
///
/// The default value of any algorithm is the zero hash, where
/// every digest byte is zero. It is a normal, comparable value.
///
/// Hashes order first by algorithm and then by their digest bytes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct Hash {
    algorithm: Algorithm,
    // bytes past algorithm.size() are always zero
    digest: [u8; MAX_DIGEST_SIZE],
}

impl Default for Hash {
    fn default() -> Self {
        Self::new(Algorithm::default())
    }
}

impl std::ops::Deref for Hash {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<Hash> for Hash {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Hash {
    /// Create the zero hash for the given algorithm.
    pub const fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            digest: [0; MAX_DIGEST_SIZE],
        }
    }

    /// Create a hash from the raw digest bytes of the given algorithm.
    ///
    /// Exactly [`Algorithm::size`] bytes must be given.
    pub fn from_slice(algorithm: Algorithm, digest: &[u8]) -> Result<Self> {
        if digest.len() != algorithm.size() {
            return Err(Error::bad_hash(format!(
                "hash has wrong length {} for hash type '{algorithm}'",
                digest.len()
            )));
        }
        Ok(Self::from_digest(algorithm, digest))
    }

    /// The caller guarantees that the digest is the right length.
    pub(crate) fn from_digest(algorithm: Algorithm, digest: &[u8]) -> Self {
        let mut hash = Self::new(algorithm);
        hash.digest[..algorithm.size()].copy_from_slice(digest);
        hash
    }

    /// The algorithm that produced this hash
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Yields a view of the digest bytes of this hash
    pub fn as_bytes(&self) -> &[u8] {
        &self.digest[..self.algorithm.size()]
    }

    /// True if every digest byte is zero
    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|b| *b == 0)
    }

    /// The length of a base-16 representation of this hash
    pub fn base16_len(&self) -> usize {
        self.algorithm.base16_len()
    }

    /// The length of a nix32 representation of this hash
    pub fn base32_len(&self) -> usize {
        self.algorithm.base32_len()
    }

    /// The length of a base-64 representation of this hash
    pub fn base64_len(&self) -> usize {
        self.algorithm.base64_len()
    }

    /// Render this hash in the requested format.
    ///
    /// When `include_type` is set, the result is prefixed with
    /// `<algorithm>:`. [`HashFormat::Sri`] always includes the
    /// algorithm, as `<algorithm>-<base64>`.
    pub fn encode(&self, format: HashFormat, include_type: bool) -> String {
        encode_digest(self.algorithm, self.as_bytes(), format, include_type)
    }

    /// The unprefixed base-16 form, as used for git revisions
    pub fn git_rev(&self) -> String {
        self.encode(HashFormat::Base16, false)
    }

    /// The first seven characters of [`Hash::git_rev`]
    pub fn git_short_rev(&self) -> String {
        let mut rev = self.git_rev();
        rev.truncate(SHORT_REV_LEN);
        rev
    }

    /// Render md5 hashes in base-16 and all others in nix32,
    /// without a type prefix.
    pub fn to_string_16_or_32(&self) -> String {
        let format = match self.algorithm {
            Algorithm::Md5 => HashFormat::Base16,
            _ => HashFormat::Nix32,
        };
        self.encode(format, false)
    }

    /// Parse a hash of the form `[<type>:]<base16|nix32|base64>`
    /// or `<type>-<base64>` (Subresource Integrity).
    ///
    /// When no type prefix is present, the algorithm must be provided.
    /// When both are present they must agree.
    pub fn parse_any(s: &str, algorithm: Option<Algorithm>) -> Result<Self> {
        match split_type_prefix(s)? {
            Some((prefix, is_sri, body)) => {
                if let Some(expected) = algorithm {
                    if expected != prefix {
                        return Err(Error::bad_hash(format!(
                            "hash '{s}' should have type '{expected}'"
                        )));
                    }
                }
                Self::from_body(body, prefix, is_sri)
            }
            None => match algorithm {
                Some(algorithm) => Self::from_body(s, algorithm, false),
                None => Err(Error::bad_hash(format!(
                    "hash '{s}' does not include a type, nor is the type otherwise known from context"
                ))),
            },
        }
    }

    /// Like [`Hash::parse_any`], but the type prefix is mandatory.
    pub fn parse_any_prefixed(s: &str) -> Result<Self> {
        match split_type_prefix(s)? {
            Some((algorithm, is_sri, body)) => Self::from_body(body, algorithm, is_sri),
            None => Err(Error::bad_hash(format!(
                "hash '{s}' does not include a type"
            ))),
        }
    }

    /// Parse a hash of the form `<type>:<base16|nix32|base64>`.
    pub fn parse_non_sri_prefixed(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((prefix, body)) => Self::from_body(body, Algorithm::parse(prefix)?, false),
            None => Err(Error::bad_hash(format!(
                "hash '{s}' does not include a type"
            ))),
        }
    }

    /// Parse a plain hash with no type prefix, where the
    /// algorithm is known from context.
    pub fn parse_non_sri_unprefixed(s: &str, algorithm: Algorithm) -> Result<Self> {
        Self::from_body(s, algorithm, false)
    }

    /// Parse a Subresource Integrity hash of the form `<type>-<base64>`.
    pub fn parse_sri(s: &str) -> Result<Self> {
        match s.split_once('-') {
            Some((prefix, body)) => Self::from_body(body, Algorithm::parse(prefix)?, true),
            None => Err(Error::bad_hash(format!("hash '{s}' is not SRI"))),
        }
    }

    /// Decode an unprefixed hash body, identifying the
    /// encoding by its length.
    fn from_body(body: &str, algorithm: Algorithm, is_sri: bool) -> Result<Self> {
        let decoded = if !is_sri && body.len() == algorithm.base16_len() {
            codec::decode_base16(body)?
        } else if !is_sri && body.len() == algorithm.base32_len() {
            codec::decode_base32(body, algorithm.size())?
        } else if is_sri || body.len() == algorithm.base64_len() {
            let decoded = codec::decode_base64(body)?;
            if decoded.len() != algorithm.size() {
                let kind = if is_sri { "SRI" } else { "base-64" };
                return Err(Error::bad_hash(format!("invalid {kind} hash '{body}'")));
            }
            decoded
        } else {
            return Err(Error::bad_hash(format!(
                "hash '{body}' has wrong length for hash type '{algorithm}'"
            )));
        };
        Self::from_slice(algorithm, &decoded)
    }

    /// Fold this hash into `size` bytes, see [`compress_hash`].
    pub fn compress(&self, size: usize) -> CompressedHash {
        compress_hash(self, size)
    }
}

/// Split `<type>:` or `<type>-` off the front of a hash string.
///
/// The boolean is true for the SRI (`-`) form.
fn split_type_prefix(s: &str) -> Result<Option<(Algorithm, bool, &str)>> {
    let (prefix, is_sri, body) = if let Some((prefix, body)) = s.split_once(':') {
        (prefix, false, body)
    } else if let Some((prefix, body)) = s.split_once('-') {
        (prefix, true, body)
    } else {
        return Ok(None);
    };
    Ok(Some((Algorithm::parse(prefix)?, is_sri, body)))
}

fn encode_digest(
    algorithm: Algorithm,
    digest: &[u8],
    format: HashFormat,
    include_type: bool,
) -> String {
    let body = match format {
        HashFormat::Base16 => codec::encode_base16(digest),
        HashFormat::Nix32 => codec::encode_base32(digest),
        HashFormat::Base64 | HashFormat::Sri => codec::encode_base64(digest),
    };
    match format {
        HashFormat::Sri => format!("{algorithm}-{body}"),
        _ if include_type => format!("{algorithm}:{body}"),
        _ => body,
    }
}

impl std::fmt::Debug for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hash")
            .field("algorithm", &self.algorithm)
            .field("digest", &format_args!("{self:#}"))
            .finish()
    }
}

/// Hashes display as `<type>:<nix32>`, or as only the
/// nix32 digest with the alternate (`{:#}`) flag.
impl Display for Hash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let include_type = !f.alternate();
        f.write_str(&self.encode(HashFormat::Nix32, include_type))
    }
}

impl std::str::FromStr for Hash {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_any_prefixed(s)
    }
}

impl TryFrom<&str> for Hash {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse_any_prefixed(s)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode(HashFormat::Sri, true))
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        /// Visits a serialized string, decoding it as a prefixed hash
        struct HashVisitor;

        impl serde::de::Visitor<'_> for HashVisitor {
            type Value = Hash;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a hash with a type prefix, eg: sha256-<base64>")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Hash, E>
            where
                E: serde::de::Error,
            {
                Hash::parse_any_prefixed(value).map_err(|_| {
                    serde::de::Error::invalid_value(serde::de::Unexpected::Str(value), &self)
                })
            }
        }
        deserializer.deserialize_str(HashVisitor)
    }
}

/// Treat an empty string as the zero hash of the given algorithm,
/// otherwise parse it as in [`Hash::parse_any`].
pub fn new_hash_allow_empty(s: &str, algorithm: Option<Algorithm>) -> Result<Hash> {
    if !s.is_empty() {
        return Hash::parse_any(s, algorithm);
    }
    let Some(algorithm) = algorithm else {
        return Err(Error::bad_hash("empty hash requires explicit hash type"));
    };
    let hash = Hash::new(algorithm);
    tracing::warn!(
        "found empty hash, assuming '{}'",
        hash.encode(HashFormat::Sri, true)
    );
    Ok(hash)
}

/// The bytes of a [`Hash`] after being folded down to a smaller size.
///
/// The length of these bytes does not match the digest size of
/// the algorithm, so this is deliberately not a [`Hash`] and cannot
/// be parsed back into one.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct CompressedHash {
    algorithm: Algorithm,
    bytes: Vec<u8>,
}

impl CompressedHash {
    /// The algorithm of the hash that was compressed
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Render these bytes in the requested format, see [`Hash::encode`].
    pub fn encode(&self, format: HashFormat, include_type: bool) -> String {
        encode_digest(self.algorithm, &self.bytes, format, include_type)
    }
}

impl std::ops::Deref for CompressedHash {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl AsRef<[u8]> for CompressedHash {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Compressed hashes display as bare nix32, as used in store path names.
impl Display for CompressedHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&codec::encode_base32(&self.bytes))
    }
}

/// Compress a hash to `size` bytes by cyclically XORing its bytes together.
///
/// When `size` is at least the digest size, the digest is copied
/// unchanged and the remainder is zero.
///
/// # Panics
///
/// If `size` is zero.
pub fn compress_hash(hash: &Hash, size: usize) -> CompressedHash {
    assert!(size > 0, "cannot compress a hash to zero bytes");
    let mut bytes = vec![0u8; size];
    for (i, byte) in hash.as_bytes().iter().enumerate() {
        bytes[i % size] ^= byte;
    }
    CompressedHash {
        algorithm: hash.algorithm(),
        bytes,
    }
}
