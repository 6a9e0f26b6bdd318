// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

//! Hash values for content-addressed storage.
//!
//! A [`Hash`] pairs a digest with the [`Algorithm`] that produced it
//! and can be written and parsed as base-16, nix32, base-64 or
//! Subresource Integrity strings (see [`HashFormat`]).

pub mod algorithm;
pub mod archive;
pub mod codec;
mod error;
mod format;
mod hash;
mod hashing;
pub mod prelude;
mod sink;

pub use algorithm::{
    Algorithm, MAX_DIGEST_SIZE, parse_hash_type, parse_hash_type_opt, print_hash_type,
};
pub use archive::{AllPaths, PathFilter, dump_path, dump_string};
pub use error::{Error, Result};
pub use format::{HashFormat, parse_hash_format, parse_hash_format_opt, print_hash_format};
pub use hash::{CompressedHash, Hash, compress_hash, new_hash_allow_empty};
pub use hashing::{
    hash_async_reader, hash_file, hash_path, hash_path_filtered, hash_reader, hash_string,
};
pub use sink::{Context, HashResult, HashSink};
