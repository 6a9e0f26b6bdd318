// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tokio::io::AsyncRead;

use crate::archive::{self, AllPaths, PathFilter};
use crate::sink::{Context, HashResult, HashSink};
use crate::{Algorithm, Hash, Result};

#[cfg(test)]
#[path = "./hashing_test.rs"]
mod hashing_test;

/// Archive serialization writes many small strings, these
/// are collected into chunks of this size before being hashed.
const ARCHIVE_BUFFER_SIZE: usize = 32 * 1024;

/// Compute the hash of the given bytes.
pub fn hash_string<B: AsRef<[u8]>>(algorithm: Algorithm, data: B) -> Hash {
    let mut ctx = Context::new(algorithm);
    ctx.update(data.as_ref());
    ctx.finish()
}

/// Read the given reader to completion, returning
/// the hash of its contents and their length.
pub fn hash_reader(algorithm: Algorithm, mut reader: impl Read) -> Result<HashResult> {
    let mut sink = HashSink::new(algorithm);
    std::io::copy(&mut reader, &mut sink)?;
    Ok(sink.finish())
}

/// Read the given async reader to completion, returning
/// the hash of its contents and their length.
pub async fn hash_async_reader(
    algorithm: Algorithm,
    mut reader: impl AsyncRead + Unpin,
) -> Result<HashResult> {
    let mut sink = HashSink::new(algorithm);
    tokio::io::copy(&mut reader, &mut sink).await?;
    Ok(sink.finish())
}

/// Compute the hash of the contents of a file.
///
/// Only the contents are hashed, not metadata such as the
/// permissions of the file.
pub fn hash_file<P: AsRef<Path>>(algorithm: Algorithm, path: P) -> Result<Hash> {
    let path = path.as_ref();
    tracing::debug!(?path, %algorithm, "hashing file contents");
    let file = std::fs::File::open(path)?;
    let (hash, _) = hash_reader(algorithm, file)?;
    Ok(hash)
}

/// Compute the hash of the archive serialization of the given path,
/// returning the hash and the size of the serialization.
///
/// This is equivalent to hashing the output of [`archive::dump_path`].
pub fn hash_path<P: AsRef<Path>>(algorithm: Algorithm, path: P) -> Result<HashResult> {
    hash_path_filtered(algorithm, path, &AllPaths)
}

/// Like [`hash_path`], but only including the paths admitted by `filter`.
pub fn hash_path_filtered<P, F>(algorithm: Algorithm, path: P, filter: &F) -> Result<HashResult>
where
    P: AsRef<Path>,
    F: PathFilter + ?Sized,
{
    let path = path.as_ref();
    tracing::debug!(?path, %algorithm, "hashing path");
    let mut sink = HashSink::new(algorithm);
    {
        let mut writer = BufWriter::with_capacity(ARCHIVE_BUFFER_SIZE, &mut sink);
        archive::dump_path(path, filter, &mut writer)?;
        writer.flush()?;
    }
    let result = sink.finish();
    tracing::debug!(?path, hash = %result.0, size = result.1, "hashed path");
    Ok(result)
}
