// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

//! Canonical serialization of a filesystem tree into a single byte stream.
//!
//! The stream records only file contents, the owner-executable bit,
//! symlink targets and directory structure, so that the same tree
//! always serializes (and therefore hashes) to the same bytes.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fs::Metadata;
use std::io::{Read, Write};
use std::path::Path;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./archive_test.rs"]
mod archive_test;

/// The header that begins every archive stream
pub const ARCHIVE_VERSION_MAGIC: &str = "nix-archive-1";

/// Strings and contents are zero-padded to a multiple of this many bytes
const ALIGNMENT: usize = 8;
const PADDING: [u8; ALIGNMENT] = [0; ALIGNMENT];

/// Decides which paths are included when serializing a tree.
///
/// The root path given to [`dump_path`] is always included,
/// the filter is consulted for everything below it.
pub trait PathFilter {
    fn admits(&self, path: &Path) -> bool;
}

impl<F> PathFilter for F
where
    F: Fn(&Path) -> bool,
{
    fn admits(&self, path: &Path) -> bool {
        self(path)
    }
}

/// The default filter, which includes every path
#[derive(Debug, Default, Clone, Copy)]
pub struct AllPaths;

impl PathFilter for AllPaths {
    fn admits(&self, _path: &Path) -> bool {
        true
    }
}

/// Write an unsigned integer to the given archive stream.
pub fn write_uint(mut writer: impl Write, value: u64) -> Result<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

/// Write a length-prefixed, padded byte string to the given archive stream.
pub fn write_bytes(mut writer: impl Write, bytes: &[u8]) -> Result<()> {
    write_uint(&mut writer, bytes.len() as u64)?;
    writer.write_all(bytes)?;
    write_padding(writer, bytes.len() as u64)
}

/// Write a length-prefixed, padded string to the given archive stream.
pub fn write_string(writer: impl Write, string: &str) -> Result<()> {
    write_bytes(writer, string.as_bytes())
}

fn write_padding(mut writer: impl Write, len: u64) -> Result<()> {
    let remainder = (len % ALIGNMENT as u64) as usize;
    if remainder > 0 {
        writer.write_all(&PADDING[remainder..])?;
    }
    Ok(())
}

/// Serialize the regular file, directory or symlink at `path`.
///
/// Directory entries are written in byte order of their names, and
/// only those admitted by `filter` are included.
pub fn dump_path<F>(path: impl AsRef<Path>, filter: &F, mut writer: impl Write) -> Result<()>
where
    F: PathFilter + ?Sized,
{
    let path = path.as_ref();
    tracing::debug!(?path, "serializing archive");
    write_string(&mut writer, ARCHIVE_VERSION_MAGIC)?;
    dump_node(path, filter, &mut writer)
}

/// Serialize the given bytes as if they were the contents of a
/// single, non-executable regular file.
pub fn dump_string(contents: &[u8], mut writer: impl Write) -> Result<()> {
    write_string(&mut writer, ARCHIVE_VERSION_MAGIC)?;
    for token in ["(", "type", "regular", "contents"] {
        write_string(&mut writer, token)?;
    }
    write_bytes(&mut writer, contents)?;
    write_string(writer, ")")
}

fn dump_node<F, W>(path: &Path, filter: &F, writer: &mut W) -> Result<()>
where
    F: PathFilter + ?Sized,
    W: Write,
{
    let metadata = std::fs::symlink_metadata(path)?;
    let file_type = metadata.file_type();

    write_string(&mut *writer, "(")?;
    write_string(&mut *writer, "type")?;
    if file_type.is_symlink() {
        tracing::trace!(?path, "archiving symlink");
        let target = std::fs::read_link(path)?;
        write_string(&mut *writer, "symlink")?;
        write_string(&mut *writer, "target")?;
        write_bytes(&mut *writer, &os_bytes(target.as_os_str()))?;
    } else if file_type.is_dir() {
        tracing::trace!(?path, "archiving directory");
        write_string(&mut *writer, "directory")?;
        let mut names = Vec::new();
        for dir_entry in std::fs::read_dir(path)? {
            names.push(dir_entry?.file_name());
        }
        names.sort_by(|a, b| os_bytes(a).cmp(&os_bytes(b)));
        for name in names {
            let child = path.join(&name);
            if !filter.admits(&child) {
                tracing::trace!(path = ?child, "excluded by filter");
                continue;
            }
            write_string(&mut *writer, "entry")?;
            write_string(&mut *writer, "(")?;
            write_string(&mut *writer, "name")?;
            write_bytes(&mut *writer, &os_bytes(&name))?;
            write_string(&mut *writer, "node")?;
            dump_node(&child, filter, writer)?;
            write_string(&mut *writer, ")")?;
        }
    } else if file_type.is_file() {
        tracing::trace!(?path, "archiving file");
        write_string(&mut *writer, "regular")?;
        if is_executable(&metadata) {
            write_string(&mut *writer, "executable")?;
            write_string(&mut *writer, "")?;
        }
        write_string(&mut *writer, "contents")?;
        dump_contents(path, metadata.len(), writer)?;
    } else {
        return Err(Error::UnsupportedFileType(path.to_owned()));
    }
    write_string(writer, ")")
}

/// Stream the contents of a regular file, which must still
/// be exactly `size` bytes long.
fn dump_contents<W: Write>(path: &Path, size: u64, writer: &mut W) -> Result<()> {
    write_uint(&mut *writer, size)?;
    let file = std::fs::File::open(path)?;
    let mut reader = file.take(size);
    let copied = std::io::copy(&mut reader, &mut *writer)?;
    // the file must not have grown either
    if copied != size || reader.into_inner().read(&mut [0u8])? != 0 {
        return Err(Error::FileChanged(path.to_owned()));
    }
    write_padding(writer, size)
}

#[cfg(unix)]
fn is_executable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &Metadata) -> bool {
    false
}

#[cfg(unix)]
fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(s.as_bytes())
}

#[cfg(not(unix))]
fn os_bytes(s: &OsStr) -> Cow<'_, [u8]> {
    match s.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
