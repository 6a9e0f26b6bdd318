// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    /// The textual form of a hash, algorithm or format could not be used
    #[error("{0}")]
    #[diagnostic(code(cas::bad_hash))]
    BadHash(String),

    #[error("Cannot archive {0:?}: file has an unsupported type")]
    #[diagnostic(
        code(cas::unsupported_file_type),
        help("only regular files, directories and symlinks can be archived")
    )]
    UnsupportedFileType(PathBuf),

    #[error("File {0:?} changed while it was being archived")]
    #[diagnostic(code(cas::file_changed))]
    FileChanged(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn bad_hash<S: Into<String>>(message: S) -> Error {
        Error::BadHash(message.into())
    }

    /// True if this error came from parsing or validating a hash
    pub fn is_bad_hash(&self) -> bool {
        matches!(self, Error::BadHash(_))
    }
}
