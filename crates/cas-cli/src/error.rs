// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use miette::Diagnostic;
use thiserror::Error;

#[derive(Diagnostic, Debug, Error)]
#[diagnostic(
    url(
        "https://spkenv.dev/error_codes#{}",
        self.code().unwrap_or_else(|| Box::new("cas::generic"))
    )
)]
pub enum Error {
    #[error("Cannot load config, lock has been poisoned: {0}")]
    LockPoisonedRead(String),
    #[error("Cannot update config, lock has been poisoned: {0}")]
    LockPoisonedWrite(String),

    #[error("Invalid exclude pattern '{0}'")]
    #[diagnostic(
        code("cas::invalid_pattern"),
        help("patterns use shell glob syntax, eg: '*.log' or '**/target'")
    )]
    InvalidPattern(String, #[source] glob::PatternError),

    #[error("Failed to initialize output log")]
    Logging(#[source] tracing::subscriber::SetGlobalDefaultError),

    #[error(transparent)]
    Encoding(#[from] cas_encoding::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
