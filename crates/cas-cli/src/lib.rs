// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

//! Command line front-end for computing and converting content hashes.

mod cli;
pub mod cmd_convert;
pub mod cmd_file;
pub mod cmd_path;
pub mod cmd_string;
mod config;
mod env;
mod error;
pub mod flags;

pub use cli::{Command, Opt, Run};
pub use config::{Config, get_config, load_config, load_config_from, user_config_path};
pub use env::{CAS_LOG, configure_logging, log_directives, resolve_directives};
pub use error::{Error, Result};
