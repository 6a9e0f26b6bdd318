// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use cas_encoding::{Algorithm, HashFormat};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::Result;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

/// The system-wide config file, in any format supported by the `config` crate
const SYSTEM_CONFIG: &str = "/etc/cas";
/// Environment variables with this prefix override config values
const ENV_PREFIX: &str = "CAS_";

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Hash {
    /// The algorithm used when a command is not given one explicitly
    pub algorithm: Algorithm,

    /// The format that hashes are printed in when a command
    /// is not given one explicitly
    pub format: HashFormat,
}

/// Configuration values for cas-hash.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    // These sub-types should only have one level of values
    // within them so they can be addressed with environment variables.
    pub hash: Hash,
}

impl Config {
    /// Get the current loaded config, loading it if needed
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Load the config from disk, even if it's already been loaded before
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Make this config the current global one
    pub fn make_current(self) -> Result<Arc<Self>> {
        // we may not have won the race to set the value here,
        // so it still needs to be updated after
        let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;

        let mut lock = config
            .write()
            .map_err(|err| crate::Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }
}

/// Get the current config, fetching it from disk if needed.
pub fn get_config() -> Result<Arc<Config>> {
    let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = config
        .read()
        .map_err(|err| crate::Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&*lock))
}

/// The location of the user's config file, without an extension.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cas").join("cas"))
}

/// Load the configuration from disk, even if it has already been loaded.
///
/// This includes the system and user configurations (if they exist)
/// along with any overrides from the environment.
pub fn load_config() -> Result<Config> {
    let user_config = user_config_path();
    load_config_from(
        Path::new(SYSTEM_CONFIG),
        user_config.as_deref(),
        std::env::vars(),
    )
}

/// Load the configuration from the given files and environment variables.
///
/// Later sources take precedence: the system file, then the
/// user file, then any `CAS_<SECTION>_<NAME>` variables.
pub fn load_config_from<I>(system: &Path, user: Option<&Path>, vars: I) -> Result<Config>
where
    I: IntoIterator<Item = (String, String)>,
{
    use config::{Config as RawConfig, File};

    // either file can be in any supported format: toml, yaml, json, ini, etc
    let mut config_builder = RawConfig::builder().add_source(File::from(system).required(false));
    if let Some(user) = user {
        config_builder = config_builder.add_source(File::from(user).required(false));
    }

    for (var, value) in vars {
        let Some(tail) = var.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let Some((section, name)) = tail.split_once('_') else {
            // a value with no section is not a configuration
            // value, and can be skipped (eg: CAS_LOG)
            continue;
        };

        let key = format!("{}.{}", section.to_lowercase(), name.to_lowercase());
        tracing::trace!(%var, %key, "config override from environment");
        config_builder = config_builder.set_override(key, value)?;
    }

    let config = config_builder.build()?;
    Ok(Config::deserialize(config)?)
}
