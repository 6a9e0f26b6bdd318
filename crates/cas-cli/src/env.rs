// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use crate::{Error, Result};

/// Extra filter directives appended to those implied by the verbosity
pub const CAS_LOG: &str = "CAS_LOG";

/// The filter directives used for the given verbosity level,
/// before any overrides from the environment are applied.
pub fn log_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "cas_cli=info,cas_encoding=warn",
        1 => "cas_cli=debug,cas_encoding=info",
        2 => "cas_cli=trace,cas_encoding=debug",
        _ => "cas_cli=trace,cas_encoding=trace",
    }
}

/// Combine the verbosity directives with overrides.
///
/// `cas_log` is appended to the defaults while `rust_log`
/// replaces everything, for debugging.
pub fn resolve_directives(verbosity: u8, cas_log: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(overrides) = rust_log {
        return overrides.to_string();
    }
    let directives = log_directives(verbosity);
    match cas_log {
        Some(extra) if !extra.is_empty() && extra != directives => {
            format!("{directives},{extra}")
        }
        _ => directives.to_string(),
    }
}

/// Install the global log subscriber, writing to stderr.
pub fn configure_logging(verbosity: u8) -> Result<()> {
    use tracing_subscriber::layer::SubscriberExt;

    let cas_log = std::env::var(CAS_LOG).ok();
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = resolve_directives(verbosity, cas_log.as_deref(), rust_log.as_deref());

    let env_filter = tracing_subscriber::filter::EnvFilter::new(directives);
    let registry = tracing_subscriber::Registry::default().with(env_filter);
    let mut fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time();
    if verbosity < 3 {
        fmt_layer = fmt_layer.with_target(false);
    }
    let sub = registry.with(fmt_layer);
    tracing::subscriber::set_global_default(sub).map_err(Error::Logging)
}
