// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use std::path::{Path, PathBuf};

use cas_encoding::PathFilter;
use clap::Args;

use crate::flags::HashOptions;
use crate::{Config, Error, Result, Run};

#[cfg(test)]
#[path = "./cmd_path_test.rs"]
mod cmd_path_test;

/// Print the hash of the archive serialization of each path
///
/// Directories are hashed along with everything inside them,
/// including file permissions and symlinks.
#[derive(Debug, Args)]
pub struct CmdPath {
    #[clap(flatten)]
    pub hash: HashOptions,

    /// Leave out entries matching this glob, either by
    /// file name or by path relative to the root being hashed
    #[clap(long, short = 'x', value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Also print the size of the serialized archive
    #[clap(long, short)]
    pub size: bool,

    /// The files or directories to hash
    #[clap(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}

impl CmdPath {
    /// Compute the output line for each path, in order.
    pub fn lines(&self, config: &Config) -> Result<Vec<String>> {
        let algorithm = self.hash.algorithm(config);
        let patterns = self
            .exclude
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern)
                    .map_err(|err| Error::InvalidPattern(pattern.clone(), err))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut lines = Vec::with_capacity(self.paths.len());
        for path in &self.paths {
            let filter = ExcludeFilter {
                root: path,
                patterns: &patterns,
            };
            let (hash, size) = cas_encoding::hash_path_filtered(algorithm, path, &filter)?;
            let mut line = self.hash.render(&hash, config);
            if self.size {
                line = format!("{line}\t{size}");
            }
            lines.push(line);
        }
        Ok(lines)
    }
}

impl Run for CmdPath {
    fn run(&mut self, config: &Config) -> Result<i32> {
        for line in self.lines(config)? {
            println!("{line}");
        }
        Ok(0)
    }
}

/// Rejects any path whose name or root-relative path matches a pattern
struct ExcludeFilter<'a> {
    root: &'a Path,
    patterns: &'a [glob::Pattern],
}

impl PathFilter for ExcludeFilter<'_> {
    fn admits(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.root).unwrap_or(path);
        let name = path.file_name().map(|name| name.to_string_lossy());
        let excluded = self.patterns.iter().any(|pattern| {
            pattern.matches_path(relative) || name.as_deref().is_some_and(|n| pattern.matches(n))
        });
        if excluded {
            tracing::debug!(?path, "excluded from archive");
        }
        !excluded
    }
}
