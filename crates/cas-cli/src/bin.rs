// Copyright (c) Contributors to the SPK project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/spkenv/spk

use cas_cli::{Opt, Run, configure_logging, get_config};
use clap::Parser;

fn main() {
    // because this function exits right away it does not
    // properly handle destruction of data, so we put the actual
    // logic into a separate function/scope
    std::process::exit(main2())
}

fn main2() -> i32 {
    let mut opt = Opt::parse();
    if let Err(err) = configure_logging(opt.verbose) {
        eprintln!("{:?}", miette::Report::new(err));
        return 1;
    }

    let config = match get_config() {
        Err(err) => {
            tracing::error!(err = ?err, "failed to load config");
            return 1;
        }
        Ok(config) => config,
    };

    match opt.run(&config) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:?}", miette::Report::new(err));
            1
        }
    }
}
