// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate contains the binary reading a specification from standard input
//! and writing the generated suite to standard output.

use std::fs::read_to_string;
use std::io::{self, BufWriter, Read, Write};
use std::process::exit;

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn try_main() -> Result<(), String> {
    let options = cli::parse_arguments()?;

    let level = if options.debug { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).with_writer(io::stderr).finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| e.to_string())?;

    let mut source = String::new();
    io::stdin().read_to_string(&mut source).map_err(|e| e.to_string())?;

    let mut initial_suites = Vec::with_capacity(options.initial_suites.len());
    for path in options.initial_suites.iter() {
        initial_suites.push(read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    genpairs::run(&source, &initial_suites, &options, &mut out).map_err(|e| e.to_string())?;
    out.flush().map_err(|e| e.to_string())
}

fn main() {
    if let Err(message) = try_main() {
        eprintln!("{}", message);
        exit(1);
    }
}
