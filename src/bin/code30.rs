/*
 * Copyright (C) 2024 taylor.fish <contact@taylor.fish>
 *
 * This file is part of Code30.
 *
 * Code30 is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Code30 is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with Code30. If not, see <https://www.gnu.org/licenses/>.
 */

use std::fmt::Display;
use std::fs::File;
use std::io::{stdin, stdout, Read, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;

use clap::Parser;

use code30::io::{decode_stream_with_progress, encode_stream_with_progress};
use code30::io::{StreamResult, PROGRESS_INTERVAL};
use code30::{DecodeConfig, EncodeConfig};

#[macro_use]
mod error_exit {
    use super::{exit, Display};

    macro_rules! error_exit {
        ($($args:tt)*) => {
            crate::error_exit::__run(format_args!($($args)*));
        };
    }

    #[doc(hidden)]
    pub fn __run(args: impl Display) -> ! {
        eprintln!("\nerror: {}", args);
        if cfg!(feature = "cli-panic") {
            panic!("error: {}", args);
        } else {
            exit(1);
        }
    }
}

/// Encode binary data to German uppercase letters and back.
///
/// Reads from [FILE] (or standard input if [FILE] is missing or "-") and
/// writes the result to standard output.
#[derive(Parser, Debug)]
#[command(name = "code30", version, about)]
struct Cli {
    /// Decode data instead of encoding
    #[arg(short, long)]
    decode: bool,

    /// Number of encoded characters per line (0 for no wrapping)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    width: usize,

    /// When decoding, keep the low 8 bits of pairs that decode to values
    /// above 255 instead of failing
    #[arg(long)]
    truncate_overflow: bool,

    /// Input file
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn show_progress(bytes: u64) {
    eprint!("\rProcessed: {} MB", bytes / PROGRESS_INTERVAL);
}

fn run(cli: &Cli, input: impl Read, output: impl Write) -> StreamResult<u64> {
    let mut progress = show_progress;
    if cli.decode {
        let mut config = DecodeConfig::new();
        config.truncate_overflow = cli.truncate_overflow;
        decode_stream_with_progress(input, output, config, &mut progress)
    } else {
        let config = EncodeConfig::with_wrap_width(cli.width);
        encode_stream_with_progress(input, output, config, &mut progress)
    }
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let cli = Cli::parse();
    log::debug!("{:?}", cli);

    let path = cli.file.as_deref().filter(|p| *p != Path::new("-"));
    let start = Instant::now();
    let result = match path {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                error_exit!("could not open file '{}': {}", path.display(), e);
            });
            run(&cli, file, stdout().lock())
        }
        None => run(&cli, stdin().lock(), stdout().lock()),
    };
    let elapsed = start.elapsed();

    match result {
        Ok(bytes) => {
            log::info!("processed {} bytes", bytes);
            eprintln!("\nOperation completed in {:?}", elapsed);
        }
        Err(e) => {
            error_exit!("{}", e);
        }
    }
}
