//! hx CLI
//!
//! Thin plumbing around [`hx_core`]: open the input and output files, run
//! one translation pass, report the first error, set the exit status.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::time::Instant;

use hx_core::{translate, TranslateError};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        print_usage();
        std::process::exit(1);
    }
    let input_path = &args[1];
    let output_path = &args[2];

    let input = match File::open(input_path) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            eprintln!("error: cannot open {input_path}: {e}");
            std::process::exit(1);
        }
    };
    let output = match File::create(output_path) {
        Ok(file) => BufWriter::new(file),
        Err(e) => {
            eprintln!("error: cannot create {output_path}: {e}");
            std::process::exit(1);
        }
    };

    let started = Instant::now();
    match translate(input, output, input_path) {
        Ok(()) => {
            tracing::debug!(
                input = %input_path,
                output = %output_path,
                elapsed = ?started.elapsed(),
                "translation complete"
            );
        }
        Err(e @ TranslateError::Parse(_)) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Err(TranslateError::Io(e)) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Install the env-filtered subscriber (`RUST_LOG=debug hx ...`).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Usage: hx <input.hex> <output.bin>");
    eprintln!();
    eprintln!("Translates hex notation to raw binary:");
    eprintln!("  hh        two hex digits emit one byte (high nibble first)");
    eprintln!("  ; text    line comment, ignored through end of line");
    eprintln!("  :0xN      asserts N bytes have been written so far");
}
