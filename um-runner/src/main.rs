//! Command-line host for the universal machine interpreter.
//!
//! Takes one positional argument: the path to a program image. Loading the
//! image and wiring the machine to real stdio is all this binary does — the
//! engine itself lives in `um-vm`.

mod image;

use std::path::Path;
use std::process::ExitCode;

use um_core::{Stdin, Stdout};
use um_vm::Machine;

fn main() -> ExitCode {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "um-runner".to_string());

    let Some(path) = args.next() else {
        eprintln!("Missing filename. Usage: \n\n\t{program_name} <filename>\n");
        // Preserved from the original source: a missing argument exits 0.
        return ExitCode::SUCCESS;
    };

    if !Path::new(&path).exists() {
        println!("Couldn't find '{path}'");
        return ExitCode::SUCCESS;
    }

    println!("Loading '{path}'");
    let bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("Failed to read '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    let words = match image::words_from_be_bytes(&bytes) {
        Ok(words) => words,
        Err(err) => {
            eprintln!("Malformed program image '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Running '{path}'");
    let mut machine = Machine::new(words, Stdout::new(), Stdin::new());
    match machine.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Program error: {err}");
            ExitCode::FAILURE
        }
    }
}
