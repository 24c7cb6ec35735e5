//! YAY command-line tool for validating and inspecting YAY documents.
//!
//! Usage: yay [FILE]
//!
//! Reads a YAY document from FILE, or from stdin if FILE is omitted or "-",
//! parses it, and prints the resulting value. Exits 1 and prints a diagnostic
//! to stderr if the document is not valid YAY.

use libyay::parse_with_filename;
use std::io::{self, Read};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut input_path: Option<&str> = None;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!("yay {}", env!("CARGO_PKG_VERSION"));
                return;
            }
            "-" => {
                // Explicit stdin; input_path stays None
            }
            path => {
                input_path = Some(path);
            }
        }
        i += 1;
    }

    let input = match input_path {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading stdin: {}", e);
                process::exit(1);
            }
            buffer
        }
    };

    match parse_with_filename(&input, input_path) {
        Ok(value) => {
            println!("{:?}", value);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn print_help() {
    println!("yay {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: yay [FILE]");
    println!();
    println!("Parses a YAY document from FILE (or stdin if omitted) and prints");
    println!("the resulting value, or reports a parse error and exits 1.");
    println!();
    println!("Options:");
    println!("  -h, --help     Print help");
    println!("  -V, --version  Print version");
}
