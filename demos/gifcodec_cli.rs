// Decode/encode a GIF file into/from a headerless raw RGB byte stream
// (pixel order: left to right, then top to bottom).
//
// Usage:
//   cargo run --example gifcodec_cli -- [-o d|e|a] [-w WIDTH] [-r] [-v] <input_file> <output_file>
//
//   -o  operation: d=decode, e=encode, a=autodetect from file extensions (default: a)
//   -w  width in pixels, required when encoding
//   -r  don't reset the LZW dictionary on saturation (encode only)
//   -v  print code/bit/pixel counts

use std::env;
use std::fs;
use std::path::Path;
use std::process;

use gifcodec::{decode, encode, DecodeOptions, EncodeOptions};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operation {
    Decode,
    Encode,
    Autodetect,
}

struct Args {
    operation: Operation,
    width: Option<u16>,
    no_dict_reset: bool,
    verbose: bool,
    input_file: String,
    output_file: String,
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {program} [-o d|e|a] [-w WIDTH] [-r] [-v] <input_file> <output_file>"
    );
}

fn parse_args() -> Args {
    let argv: Vec<String> = env::args().collect();
    let mut operation = Operation::Autodetect;
    let mut width = None;
    let mut no_dict_reset = false;
    let mut verbose = false;
    let mut positional = Vec::new();

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-o" => {
                i += 1;
                operation = match argv.get(i).map(String::as_str) {
                    Some("d") => Operation::Decode,
                    Some("e") => Operation::Encode,
                    Some("a") => Operation::Autodetect,
                    _ => {
                        eprintln!("Error: -o requires one of d, e, a");
                        print_usage(&argv[0]);
                        process::exit(1);
                    }
                };
            }
            "-w" => {
                i += 1;
                width = match argv.get(i).and_then(|s| s.parse::<u16>().ok()) {
                    Some(w) if w > 0 => Some(w),
                    _ => {
                        eprintln!("Error: -w requires a width in [1, 65535]");
                        process::exit(1);
                    }
                };
            }
            "-r" => no_dict_reset = true,
            "-v" => verbose = true,
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    if positional.len() != 2 {
        print_usage(&argv[0]);
        process::exit(1);
    }

    Args {
        operation,
        width,
        no_dict_reset,
        verbose,
        input_file: positional[0].clone(),
        output_file: positional[1].clone(),
    }
}

fn autodetect(input_file: &str, output_file: &str) -> Operation {
    let is_gif = |f: &str| Path::new(f).extension().is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    match (is_gif(input_file), is_gif(output_file)) {
        (false, true) => Operation::Encode,
        (true, false) => Operation::Decode,
        _ => {
            eprintln!("Error: could not autodetect operation from file extensions");
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args();
    let operation = match args.operation {
        Operation::Autodetect => autodetect(&args.input_file, &args.output_file),
        op => op,
    };

    if operation == Operation::Encode && args.width.is_none() {
        eprintln!("Error: -w/--width is required when encoding");
        process::exit(1);
    }

    let input = match fs::read(&args.input_file) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.input_file);
            process::exit(1);
        }
    };

    let output = match operation {
        Operation::Decode => match decode(&input, DecodeOptions { verbose: args.verbose }) {
            Ok((_, _, rgb)) => rgb,
            Err(e) => {
                eprintln!("Error decoding {}: {e}", args.input_file);
                process::exit(1);
            }
        },
        Operation::Encode => {
            let width = args.width.unwrap();
            let options = EncodeOptions { no_dict_reset: args.no_dict_reset, verbose: args.verbose };
            match encode(width, &input, options) {
                Ok(gif_bytes) => gif_bytes,
                Err(e) => {
                    eprintln!("Error encoding {}: {e}", args.input_file);
                    process::exit(1);
                }
            }
        }
        Operation::Autodetect => unreachable!("resolved above"),
    };

    if let Err(e) = fs::write(&args.output_file, output) {
        eprintln!("Error writing {}: {e}", args.output_file);
        process::exit(1);
    }
}
