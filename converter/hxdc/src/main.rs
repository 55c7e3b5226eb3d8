//! hxd CLI entry point.

use std::path::{Path, PathBuf};
use std::process;

use hxdc::commands::{convert_directory, convert_source};
use hxdc::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "convert" => {
            let mut paths: Vec<&str> = Vec::new();
            let mut verbose = false;
            for arg in args.iter().skip(2) {
                if arg == "-v" || arg == "--verbose" {
                    verbose = true;
                } else if !arg.starts_with('-') {
                    paths.push(arg.as_str());
                }
            }
            if paths.len() != 2 {
                eprintln!("Usage: hxd convert <src-dir> <out-dir> [-v|--verbose]");
                process::exit(1);
            }
            init_tracing(verbose);
            match convert_directory(Path::new(paths[0]), Path::new(paths[1])) {
                Ok(written) => println!("{} file(s) written", written.len()),
                Err(err) => {
                    eprintln!("error: {err}");
                    process::exit(1);
                }
            }
        }
        "file" => {
            let mut verbose = false;
            let mut output: Option<PathBuf> = None;
            let mut input: Option<&str> = None;
            let mut i = 2;
            while i < args.len() {
                if args[i] == "-o" && i + 1 < args.len() {
                    output = Some(PathBuf::from(&args[i + 1]));
                    i += 2;
                } else if args[i] == "-v" || args[i] == "--verbose" {
                    verbose = true;
                    i += 1;
                } else if !args[i].starts_with('-') && input.is_none() {
                    input = Some(args[i].as_str());
                    i += 1;
                } else {
                    i += 1;
                }
            }
            let Some(input) = input else {
                eprintln!("Usage: hxd file <file.hx> [-o <out.d.ts>] [-v|--verbose]");
                process::exit(1);
            };
            init_tracing(verbose);
            run_single_file(Path::new(input), output.as_deref());
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("error: unknown command `{other}`");
            print_usage();
            process::exit(1);
        }
    }
}

/// Convert one file, printing to stdout unless `-o` gave a path.
fn run_single_file(input: &Path, output: Option<&Path>) {
    let Some(module_name) = input.file_stem().and_then(|stem| stem.to_str()) else {
        eprintln!("error: cannot derive a module name from {}", input.display());
        process::exit(1);
    };
    let source = match std::fs::read_to_string(input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: {}: {err}", input.display());
            process::exit(1);
        }
    };
    let (rendered, _) = convert_source(&source, module_name);
    match output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, rendered) {
                eprintln!("error: {}: {err}", path.display());
                process::exit(1);
            }
        }
        None => print!("{rendered}"),
    }
}

fn print_usage() {
    println!("hxd - Haxe to TypeScript declaration converter");
    println!();
    println!("Usage:");
    println!("  hxd convert <src-dir> <out-dir> [-v]   Convert every .hx file under <src-dir>");
    println!("  hxd file <file.hx> [-o <out.d.ts>]     Convert one file (stdout without -o)");
    println!("  hxd help                               Show this help");
    println!();
    println!("Options:");
    println!("  -v, --verbose    Log each converted file");
}
