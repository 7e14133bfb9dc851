use clap::Parser;
use colored::*;
use rayon::prelude::*;
use std::io::Result;
use std::path::PathBuf;

mod config;
mod emit;
mod util;

/// Turn SQL scripts into `ok!`/`err!` test cases, one per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// SQL files to convert, in order.
    files: Vec<PathBuf>,

    /// Generator settings (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write cases to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a note per input file on stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{} {}", "error".red(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => util::read_config(path)?,
        None => config::Config::default(),
    };

    // every file is read and classified up front, in parallel, and held in
    // memory until written in argument order. Files after an unreadable one
    // are still read, but only output for files before it is emitted.
    let cases = args
        .files
        .par_iter()
        .map(|path| util::read_cases(path, &config))
        .collect::<Vec<_>>();

    let mut out = util::open_output(args.output.as_deref())?;
    for (path, cases) in args.files.iter().zip(cases) {
        let cases = match cases {
            Ok(cases) => cases,
            Err(e) => {
                out.flush()?;
                return Err(e);
            }
        };
        if args.verbose {
            if cases.is_empty() {
                eprintln!("{} {}: empty", "note".cyan(), path.display());
            } else {
                eprintln!(
                    "{} {}: {} lines, {} expected errors",
                    "note".cyan(),
                    path.display(),
                    cases.len(),
                    cases.errors(),
                );
            }
        }
        cases.write_to(&mut out)?;
    }
    out.flush()?;

    Ok(())
}
