//! ingot-check: validate a JSON table file and inspect its contents
//!
//! Runs the same open-read-validate pipeline the framework uses at load
//! time, so a file that passes here will pass on the target.
//!
//! Usage:
//!   # Validate and list the top-level keys with their kinds
//!   ingot-check config.json
//!
//!   # Look up specific dotted keys
//!   ingot-check config.json --key config.APP_NAME --key config.CYCLE_MS
//!
//!   # Exit status only
//!   ingot-check config.json --quiet

use anyhow::Result;
use clap::Parser;
use ingot::{process_file, search, JsonKind, MAX_DOCUMENT_BYTES};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ingot-check")]
#[command(about = "Validate a JSON table file and inspect its contents", long_about = None)]
struct Args {
    /// JSON file to check
    #[arg(value_name = "FILE")]
    file: String,

    /// Read at most this many bytes from the file
    #[arg(long, default_value_t = MAX_DOCUMENT_BYTES)]
    max_bytes: usize,

    /// Dotted query key to look up and print (repeatable)
    #[arg(long = "key", value_name = "KEY")]
    keys: Vec<String>,

    /// Suppress per-key output, set the exit status only
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut buf = Vec::new();
    let ok = process_file(&args.file, &mut buf, args.max_bytes, |doc, len| {
        if !args.quiet {
            println!("{}: valid JSON document, {} bytes", args.file, len);
        }

        if args.keys.is_empty() {
            if !args.quiet {
                if let Some(object) = doc.as_object() {
                    for (key, value) in object {
                        println!("  {key}: {}", JsonKind::of(value));
                    }
                }
            }
            return true;
        }

        let mut all_found = true;
        for key in &args.keys {
            match search(doc, key) {
                Some(value) => {
                    if !args.quiet {
                        println!("  {key} = {value}");
                    }
                }
                None => {
                    eprintln!("  {key}: not found");
                    all_found = false;
                }
            }
        }
        all_found
    })?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}
