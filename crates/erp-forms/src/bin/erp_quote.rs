//! # Quote Printer
//!
//! Prints line totals and document totals for a draft document.
//!
//! ## Usage
//! ```bash
//! # Use the configured currency (forms.toml / ERP_CURRENCY)
//! cargo run -p erp-forms --bin erp-quote -- draft.json
//!
//! # Read config from a specific file
//! cargo run -p erp-forms --bin erp-quote -- --config ./forms.toml draft.json
//!
//! # Read the draft from stdin
//! cat draft.json | cargo run -p erp-forms --bin erp-quote -- -
//! ```

use erp_forms::quote::QuoteDocument;
use erp_forms::{init_tracing, FormResult, FormsConfig};
use std::env;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

fn print_help() {
    println!("ERP Quote Printer");
    println!();
    println!("Usage: erp-quote [OPTIONS] <document.json | ->");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: per-user forms.toml)");
    println!("  -h, --help           Show this help message");
}

fn read_document(source: &str) -> FormResult<String> {
    if source == "-" {
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)?;
        Ok(json)
    } else {
        Ok(std::fs::read_to_string(source)?)
    }
}

fn run(config_path: Option<PathBuf>, source: &str) -> FormResult<()> {
    let config = FormsConfig::load(config_path)?;
    let document = QuoteDocument::from_json(&read_document(source)?)?;
    print!("{}", document.render(config.currency_code()));
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut source: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            other => source = Some(other.to_string()),
        }
        i += 1;
    }

    let Some(source) = source else {
        print_help();
        return ExitCode::FAILURE;
    };

    match run(config_path, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Quote failed");
            eprintln!("erp-quote: {}", e);
            ExitCode::FAILURE
        }
    }
}
