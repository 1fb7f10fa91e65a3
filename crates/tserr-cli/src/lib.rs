//! CLI logic for the tserr diagnostic parser.
//!
//! Reads diagnostic text from a file or stdin, parses it, and writes the
//! parsed errors as a JSON array.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::{AppConfig, RegistryConfig};

use std::{
    fs,
    io::{self, Read as _, Write as _},
};

use log::info;

use tserr::{
    ErrorParser, TemplateRegistry, TsErrError,
    config::{OffsetEncoding, ParseOptions},
    registry,
};

/// Run the tserr CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TsErrError` for:
/// - Configuration loading errors
/// - Registry loading errors
/// - Input and output I/O errors
pub fn run(args: &Args) -> Result<(), TsErrError> {
    info!(
        input_path:? = args.input,
        output_path:? = args.output;
        "Processing diagnostics"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let options = merge_options(app_config.parse, args);

    let custom_registry: TemplateRegistry;
    let registry = match args.registry.as_ref().or(app_config.registry.path.as_ref()) {
        Some(path) => {
            custom_registry = registry::load_file(path)?;
            &custom_registry
        }
        None => registry::builtin(),
    };

    let blob = read_input(args)?;
    let errors = ErrorParser::new(registry, options).parse(&blob);

    let json = if args.pretty {
        serde_json::to_string_pretty(&errors)
    } else {
        serde_json::to_string(&errors)
    }
    .map_err(io::Error::from)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            info!(output_file = path, errors_count = errors.len(); "JSON exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(())
}

/// Apply command-line overrides on top of the configured options.
fn merge_options(mut options: ParseOptions, args: &Args) -> ParseOptions {
    if let Some(dir) = &args.dir {
        options = options.with_dir(dir);
    }
    if args.utf16 {
        options = options.with_offsets(OffsetEncoding::Utf16);
    }
    if args.legacy_items {
        options = options.with_legacy_item_fields(true);
    }
    options
}

fn read_input(args: &Args) -> io::Result<String> {
    match args.input.as_deref() {
        Some(path) if path != "-" => fs::read_to_string(path),
        _ => {
            let mut blob = String::new();
            io::stdin().read_to_string(&mut blob)?;
            Ok(blob)
        }
    }
}
