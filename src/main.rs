use std::fs::File;
use std::io;
use std::path::PathBuf;

use campus::catalog;
use campus::core::config::{self, CliOverrides};
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "campus", about = "Browse courses, read theory, and practice exercises")]
struct Args {
    /// Catalog file to load (TOML or JSON). Defaults to the built-in catalog.
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config is read before the logger exists, so problems are held until
    // the log file is open.
    let (file_config, config_error) = match config::load_config() {
        Ok(file_config) => (file_config, None),
        Err(e) => {
            eprintln!("{e}; using defaults");
            (config::CampusConfig::default(), Some(e))
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            catalog: args.catalog,
            log_level: args.log_level,
        },
    );

    // Initialize file logger - the terminal belongs to the UI
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Campus starting up with config: {:?}", resolved);
    if let Some(e) = config_error {
        log::warn!("{e}; using defaults");
    } else {
        config::ensure_default_config();
    }
    for level in &resolved.rejected_log_levels {
        log::warn!("Unknown log level {:?}, ignored", level);
    }

    let catalog = match &resolved.catalog_path {
        Some(path) => catalog::load_file(path),
        None => catalog::builtin(),
    }
    .map_err(io::Error::other)?;

    campus::tui::run(catalog)
}
