//! gae-deploy CLI - App Engine deployment step for CI pipelines
//!
//! Usage: gae-deploy [--config <FILE>] [--key-path <PATH>] [-v]
//!
//! Without `--config`, parameters are read from the Drone plugin environment
//! (`PLUGIN_*`, `GAE_CREDENTIALS`) or, for Drone 0.4, from JSON on stdin.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;

use gae_deploy::config::{self, DEFAULT_KEY_PATH};
use gae_deploy::infrastructure::fs::KeyFile;
use gae_deploy::{DeployUseCase, Environ};

/// Revision this binary was built from
const BUILD_REV: &str = match option_env!("GAE_DEPLOY_REV") {
    Some(rev) => rev,
    None => "[unknown]",
};

/// Deploy to Google App Engine with gcloud or appcfg.py
#[derive(Parser, Debug)]
#[command(name = "gae-deploy")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Read parameters from a TOML file instead of the CI environment
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where the service account key is written for gcloud
    #[arg(long, default_value = DEFAULT_KEY_PATH)]
    key_path: PathBuf,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    println!("gae-deploy built from {BUILD_REV}");

    let (input, warnings) = config::load(cli.config.as_deref())?;
    for warning in &warnings {
        log::warn!("{warning}");
    }

    let validated = config::validate(input, &cli.key_path)?;
    let config = validated.config;

    // Inside the ephemeral plugin container, not on the host
    let key_file = KeyFile::write(&config.key_path, &validated.token)
        .map_err(|e| anyhow!("error writing token file: {e}"))?;
    remove_key_on_interrupt(key_file.path().to_path_buf());

    let runner = Environ::new(&config.working_dir, std::env::vars().collect());
    let mut use_case = DeployUseCase::new(runner);
    let report = use_case.execute(&config)?;

    if let Some(pruned) = &report.pruned {
        log::debug!(
            "pruned {} of {} versions of service {}",
            pruned.deleted.len(),
            pruned.listed.len(),
            pruned.service
        );
    }

    drop(key_file);
    Ok(())
}

fn remove_key_on_interrupt(path: PathBuf) {
    let result = ctrlc::set_handler(move || {
        KeyFile::remove(&path);
        std::process::exit(130);
    });
    if let Err(err) = result {
        log::warn!("unable to install Ctrl+C handler: {err}");
    }
}
