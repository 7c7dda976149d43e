//! minirep - Main Entry Point
//!
//! Resolve config and address, query VirusTotal and GreyNoise,
//! print a DROP / ALERT / PASS recommendation.

mod cli;
mod error;
mod logic;
mod report;
pub mod constants;

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::{AppError, AppResult};
use logic::check::run_check;
use logic::config::{resolve_config_path, AppConfig};
use logic::external_intel::{build_agent, GreyNoiseClient, VTClient};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

    // Config first: nothing is prompted for or queried without it
    let config_path = resolve_config_path(cli.config.as_deref());
    let mut config = AppConfig::load(&config_path)?;
    if let Some(threshold) = cli.threshold {
        log::info!("Malicious-vote threshold overridden: {}", threshold);
        config.policy = config.policy.with_threshold(threshold);
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let address = cli::resolve_address(
        cli.address.as_deref(),
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    let agent = build_agent(config.timeout_secs);
    let vt = VTClient::new(agent.clone(), &config.vt_api_url, &config.vt_api_key);
    let greynoise = GreyNoiseClient::new(
        agent,
        &config.greynoise_api_url,
        config.greynoise_api_key.as_deref(),
    );

    let outcome = run_check(address, &vt, &greynoise, &config.policy)?;

    let color = stdout.is_terminal();
    report::render(&mut stdout.lock(), &outcome, color).map_err(AppError::Output)?;
    Ok(())
}
