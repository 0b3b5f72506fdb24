mod app;
mod args;
mod config;
mod effects;
mod logging;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use wordscore_core::{JobRequest, Phase};
use wordscore_engine::EngineHandle;

use args::Command;
use effects::EffectRunner;

const EXIT_JOB_FAILED: u8 = 1;
const EXIT_USAGE: u8 = 2;

pub fn run() -> ExitCode {
    match try_run(std::env::args().skip(1)) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn try_run(raw_args: impl IntoIterator<Item = String>) -> Result<ExitCode> {
    let cli = match args::parse_args(raw_args)? {
        Command::Help => {
            println!("{}", args::USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Run(cli) => cli,
    };

    let (config_path, required) = match cli.config_path {
        Some(path) => (path, true),
        None => (PathBuf::from(config::DEFAULT_CONFIG_FILENAME), false),
    };
    let config = config::load(&config_path, required)?;
    logging::initialize(config.log_destination, config.log_level()?);

    let engine = EngineHandle::new(config.client_settings()).context("failed to start engine")?;
    let runner = EffectRunner::new(engine);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "Searching {} for \"{}\" (started {})",
        cli.page_url.trim(),
        cli.word.trim(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;

    let phase = app::run_session(
        &runner,
        config.poll_policy(),
        JobRequest::new(cli.page_url, cli.word),
        config.page_list,
        &mut out,
    )?;

    Ok(match phase {
        Phase::Succeeded => ExitCode::SUCCESS,
        _ => ExitCode::from(EXIT_JOB_FAILED),
    })
}
