use std::path::PathBuf;

use anyhow::{bail, Result};

pub const USAGE: &str = "usage: wordscore_app [--config <path>] <page_url> <word>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliArgs),
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub page_url: String,
    pub word: String,
}

pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--config" => match args.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => bail!("--config needs a path\n{USAGE}"),
            },
            other => {
                if let Some(path) = other.strip_prefix("--config=") {
                    config_path = Some(PathBuf::from(path));
                } else if other.starts_with("--") {
                    bail!("unknown option `{other}`\n{USAGE}");
                } else {
                    positional.push(arg);
                }
            }
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next()) {
        (Some(page_url), Some(word), None) => Ok(Command::Run(CliArgs {
            config_path,
            page_url,
            word,
        })),
        _ => bail!("expected a page URL and a word\n{USAGE}"),
    }
}
