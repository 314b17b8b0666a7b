use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging;

use self::{generate::GenerateArg, play::PlayArg};

mod game_arg;
mod generate;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug messages
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Write log messages to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand, derive_more::IsVariant)]
enum Mode {
    /// Play word search in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Generate a single grid and print it
    Generate(#[clap(flatten)] GenerateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default()));
    logging::init(args.verbose, args.log_file.as_deref(), mode.is_play())?;

    match mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Generate(arg) => generate::run(&arg)?,
    }
    Ok(())
}
