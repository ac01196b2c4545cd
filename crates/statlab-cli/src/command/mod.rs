use std::io;

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

use self::{describe::DescribeArg, heart::HeartArg, heights::HeightsArg};

mod describe;
mod heart;
mod heights;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Which exercise to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Analyze simulated heights (exercise 1)
    Heights(#[clap(flatten)] HeightsArg),
    /// Explore a heart-disease CSV file (exercise 2)
    Heart(#[clap(flatten)] HeartArg),
    /// Run the statistics engine on an arbitrary sample
    Describe(#[clap(flatten)] DescribeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_logging(args.verbose);
    match args.mode {
        Mode::Heights(arg) => heights::run(&arg)?,
        Mode::Heart(arg) => heart::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
