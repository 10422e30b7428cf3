mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, kinds, replay, InitArgs, KindsArgs, ReplayArgs};
use config::Config;
use tracing::Level;

/// Pagebuilder CLI - drive the page editor from action scripts
#[derive(Parser, Debug)]
#[command(name = "pagebuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log every dispatched action (overrides logLevel)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and an example action script
    Init(InitArgs),

    /// List the element kinds the palette offers
    Kinds(KindsArgs),

    /// Apply an action script to an empty page and print the result
    Replay(ReplayArgs),
}

fn run(cli: Cli, cwd: &str) -> anyhow::Result<()> {
    let config = Config::load(cwd)?;

    let level = if cli.verbose { Level::DEBUG } else { config.level()? };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Init(args) => init(args, cwd),
        Command::Kinds(args) => kinds(args),
        Command::Replay(args) => replay(args, &config),
    }
}

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    if let Err(err) = run(cli, &cwd) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
