
mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{populate, rake, topline};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    setup_logging(cli.verbose);
    match &cli.command {
        Commands::Rake(args) => rake::run(&cli, args),
        Commands::Populate(args) => populate::run(&cli, args),
        Commands::Topline(args) => topline::run(&cli, args),
    }
}

/// Map the `-v` count onto a log level; logs go to stderr.
fn setup_logging(verbose: u8) {
    use tracing::Level;

    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> { run() }
