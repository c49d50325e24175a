use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use tasquest::cli::commands::{Cli, Commands};
use tasquest::cli::{self, Context};
use tasquest::config::{Config, DEFAULT_LOG_FILTER, LOG_ENV};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let config = match Config::resolve(cli_args.data.as_deref()) {
        Ok(config) => config,
        Err(e) => process::exit(cli::finish(Err(e), json_output)),
    };
    tracing::debug!(path = %config.data_path.display(), "using data file");
    let ctx = Context {
        json: json_output,
        config,
    };

    let exit_code = match cli_args.command {
        Commands::Init => cli::init::run(&ctx),
        Commands::Status => cli::status::run(&ctx),
        Commands::Now => cli::now::run(&ctx),
        Commands::Log => cli::log::run(&ctx),
        Commands::Stats { week } => cli::stats::run(week, &ctx),
        Commands::Graph => cli::graph::run(&ctx),
        Commands::Task(cmd) => cli::task::run(cmd, &ctx),
        Commands::Goal(cmd) => cli::goal::run(cmd, &ctx),
    };

    process::exit(exit_code);
}
