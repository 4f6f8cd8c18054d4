use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use investup_lib::bootstrap::{
    init_tracing_subscriber, load_config_or_empty, resolve_data_dir, wire_dependencies,
};
use investup_lib::cli::Cli;
use investup_lib::presenter::present;
use investup_lib::run;

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config_or_empty(cli.config.as_deref())?;
    let data_dir = resolve_data_dir(&config)?;
    init_tracing_subscriber(&data_dir)?;
    let wired = wire_dependencies(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create tokio runtime")?;

    match runtime.block_on(run(cli.command, wired)) {
        Ok(screen) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&screen)?);
            } else {
                print!("{}", present(&screen));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}
