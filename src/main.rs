use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use tracing::debug;

use urlkeeper::cli::Cli;
use urlkeeper::config::{get_config, init_config};
use urlkeeper::interfaces::cli::run_cli_command;
use urlkeeper::system::logging::init_logging;

fn main() -> ExitCode {
    dotenv().ok();

    let cli = Cli::parse();

    // 配置先于日志初始化
    init_config(cli.config.as_deref());
    let config = get_config();
    let _guard = init_logging(&config.logging);
    debug!("Storage backend: {}", config.storage.backend);

    match run_cli_command(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}
