use clap::Parser;
use colored::*;

use oraboot::cli::Cli;
use oraboot::commands::{execute_list, execute_startup, execute_status};
use oraboot::config::Config;
use oraboot::error::Result;
use oraboot::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.debug);

    if let Err(e) = run(&cli).await {
        eprintln!("{} {}", "[X]".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;

    // CLI 옵션이 설정 파일보다 우선
    if let Some(oratab) = &cli.oratab {
        config.oratab_path = oratab.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = log_dir.clone();
    }

    if cli.debug {
        eprintln!("{} {:?}", "DEBUG:".yellow(), config);
    }

    if cli.list {
        execute_list(cli, &config).await
    } else if cli.status {
        execute_status(cli, &config).await
    } else {
        execute_startup(cli, &config).await
    }
}
