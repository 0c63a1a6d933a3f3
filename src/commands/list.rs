use crate::cli::Cli;
use crate::commands::startup::select_instances;
use crate::config::Config;
use crate::environment::bind_environment;
use crate::error::Result;
use crate::listener::list_listener_names;
use crate::runlog::RunLog;
use crate::tools::SystemTools;
use colored::*;

/// 관리 대상 인스턴스와 리스너 목록 출력 (데이터베이스 조회 없음)
pub async fn execute_list(cli: &Cli, config: &Config) -> Result<()> {
    // 목록 출력은 실행 로그에 남기지 않는다
    let mut log = RunLog::detached(cli.debug);
    let instances = select_instances(cli, config, &mut log)?;

    if instances.is_empty() {
        println!("{} No managed instances in {}", "[X]".red(), config.oratab_path.display());
        return Ok(());
    }

    let tools = SystemTools::new(config);
    for entry in &instances {
        println!("{} {}", entry.sid.bold(), entry.home.dimmed());

        let env = match bind_environment(&tools, entry, config.env_resolver, &mut log).await {
            Ok(env) => env,
            Err(e) => {
                println!("    {} {}", "✗".red(), e);
                continue;
            }
        };

        let listeners = list_listener_names(&env)?;
        if listeners.is_empty() {
            println!("    listeners: {}", "(none)".dimmed());
        } else {
            println!("    listeners: {}", listeners.join(", ").cyan());
        }
    }

    Ok(())
}
