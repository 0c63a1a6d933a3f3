use crate::cli::Cli;
use crate::config::Config;
use crate::error::{OraBootError, Result};
use crate::orchestrator::{Orchestrator, RunSummary};
use crate::oratab::{list_managed_instances, OratabEntry};
use crate::runlog::RunLog;
use crate::tools::SystemTools;
use colored::*;

/// 기동 모드: 모든 관리 대상 인스턴스 mount/open 후 리스너 시작
pub async fn execute_startup(cli: &Cli, config: &Config) -> Result<()> {
    let mut log = RunLog::open(&config.log_file(), &config.trace_file(), true)?;
    log.begin(format!(
        "oraboot startup (oratab {}{})",
        config.oratab_path.display(),
        if cli.dry_run { ", dry-run" } else { "" }
    ));

    let instances = select_instances(cli, config, &mut log)?;
    if instances.is_empty() {
        log.warning("No managed instances to start");
        log.end("oraboot startup: nothing to do");
        return Ok(());
    }

    let tools = SystemTools::new(config);
    let orchestrator = Orchestrator::new(&tools, config, cli.dry_run);
    let summary = orchestrator.run(&instances, &mut log).await;

    print_summary(&summary);
    log.end(format!(
        "oraboot startup: {}/{} units failed ({}ms)",
        summary.failure_count(),
        summary.total(),
        summary.total_duration_ms
    ));

    check_failures(cli, &summary)
}

/// 상태 보고 모드: 조회만 수행
pub async fn execute_status(cli: &Cli, config: &Config) -> Result<()> {
    let mut log = RunLog::open(&config.log_file(), &config.trace_file(), true)?;
    log.begin("oraboot status report");

    let instances = select_instances(cli, config, &mut log)?;
    if instances.is_empty() {
        log.warning("No managed instances to report");
        log.end("oraboot status report: nothing to do");
        return Ok(());
    }

    let tools = SystemTools::new(config);
    let orchestrator = Orchestrator::new(&tools, config, false);
    let summary = orchestrator.report_status(&instances, &mut log).await;

    print_summary(&summary);
    log.end(format!(
        "oraboot status report: {}/{} units not in expected state",
        summary.failure_count(),
        summary.total()
    ));

    check_failures(cli, &summary)
}

/// oratab에서 관리 대상 인스턴스를 읽고 `--sid`로 거름
pub fn select_instances(cli: &Cli, config: &Config, log: &mut RunLog) -> Result<Vec<OratabEntry>> {
    let mut instances = match list_managed_instances(&config.oratab_path) {
        Ok(instances) => instances,
        Err(e) => {
            log.fatal(format!("Cannot read {}: {}", config.oratab_path.display(), e));
            return Err(e);
        }
    };

    if !cli.sids.is_empty() {
        for sid in &cli.sids {
            if !instances.iter().any(|e| &e.sid == sid) {
                log.warning(format!("{} is not a managed instance in oratab, ignored", sid));
            }
        }
        instances.retain(|e| cli.sids.contains(&e.sid));
    }

    log.info(format!(
        "Managed instances: {}",
        if instances.is_empty() {
            "(none)".to_string()
        } else {
            instances.iter().map(|e| e.sid.as_str()).collect::<Vec<_>>().join(", ")
        }
    ));

    Ok(instances)
}

fn print_summary(summary: &RunSummary) {
    println!("\n{} Summary", "[=]".cyan().bold());

    for result in &summary.instances {
        let mark = if result.success { "✓".green() } else { "✗".red() };
        println!(
            "  {} {} - {} ({})",
            mark,
            result.sid.bold(),
            result.message,
            result.describe_state().dimmed()
        );
    }

    for listener in &summary.listeners {
        let (mark, state) = if listener.skipped {
            ("-".dimmed(), "skipped".dimmed())
        } else if listener.success() {
            ("✓".green(), listener.status.as_str().green())
        } else {
            ("✗".red(), listener.status.as_str().red())
        };
        println!("  {} listener {} ({}) - {}", mark, listener.name.bold(), listener.sid, state);
    }

    println!(
        "  - Failed: {}  Total: {}  Time: {}ms",
        summary.failure_count().to_string().red(),
        summary.total(),
        summary.total_duration_ms
    );
}

fn check_failures(cli: &Cli, summary: &RunSummary) -> Result<()> {
    if cli.fail_on_error && !summary.all_succeeded() {
        return Err(OraBootError::RunFailed {
            failed: summary.failure_count(),
            total: summary.total(),
        });
    }
    Ok(())
}
