//! 인스턴스/리스너 기동 순서 제어
//!
//! 1. 관리 대상 인스턴스마다: 환경 바인딩 → mount → 상태 확인 → 역할 확인
//!    → (physical standby) managed recovery 시작 / (그 외) open
//! 2. 모든 인스턴스 처리 후 다시 인스턴스마다: listener.ora의 리스너 시작
//!
//! 어떤 단계도 재시도하지 않고, 실패는 해당 인스턴스/리스너에 국한됩니다.

mod summary;

pub use summary::{InstanceResult, ListenerResult, RunSummary};

use crate::config::{Config, EnvResolverKind};
use crate::environment::{bind_environment, OracleEnv};
use crate::executor::{ActionExecutor, StatusProber};
use crate::listener::list_listener_names;
use crate::oratab::OratabEntry;
use crate::runlog::RunLog;
use crate::status::{DatabaseRole, InstanceStatus, ListenerStatus, RecoveryStatus};
use crate::tools::OracleTools;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

pub struct Orchestrator<'a> {
    tools: &'a dyn OracleTools,
    prober: StatusProber<'a>,
    executor: ActionExecutor<'a>,
    env_resolver: EnvResolverKind,
    dedupe_listeners: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(tools: &'a dyn OracleTools, config: &'a Config, dry_run: bool) -> Self {
        Self {
            tools,
            prober: StatusProber::new(tools, &config.listener_process),
            executor: ActionExecutor::new(tools, dry_run),
            env_resolver: config.env_resolver,
            dedupe_listeners: config.dedupe_listeners,
        }
    }

    /// 전체 기동 실행
    pub async fn run(&self, instances: &[OratabEntry], log: &mut RunLog) -> RunSummary {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();

        log.info(format!("Starting {} database instance(s)", instances.len()));
        for entry in instances {
            let result = self.start_instance(entry, log).await;
            summary.instances.push(result);
        }

        log.info("Starting listeners");
        let mut seen = HashSet::new();
        for entry in instances {
            let results = self.start_listeners(entry, &mut seen, log).await;
            summary.listeners.extend(results);
        }

        summary.total_duration_ms = start_time.elapsed().as_millis();
        summary
    }

    async fn bind(&self, entry: &OratabEntry, log: &mut RunLog) -> Option<OracleEnv> {
        match bind_environment(self.tools, entry, self.env_resolver, log).await {
            Ok(env) => Some(env),
            Err(e) => {
                log.error(format!("{}: {}", entry.sid, e));
                None
            }
        }
    }

    /// 인스턴스 하나를 mount 후 역할에 맞는 상태로 전환
    pub async fn start_instance(&self, entry: &OratabEntry, log: &mut RunLog) -> InstanceResult {
        let sid = entry.sid.as_str();
        let mut result = InstanceResult::new(sid);

        let Some(env) = self.bind(entry, log).await else {
            result.message = "environment could not be bound".to_string();
            return result;
        };
        log.info(format!("{}: ORACLE_HOME={}", sid, env.home.display()));

        if self.executor.is_dry_run() {
            log.info(format!("{}: dry-run, startup mount not executed", sid));
        }
        self.executor.mount_instance(&env, log).await;

        let status = self.prober.instance_status(&env, log).await;
        result.status = status;
        if !status.is_mounted_or_open() {
            log.error(format!("{}: instance could not be mounted (status {})", sid, status));
            result.message = format!("not mounted ({})", status);
            return result;
        }
        log.ok(format!("{}: instance mounted (status {})", sid, status));

        let role = self.prober.database_role(&env, log).await;
        result.role = Some(role);
        log.info(format!("{}: database role {}", sid, role));

        if role == DatabaseRole::PhysicalStandby {
            // standby는 MOUNTED 상태로 두고 recovery만 시작
            self.executor.activate_standby_recovery(&env, log).await;
            let recovery = self.prober.recovery_status(&env, log).await;
            result.recovery = Some(recovery);

            if recovery == RecoveryStatus::Active {
                log.ok(format!("{}: managed recovery active", sid));
                result.success = true;
                result.message = "standby mounted, managed recovery active".to_string();
            } else {
                log.error(format!("{}: managed recovery could not be started", sid));
                result.message = "managed recovery inactive".to_string();
            }
            return result;
        }

        match status {
            InstanceStatus::Open => {
                log.ok(format!("{}: database already open", sid));
                result.success = true;
                result.message = "already open".to_string();
            }
            _ => {
                self.executor.open_database(&env, log).await;
                let status = self.prober.instance_status(&env, log).await;
                result.status = status;

                if status == InstanceStatus::Open {
                    log.ok(format!("{}: database opened", sid));
                    result.success = true;
                    result.message = "opened".to_string();
                } else {
                    log.error(format!("{}: database could not be opened (status {})", sid, status));
                    result.message = format!("not opened ({})", status);
                }
            }
        }

        result
    }

    /// 인스턴스 환경의 listener.ora에 정의된 리스너 시작
    ///
    /// `seen`에는 이미 시작한 (listener.ora 경로, 이름)이 쌓입니다.
    pub async fn start_listeners(
        &self,
        entry: &OratabEntry,
        seen: &mut HashSet<(PathBuf, String)>,
        log: &mut RunLog,
    ) -> Vec<ListenerResult> {
        let sid = entry.sid.as_str();
        let Some(env) = self.bind(entry, log).await else {
            return Vec::new();
        };

        let names = match list_listener_names(&env) {
            Ok(names) => names,
            Err(e) => {
                log.error(format!(
                    "{}: could not read {}: {}",
                    sid,
                    env.listener_file().display(),
                    e
                ));
                return Vec::new();
            }
        };

        if names.is_empty() {
            log.info(format!(
                "{}: no listeners found in {}",
                sid,
                env.listener_file().display()
            ));
            return Vec::new();
        }

        let mut results = Vec::new();
        for name in names {
            let key = (env.listener_file(), name.clone());
            if self.dedupe_listeners && seen.contains(&key) {
                log.info(format!("{}: listener {} already handled, skipped", sid, name));
                results.push(ListenerResult::skipped(sid, &name));
                continue;
            }
            seen.insert(key);

            self.executor.start_listener(&env, &name, log).await;
            let status = self.prober.listener_status(&name, log).await;

            if status == ListenerStatus::Active {
                log.ok(format!("{}: listener {} started", sid, name));
            } else {
                log.error(format!("{}: listener {} could not be started", sid, name));
            }
            results.push(ListenerResult::new(sid, &name, status));
        }

        results
    }

    /// 조회만 수행하는 상태 보고 (`--status`)
    pub async fn report_status(&self, instances: &[OratabEntry], log: &mut RunLog) -> RunSummary {
        let start_time = Instant::now();
        let mut summary = RunSummary::default();
        let mut seen = HashSet::new();

        for entry in instances {
            let sid = entry.sid.as_str();
            let mut result = InstanceResult::new(sid);
            let Some(env) = self.bind(entry, log).await else {
                result.message = "environment could not be bound".to_string();
                summary.instances.push(result);
                continue;
            };

            result.status = self.prober.instance_status(&env, log).await;
            if result.status.is_mounted_or_open() {
                let role = self.prober.database_role(&env, log).await;
                result.role = Some(role);
                if role == DatabaseRole::PhysicalStandby {
                    let recovery = self.prober.recovery_status(&env, log).await;
                    result.recovery = Some(recovery);
                    result.success = recovery == RecoveryStatus::Active;
                } else {
                    result.success = result.status == InstanceStatus::Open;
                }
            }
            result.message = result.describe_state();
            log.info(format!("{}: {}", sid, result.message));
            summary.instances.push(result);

            let names = match list_listener_names(&env) {
                Ok(names) => names,
                Err(e) => {
                    log.error(format!(
                        "{}: could not read {}: {}",
                        sid,
                        env.listener_file().display(),
                        e
                    ));
                    Vec::new()
                }
            };

            for name in names {
                if !seen.insert((env.listener_file(), name.clone())) && self.dedupe_listeners {
                    continue;
                }
                let status = self.prober.listener_status(&name, log).await;
                log.info(format!("{}: listener {} {}", sid, name, status));
                summary.listeners.push(ListenerResult::new(sid, &name, status));
            }
        }

        summary.total_duration_ms = start_time.elapsed().as_millis();
        summary
    }
}
