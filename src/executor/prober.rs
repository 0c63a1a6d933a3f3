use crate::environment::OracleEnv;
use crate::executor::parser::ResponseParser;
use crate::executor::script::SqlScript;
use crate::listener::count_listener_processes;
use crate::runlog::RunLog;
use crate::status::{DatabaseRole, InstanceStatus, ListenerStatus, RecoveryStatus};
use crate::tools::OracleTools;

/// 읽기 전용 상태 조회
///
/// 모든 조회는 원본 출력을 디버그 트레이스에 남기고, 도구 실행 실패를
/// 포함한 모든 이상 출력은 Unknown/Inactive로 정규화합니다.
pub struct StatusProber<'a> {
    tools: &'a dyn OracleTools,
    listener_process: &'a str,
}

impl<'a> StatusProber<'a> {
    pub fn new(tools: &'a dyn OracleTools, listener_process: &'a str) -> Self {
        Self {
            tools,
            listener_process,
        }
    }

    /// 스크립트 실행 후 원본 출력 반환 (실행 실패 시 빈 문자열)
    async fn query(&self, env: &OracleEnv, what: &str, script: &str, log: &mut RunLog) -> String {
        let title = format!("sqlplus [{}] {}", env.sid, what);
        match self.tools.run_sql(env, script).await {
            Ok(raw) => {
                log.trace(&title, &format!("{}\n{}", script.trim_end(), raw));
                raw
            }
            Err(e) => {
                log.trace(&title, &e.to_string());
                String::new()
            }
        }
    }

    pub async fn instance_status(&self, env: &OracleEnv, log: &mut RunLog) -> InstanceStatus {
        let raw = self
            .query(env, "instance status", &SqlScript::instance_status(), log)
            .await;
        ResponseParser::instance_status(&raw)
    }

    pub async fn database_role(&self, env: &OracleEnv, log: &mut RunLog) -> DatabaseRole {
        let raw = self
            .query(env, "database role", &SqlScript::database_role(), log)
            .await;
        ResponseParser::database_role(&raw)
    }

    pub async fn recovery_status(&self, env: &OracleEnv, log: &mut RunLog) -> RecoveryStatus {
        let raw = self
            .query(env, "recovery status", &SqlScript::recovery_status(), log)
            .await;
        ResponseParser::recovery_status(&raw)
    }

    /// 리스너 프로세스가 정확히 하나일 때만 Active
    pub async fn listener_status(&self, name: &str, log: &mut RunLog) -> ListenerStatus {
        let table = match self.tools.process_table().await {
            Ok(table) => table,
            Err(e) => {
                log.trace("process table", &e.to_string());
                return ListenerStatus::Inactive;
            }
        };

        let count = count_listener_processes(&table, self.listener_process, name);
        log.trace(
            &format!("process table [{}]", name),
            &format!("{} matching {} process(es)", count, self.listener_process),
        );
        ListenerStatus::from_match_count(count)
    }
}
