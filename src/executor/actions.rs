use crate::environment::OracleEnv;
use crate::executor::parser::ResponseParser;
use crate::executor::script::SqlScript;
use crate::runlog::RunLog;
use crate::tools::OracleTools;

/// 상태를 바꾸는 명령 실행기
///
/// 어떤 명령도 성공 여부를 반환하지 않습니다. 호출자는 항상 다시
/// 조회해서 결과를 확인해야 합니다.
pub struct ActionExecutor<'a> {
    tools: &'a dyn OracleTools,
    dry_run: bool,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(tools: &'a dyn OracleTools, dry_run: bool) -> Self {
        Self { tools, dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    async fn run_script(&self, env: &OracleEnv, what: &str, script: &str, log: &mut RunLog) {
        let title = format!("sqlplus [{}] {}", env.sid, what);
        if self.dry_run {
            log.trace(&title, &format!("[dry-run] would run:\n{}", script.trim_end()));
            return;
        }

        match self.tools.run_sql(env, script).await {
            Ok(raw) => {
                let errors = ResponseParser::errors(&raw);
                if !errors.is_empty() {
                    tracing::debug!(sid = %env.sid, ?errors, "{} reported errors", what);
                }
                log.trace(&title, &format!("{}\n{}", script.trim_end(), raw));
            }
            Err(e) => log.trace(&title, &e.to_string()),
        }
    }

    pub async fn mount_instance(&self, env: &OracleEnv, log: &mut RunLog) {
        self.run_script(env, "startup mount", &SqlScript::mount(), log).await;
    }

    pub async fn open_database(&self, env: &OracleEnv, log: &mut RunLog) {
        self.run_script(env, "open database", &SqlScript::open(), log).await;
    }

    pub async fn activate_standby_recovery(&self, env: &OracleEnv, log: &mut RunLog) {
        self.run_script(
            env,
            "start managed recovery",
            &SqlScript::start_managed_recovery(),
            log,
        )
        .await;
    }

    pub async fn start_listener(&self, env: &OracleEnv, name: &str, log: &mut RunLog) {
        let title = format!("lsnrctl [{}] start {}", env.sid, name);
        if self.dry_run {
            log.trace(&title, &format!("[dry-run] would run: lsnrctl start {}", name));
            return;
        }

        match self.tools.run_lsnrctl(env, &["start", name]).await {
            Ok(raw) => log.trace(&title, &raw),
            Err(e) => log.trace(&title, &e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::fake::{Call, ScriptedTools};

    #[tokio::test]
    async fn test_actions_issue_commands() {
        let tools = ScriptedTools::new();
        let executor = ActionExecutor::new(&tools, false);
        let env = OracleEnv::from_home("DB1", "/opt/oracle");
        let mut log = RunLog::detached(false);

        executor.mount_instance(&env, &mut log).await;
        executor.open_database(&env, &mut log).await;
        executor.activate_standby_recovery(&env, &mut log).await;
        executor.start_listener(&env, "LISTENER1", &mut log).await;

        assert_eq!(tools.sql_count("DB1", "startup mount"), 1);
        assert_eq!(tools.sql_count("DB1", "alter database open"), 1);
        assert_eq!(tools.sql_count("DB1", "recover managed standby"), 1);
        assert_eq!(tools.started_listeners(), vec!["LISTENER1"]);
        // 실행 로그에는 아무것도 남기지 않는다
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        let tools = ScriptedTools::new();
        let executor = ActionExecutor::new(&tools, true);
        let env = OracleEnv::from_home("DB1", "/opt/oracle");
        let mut log = RunLog::detached(false);

        executor.mount_instance(&env, &mut log).await;
        executor.start_listener(&env, "LISTENER1", &mut log).await;

        assert!(executor.is_dry_run());
        assert!(tools.calls().iter().all(|c| !matches!(c, Call::Sql { .. } | Call::Lsnrctl { .. })));
    }
}
