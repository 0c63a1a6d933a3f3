#[cfg(test)]
pub mod fake;

use crate::config::Config;
use crate::environment::OracleEnv;
use crate::error::Result;
use crate::executor::runner::CommandRunner;
use async_trait::async_trait;

/// 기동에 쓰이는 외부 도구 모음
///
/// 호출은 하나씩 끝까지 기다린 뒤 다음으로 넘어갑니다. 타임아웃과 재시도는 없습니다.
#[async_trait]
pub trait OracleTools: Send + Sync {
    /// `sid`로 oraenv를 실행하고 결정된 `ORACLE_HOME`, `LD_LIBRARY_PATH`,
    /// `TNS_ADMIN` 출력
    async fn run_oraenv(&self, sid: &str) -> Result<String>;

    /// `env` 환경에서 sqlplus에 스크립트 전달
    async fn run_sql(&self, env: &OracleEnv, script: &str) -> Result<String>;

    /// `env` 환경에서 lsnrctl 실행
    async fn run_lsnrctl(&self, env: &OracleEnv, args: &[&str]) -> Result<String>;

    /// OS 프로세스 목록 (한 줄에 프로세스 하나, 명령어가 맨 앞)
    async fn process_table(&self) -> Result<String>;
}

/// 실제 Oracle 도구를 실행하는 구현
pub struct SystemTools {
    runner: CommandRunner,
    sqlplus: String,
    lsnrctl: String,
    oraenv: String,
    ps: String,
    shell: String,
}

/// 질문 없이 oraenv 실행. 경로는 환경 변수로 전달
const ORAENV_SCRIPT: &str = r#". "$ORABOOT_ORAENV" >/dev/null 2>&1
echo "ORACLE_HOME=$ORACLE_HOME"
echo "LD_LIBRARY_PATH=$LD_LIBRARY_PATH"
echo "TNS_ADMIN=$TNS_ADMIN""#;

impl SystemTools {
    pub fn new(config: &Config) -> Self {
        Self {
            runner: CommandRunner::new(),
            sqlplus: config.sqlplus_path.clone(),
            lsnrctl: config.lsnrctl_path.clone(),
            oraenv: config.oraenv_path.clone(),
            ps: config.ps_path.clone(),
            shell: config.shell_path.clone(),
        }
    }

    /// 경로 없는 도구 이름은 `$ORACLE_HOME/bin`에 있으면 그쪽을 사용
    fn resolve(env: &OracleEnv, configured: &str) -> String {
        if !configured.contains('/') {
            let candidate = env.bin(configured);
            if candidate.exists() {
                return candidate.to_string_lossy().to_string();
            }
        }
        configured.to_string()
    }
}

#[async_trait]
impl OracleTools for SystemTools {
    async fn run_oraenv(&self, sid: &str) -> Result<String> {
        let envs = vec![
            ("ORACLE_SID".to_string(), sid.to_string()),
            ("ORAENV_ASK".to_string(), "NO".to_string()),
            ("ORABOOT_ORAENV".to_string(), self.oraenv.clone()),
        ];
        let output = self
            .runner
            .execute(&self.shell, &["-c", ORAENV_SCRIPT], &envs, None)
            .await?;
        Ok(output.stdout)
    }

    async fn run_sql(&self, env: &OracleEnv, script: &str) -> Result<String> {
        let program = Self::resolve(env, &self.sqlplus);
        let output = self
            .runner
            .execute(&program, &["-S", "/nolog"], &env.vars(), Some(script))
            .await?;
        Ok(output.combined())
    }

    async fn run_lsnrctl(&self, env: &OracleEnv, args: &[&str]) -> Result<String> {
        let program = Self::resolve(env, &self.lsnrctl);
        let output = self
            .runner
            .execute(&program, args, &env.vars(), None)
            .await?;
        Ok(output.combined())
    }

    async fn process_table(&self) -> Result<String> {
        let output = self
            .runner
            .execute(&self.ps, &["-eo", "args"], &[], None)
            .await?;
        Ok(output.stdout)
    }
}
