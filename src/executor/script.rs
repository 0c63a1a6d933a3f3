/// sqlplus 스크립트 템플릿
///
/// 모든 스크립트는 `sqlplus -S /nolog`의 표준 입력으로 전달되며,
/// 조회 결과는 [`SqlScript::MARKER`] 접두사를 붙여 출력합니다.
/// 배너나 에러 메시지와 섞여도 파서가 값만 골라낼 수 있습니다.
pub struct SqlScript;

impl SqlScript {
    /// 조회 값 앞에 붙는 표식
    pub const MARKER: &'static str = "ORABOOT:";

    const PREAMBLE: &'static str = "\
whenever sqlerror continue
connect / as sysdba
set heading off feedback off pagesize 0 linesize 200 trimspool on verify off echo off
";

    /// 접속/출력 설정과 exit로 본문을 감싼 스크립트 생성
    ///
    /// # Examples
    /// ```
    /// use oraboot::executor::script::SqlScript;
    ///
    /// let script = SqlScript::build("alter database open;");
    /// assert!(script.contains("connect / as sysdba"));
    /// assert!(script.trim_end().ends_with("exit"));
    /// ```
    pub fn build(body: &str) -> String {
        format!("{}{}\nexit\n", Self::PREAMBLE, body.trim_end())
    }

    /// 단일 값 조회 스크립트
    pub fn scalar_query(expr: &str, from: &str) -> String {
        Self::build(&format!(
            "select '{}' || {} from {};",
            Self::MARKER,
            expr,
            from
        ))
    }

    pub fn instance_status() -> String {
        Self::scalar_query("status", "v$instance")
    }

    pub fn database_role() -> String {
        Self::scalar_query("database_role", "v$database")
    }

    /// 실행 중인 MRP 프로세스 개수
    pub fn recovery_status() -> String {
        Self::scalar_query(
            "count(*)",
            "v$managed_standby where process like 'MRP%'",
        )
    }

    pub fn mount() -> String {
        Self::build("startup mount")
    }

    pub fn open() -> String {
        Self::build("alter database open;")
    }

    /// managed recovery를 백그라운드로 시작
    pub fn start_managed_recovery() -> String {
        Self::build("alter database recover managed standby database disconnect from session;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queries_use_marker() {
        for script in [
            SqlScript::instance_status(),
            SqlScript::database_role(),
            SqlScript::recovery_status(),
        ] {
            assert!(script.contains("select 'ORABOOT:' || "));
            assert!(script.starts_with("whenever sqlerror continue"));
        }
    }

    #[test]
    fn test_fixed_statements() {
        assert!(SqlScript::instance_status().contains("from v$instance;"));
        assert!(SqlScript::database_role().contains("database_role from v$database;"));
        assert!(SqlScript::recovery_status().contains("process like 'MRP%'"));
        assert!(SqlScript::mount().contains("\nstartup mount\n"));
        assert!(SqlScript::open().contains("alter database open;"));
        assert!(SqlScript::start_managed_recovery().contains("disconnect from session"));
    }
}
