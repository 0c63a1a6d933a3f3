//! 인스턴스 환경 바인딩
//!
//! 인스턴스 하나의 ORACLE_HOME, 라이브러리 경로, admin 경로를 [`OracleEnv`]
//! 값으로 만듭니다. 프로세스 환경 변수는 바꾸지 않고, 인스턴스용 하위
//! 프로세스마다 [`OracleEnv::vars`]를 넘깁니다.

use crate::config::EnvResolverKind;
use crate::error::{OraBootError, Result};
use crate::oratab::OratabEntry;
use crate::runlog::RunLog;
use crate::tools::OracleTools;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleEnv {
    pub sid: String,
    pub home: PathBuf,
    pub lib_path: PathBuf,
    pub admin_path: PathBuf,
}

impl OracleEnv {
    /// ORACLE_HOME에서 모든 경로 유도
    pub fn from_home(sid: &str, home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        Self {
            sid: sid.to_string(),
            lib_path: home.join("lib"),
            admin_path: home.join("network").join("admin"),
            home,
        }
    }

    /// oraenv 실행 후 출력된 `KEY=value` 줄 파싱
    ///
    /// ORACLE_HOME을 얻지 못하면 `None`입니다.
    pub fn from_oraenv_output(sid: &str, output: &str) -> Option<Self> {
        let mut home = None;
        let mut lib_path = None;
        let mut admin_path = None;

        for line in output.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.trim() {
                "ORACLE_HOME" => home = Some(PathBuf::from(value)),
                // 첫 항목만 사용, 나머지는 상속된 값
                "LD_LIBRARY_PATH" => {
                    lib_path = value.split(':').find(|p| !p.is_empty()).map(PathBuf::from)
                }
                "TNS_ADMIN" => admin_path = Some(PathBuf::from(value)),
                _ => {}
            }
        }

        let mut env = Self::from_home(sid, home?);
        if let Some(lib) = lib_path {
            env.lib_path = lib;
        }
        if let Some(admin) = admin_path {
            env.admin_path = admin;
        }
        Some(env)
    }

    /// 이 환경의 listener.ora 경로
    pub fn listener_file(&self) -> PathBuf {
        self.admin_path.join("listener.ora")
    }

    /// `$ORACLE_HOME/bin` 아래 도구 경로
    pub fn bin(&self, tool: &str) -> PathBuf {
        self.home.join("bin").join(tool)
    }

    /// 이 인스턴스의 하위 프로세스에 넘기는 환경 변수
    pub fn vars(&self) -> Vec<(String, String)> {
        let inherited_path = std::env::var("PATH").unwrap_or_default();
        let path = if inherited_path.is_empty() {
            path_str(&self.home.join("bin"))
        } else {
            format!("{}:{}", path_str(&self.home.join("bin")), inherited_path)
        };

        vec![
            ("ORACLE_SID".to_string(), self.sid.clone()),
            ("ORACLE_HOME".to_string(), path_str(&self.home)),
            ("LD_LIBRARY_PATH".to_string(), path_str(&self.lib_path)),
            ("TNS_ADMIN".to_string(), path_str(&self.admin_path)),
            ("PATH".to_string(), path),
        ]
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// oratab 항목 하나의 환경 바인딩
///
/// oraenv 방식에서 oraenv가 실패하거나 ORACLE_HOME을 주지 않으면 실행 로그에
/// WARNING을 남기고 oratab의 home을 씁니다. 둘 다 home이 없을 때만 에러입니다.
pub async fn bind_environment(
    tools: &dyn OracleTools,
    entry: &OratabEntry,
    kind: EnvResolverKind,
    log: &mut RunLog,
) -> Result<OracleEnv> {
    if kind == EnvResolverKind::Oraenv {
        match tools.run_oraenv(&entry.sid).await {
            Ok(output) => {
                log.trace(&format!("oraenv: {}", entry.sid), &output);
                if let Some(env) = OracleEnv::from_oraenv_output(&entry.sid, &output) {
                    return Ok(env);
                }
                log.warning(format!(
                    "{}: oraenv did not resolve ORACLE_HOME, using oratab home",
                    entry.sid
                ));
            }
            Err(e) => {
                log.trace(&format!("oraenv: {}", entry.sid), &e.to_string());
                log.warning(format!(
                    "{}: oraenv failed ({}), using oratab home",
                    entry.sid, e
                ));
            }
        }
    }

    if entry.home.is_empty() {
        return Err(OraBootError::Environment(format!(
            "no ORACLE_HOME for {}",
            entry.sid
        )));
    }

    Ok(OracleEnv::from_home(&entry.sid, &entry.home))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runlog::LogLevel;
    use crate::tools::fake::ScriptedTools;

    fn entry(sid: &str, home: &str) -> OratabEntry {
        OratabEntry {
            sid: sid.to_string(),
            home: home.to_string(),
            auto_start: true,
        }
    }

    #[test]
    fn test_from_home() {
        let env = OracleEnv::from_home("ORCL", "/u01/app/oracle/19c");
        assert_eq!(env.lib_path, PathBuf::from("/u01/app/oracle/19c/lib"));
        assert_eq!(
            env.listener_file(),
            PathBuf::from("/u01/app/oracle/19c/network/admin/listener.ora")
        );
        assert_eq!(env.bin("sqlplus"), PathBuf::from("/u01/app/oracle/19c/bin/sqlplus"));
    }

    #[test]
    fn test_from_oraenv_output() {
        let output = "\
ORACLE_HOME=/u01/app/oracle/19c
LD_LIBRARY_PATH=/u01/app/oracle/19c/lib:/usr/lib
TNS_ADMIN=/etc/oracle/network
";
        let env = OracleEnv::from_oraenv_output("ORCL", output).unwrap();
        assert_eq!(env.home, PathBuf::from("/u01/app/oracle/19c"));
        assert_eq!(env.lib_path, PathBuf::from("/u01/app/oracle/19c/lib"));
        assert_eq!(env.admin_path, PathBuf::from("/etc/oracle/network"));
    }

    #[test]
    fn test_from_oraenv_output_without_home() {
        assert!(OracleEnv::from_oraenv_output("ORCL", "ORACLE_HOME=\nTNS_ADMIN=\n").is_none());
    }

    #[test]
    fn test_vars_target_instance() {
        let env = OracleEnv::from_home("ORCL", "/opt/oracle");
        let vars = env.vars();
        assert!(vars.contains(&("ORACLE_SID".to_string(), "ORCL".to_string())));
        assert!(vars.contains(&("TNS_ADMIN".to_string(), "/opt/oracle/network/admin".to_string())));
        let path = &vars.iter().find(|(k, _)| k == "PATH").unwrap().1;
        assert!(path.starts_with("/opt/oracle/bin"));
    }

    #[tokio::test]
    async fn test_bind_uses_oraenv() {
        let tools = ScriptedTools::new()
            .with_oraenv("ORCL", "ORACLE_HOME=/u02/oracle\nTNS_ADMIN=\n");
        let mut log = RunLog::detached(false);

        let env = bind_environment(&tools, &entry("ORCL", "/opt/oracle"), EnvResolverKind::Oraenv, &mut log)
            .await
            .unwrap();

        assert_eq!(env.home, PathBuf::from("/u02/oracle"));
        assert_eq!(log.count(LogLevel::Warning), 0);
    }

    #[tokio::test]
    async fn test_bind_falls_back_to_oratab() {
        let tools = ScriptedTools::new();
        let mut log = RunLog::detached(false);

        let env = bind_environment(&tools, &entry("ORCL", "/opt/oracle"), EnvResolverKind::Oraenv, &mut log)
            .await
            .unwrap();

        assert_eq!(env.home, PathBuf::from("/opt/oracle"));
        assert_eq!(log.count(LogLevel::Warning), 1);
    }

    #[tokio::test]
    async fn test_bind_is_idempotent() {
        let tools = ScriptedTools::new();
        let mut log = RunLog::detached(false);
        let e = entry("ORCL", "/opt/oracle");

        let first = bind_environment(&tools, &e, EnvResolverKind::Oratab, &mut log).await.unwrap();
        let second = bind_environment(&tools, &e, EnvResolverKind::Oratab, &mut log).await.unwrap();
        assert_eq!(first, second);
        assert!(tools.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bind_without_any_home_fails() {
        let tools = ScriptedTools::new();
        let mut log = RunLog::detached(false);

        let result = bind_environment(&tools, &entry("ORCL", ""), EnvResolverKind::Oratab, &mut log).await;
        assert!(matches!(result, Err(OraBootError::Environment(_))));
    }
}
