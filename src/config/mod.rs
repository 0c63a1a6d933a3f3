use crate::error::{OraBootError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 환경 변수 해석 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvResolverKind {
    /// oraenv 유틸리티 실행 결과를 사용
    Oraenv,
    /// oratab의 홈 디렉토리에서 경로를 직접 유도
    Oratab,
}

/// oraboot 설정
///
/// 설정 파일은 ~/.oraboot/config.toml에 저장됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 인스턴스 테이블 경로
    #[serde(default = "default_oratab_path")]
    pub oratab_path: PathBuf,

    /// 실행 로그(.log)와 디버그 트레이스(.trc)를 남길 디렉토리
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// SQL 클라이언트 실행 파일
    #[serde(default = "default_sqlplus")]
    pub sqlplus_path: String,

    /// 리스너 제어 도구 실행 파일
    #[serde(default = "default_lsnrctl")]
    pub lsnrctl_path: String,

    /// 환경 설정 유틸리티 경로
    #[serde(default = "default_oraenv")]
    pub oraenv_path: String,

    /// 프로세스 목록 조회 도구
    #[serde(default = "default_ps")]
    pub ps_path: String,

    /// oraenv를 source할 셸
    #[serde(default = "default_shell")]
    pub shell_path: String,

    /// 리스너 프로세스 이름
    #[serde(default = "default_listener_process")]
    pub listener_process: String,

    /// 환경 변수 해석 방식
    #[serde(default = "default_env_resolver")]
    pub env_resolver: EnvResolverKind,

    /// 같은 listener.ora의 같은 리스너를 한 번만 시작
    #[serde(default = "default_dedupe_listeners")]
    pub dedupe_listeners: bool,
}

fn default_oratab_path() -> PathBuf {
    PathBuf::from("/etc/oratab")
}

fn default_log_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("log")
}

fn default_sqlplus() -> String {
    "sqlplus".to_string()
}

fn default_lsnrctl() -> String {
    "lsnrctl".to_string()
}

fn default_oraenv() -> String {
    "/usr/local/bin/oraenv".to_string()
}

fn default_ps() -> String {
    "ps".to_string()
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

fn default_listener_process() -> String {
    "tnslsnr".to_string()
}

fn default_env_resolver() -> EnvResolverKind {
    EnvResolverKind::Oraenv
}

fn default_dedupe_listeners() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oratab_path: default_oratab_path(),
            log_dir: default_log_dir(),
            sqlplus_path: default_sqlplus(),
            lsnrctl_path: default_lsnrctl(),
            oraenv_path: default_oraenv(),
            ps_path: default_ps(),
            shell_path: default_shell(),
            listener_process: default_listener_process(),
            env_resolver: default_env_resolver(),
            dedupe_listeners: default_dedupe_listeners(),
        }
    }
}

impl Config {
    /// 기본 설정 파일 경로 (~/.oraboot/config.toml)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".oraboot")
            .join("config.toml")
    }

    /// 설정 파일에서 로드 (없으면 기본값 사용)
    ///
    /// # Examples
    /// ```
    /// use oraboot::config::Config;
    ///
    /// let config = Config::load(None).unwrap();
    /// assert_eq!(config.listener_process, "tnslsnr");
    /// ```
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if !config_path.exists() {
            // 명시적으로 지정한 파일이 없으면 에러
            if path.is_some() {
                return Err(OraBootError::Config(format!(
                    "config file not found: {}",
                    config_path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Self::from_toml(&content)
    }

    /// TOML 문자열에서 설정 파싱
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| OraBootError::Config(e.to_string()))
    }

    /// 실행 로그 경로
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("oraboot.log")
    }

    /// 디버그 트레이스 경로
    pub fn trace_file(&self) -> PathBuf {
        self.log_dir.join("oraboot.trc")
    }
}
