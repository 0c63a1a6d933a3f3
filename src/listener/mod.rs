//! listener.ora 파싱과 리스너 프로세스 매칭

use crate::environment::OracleEnv;
use crate::error::Result;
use std::fs;

/// listener.ora 내용에서 리스너 이름 추출
///
/// 줄 맨 앞에서 시작하는 `KEY = value` 항목 중 키가 `LISTENER`로
/// 시작하는 것만 고릅니다(대소문자 무시). `_`로 나눈 조각 중 `LOG`가
/// 있는 로그 설정 키(`LISTENER_LOG_FILE` 등)와
/// 키워드 `LISTENER` 자체는 제외하고, 대문자로 변환하여 파일 순서대로
/// 중복 없이 반환합니다.
///
/// # Examples
/// ```
/// use oraboot::listener::parse_listener_names;
///
/// let names = parse_listener_names("LISTENER_LOG_FILE=/x\nLISTENER1=(...)\nLISTENER=(...)\n");
/// assert_eq!(names, vec!["LISTENER1"]);
/// ```
pub fn parse_listener_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for line in content.lines() {
        // 들여쓰기된 줄은 이전 항목의 값
        if line.starts_with(char::is_whitespace) || line.starts_with('#') {
            continue;
        }
        let Some((key, _)) = line.split_once('=') else {
            continue;
        };

        let key = key.trim().to_uppercase();
        if !key.starts_with("LISTENER") || key == "LISTENER" || is_log_key(&key) {
            continue;
        }
        if !names.contains(&key) {
            names.push(key);
        }
    }

    names
}

// `LISTENER_DIALOG_DB`는 리스너 이름, `LISTENER_LOG_FILE`은 로그 설정
fn is_log_key(key: &str) -> bool {
    key.split('_').any(|part| part == "LOG")
}

/// 바인딩된 환경의 listener.ora에서 리스너 이름 목록
///
/// 파일이 없으면 빈 목록입니다.
pub fn list_listener_names(env: &OracleEnv) -> Result<Vec<String>> {
    let path = env.listener_file();
    if !path.exists() {
        tracing::debug!("listener.ora not found: {}", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)?;
    Ok(parse_listener_names(&content))
}

/// 프로세스 목록에서 리스너 프로세스 개수 세기
///
/// `process_name`을 실행 중이면서 `listener`를 공백으로 구분된 토큰으로
/// 가진 줄만 셉니다(대소문자 무시).
pub fn count_listener_processes(process_table: &str, process_name: &str, listener: &str) -> usize {
    process_table
        .lines()
        .filter(|line| {
            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                return false;
            };
            let program = command.rsplit('/').next().unwrap_or(command);
            // `grep tnslsnr ...` 같은 검색 프로세스는 첫 토큰이 다르다
            if program != process_name {
                return false;
            }
            tokens.any(|t| t.eq_ignore_ascii_case(listener))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LISTENER_ORA: &str = "\
# listener.ora Network Configuration File
LISTENER_LOG_FILE=/x
LISTENER1 =
  (DESCRIPTION_LIST =
    (DESCRIPTION =
      (ADDRESS = (PROTOCOL = TCP)(HOST = db01)(PORT = 1521))
    )
  )
LISTENER =
  (DESCRIPTION = (ADDRESS = (PROTOCOL = TCP)(HOST = db01)(PORT = 1522)))
SID_LIST_LISTENER1 =
  (SID_LIST = (SID_DESC = (SID_NAME = ORCL)))
listener_stby = (DESCRIPTION = (ADDRESS = (PROTOCOL = TCP)(HOST = db01)(PORT = 1523)))
LOG_DIRECTORY_LISTENER1 = /u01/log
LISTENER1_LOG_DIRECTORY = /u01/log
";

    #[test]
    fn test_excludes_log_and_bare_keyword() {
        let names = parse_listener_names("LISTENER_LOG_FILE=/x\nLISTENER1=(A)\nLISTENER=(B)\n");
        assert_eq!(names, vec!["LISTENER1"]);
    }

    #[test]
    fn test_names_containing_log_substring_kept() {
        let names = parse_listener_names(
            "LISTENER_CATALOG = (A)\nLISTENER_DIALOG_DB = (B)\nLISTENER_LOG_FILE=/x\nLISTENER_DIALOG_DB_LOG_DIRECTORY=/y\n",
        );
        assert_eq!(names, vec!["LISTENER_CATALOG", "LISTENER_DIALOG_DB"]);
    }

    #[test]
    fn test_realistic_file() {
        assert_eq!(parse_listener_names(LISTENER_ORA), vec!["LISTENER1", "LISTENER_STBY"]);
    }

    #[test]
    fn test_duplicates_removed() {
        let names = parse_listener_names("LISTENER1=(A)\nlistener1=(B)\n");
        assert_eq!(names, vec!["LISTENER1"]);
    }

    #[test]
    fn test_list_from_environment() {
        let dir = TempDir::new().unwrap();
        let mut env = OracleEnv::from_home("ORCL", dir.path());
        env.admin_path = dir.path().to_path_buf();
        fs::write(dir.path().join("listener.ora"), LISTENER_ORA).unwrap();

        assert_eq!(list_listener_names(&env).unwrap().len(), 2);
    }

    #[test]
    fn test_missing_listener_file() {
        let env = OracleEnv::from_home("ORCL", "/nonexistent/home");
        assert!(list_listener_names(&env).unwrap().is_empty());
    }

    #[test]
    fn test_count_exactly_one_match() {
        let ps = "\
/u01/app/oracle/19c/bin/tnslsnr listener1 -inherit
/u01/app/oracle/19c/bin/tnslsnr LISTENER_STBY -inherit
grep -i tnslsnr LISTENER1
ora_pmon_ORCL
";
        assert_eq!(count_listener_processes(ps, "tnslsnr", "LISTENER1"), 1);
        assert_eq!(count_listener_processes(ps, "tnslsnr", "LISTENER2"), 0);
    }

    #[test]
    fn test_count_two_matches() {
        let ps = "tnslsnr LISTENER1 -inherit\n/opt/bin/tnslsnr LISTENER1 -inherit\n";
        assert_eq!(count_listener_processes(ps, "tnslsnr", "LISTENER1"), 2);
    }

    #[test]
    fn test_name_must_be_whole_token() {
        let ps = "tnslsnr LISTENER10 -inherit\n";
        assert_eq!(count_listener_processes(ps, "tnslsnr", "LISTENER1"), 0);
    }
}
