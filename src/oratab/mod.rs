//! 인스턴스 테이블(oratab) 파서
//!
//! 형식: `SID:ORACLE_HOME:Y|N`. 세 번째 필드가 정확히 `Y`인 항목만
//! 자동 시작 대상입니다.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// oratab 한 줄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OratabEntry {
    pub sid: String,
    pub home: String,
    pub auto_start: bool,
}

/// oratab 내용을 파싱하여 모든 항목을 순서대로 반환
///
/// 빈 줄, `#` 주석 줄, 필드가 부족한 줄은 건너뜁니다. 같은 SID가 여러 번
/// 나와도 그대로 두며, 중복 제거는 `managed_entries`에서 합니다.
pub fn parse_oratab(content: &str) -> Vec<OratabEntry> {
    let mut entries: Vec<OratabEntry> = Vec::new();

    for line in content.lines() {
        // 줄 끝 주석 제거
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(':').collect();
        if fields.len() < 3 {
            continue;
        }

        let sid = fields[0].trim();
        if sid.is_empty() {
            continue;
        }

        entries.push(OratabEntry {
            sid: sid.to_string(),
            home: fields[1].trim().to_string(),
            auto_start: fields[2].trim() == "Y" && sid != "*",
        });
    }

    entries
}

/// 자동 시작 대상 인스턴스만 반환
///
/// `Y` 항목만 남긴 뒤 SID별로 처음 나온 항목을 씁니다. 앞선 `N` 항목이
/// 뒤의 `Y` 항목을 가리지 않습니다.
pub fn managed_entries(content: &str) -> Vec<OratabEntry> {
    let mut managed: Vec<OratabEntry> = Vec::new();
    for entry in parse_oratab(content).into_iter().filter(|e| e.auto_start) {
        if !managed.iter().any(|m| m.sid == entry.sid) {
            managed.push(entry);
        }
    }
    managed
}

/// oratab 파일을 읽어 자동 시작 대상 인스턴스 목록 반환
///
/// 파일이 없으면 빈 목록입니다.
pub fn list_managed_instances(path: &Path) -> Result<Vec<OratabEntry>> {
    if !path.exists() {
        tracing::warn!("oratab not found: {}", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    Ok(managed_entries(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sids(entries: &[OratabEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.sid.as_str()).collect()
    }

    #[test]
    fn test_only_y_rows_are_managed() {
        let content = "DB1:/opt/oracle:Y\nDB2:/opt/oracle:N\n";
        let managed = managed_entries(content);
        assert_eq!(sids(&managed), vec!["DB1"]);
        assert_eq!(managed[0].home, "/opt/oracle");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "\
# This file is used by ORACLE utilities.
#DBX:/opt/oracle:Y

ORCL:/u01/app/oracle/product/19c:Y   # production

STBY:/u01/app/oracle/product/19c:Y
";
        assert_eq!(sids(&managed_entries(content)), vec!["ORCL", "STBY"]);
    }

    #[test]
    fn test_flag_must_be_exactly_y() {
        let content = "A:/h:y\nB:/h:YES\nC:/h:\nD:/h:Y\nE:/h\n";
        assert_eq!(sids(&managed_entries(content)), vec!["D"]);
    }

    #[test]
    fn test_order_preserved_and_duplicates_dropped() {
        let content = "C:/h:Y\nA:/h:Y\nB:/h:Y\nA:/other:N\n";
        let managed = managed_entries(content);
        assert_eq!(sids(&managed), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_earlier_n_row_does_not_hide_y_row() {
        let managed = managed_entries("A:/old:N\nA:/new:Y\n");
        assert_eq!(managed.len(), 1);
        assert_eq!(managed[0].home, "/new");
    }

    #[test]
    fn test_duplicate_y_rows_keep_first() {
        let managed = managed_entries("A:/first:Y\nA:/second:Y\n");
        assert_eq!(managed.len(), 1);
        assert_eq!(managed[0].home, "/first");
        assert_eq!(parse_oratab("A:/first:Y\nA:/second:Y\n").len(), 2);
    }

    #[test]
    fn test_wildcard_sid_never_managed() {
        let content = "*:/u01/app/oracle/product/19c:Y\n";
        assert!(managed_entries(content).is_empty());
        assert_eq!(parse_oratab(content).len(), 1);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let result = list_managed_instances(Path::new("/nonexistent/oratab")).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_oratab("").is_empty());
    }
}
