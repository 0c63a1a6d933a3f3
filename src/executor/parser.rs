use crate::executor::script::SqlScript;
use crate::status::{DatabaseRole, InstanceStatus, RecoveryStatus};
use once_cell::sync::Lazy;
use regex::Regex;

/// 사전 컴파일된 정규표현식
static MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?m)^{}(.*)$", regex::escape(SqlScript::MARKER))).unwrap()
});

static ERROR_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:ORA|SP2|TNS)-\d{4,5}):?\s*(.*)").unwrap()
});

/// sqlplus 원본 출력을 상태 값으로 변환하는 파서
///
/// 해석할 수 없는 출력은 항상 Unknown/Inactive로 정규화합니다.
pub struct ResponseParser;

impl ResponseParser {
    /// 표식이 붙은 첫 번째 값
    pub fn scalar(raw: &str) -> Option<String> {
        MARKER_REGEX
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }

    /// 출력에 포함된 `ORA-`/`SP2-`/`TNS-` 에러 줄
    ///
    /// # Examples
    /// ```
    /// use oraboot::executor::parser::ResponseParser;
    ///
    /// let errors = ResponseParser::errors("ERROR:\nORA-01034: ORACLE not available\n");
    /// assert_eq!(errors, vec!["ORA-01034: ORACLE not available"]);
    /// ```
    pub fn errors(raw: &str) -> Vec<String> {
        raw.lines()
            .filter_map(|line| ERROR_CODE_REGEX.captures(line))
            .map(|caps| {
                let code = caps.get(1).map_or("", |m| m.as_str());
                let text = caps.get(2).map_or("", |m| m.as_str()).trim();
                if text.is_empty() {
                    code.to_string()
                } else {
                    format!("{}: {}", code, text)
                }
            })
            .collect()
    }

    pub fn instance_status(raw: &str) -> InstanceStatus {
        Self::scalar(raw)
            .map(|v| InstanceStatus::from_value(&v))
            .unwrap_or(InstanceStatus::Unknown)
    }

    pub fn database_role(raw: &str) -> DatabaseRole {
        Self::scalar(raw)
            .map(|v| DatabaseRole::from_value(&v))
            .unwrap_or(DatabaseRole::Unknown)
    }

    /// MRP 행이 하나 이상이면 Active
    pub fn recovery_status(raw: &str) -> RecoveryStatus {
        match Self::scalar(raw).and_then(|v| v.parse::<u32>().ok()) {
            Some(count) if count >= 1 => RecoveryStatus::Active,
            _ => RecoveryStatus::Inactive,
        }
    }
}
