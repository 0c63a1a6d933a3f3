//! 단위 테스트용 가짜 Oracle 도구

use super::OracleTools;
use crate::environment::OracleEnv;
use crate::error::{OraBootError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Oraenv(String),
    Sql { sid: String, script: String },
    Lsnrctl { sid: String, args: Vec<String> },
    ProcessTable,
}

/// 순서대로 돌려줄 출력. 다 쓰면 마지막 값을 반복
#[derive(Default)]
struct Responses {
    queue: VecDeque<String>,
    last: String,
}

impl Responses {
    fn queued(outputs: &[&str]) -> Self {
        Self {
            queue: outputs.iter().map(|s| s.to_string()).collect(),
            last: String::new(),
        }
    }

    fn next(&mut self) -> String {
        if let Some(out) = self.queue.pop_front() {
            self.last = out.clone();
            out
        } else {
            self.last.clone()
        }
    }
}

#[derive(Default)]
pub struct ScriptedTools {
    oraenv: HashMap<String, String>,
    sql: Mutex<Vec<(String, String, Responses)>>,
    process_tables: Mutex<Responses>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedTools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_oraenv(mut self, sid: &str, output: &str) -> Self {
        self.oraenv.insert(sid.to_string(), output.to_string());
        self
    }

    /// `sid`에서 `needle`을 포함한 스크립트의 출력 지정
    pub fn with_sql(self, sid: &str, needle: &str, outputs: &[&str]) -> Self {
        self.sql
            .lock()
            .unwrap()
            .push((sid.to_string(), needle.to_string(), Responses::queued(outputs)));
        self
    }

    pub fn with_process_tables(self, tables: &[&str]) -> Self {
        *self.process_tables.lock().unwrap() = Responses::queued(tables);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// `sid`에서 실행된, `needle`을 포함한 SQL 스크립트 수
    pub fn sql_count(&self, sid: &str, needle: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Sql { sid: s, script } if s == sid && script.contains(needle)))
            .count()
    }

    /// `lsnrctl start`에 넘긴 리스너 이름 (호출 순서)
    pub fn started_listeners(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Lsnrctl { args, .. } if args.first().map(String::as_str) == Some("start") => {
                    args.get(1).cloned()
                }
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl OracleTools for ScriptedTools {
    async fn run_oraenv(&self, sid: &str) -> Result<String> {
        self.record(Call::Oraenv(sid.to_string()));
        self.oraenv
            .get(sid)
            .cloned()
            .ok_or_else(|| OraBootError::spawn("oraenv", "not scripted"))
    }

    async fn run_sql(&self, env: &OracleEnv, script: &str) -> Result<String> {
        self.record(Call::Sql {
            sid: env.sid.clone(),
            script: script.to_string(),
        });

        let mut rules = self.sql.lock().unwrap();
        let output = rules
            .iter_mut()
            .find(|(sid, needle, _)| *sid == env.sid && script.contains(needle.as_str()))
            .map(|(_, _, responses)| responses.next())
            .unwrap_or_default();
        Ok(output)
    }

    async fn run_lsnrctl(&self, env: &OracleEnv, args: &[&str]) -> Result<String> {
        self.record(Call::Lsnrctl {
            sid: env.sid.clone(),
            args: args.iter().map(|a| a.to_string()).collect(),
        });
        Ok("The command completed successfully\n".to_string())
    }

    async fn process_table(&self) -> Result<String> {
        self.record(Call::ProcessTable);
        Ok(self.process_tables.lock().unwrap().next())
    }
}
