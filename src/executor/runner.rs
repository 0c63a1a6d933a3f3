use crate::error::{OraBootError, Result};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// 외부 도구 실행 결과
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// 시그널로 종료되면 None
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// stdout 뒤에 stderr를 붙인 전체 출력 (sqlplus는 에러도 stdout으로 낸다)
    pub fn combined(&self) -> String {
        if self.stderr.trim().is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout.trim_end(), self.stderr)
        }
    }
}

pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// 프로그램을 실행하고 종료될 때까지 기다림
    ///
    /// 타임아웃은 없습니다. 실행 자체가 불가능할 때만 에러이고,
    /// 0이 아닌 종료 코드는 호출자가 판단합니다.
    pub async fn execute(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(String, String)],
        stdin: Option<&str>,
    ) -> Result<CommandOutput> {
        tracing::debug!(program, ?args, "spawning");

        let mut command = Command::new(program);
        command
            .args(args)
            .envs(envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| OraBootError::spawn(program, e))?;

        if let Some(input) = stdin {
            if let Some(mut pipe) = child.stdin.take() {
                pipe.write_all(input.as_bytes())
                    .await
                    .map_err(|e| OraBootError::spawn(program, e))?;
                // EOF를 보내야 sqlplus가 종료된다
                drop(pipe);
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| OraBootError::spawn(program, e))?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code(),
        };

        if !result.success() {
            tracing::debug!(program, exit_code = ?result.exit_code, "non-zero exit");
        }

        Ok(result)
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
