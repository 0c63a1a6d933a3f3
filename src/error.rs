use thiserror::Error;

#[derive(Error, Debug)]
pub enum OraBootError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to run {tool}: {message}")]
    ToolSpawn { tool: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Startup run finished with failures: {failed}/{total} units failed")]
    RunFailed { failed: usize, total: usize },
}

impl OraBootError {
    pub fn spawn(tool: &str, err: impl std::fmt::Display) -> Self {
        Self::ToolSpawn {
            tool: tool.to_string(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, OraBootError>;
