pub mod cli;
pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod listener;
pub mod logging;
pub mod orchestrator;
pub mod oratab;
pub mod runlog;
pub mod status;
pub mod tools;
