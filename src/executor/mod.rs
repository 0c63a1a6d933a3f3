pub mod runner;
pub mod script;
pub mod parser;
pub mod prober;
pub mod actions;

// Re-exports for convenience (used by the orchestrator)
pub use actions::ActionExecutor;
pub use prober::StatusProber;
