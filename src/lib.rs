pub mod calendar_sync;
pub mod cli;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod orchestrator;
pub mod provision;
pub mod schema;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use orchestrator::{Orchestrator, RunSettings, RunSummary};
