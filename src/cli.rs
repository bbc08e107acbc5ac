use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notion-provision")]
#[command(version, about = "Provision Notion template databases with sample data")]
pub struct Cli {
    /// Read configuration from this env file instead of ./.env
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Recreate all tables, link relations and load sample rows (default)
    Run {
        /// Only provision these templates and what they reference (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        include: Option<Vec<String>>,
    },

    /// List all template titles
    ListTables,

    /// Mirror every row of an existing calendar table to the calendar
    SyncCalendar {
        /// Id of the calendar table
        #[arg(long)]
        table_id: String,
    },

    /// Update fields of one calendar event
    UpdateEvent {
        event_id: String,

        #[arg(long)]
        summary: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    pub fn command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Run { include: None })
    }
}
