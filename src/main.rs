use anyhow::{Context, Result};
use notion_provision::{
    calendar_sync::sync_calendar,
    cli::{Cli, Commands},
    client::{Calendar, Chat, EventPatch, GoogleCalendar, NotionClient, SlackClient},
    config::{Config, NotionSettings},
    filter::resolve_templates,
    logging,
    orchestrator::{report, Orchestrator, RunSettings, RunSummary},
    schema::{list_templates, COMPANY_CALENDAR},
};
use std::time::Instant;
use tracing::{info, warn};

/// Build the clients and run the full workflow
fn provision(
    config: &Config,
    notion: &NotionSettings,
    slack: &SlackClient,
    include: Option<Vec<String>>,
) -> Result<RunSummary> {
    let store = NotionClient::new(notion).context("Failed to create Notion client")?;
    let calendar =
        GoogleCalendar::new(&config.calendar).context("Failed to create calendar client")?;
    let templates = resolve_templates(include)?;

    let settings = RunSettings {
        parent_id: &notion.parent_page_id,
        default_person: config.default_person_id.as_deref(),
        status_kind: config.status_kind,
        status_poll: config.status_poll,
    };
    Orchestrator::new(&store, &calendar, slack, settings).run(&templates)
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let config = match &cli.env_file {
        Some(path) => Config::from_env_file(path)?,
        None => Config::from_env()?,
    };

    let slack = SlackClient::new(&config.slack).context("Failed to create Slack client")?;
    logging::init(&config, slack.has_webhook().then(|| slack.clone()))?;

    match cli.command() {
        Commands::Run { include } => {
            let start = Instant::now();

            let Some(notion) = config.notion() else {
                warn!("Notion client not configured; skipping database creation");
                if let Err(e) = slack.send_message("⚠️ Notion credentials missing", None) {
                    warn!("Failed to send Slack message: {}", e);
                }
                return Ok(());
            };

            let summary = report(&slack, provision(&config, &notion, &slack, include))?;

            info!(
                "Provisioned {} tables ({} rows) in {:.1}s",
                summary.created_tables(),
                summary.created_rows(),
                start.elapsed().as_secs_f64()
            );
        }

        Commands::ListTables => {
            println!("Available tables:\n");
            for template in list_templates() {
                println!("  {} ({} columns)", template.title, template.columns.len());
            }
        }

        Commands::SyncCalendar { table_id } => {
            let notion = config
                .notion()
                .context("NOTION_TOKEN and PARENT_PAGE_ID must be set")?;
            let store = NotionClient::new(&notion).context("Failed to create Notion client")?;
            let calendar =
                GoogleCalendar::new(&config.calendar).context("Failed to create calendar client")?;
            let mapping = COMPANY_CALENDAR
                .calendar
                .as_ref()
                .context("Calendar template has no calendar mapping")?;

            let count = sync_calendar(&store, &calendar, &table_id, mapping)
                .with_context(|| format!("Calendar sync failed for {}", table_id))?;
            info!("Created {} calendar events", count);
        }

        Commands::UpdateEvent {
            event_id,
            summary,
            start,
            end,
            description,
        } => {
            let calendar =
                GoogleCalendar::new(&config.calendar).context("Failed to create calendar client")?;
            let patch = EventPatch {
                summary,
                start,
                end,
                description,
            };
            calendar
                .update_event(&event_id, &patch)
                .with_context(|| format!("Failed to update event {}", event_id))?;
        }
    }

    Ok(())
}
