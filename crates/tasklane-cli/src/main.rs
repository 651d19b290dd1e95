mod render;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use tasklane_core::filter::{self, PriorityFilter, StatusFilter, TaskFilters};
use tasklane_core::notice::{Notice, NoticeLevel};
use tasklane_core::{BulkAction, PageLimit, SortState, TaskListController};
use tasklane_http::{HttpConfig, HttpTaskApi};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::render::Renderer;

#[derive(Parser, Debug)]
#[command(
    name = "tasklane",
    about = "Task list client for the tasklane backend"
)]
struct Cli {
    /// Path to a config file (defaults to <config dir>/tasklane/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print a page of my tasks
    List(ListArgs),
    /// Print the aggregate task counters
    Stats,
    /// Apply one mutation to several tasks at once
    Bulk(BulkArgs),
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    /// Project id to filter by
    #[arg(long)]
    project: Option<Uuid>,
    /// Free-text search over title and description
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value = "updated_at")]
    sort: String,
    #[arg(long, default_value = "DESC")]
    order: String,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value = "20")]
    limit: String,
}

#[derive(clap::Args, Debug)]
struct BulkArgs {
    /// Comma-separated task ids; only ids on the fetched page are selected
    #[arg(long, value_delimiter = ',', required = true)]
    ids: Vec<Uuid>,

    /// Page to fetch before selecting (selection is page-scoped)
    #[arg(long, default_value_t = 1)]
    page: u32,

    #[command(subcommand)]
    action: BulkCommand,
}

#[derive(Subcommand, Debug)]
enum BulkCommand {
    /// Set the status of every selected task
    Status { value: String },
    /// Set the priority of every selected task
    Priority { value: String },
    /// Assign every selected task, or clear the assignee with --clear
    Assignee {
        value: Option<Uuid>,
        #[arg(long)]
        clear: bool,
    },
    /// Set the due date (RFC 3339 or YYYY-MM-DD), or clear it with --clear
    Due {
        value: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Delete every selected task (requires --yes)
    Delete {
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    info!(command = ?cli.command, "starting tasklane CLI");

    let config = HttpConfig::load(cli.config.as_deref())?;
    debug!(base_url = %config.base_url, "resolved client config");
    let api = Arc::new(HttpTaskApi::new(&config)?);
    let mut controller = TaskListController::new(api);
    let renderer = Renderer::new();

    match cli.command {
        Command::List(args) => {
            controller.set_filters(parse_filters(&args)?);
            controller.set_sort(SortState {
                field: args.sort.parse()?,
                order: args.order.parse()?,
            });
            controller.set_limit(args.limit.parse::<PageLimit>()?);
            controller.set_page(args.page);

            let outcome = controller.refresh().await;
            drain_notices(&mut controller);
            if !outcome.is_applied() {
                bail!("could not load the task list; retry with --log-level debug for details");
            }
            renderer.print_task_table(&controller.badged_rows(Utc::now()), controller.page())?;
        }
        Command::Stats => {
            let outcome = controller.refresh().await;
            drain_notices(&mut controller);
            if !outcome.is_applied() {
                bail!("could not load task statistics");
            }
            let stats = controller
                .stats()
                .ok_or_else(|| anyhow!("server returned no statistics"))?;
            renderer.print_stats(stats)?;
        }
        Command::Bulk(args) => {
            let action = parse_bulk_action(&args.action)?;
            if action.is_destructive() && !confirmed(&args.action) {
                bail!("refusing to delete without --yes");
            }

            controller.set_page(args.page);
            let outcome = controller.refresh().await;
            drain_notices(&mut controller);
            if !outcome.is_applied() {
                bail!("could not load the task list to select from");
            }

            for id in &args.ids {
                controller.toggle_select(*id);
            }
            let selected = controller.selection().len();
            if selected < args.ids.len() {
                eprintln!(
                    "warning: {} of {} ids are not on page {} and were skipped",
                    args.ids.len() - selected,
                    args.ids.len(),
                    controller.page().page
                );
            }

            let result = controller.bulk(action).await;
            drain_notices(&mut controller);
            result.with_context(|| "bulk action failed")?;
        }
    }

    Ok(())
}

fn parse_filters(args: &ListArgs) -> anyhow::Result<TaskFilters> {
    let status = filter::parse_opt::<StatusFilter>(args.status.as_deref())?;
    let priority = filter::parse_opt::<PriorityFilter>(args.priority.as_deref())?;
    Ok(TaskFilters {
        status: status.map(|wrapped| wrapped.0),
        priority: priority.map(|wrapped| wrapped.0),
        project_id: args.project,
        search: args.search.clone(),
    })
}

fn parse_bulk_action(command: &BulkCommand) -> anyhow::Result<BulkAction> {
    Ok(match command {
        BulkCommand::Status { value } => {
            BulkAction::Status(value.parse::<StatusFilter>()?.0)
        }
        BulkCommand::Priority { value } => {
            BulkAction::Priority(value.parse::<PriorityFilter>()?.0)
        }
        BulkCommand::Assignee { value, clear } => match (value, clear) {
            (Some(_), true) => bail!("give either an assignee id or --clear, not both"),
            (Some(id), false) => BulkAction::Assignee(Some(*id)),
            (None, true) => BulkAction::Assignee(None),
            (None, false) => bail!("assignee requires an id or --clear"),
        },
        BulkCommand::Due { value, clear } => match (value, clear) {
            (Some(_), true) => bail!("give either a due date or --clear, not both"),
            (Some(raw), false) => BulkAction::DueDate(Some(parse_due(raw)?)),
            (None, true) => BulkAction::DueDate(None),
            (None, false) => bail!("due requires a date or --clear"),
        },
        BulkCommand::Delete { .. } => BulkAction::Delete,
    })
}

fn confirmed(command: &BulkCommand) -> bool {
    matches!(command, BulkCommand::Delete { yes: true })
}

fn parse_due(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("due date must be RFC 3339 or YYYY-MM-DD, got {raw}"))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("invalid due date: {raw}"))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

fn drain_notices(controller: &mut TaskListController) {
    for Notice { level, message } in controller.notices().drain() {
        match level {
            NoticeLevel::Info => println!("{message}"),
            NoticeLevel::Error => eprintln!("{message}"),
        }
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| anyhow!("invalid RUST_LOG / log filter: {err}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
