mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, list::ListFilter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "actionq",
    about = "Human-gated action queue: submit, approve, execute, and audit proposed actions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .actionq/)
    #[arg(long, global = true, env = "ACTIONQ_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the action queue in the current project
    Init,

    /// Propose an action (duplicates return the existing record)
    Submit {
        /// Action type, e.g. submit_pr or endpoint_down
        #[arg(value_name = "TYPE")]
        kind: String,

        /// Stable, human-readable title; together with the type it forms the dedup key
        title: String,

        /// Arbitrary JSON payload passed through to the executor
        #[arg(long)]
        details: Option<String>,
    },

    /// List queued actions
    List {
        #[arg(long, value_enum, default_value = "pending")]
        filter: ListFilter,
    },

    /// List executed actions
    History,

    /// Show a single action from the queue or the history
    Show { id: String },

    /// Approve a pending action
    Approve { id: String },

    /// Reject a pending action
    Reject { id: String },

    /// Record that an executor performed an action, moving it to history
    Execute {
        id: String,

        /// Outcome reported by the executor [default: success]
        #[arg(long)]
        result: Option<String>,
    },

    /// Acknowledge and drop an action without recording history
    Dismiss { id: String },

    /// Remove duplicates, stale resolved actions, and expired notices
    Sweep {
        /// Override retention.max_age_days from the config
        #[arg(long)]
        max_age_days: Option<u32>,
    },

    /// Print the autonomy policy table
    Policy,

    /// Inspect the project configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let json = cli.json;

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Submit {
            kind,
            title,
            details,
        } => cmd::action::submit(&root, &kind, &title, details.as_deref(), json),
        Commands::List { filter } => cmd::list::run(&root, filter, json),
        Commands::History => cmd::list::history(&root, json),
        Commands::Show { id } => cmd::action::show(&root, &id, json),
        Commands::Approve { id } => cmd::action::approve(&root, &id, json),
        Commands::Reject { id } => cmd::action::reject(&root, &id, json),
        Commands::Execute { id, result } => {
            cmd::action::execute(&root, &id, result.as_deref(), json)
        }
        Commands::Dismiss { id } => cmd::action::dismiss(&root, &id, json),
        Commands::Sweep { max_age_days } => cmd::sweep::run(&root, max_age_days, json),
        Commands::Policy => cmd::policy::run(json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
