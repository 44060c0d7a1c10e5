mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use teamcal_core::config::TeamcalConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teamcal")]
#[command(about = "Browse the team calendar and lay out busy days")]
struct Cli {
    /// Log layout and store details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the day view for one date
    Day {
        /// Date to show (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Size each group of overlapping events on its own
        #[arg(long)]
        per_cluster: bool,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,

        /// Hide a user's events (repeatable)
        #[arg(long = "hide-user", value_name = "ID")]
        hide_users: Vec<String>,

        /// Hide a category (repeatable)
        #[arg(long = "hide-category", value_name = "CATEGORY")]
        hide_categories: Vec<String>,
    },
    /// List events grouped by day
    Events {
        /// First day to list (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Last day to list (YYYY-MM-DD, defaults to three days from the first)
        #[arg(long)]
        to: Option<String>,

        /// Hide a user's events (repeatable)
        #[arg(long = "hide-user", value_name = "ID")]
        hide_users: Vec<String>,

        /// Hide a category (repeatable)
        #[arg(long = "hide-category", value_name = "CATEGORY")]
        hide_categories: Vec<String>,
    },
    /// Create an event
    New {
        title: String,

        /// Start ("2025-03-20T15:00", or "2025-03-20" for an all-day event)
        #[arg(short, long)]
        start: String,

        /// End, same formats as --start
        #[arg(short, long, conflicts_with = "duration")]
        end: Option<String>,

        /// Length, e.g. "30m" or "1h 30m"
        #[arg(long)]
        duration: Option<String>,

        /// Owner (defaults to current_user from the config)
        #[arg(short, long)]
        user: Option<String>,

        /// meeting, personal, project, holiday, deadline, training or other
        #[arg(short, long, default_value = "other")]
        category: String,

        #[arg(short, long)]
        location: Option<String>,
    },
    /// Delete an event by id
    Delete { id: String },
    /// List team members, or add one
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },
    /// Show config and data paths
    Config {
        /// Save this user id as the current user
        #[arg(long, value_name = "ID")]
        current_user: Option<String>,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Add a team member (or replace the one with the same id)
    Add {
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long)]
        position: Option<String>,

        /// Hex colour, e.g. "#3b82f6"
        #[arg(short, long)]
        color: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TeamcalConfig::load()?;

    match cli.command {
        Commands::Day {
            date,
            per_cluster,
            json,
            hide_users,
            hide_categories,
        } => {
            let date = commands::parse_date_or_today(date.as_deref())?;
            let filter = commands::build_filter(&config, &hide_users, &hide_categories)?;
            commands::day::run(&config, date, &filter, per_cluster, json)
        }
        Commands::Events {
            from,
            to,
            hide_users,
            hide_categories,
        } => {
            let from = commands::parse_date_or_today(from.as_deref())?;
            let to = match to {
                Some(s) => commands::parse_date(&s)?,
                None => from + chrono::Duration::days(3),
            };
            let filter = commands::build_filter(&config, &hide_users, &hide_categories)?;
            commands::events::run(&config, from, to, &filter)
        }
        Commands::New {
            title,
            start,
            end,
            duration,
            user,
            category,
            location,
        } => commands::new::run(
            &config,
            commands::new::NewEvent {
                title,
                start,
                end,
                duration,
                user,
                category,
                location,
            },
        ),
        Commands::Delete { id } => commands::delete::run(&config, &id),
        Commands::Users { action } => match action {
            None => commands::users::list(&config),
            Some(UsersAction::Add {
                id,
                name,
                email,
                department,
                position,
                color,
            }) => commands::users::add(
                &config,
                commands::users::NewUser {
                    id,
                    name,
                    email,
                    department,
                    position,
                    color,
                },
            ),
        },
        Commands::Config { current_user } => commands::config::run(&config, current_user),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
