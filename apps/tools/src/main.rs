use std::path::PathBuf;

use anyhow::{anyhow, Result};
use catalog::Catalog;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use server_api::{
    admin, event_detail, list_categories, list_events, list_locations, organizer,
    submissions::{SubmissionTracker, DEFAULT_SUBMISSION_DELAY},
    ApiContext, EventsQuery,
};
use shared::{
    domain::{EventId, UserId},
    error::ApiError,
    i18n::Language,
};
use tokio::sync::broadcast;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse the cultural events catalog from the command line")]
struct Cli {
    /// Directory holding events.json, participants.json, users.json and partners.json.
    #[arg(long, global = true)]
    fixtures_dir: Option<PathBuf>,
    #[arg(long, global = true, default_value = "fr")]
    lang: Language,
    /// Print JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    /// Organizer shown by the `organizer` command.
    #[arg(long, global = true, default_value = "2")]
    organizer_id: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filtered, sorted event listing.
    Events(EventsArgs),
    /// One event with formatted dates and price.
    Event { id: String },
    Categories,
    Reports,
    Locations,
    /// Organizer dashboard totals and upcoming events.
    Organizer,
}

#[derive(Args, Debug)]
struct EventsArgs {
    #[arg(long)]
    search: Option<String>,
    /// Comma separated categories.
    #[arg(long)]
    category: Option<String>,
    /// Comma separated statuses.
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// all, free or paid.
    #[arg(long)]
    price: Option<String>,
    /// date, popularity or price.
    #[arg(long)]
    sort: Option<String>,
}

impl From<EventsArgs> for EventsQuery {
    fn from(args: EventsArgs) -> Self {
        EventsQuery {
            search: args.search,
            category: args.category,
            status: args.status,
            location: args.location,
            price: args.price,
            sort: args.sort,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = Catalog::open(cli.fixtures_dir.as_deref())?;
    debug!(events = catalog.events().len(), "catalog loaded");

    // Commands only read; the tracker is there because the context carries one.
    let (events, _) = broadcast::channel(16);
    let ctx = ApiContext {
        catalog,
        submissions: SubmissionTracker::simulated(DEFAULT_SUBMISSION_DELAY, events),
        organizer_id: UserId::new(cli.organizer_id.clone()),
    };
    let language = cli.lang;

    match cli.command {
        Command::Events(args) => {
            let listing = list_events(&ctx, &args.into(), language).map_err(api_error)?;
            if cli.json {
                return print_json(&listing);
            }
            for card in &listing.events {
                println!(
                    "{:>3}  {:<45} {:<12} {:<20} {:<14} {}",
                    card.id.as_str(),
                    card.title, card.category_label, card.date_label, card.location, card.price_label
                );
            }
            if let Some(message) = &listing.empty_message {
                println!("{message}");
            }
        }
        Command::Event { id } => {
            let detail = event_detail(&ctx, &EventId::new(id), language).map_err(api_error)?;
            if cli.json {
                return print_json(&detail);
            }
            println!("{}", detail.event.title);
            println!("  {} / {}", detail.category_label, detail.status_label);
            println!("  {} -> {}", detail.start_label, detail.end_label);
            println!("  {}", detail.event.location);
            println!("  {}", detail.price_label);
            println!(
                "  {}/{} registered, {} seats left",
                detail.event.registered_count, detail.event.capacity, detail.remaining_seats
            );
        }
        Command::Categories => {
            let categories = list_categories(&ctx, language);
            if cli.json {
                return print_json(&categories);
            }
            for summary in categories {
                println!("{} {:<12} {}", summary.icon, summary.label, summary.event_count);
            }
        }
        Command::Reports => {
            let stats = admin::reports(&ctx);
            if cli.json {
                return print_json(&stats);
            }
            println!("events={} upcoming={}", stats.total_events, stats.upcoming_events);
            println!(
                "participants={} average={:.1}",
                stats.total_participants, stats.average_participants_per_event
            );
            for (category, count) in &stats.events_by_category {
                println!("  {:<12} {count}", category.as_str());
            }
            for month in &stats.participants_trend {
                println!("  {} {}", month.month, month.count);
            }
        }
        Command::Organizer => {
            let dashboard = organizer::dashboard(&ctx, language);
            if cli.json {
                return print_json(&dashboard);
            }
            let name = dashboard.organizer_name.as_deref().unwrap_or("?");
            println!("{} ({})", name, dashboard.organizer_id.as_str());
            println!(
                "events={} participants={} revenue={} fill={}%",
                dashboard.event_count,
                dashboard.total_participants,
                dashboard.revenue_label,
                dashboard.fill_rate_percent
            );
            for card in dashboard.upcoming.iter().chain(&dashboard.ongoing) {
                println!("  {:>3}  {:<45} {}", card.id.as_str(), card.title, card.status_label);
            }
        }
        Command::Locations => {
            let locations = list_locations(&ctx);
            if cli.json {
                return print_json(&locations);
            }
            for location in locations {
                println!("{location}");
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn api_error(err: ApiError) -> anyhow::Error {
    anyhow!("{:?}: {}", err.code, err.message)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
