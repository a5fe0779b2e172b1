//! Terminal client: plan one journey, write the traffic map, optionally
//! highlight a single route.
//!
//! Any location or mode not given as a flag is asked for interactively.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use tokio::io::{BufReader, Stdin, Stdout};
use tracing_subscriber::EnvFilter;

use when2go_server::cache::{CacheConfig, CachedProvider};
use when2go_server::cli::{
    Prompter, RouteChoice, parse_minutes_or, parse_mode_or_default, parse_route_choice,
};
use when2go_server::config::AppConfig;
use when2go_server::domain::{DisplayZone, RoutePriority, TravelMode};
use when2go_server::history::{HistoryLog, HistoryRecord};
use when2go_server::planner::{
    JourneyPlan, JourneyRequest, PlanError, RouteProvider, ScanConfig, plan_journey,
};
use when2go_server::render::{DEFAULT_MAP_FILE, traffic_overview, write_map};
use when2go_server::tomtom::TomTomClient;

#[derive(Parser, Debug)]
#[command(name = "when2go-cli", about = "Find the best time to leave")]
struct Args {
    /// Starting location
    #[arg(long)]
    from: Option<String>,

    /// Destination
    #[arg(long)]
    to: Option<String>,

    /// car or bike
    #[arg(long)]
    mode: Option<TravelMode>,

    /// Scan a departure window instead of leaving now
    #[arg(long)]
    best: bool,

    /// Window to scan, in minutes (10-120)
    #[arg(long)]
    window: Option<u32>,

    /// Minutes between sampled departures (5-30)
    #[arg(long)]
    interval: Option<u32>,

    /// fastest, shortest or eco-friendly
    #[arg(long, default_value = "fastest")]
    priority: RoutePriority,

    /// Highlight only this route (1-based)
    #[arg(long)]
    route: Option<String>,

    /// Where to write the map
    #[arg(long, default_value = DEFAULT_MAP_FILE)]
    map_out: PathBuf,

    /// Do not append the lookup to the history file
    #[arg(long)]
    no_history: bool,
}

type StdPrompter = Prompter<BufReader<Stdin>, Stdout>;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env()?;
    let zone = config.zone;
    let mut prompter = Prompter::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    // Interactive unless both ends were given on the command line
    let interactive = args.from.is_none() || args.to.is_none();

    let start = match &args.from {
        Some(s) => s.clone(),
        None => prompter.ask("Enter starting location: ").await?,
    };
    let end = match &args.to {
        Some(s) => s.clone(),
        None => prompter.ask("Enter destination: ").await?,
    };
    let mode = match args.mode {
        Some(mode) => mode,
        None if interactive => parse_mode_or_default(&prompter.ask("Select mode (car/bike): ").await?)?,
        None => TravelMode::default(),
    };

    let client = TomTomClient::new(config.tomtom())?;
    // Geocodes resolved up front are answered from memory during planning
    let provider = CachedProvider::new(client, &CacheConfig::default());
    let history = HistoryLog::new(&config.history_file);

    if start.trim().is_empty() || end.trim().is_empty() {
        report_failure(&PlanError::MissingLocation, &start, &end);
        return Ok(ExitCode::FAILURE);
    }
    let (Some(origin), Some(destination)) = (
        provider.geocode(start.trim()).await,
        provider.geocode(end.trim()).await,
    ) else {
        println!("Could not geocode one of the locations: {start} or {end}");
        return Ok(ExitCode::FAILURE);
    };
    println!("Start coords: {origin} End coords: {destination}");
    let now = Utc::now();
    println!("\n⏰ Current {} Time: {}", zone.abbreviation(now), zone.clock_24h(now));

    let mut request = JourneyRequest::new(&start, &end)
        .with_mode(mode)
        .with_priority(args.priority);

    let use_best = args.best
        || args.window.is_some()
        || (interactive && prompter.ask_yes("Do you want to find the best departure time? (yes/no): ").await?);

    if history.path().exists() {
        println!("📂 Historical data loaded.");
    } else {
        println!("⚠️ No historical data file found. Skipping historical traffic...");
    }

    if use_best {
        let defaults = ScanConfig::default();
        let window = match args.window {
            Some(w) => w,
            None if interactive => parse_minutes_or(
                &prompter.ask("Enter time window in minutes (default 60): ").await?,
                defaults.window_mins,
            )?,
            None => defaults.window_mins,
        };
        let interval = match args.interval {
            Some(i) => i,
            None if interactive => parse_minutes_or(
                &prompter.ask("Enter check interval in minutes (default 10): ").await?,
                defaults.interval_mins,
            )?,
            None => defaults.interval_mins,
        };
        request = request.with_window(ScanConfig::bounded(window, interval)?);
    }

    let plan = match plan_journey(&provider, &request, Utc::now()).await {
        Ok(plan) => plan,
        Err(e) => {
            report_failure(&e, &start, &end);
            return Ok(ExitCode::FAILURE);
        }
    };

    print_summary(&plan, &zone);

    if !args.no_history {
        let record = HistoryRecord::from_selection(&plan, plan.default_selection(), &zone, Utc::now());
        if let Err(e) = history.append(&record) {
            eprintln!("Failed to save journey to history: {e}");
        }
    }

    write_map(&traffic_overview(&plan, None, &zone), "Traffic overview", &args.map_out)?;
    println!(
        "🗺️ Map saved as {} – open it in your browser.",
        args.map_out.display()
    );

    let count = plan.best().alternative_count();
    let choice = match &args.route {
        Some(raw) => parse_route_choice(raw, count),
        None if interactive => ask_route(&mut prompter, count).await?,
        None => RouteChoice::All,
    };

    if let Some(message) = choice.rejection() {
        println!("{message}");
    }
    if let Some(index) = choice.highlight() {
        write_map(
            &traffic_overview(&plan, Some(index), &zone),
            "Traffic overview",
            &args.map_out,
        )?;
        println!("✅ Showing only Route {}", index + 1);
    }

    Ok(ExitCode::SUCCESS)
}

async fn ask_route(prompter: &mut StdPrompter, count: usize) -> std::io::Result<RouteChoice> {
    if !prompter.ask_yes("Do you want to view only one route? (yes/no): ").await? {
        return Ok(RouteChoice::All);
    }
    let answer = prompter
        .ask(&format!("Enter route number (1-{count}): "))
        .await?;
    Ok(parse_route_choice(&answer, count))
}

fn print_summary(plan: &JourneyPlan, zone: &DisplayZone) {
    let best = plan.best();
    let abbr = zone.abbreviation(best.depart_at());

    if plan.scanned {
        println!(
            "✅ Best departure: {} ({abbr}) → {} mins",
            zone.clock_24h(best.depart_at()),
            best.primary_travel_time_secs() / 60
        );
        println!("   Expected arrival: {} ({abbr})", zone.clock_24h(best.arrival_at()));
    }
    if plan.fell_back() {
        println!(
            "⚠️ No {} route found. Trying {} instead...",
            plan.requested_mode, plan.used_mode
        );
    }
}

fn report_failure(error: &PlanError, start: &str, end: &str) {
    match error {
        PlanError::LocationNotFound { .. } => {
            println!("Could not geocode one of the locations: {start} or {end}")
        }
        PlanError::NoRouteInWindow { .. } => println!("⚠️ No route found for this time window."),
        PlanError::NoRoutes => println!("⚠️ No routes found."),
        PlanError::MissingLocation => println!("⚠️ {error}"),
    }
}
