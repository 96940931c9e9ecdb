use std::sync::Arc;

use chrono::{DateTime, Local, Utc};
use punchcard::api::AttendanceApi;
use punchcard::attendance::ClockKind;
use punchcard::location::LocationWatcher;
use punchcard::models::PerimeterConfig;
use punchcard::panel::{ClockPanel, PanelError};
use punchcard::session::{Page, Session, allowed_pages, can_view};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    tracing::debug!(api_url = %config.api_url, "loaded configuration");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };

    match command.as_str() {
        "pages" => cmd_pages(&config),
        "status" => cmd_status(&config).await?,
        "clock-in" => cmd_clock(&config, ClockKind::In, args.get(1).cloned()).await?,
        "clock-out" => cmd_clock(&config, ClockKind::Out, args.get(1).cloned()).await?,
        "history" => cmd_history(&config).await?,
        "dashboard" => cmd_dashboard(&config).await?,
        "set-perimeter" => cmd_set_perimeter(&config, &args[1..]).await?,
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}

fn print_usage() {
    println!("punchcard — staff attendance client");
    println!();
    println!("Usage: punchcard-cli <command>");
    println!();
    println!("Commands:");
    println!("  pages                              List pages available to the configured roles");
    println!("  status                             Show perimeter, position and eligibility");
    println!("  clock-in [note]                    Record a clock-in (perimeter-gated)");
    println!("  clock-out [note]                   Record a clock-out");
    println!("  history                            Show your own clock history");
    println!("  dashboard                          Show team dashboard (manager)");
    println!("  set-perimeter <lat> <lng> <radius> Update perimeter settings (manager)");
    println!();
    println!("Environment: PUNCHCARD_API_URL, PUNCHCARD_TOKEN, PUNCHCARD_NAME,");
    println!("             PUNCHCARD_ROLES, PUNCHCARD_LAT, PUNCHCARD_LNG");
}

fn cmd_pages(config: &Config) {
    for page in allowed_pages(config.roles) {
        println!("{:?}", page);
    }
}

fn watcher_for(config: &Config) -> LocationWatcher {
    match config.position {
        Some(point) => LocationWatcher::fixed(point),
        None => LocationWatcher::unavailable(),
    }
}

async fn panel_for(config: &Config) -> Result<(ClockPanel, LocationWatcher), Box<dyn std::error::Error>> {
    let token = config.require_token()?;
    let session = Session::new(&config.display_name, token, config.roles);
    let api = Arc::new(AttendanceApi::new(&config.api_url)?);
    let watcher = watcher_for(config);

    let mut panel = ClockPanel::new(session, api, watcher.subscribe());
    panel.refresh_settings().await;
    Ok((panel, watcher))
}

async fn cmd_status(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (panel, _watcher) = panel_for(config).await?;

    let perimeter = panel.perimeter();
    println!("User:      {}", panel.session().display_name);
    println!(
        "Perimeter: center {}, {} radius {} m",
        perimeter.center_lat, perimeter.center_lng, perimeter.radius
    );
    match panel.position() {
        Some(point) => {
            println!("Position:  {}, {}", point.latitude, point.longitude);
            if panel.can_clock_in() {
                println!("Inside the perimeter, clock-in permitted");
            } else {
                println!("Outside the perimeter, clock-in not permitted");
            }
        }
        None => println!("Position:  waiting for a location fix"),
    }
    println!("Status:    {:?}", panel.status());

    Ok(())
}

async fn cmd_clock(
    config: &Config,
    kind: ClockKind,
    note: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !can_view(config.roles, Page::Clock) {
        eprintln!("The configured roles do not permit clocking in or out");
        std::process::exit(1);
    }

    let (mut panel, _watcher) = panel_for(config).await?;

    let result = match kind {
        ClockKind::In => panel.clock_in(note).await,
        ClockKind::Out => panel.clock_out(note).await,
    };

    match result {
        Ok(()) => {
            println!("Clock {} recorded", kind.as_str());
        }
        Err(PanelError::LocationUnavailable) => {
            println!("Waiting for a location fix, try again shortly");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn format_ts(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "-".to_string(),
    }
}

fn format_coord(coord: Option<f64>) -> String {
    coord.map(|v| format!("{:.5}", v)).unwrap_or_else(|| "-".to_string())
}

async fn cmd_history(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.require_token()?;
    let api = AttendanceApi::new(&config.api_url)?;

    let entries = api.my_entries(token).await?;
    println!(
        "{:<5} {:<20} {:<12} {:<12} Note",
        "Type", "Time", "Lat", "Lng"
    );
    for entry in entries {
        println!(
            "{:<5} {:<20} {:<12} {:<12} {}",
            entry.kind.as_str(),
            format_ts(entry.timestamp()),
            format_coord(entry.lat),
            format_coord(entry.lng),
            entry.note.as_deref().unwrap_or("")
        );
    }

    Ok(())
}

async fn cmd_dashboard(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if !can_view(config.roles, Page::Dashboard) {
        eprintln!("The dashboard is only available to managers");
        std::process::exit(1);
    }

    let token = config.require_token()?;
    let api = AttendanceApi::new(&config.api_url)?;

    let (clocked_in, entries, stats) = api.dashboard(token).await?;

    println!("Average hours per day:");
    for (day, hours) in &stats.avg_hours_per_day {
        println!("  {:<12} {:.2}", day, hours);
    }
    println!("People clocking in per day:");
    for (day, count) in &stats.num_per_day {
        println!("  {:<12} {}", day, count);
    }
    println!("Total hours per staff (last 7 days):");
    for (name, hours) in &stats.total_per_staff {
        println!("  {:<20} {:.2}", name, hours);
    }

    println!();
    println!("Currently clocked in ({}):", clocked_in.len());
    for shift in &clocked_in {
        println!(
            "  {:<20} since {} at {}, {}",
            shift.name,
            format_ts(shift.clocked_in_at()),
            format_coord(shift.lat),
            format_coord(shift.lng)
        );
    }

    println!();
    println!("Recent entries:");
    for entry in entries.iter().take(10) {
        println!(
            "  {:<20} {:<5} {}",
            entry.name.as_deref().unwrap_or("-"),
            entry.kind.as_str(),
            format_ts(entry.timestamp())
        );
    }

    Ok(())
}

async fn cmd_set_perimeter(
    config: &Config,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    if !can_view(config.roles, Page::Dashboard) {
        eprintln!("Perimeter settings are only available to managers");
        std::process::exit(1);
    }

    let [lat, lng, radius] = args else {
        eprintln!("Usage: punchcard-cli set-perimeter <lat> <lng> <radius>");
        std::process::exit(2);
    };

    let settings = PerimeterConfig {
        center_lat: lat.parse()?,
        center_lng: lng.parse()?,
        radius: radius.parse()?,
    };

    let token = config.require_token()?;
    let api = AttendanceApi::new(&config.api_url)?;
    api.save_settings(token, &settings).await?;

    println!(
        "Perimeter saved: center {}, {} radius {} m",
        settings.center_lat, settings.center_lng, settings.radius
    );

    Ok(())
}
