use chrono::NaiveDate;
use fuelboard::navigation::DailyView;
use fuelboard::view::{CardScope, DistributionSlice, TrendPoint};
use fuelboard::{
    DashboardConfig, DashboardOrchestrator, DashboardState, FilterParams, HttpStatsClient,
    RequestOutcome, ViewModelBuilder,
};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: fuelboard-cli <command> [args]

Commands:
  stats [--start YYYY-MM-DD] [--end YYYY-MM-DD]   Overall dashboard, optionally filtered
  daily [YYYY-MM-DD] [prev|next]...               Daily report, newest date by default
  upload <file.csv|file.xlsx>                     Upload transactions and refresh
  clear                                           Delete all server data
  health                                          Check the stats server

Environment:
  FUELBOARD_API_URL, FUELBOARD_CACHE_TTL_MS, FUELBOARD_MAX_UPLOAD_MB, RUST_LOG";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = DashboardConfig::from_env();
    let api = Arc::new(HttpStatsClient::from_config(&config));
    let dashboard = DashboardOrchestrator::new(api, &config);

    match command.as_str() {
        "stats" => run_stats(&dashboard, &args[1..]).await?,
        "daily" => run_daily(&dashboard, &args[1..]).await?,
        "upload" => {
            let file = args.get(1).ok_or("upload needs a file path")?;
            let summary = dashboard.upload(Path::new(file)).await?;
            println!("{}", summary.message);
            println!("Added: {}  Skipped: {}", summary.added, summary.skipped);
            print_state(&dashboard.state().await, CardScope::Overall);
        }
        "clear" => {
            dashboard.clear_database().await?;
            println!("All data deleted");
        }
        "health" => {
            let health = dashboard.health().await?;
            println!("Status: {}", health.status);
            if let Some(message) = health.message.or(health.error) {
                println!("{}", message);
            }
        }
        other => {
            eprintln!("Unknown command: {}\n\n{}", other, USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}

fn parse_date(value: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e).into())
}

async fn run_stats(
    dashboard: &DashboardOrchestrator,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut start_date = None;
    let mut end_date = None;

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter.next().ok_or_else(|| format!("{} needs a value", flag))?;
        match flag.as_str() {
            "--start" => start_date = Some(parse_date(value)?),
            "--end" => end_date = Some(parse_date(value)?),
            _ => return Err(format!("Unknown option: {}", flag).into()),
        }
    }

    let filter = FilterParams::range(start_date, end_date);
    let outcome = if filter.is_unfiltered() {
        dashboard.load_initial().await
    } else {
        dashboard.apply_filter(filter).await
    };

    print_state(&dashboard.state().await, CardScope::Overall);
    exit_on_failure(outcome);
    Ok(())
}

async fn run_daily(
    dashboard: &DashboardOrchestrator,
    args: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut outcome = dashboard.init_daily_view().await;
    exit_on_failure(outcome);

    for arg in args {
        outcome = match arg.as_str() {
            "prev" => dashboard.previous_day().await,
            "next" => dashboard.next_day().await,
            date => dashboard.select_date(parse_date(date)?).await,
        };
        exit_on_failure(outcome);
    }

    let view = dashboard.daily_view().await;
    if view.available_dates.is_empty() {
        println!("No data available. Upload a transaction file first.");
        return Ok(());
    }

    print_navigation(&view);
    print_state(&dashboard.state().await, CardScope::Daily);
    Ok(())
}

fn exit_on_failure(outcome: RequestOutcome) {
    if outcome == RequestOutcome::Failed {
        std::process::exit(1);
    }
}

fn print_navigation(view: &DailyView) {
    let selected = view
        .selected_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "Report date: {}  [{} older] [{} newer]  ({} dates available)",
        selected,
        if view.has_previous { "prev" } else { "-" },
        if view.has_next { "next" } else { "-" },
        view.available_dates.len()
    );
}

fn print_state(state: &DashboardState, scope: CardScope) {
    match state {
        DashboardState::Ready(stats) => {
            let builder = ViewModelBuilder::new(stats);
            println!();
            for card in builder.summary_cards(scope) {
                println!("{:<16} {:>18}  {}", card.title, card.value, card.subtitle);
            }
            print_slices("Fuel distribution (sales)", &builder.fuel_distribution());
            print_slices("Payment methods", &builder.payment_mix());
            if scope == CardScope::Overall {
                print_points("Daily trend", &builder.daily_trend());
            }
            print_points("Hourly trend", &builder.hourly_trend());

            println!("\nMachine activity");
            for row in builder.machine_activity() {
                println!(
                    "  {:<12} {:>14.2} {:>12.2} L {:>8}",
                    row.label, row.sales, row.liters, row.count
                );
            }
        }
        DashboardState::Empty(_) => println!("No transactions match the selected range."),
        DashboardState::Failed { message } => eprintln!("Failed to load stats: {}", message),
        DashboardState::Idle | DashboardState::Loading => println!("No data loaded"),
    }
}

fn print_slices(title: &str, slices: &[DistributionSlice]) {
    println!("\n{}", title);
    for slice in slices {
        println!(
            "  {:<12} {:>14.2} {:>6.1}%",
            slice.label, slice.primary_value, slice.share_percent
        );
    }
}

fn print_points(title: &str, points: &[TrendPoint]) {
    println!("\n{}", title);
    for point in points {
        println!(
            "  {:<12} {:>14.2} {:>12.2}",
            point.label, point.primary_value, point.secondary_value
        );
    }
}
