use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::info;

use upkeep::fleet_file::FleetFile;
use upkeep::services::FleetService;

#[derive(Parser)]
#[command(name = "upkeep", about = "Preventive maintenance fleet reporting")]
struct Cli {
    /// Fleet snapshot (plans + instances) to report over
    #[clap(short, long, default_value = "fleet.yaml")]
    fleet: String,

    /// Override the reference date (defaults to today, UTC)
    #[clap(long)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the compliance snapshot for the fleet
    Report {
        /// Collapse instances that share a plan title
        #[clap(long)]
        dedupe: bool,
    },
    /// List pending instances that are past their effective due date
    Due,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Cli::parse();
    let fleet = FleetFile::load(&args.fleet).await?;
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    info!(
        plans = fleet.plans.len(),
        instances = fleet.instances.len(),
        %today,
        "fleet loaded"
    );

    match args.command {
        Command::Report { dedupe } => {
            let overview = FleetService::overview(&fleet.plans, &fleet.instances, today, dedupe);
            let s = overview.snapshot;
            println!("Instances:       {}", s.total);
            println!("  pending:       {}", s.pending);
            println!("  in progress:   {}", s.in_progress);
            println!("  completed:     {}", s.completed);
            println!("  overdue:       {}", s.overdue);
            println!("Compliance rate: {}%", s.compliance_rate);
        }
        Command::Due => {
            let overdue = FleetService::overdue(&fleet.plans, &fleet.instances, today);
            if overdue.is_empty() {
                println!("Nothing overdue.");
            } else {
                for item in overdue {
                    let due = item
                        .effective_due_date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "unscheduled".to_string());
                    let stale = if item.is_stale { " (corrected)" } else { "" };
                    println!(
                        "{}  due {}{}  {}",
                        item.instance.id, due, stale, item.instance.plan_title
                    );
                }
            }
        }
    }

    Ok(())
}
