#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the alert map toolchain.
//!
//! Wraps the operational tasks that otherwise require the HTTP API: run
//! migrations, load a demo dataset, trigger a risk zone engine run, print
//! insights, or start the server.

use std::time::Instant;

use alert_map_case_models::{CaseStatus, Gender};
use alert_map_database::{db, queries, run_migrations};
use alert_map_database_models::NewCase;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "alert_map_cli", about = "Missing child alert platform toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load a demo dataset of cases for local development
    Seed,
    /// Recompute risk zones from the current case snapshot
    UpdateZones,
    /// Print predictive insights for the current case snapshot
    Insights,
    /// Start the API server
    Serve,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate => {
            let db = db::connect_from_env().await?;
            run_migrations(db.as_ref()).await?;
        }
        Commands::Seed => {
            let db = db::connect_from_env().await?;
            run_migrations(db.as_ref()).await?;
            seed(db.as_ref()).await?;
        }
        Commands::UpdateZones => {
            let db = db::connect_from_env().await?;
            let started = Instant::now();
            let summary =
                alert_map_analytics::engine::update_risk_zones(db.as_ref(), Utc::now().naive_utc())
                    .await?;
            if summary.preserved_previous {
                println!(
                    "Not enough geocoded cases ({}); previous zones preserved",
                    summary.geocoded_cases
                );
            } else {
                println!(
                    "Created {} zones from {} geocoded cases in {:.2?}",
                    summary.zones_created,
                    summary.geocoded_cases,
                    started.elapsed()
                );
            }
        }
        Commands::Insights => {
            let db = db::connect_from_env().await?;
            let insights =
                alert_map_analytics::engine::predictive_insights(db.as_ref(), Utc::now().naive_utc())
                    .await?;
            if insights.is_empty() {
                println!("No insights available (no cases yet?)");
            }
            for line in insights {
                println!("{line}");
            }
        }
        Commands::Serve => {
            // The server uses actix-web's runtime, so run it in a blocking
            // task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(alert_map_server::run_server())
            })
            .await??;
        }
    }

    Ok(())
}

/// Demo dataset: two Mumbai clusters, one Delhi pair, and a few
/// stragglers, spread across statuses and report times so every
/// analytics surface has something to show.
async fn seed(db: &dyn switchy_database::Database) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now().naive_utc();

    let demo: &[(&str, i32, Gender, &str, Option<f64>, Option<f64>, i64, CaseStatus)] = &[
        ("Asha Sharma", 4, Gender::Female, "Shivaji Park Playground", Some(19.0285), Some(72.8387), 3, CaseStatus::Missing),
        ("Rohan Patil", 7, Gender::Male, "Dadar Market Store", Some(19.0330), Some(72.8420), 10, CaseStatus::Found),
        ("Meera Iyer", 9, Gender::Female, "Near Dadar School", Some(19.0311), Some(72.8455), 25, CaseStatus::Missing),
        ("Kabir Khan", 12, Gender::Male, "Juhu Beach", Some(19.0968), Some(72.8265), 45, CaseStatus::Missing),
        ("Sana Shaikh", 5, Gender::Female, "Juhu Garden Park", Some(19.1014), Some(72.8312), 60, CaseStatus::Found),
        ("Arjun Verma", 14, Gender::Male, "Connaught Place Mall", Some(28.6315), Some(77.2167), 120, CaseStatus::Missing),
        ("Diya Gupta", 10, Gender::Female, "Near Janpath Residence", Some(28.6270), Some(77.2190), 150, CaseStatus::Found),
        ("Vikram Rao", 16, Gender::Male, "Bus Terminal", None, None, 5, CaseStatus::Missing),
        ("Lakshmi Nair", 8, Gender::Female, "Marine Drive", Some(18.9430), Some(72.8235), 400, CaseStatus::Closed),
    ];

    let mut inserted = 0usize;
    for (name, age, gender, location, lat, lng, days_ago, status) in demo {
        let new_case = NewCase {
            name: (*name).to_string(),
            age: *age,
            gender: *gender,
            location_text: (*location).to_string(),
            latitude: *lat,
            longitude: *lng,
        };
        let reported_at = now - Duration::days(*days_ago);
        let row = queries::insert_case(db, &new_case, reported_at).await?;
        if *status != CaseStatus::Missing {
            queries::update_case_status(db, &row.report_id, *status).await?;
        }
        inserted += 1;
    }

    log::info!("Seeded {inserted} demo cases");
    println!("Seeded {inserted} demo cases");
    Ok(())
}
