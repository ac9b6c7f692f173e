// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `ecotwin`: terminal client for the EcoTwin carbon-footprint twin.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ecotwin_client::{
    config::Config,
    models::{batch::upload_message, sandbox::default_scenarios},
    render,
    services::{ActivityClient, ActivityQuery, DashboardController},
    Session,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// EcoTwin CLI.
#[derive(Parser, Debug)]
#[command(name = "ecotwin", about = "EcoTwin carbon-footprint client")]
struct Cli {
    /// Bearer token (overrides ECOTWIN_TOKEN).
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the dashboard: total footprint and latest activities.
    Dashboard,

    /// List activities.
    Activities {
        #[arg(long, default_value_t = 0)]
        skip: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        /// Only this activity type.
        #[arg(long = "type")]
        activity_type: Option<String>,
        /// Print raw JSON.
        #[arg(long)]
        json: bool,
    },

    /// Upload a CSV file of activities.
    Upload {
        /// Path to the file.
        file: std::path::PathBuf,
    },

    /// Footprint forecast.
    Forecast {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },

    /// Activities flagged as outliers.
    Anomalies,

    /// Submit raw text for carbon inference.
    Infer {
        /// e.g. "Booking Confirmation, Location: JFK Airport"
        raw_data: String,
    },

    /// Poll an inference task.
    InferStatus { task_id: String },

    /// Backend health.
    Health,

    /// What-if scenarios.
    Sandbox,
}

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(config.log_json);
    install_crash_handler();

    let cli = Cli::parse();
    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let session = Session::new();
    if let Some(token) = cli.token.or_else(|| config.auth_token.clone()) {
        session.set_auth_token(token);
    }

    tracing::debug!(base_url = %config.api_base_url(), "Using EcoTwin API");
    let client = ActivityClient::new(&config, session)?;

    match cli.command {
        Commands::Dashboard => {
            let controller = DashboardController::new(client).with_page_size(config.page_size);
            let view = controller.subscribe();
            println!("{}", render::loading_placeholder());
            controller.activate().await;
            print!("{}", render::dashboard(&view.borrow()));
        }
        Commands::Activities {
            skip,
            limit,
            activity_type,
            json,
        } => {
            let activities = client
                .list(&ActivityQuery {
                    skip,
                    limit,
                    activity_type,
                })
                .await
                .context("Failed to list activities")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&activities)?);
            } else {
                for activity in &activities {
                    println!("{}", render::activity_card(activity));
                }
            }
        }
        Commands::Upload { file } => {
            let payload = client
                .upload_batch_path(&file)
                .await
                .with_context(|| format!("Batch upload of {} failed", file.display()))?;
            match upload_message(&payload) {
                Some(message) => println!("{}", message),
                None => println!("{}", serde_json::to_string_pretty(&payload)?),
            }
        }
        Commands::Forecast { days } => {
            let points = client.forecast(days).await.context("Forecast failed")?;
            if points.is_empty() {
                println!("Not enough history for a forecast.");
            }
            for point in points {
                println!("{}  {:.2} kg CO2e", point.date, point.predicted_carbon);
            }
        }
        Commands::Anomalies => {
            let anomalies = client.anomalies().await.context("Anomaly query failed")?;
            for a in anomalies {
                println!("{}  {}  {} kg CO2e", a.date, a.desc, a.carbon);
            }
        }
        Commands::Infer { raw_data } => {
            let task = client.submit_inference(&raw_data).await?;
            println!("{} {:?}", task.task_id, task.status);
        }
        Commands::InferStatus { task_id } => {
            let task = client.inference_result(&task_id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        Commands::Health => {
            let report = client.health().await.context("Health check failed")?;
            println!("{}", report.status);
            for (component, state) in &report.components {
                println!("  {}: {}", component, state);
            }
        }
        Commands::Sandbox => {
            print!("{}", render::sandbox(&default_scenarios()));
        }
    }

    Ok(())
}

/// Initialize structured logging; JSON when configured.
fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ecotwin_client=info,warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Last-resort handler: log the panic and tell the user to restart.
fn install_crash_handler() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Unexpected failure");
        eprintln!("{}", render::crash_fallback());
    }));
}
