//! formflow-server binary: wires PostgreSQL, services, the scheduler and
//! the HTTP router together.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use formflow_postgres::repository::db_init::run_migrations;
use formflow_postgres::PostgresRepositories;
use formflow_server::config::Args;
use formflow_server::logging::init_tracing;
use formflow_server::{app, AppState};
use formflow_service::{
    Repositories, Scheduler, Services, WkhtmltopdfConverter, NOTIFICATION_SWEEP_JOB,
};
use sqlx::postgres::PgPoolOptions;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(&args.log_level);

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("Listen: {}", args.listen);
    info!("Notification retention: {} days", args.notification_retention_days);
    info!("Sweep interval: {}s", args.sweep_interval_secs);

    let pool = PgPoolOptions::new()
        .max_connections(args.db_max_connections)
        .connect(&args.database_url)
        .await
        .context("connecting to PostgreSQL")?;
    if args.run_migrations {
        run_migrations(&pool).await.context("running migrations")?;
        info!("Migrations applied");
    }

    let bundle = PostgresRepositories::new(Arc::new(pool)).create_all_repositories();
    let repos = Repositories {
        users: bundle.user_repository,
        formats: bundle.format_repository,
        completions: bundle.completion_repository,
        validations: bundle.validation_repository,
        notifications: bundle.notification_repository,
    };
    let converter = Arc::new(WkhtmltopdfConverter::new(&args.wkhtmltopdf_path));
    let services = Services::new(repos, converter, args.service_settings());

    let scheduler = Arc::new(Scheduler::new());
    scheduler.start_interval(
        NOTIFICATION_SWEEP_JOB,
        args.sweep_interval(),
        services.notifications.sweep_job(),
    )?;
    info!("Notification sweep scheduled every {}s", args.sweep_interval_secs);

    let router = app(AppState::new(services, scheduler.clone()));
    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    info!("formflow-server listening on {}", args.listen);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    scheduler.stop_all();
    info!("formflow-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
