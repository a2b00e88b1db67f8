#![warn(clippy::all, clippy::pedantic)]

use std::net::SocketAddr;

use actix_web::{App, HttpServer, web};
use apiwatch::Monitor;
use clap::Parser;
use tracing::{info, warn};

mod check;
mod cli;
mod config;
mod error;
mod routes;

use cli::{Cli, Command};
use config::{Config, SeedEndpoint};
use error::AppError;
use logger::init_tracing;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_config(cli.config.as_ref())?;
    config.apply(&cli.overrides);

    if cli.print_config {
        println!("{config}");
        return Ok(());
    }

    let monitor = Monitor::new(config.monitor_settings()?)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(&config, monitor).await,
        Command::Check { urls, names, once } => {
            register(&monitor, &check::targets(urls, names, &config.endpoints)).await;
            check::run(&monitor, once).await;
            Ok(())
        }
    }
}

/// Register endpoints, skipping the ones that fail validation
async fn register(monitor: &Monitor, endpoints: &[SeedEndpoint]) {
    for seed in endpoints {
        if let Err(error) = monitor.add_endpoint(&seed.url, seed.name.clone()).await {
            warn!(url = %seed.url, "Skipping endpoint: {error}");
        }
    }
}

async fn run_server(config: &Config, monitor: Monitor) -> Result<(), AppError> {
    let addr: SocketAddr = config.listen_address().parse()?;
    register(&monitor, &config.endpoints).await;

    let monitor = web::Data::new(monitor);
    if config.monitor.autostart {
        monitor.start().await;
    }

    info!(%addr, "Serving dashboard");

    let app_monitor = monitor.clone();
    let result = HttpServer::new(move || {
        App::new()
            .app_data(app_monitor.clone())
            .app_data(routes::json_config())
            .configure(routes::routes)
    })
    .bind(addr)?
    .run()
    .await;

    monitor.stop().await;
    result?;

    Ok(())
}
