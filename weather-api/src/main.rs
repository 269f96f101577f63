//! Binary crate for the city weather HTTP service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Wiring configuration and the Open-Meteo client into actix-web
//! - Mapping domain errors onto HTTP responses

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use weather_core::Config;

mod cli;
mod routes;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = Config::load(args.config.as_deref())?;
    let bind = args.bind.unwrap_or(config.bind);

    let state = web::Data::new(routes::AppState::new(config)?);

    info!(%bind, "Starting weather service");

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes::configure))
        .bind(bind)?
        .run()
        .await?;

    Ok(())
}
