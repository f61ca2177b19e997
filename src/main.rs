use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod engine;
mod geo;
mod simulator;
mod state;

use api::AppState;
use config::Config;
use engine::Engine;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hawkeye=debug".parse()?))
        .init();

    let config = Config::load()?;
    tracing::info!(
        cameras = config.cameras.len(),
        radius_km = config.zones.radius_km,
        duration_hours = config.zones.duration_hours,
        "loaded configuration"
    );

    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        match command.as_str() {
            "simulate" => {
                let url = args
                    .next()
                    .unwrap_or_else(|| format!("http://127.0.0.1:{}/api/event", config.http.port));
                return simulator::run(&config, &url).await;
            }
            other => {
                eprintln!("unknown command: {other}");
                eprintln!("usage: hawkeye [simulate [url]]");
                std::process::exit(1);
            }
        }
    }

    let engine = Engine::new(&config);
    let state = AppState::new(engine);
    let port = config.http.port;

    tokio::select! {
        result = api::start_server(state, port) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    tracing::info!("shutdown complete");
    Ok(())
}
