//! Print the dashboard series for a running server.
//!
//! Usage: `visitor-report [START END]`
//!
//! Dates are `YYYY-MM-DD` and inclusive. The server URL comes from
//! `dashboard.server_url` (or `DASHBOARD_SERVER_URL`).

use anyhow::Context;

use hotel_dashboard::{client::RecordsClient, config::AppConfig, dashboard::DashboardSession, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging);

    let args: Vec<String> = std::env::args().skip(1).collect();

    let client = RecordsClient::new(config.dashboard.server_url.clone())?;
    let mut session = DashboardSession::new();
    session
        .load(&client)
        .await
        .with_context(|| format!("Failed to fetch records from {}", client.base_url()))?;

    match args.as_slice() {
        [] => {}
        [start, end] => {
            session.apply_filter(start, end)?;
        }
        _ => anyhow::bail!("usage: visitor-report [START END]"),
    }

    for rejected in session.rejected() {
        tracing::warn!(%rejected, "Skipped undecodable record");
    }

    println!("{}", serde_json::to_string_pretty(session.series())?);
    Ok(())
}
