use std::time::Duration;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::json;
use tokio::fs;
use tracing::{info, warn};

use insurance_application::commands::insurance_commands::process_returns;
use insurance_application::commands::raid_commands::handle_insured_items_lost;
use insurance_application::queries::insurance_queries::list_pending_packages;
use insurance_application::AppState;
use insurance_domain::EndRaidRequest;
use insurance_infrastructure::current_unix_seconds;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Hand insured items lost in a raid over to their traders
    EndRaid {
        #[arg(long)]
        session: String,
        /// Raid-end request as inline JSON or a path to a JSON file
        #[arg(long)]
        request: String,
        #[arg(long)]
        now: Option<i64>,
    },
    /// Return or delete every insurance package that is due
    Process {
        #[arg(long)]
        session: String,
        #[arg(long)]
        now: Option<i64>,
    },
    /// List pending insurance packages
    Pending {
        #[arg(long)]
        session: String,
        #[arg(long)]
        now: Option<i64>,
    },
    /// Process due packages on an interval until interrupted
    Watch {
        #[arg(long)]
        session: String,
        #[arg(long, default_value_t = 60)]
        interval_seconds: u64,
    },
}

pub async fn run_command(state: &AppState, command: Command) -> Result<()> {
    match command {
        Command::EndRaid {
            session,
            request,
            now,
        } => {
            let request = read_request(&request).await?;
            let now = now.unwrap_or_else(current_unix_seconds);
            let stored = handle_insured_items_lost(state, &session, request, now).await?;
            println!("{}", json!({ "session": session, "packagesStored": stored }));
        }
        Command::Process { session, now } => {
            let now = now.unwrap_or_else(current_unix_seconds);
            let summary = process_returns(state, &session, now).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Pending { session, now } => {
            let now = now.unwrap_or_else(current_unix_seconds);
            let pending = list_pending_packages(state, &session, now).await?;
            println!("{}", serde_json::to_string_pretty(&pending)?);
        }
        Command::Watch {
            session,
            interval_seconds,
        } => watch_returns(state, &session, interval_seconds).await?,
    }
    Ok(())
}

async fn read_request(value: &str) -> Result<EndRaidRequest> {
    let trimmed = value.trim();
    let content = if trimmed.starts_with('{') {
        trimmed.to_string()
    } else {
        fs::read_to_string(trimmed)
            .await
            .with_context(|| format!("failed to read request file {}", trimmed))?
    };
    serde_json::from_str(&content).context("invalid raid-end request")
}

async fn watch_returns(state: &AppState, session_id: &str, interval_seconds: u64) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    info!(
        "watching insurance returns for session {} every {}s",
        session_id, interval_seconds
    );

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested, stopping watch");
                return Ok(());
            }
            _ = interval.tick() => {
                match process_returns(state, session_id, current_unix_seconds()).await {
                    Ok(summary) if summary.packages > 0 => info!(
                        "returned {} items, {} lost, across {} packages",
                        summary.returned, summary.deleted, summary.packages
                    ),
                    Ok(_) => {}
                    Err(err) => warn!("insurance processing failed: {}", err),
                }
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
