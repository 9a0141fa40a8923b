//! Practice Engine HTTP server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use tokio::sync::RwLock;
use tracing::{error, info};

use practice_engine::api::{AppState, create_router};
use practice_engine::config::{ConfigLoader, ReminderConfig};
use practice_engine::scheduling::{LogNotifier, ReminderLedger, send_due_reminders};
use practice_engine::store::PracticeStore;

/// Practice Engine - availability, bookings and invoice validation over HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing countries.yaml and practice.yaml
    #[arg(short, long, default_value = "./config")]
    config: PathBuf,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// File recording which appointment reminders were sent
    #[arg(long, default_value = "reminder-ledger.json")]
    ledger: PathBuf,
}

/// Periodically reminds clients of upcoming appointments.
async fn run_reminders(
    store: Arc<RwLock<PracticeStore>>,
    settings: ReminderConfig,
    ledger_path: PathBuf,
) {
    let mut ledger = match ReminderLedger::load(&ledger_path) {
        Ok(ledger) => ledger,
        Err(err) => {
            error!(error = %err, "Starting with an empty reminder ledger");
            ReminderLedger::new()
        }
    };

    let mut interval = tokio::time::interval(Duration::from_secs(settings.interval_seconds));
    loop {
        interval.tick().await;

        let now = Local::now().naive_local();
        let bookings = store.read().await.all_bookings();
        let sent = send_due_reminders(
            &LogNotifier,
            &bookings,
            now,
            settings.lead_hours,
            &mut ledger,
        );
        let pruned = ledger.prune_before(now.date());

        if sent > 0 || pruned > 0 {
            if let Err(err) = ledger.save(&ledger_path) {
                error!(error = %err, "Failed to save reminder ledger");
            }
        }
        info!(sent, pruned, recorded = ledger.len(), "Reminder pass completed");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(config = %args.config.display(), "Loading configuration");
    let config = ConfigLoader::load(&args.config)?;
    info!(
        countries = config.countries().rules().len(),
        default_country = %config.countries().default_rule().code,
        "Configuration loaded"
    );

    let reminders = config.practice().reminders.clone();
    let state = AppState::new(config);
    tokio::spawn(run_reminders(state.store(), reminders, args.ledger));

    let app = create_router(state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
