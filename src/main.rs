use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::sync::RwLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spa_desk::api::state::AppState;
use spa_desk::config::AppConfig;
use spa_desk::notify::{ChatNotifier, NoopSink, NotificationSink};
use spa_desk::schedule::TimeWindow;
use spa_desk::store::{BookingStore, StorePaths, TestimonialStore};

#[derive(Parser)]
#[command(name = "spa-desk")]
#[command(about = "Booking service for a single-therapist massage studio")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a summary of the stored bookings and testimonials
    Inspect,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting spa-desk v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load_or_default(&PathBuf::from(&cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let paths = StorePaths::new(config.data_dir.clone());
            let notifier = build_notifier(&config);

            let state = AppState {
                config: Arc::new(config.clone()),
                bookings: Arc::new(RwLock::new(BookingStore::load(&paths))),
                testimonials: Arc::new(RwLock::new(TestimonialStore::load(&paths))),
                notifier,
            };

            let app = spa_desk::api::build_router(state);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Inspect => {
            let paths = StorePaths::new(config.data_dir.clone());
            let bookings = BookingStore::load(&paths);
            let testimonials = TestimonialStore::load(&paths);

            println!("=== Spa Desk ({:?}) ===\n", config.data_dir);
            println!("Bookings:     {}", bookings.list().len());
            println!("Testimonials: {}\n", testimonials.list().len());

            let now_ms = chrono::Utc::now().timestamp_millis();
            let mut upcoming: Vec<_> = bookings
                .list()
                .iter()
                .filter(|b| TimeWindow::of_booking(b).end > now_ms)
                .collect();
            upcoming.sort_by_key(|b| b.datetime);

            if upcoming.is_empty() {
                println!("No upcoming bookings.");
            } else {
                println!("Upcoming:");
                for b in upcoming {
                    println!(
                        "  #{} {} - {} ({} min)",
                        b.id,
                        b.datetime.format("%Y-%m-%d %H:%M"),
                        b.service,
                        b.duration.parsed_minutes()
                    );
                }
            }
        }
    }

    Ok(())
}

/// Pick the alert sink from the environment.
///
/// Chat delivery needs both `BOOKING_BOT_TOKEN` and `BOOKING_CHAT_ID`;
/// without them the no-op sink is used and the choice logged once.
fn build_notifier(config: &AppConfig) -> Arc<dyn NotificationSink> {
    match (
        std::env::var("BOOKING_BOT_TOKEN"),
        std::env::var("BOOKING_CHAT_ID"),
    ) {
        (Ok(token), Ok(chat_id)) => {
            tracing::info!("Chat notifications enabled via {}", config.notifier.api_base);
            Arc::new(ChatNotifier::new(&config.notifier, token, chat_id))
        }
        _ => {
            tracing::info!(
                "BOOKING_BOT_TOKEN / BOOKING_CHAT_ID not set, notifications disabled"
            );
            Arc::new(NoopSink)
        }
    }
}
