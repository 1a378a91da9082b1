use kimem_bot::gateway::{GatewaySettings, SessionGateway};
use kimem_bot::logger;
use kimem_bot::telegram::client::TelegramClient;

use km_db::UserRepository;
use km_engine::{
    ContentForwarder, LedgerSettings, NavigationEngine, ReferralLedger, build_menu_graph,
};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env first so its values are visible as overrides to Config::load
    dotenvy::dotenv().ok();

    // Load and validate configuration
    let config = km_config::Config::load()?;
    config.validate()?;

    // Construct log file path if configured
    let log_file_path: Option<std::path::PathBuf> = if let Some(ref filename) = config.logging.file
    {
        let config_dir = km_config::Config::config_dir()?;
        let log_dir = config_dir.join(&config.logging.dir);

        // Ensure log directory exists
        std::fs::create_dir_all(&log_dir)?;

        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting kimem-bot v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // Initialize database pool
    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = km_db::connect(&database_path).await?;
    info!("Database connection established");

    // Run migrations
    info!("Running database migrations...");
    km_db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    // Build and validate the menu graph against the configured sources
    let graph = build_menu_graph(&config.forwarding.configured_keys())?;
    info!("Menu graph built: {} triggers", graph.trigger_count());

    // Wire the engine
    let repo = UserRepository::with_call_timeout(
        pool.clone(),
        Duration::from_secs(config.storage.timeout_secs),
    );
    let ledger = ReferralLedger::new(
        repo,
        LedgerSettings {
            coins_per_invite: config.referral.coins_per_invite,
            bot_username: config.referral.bot_username.clone(),
            max_credit_attempts: config.storage.credit_retry_attempts,
        },
    );
    let nav = NavigationEngine::new(Arc::new(graph));
    let forwarder = ContentForwarder::new(config.forwarding.channels.clone());

    let poll_timeout = config.polling.timeout_secs;
    let client = Arc::new(TelegramClient::new(
        &config.bot.token,
        Duration::from_secs(poll_timeout + 10),
    )?);

    let gateway = Arc::new(SessionGateway::new(
        client.clone(),
        ledger,
        nav,
        forwarder,
        GatewaySettings::from_config(&config),
    ));

    // ctrl-c flips the shutdown flag; the poll loop exits on the next turn
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received SIGINT (Ctrl+C), initiating graceful shutdown");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                error!("Failed to listen for SIGINT: {}", e);
            }
        }
    });

    info!("Bot running...");
    let mut offset = 0_i64;

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => break,
            polled = client.get_updates(offset, poll_timeout) => match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);

                        // Acknowledge callbacks at the transport layer so
                        // clients stop their spinners even if handling fails
                        if let Some(callback) = &update.callback_query
                            && let Err(e) = client.answer_callback_query(&callback.id).await
                        {
                            warn!("answerCallbackQuery failed: {}", e);
                        }

                        let gateway = gateway.clone();
                        tokio::spawn(async move {
                            gateway.handle_update(update).await;
                        });
                    }
                }
                Err(e) => {
                    error!("getUpdates failed: {}", e);
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        }
    }

    info!("Graceful shutdown complete");
    Ok(())
}
