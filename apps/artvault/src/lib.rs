//! # ArtVault Application Library
//!
//! The page-level controller of the ArtVault art marketplace and the `clap`
//! front end that drives it.
//!
//! ## Module Organization
//! ```text
//! artvault_app/
//! ├── lib.rs          ◄─── You are here (App setup & run)
//! ├── cli.rs          ◄─── clap definitions + dispatch
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Local storage wrapper
//! │   ├── session.rs  ◄─── Listings, cart and account in memory
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── gallery.rs  ◄─── Browse/filter commands
//! │   ├── upload.rs   ◄─── New listings
//! │   ├── account.rs  ◄─── Register/login/logout
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── checkout.rs ◄─── Payment + settlement
//! │   ├── profile.rs  ◄─── Artist profile
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── notify.rs       ◄─── Success/error/info notifications
//! ├── payment.rs      ◄─── Simulated payment gateway
//! ├── image.rs        ◄─── Image file → data URL
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    App State                                            │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   StoreState     │ │   SessionState   │ │    ConfigState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • SQLite pool   │ │  • Listings      │ │  • Tax rate          │   │
//! │  │  • Local storage │ │  • Cart lines    │ │  • Payment delay     │   │
//! │  │    keys          │ │  • Account       │ │  • Currency          │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  Each command borrows only the pieces it needs.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod image;
pub mod notify;
pub mod payment;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use artvault_store::{Storage, StorageConfig};

use error::ApiError;
use notify::Notifier;
use state::{ConfigState, SessionState, StoreState};

/// Loaded marketplace: storage, session and configuration.
pub struct App {
    pub store: StoreState,
    pub session: SessionState,
    pub config: ConfigState,
    /// Where `config --save` writes; `None` means the platform config file.
    pub config_path: Option<PathBuf>,
    pub notifier: Arc<dyn Notifier>,
}

impl App {
    /// Opens the database named by `config` (or the platform default) and
    /// loads the session.
    pub async fn open(config: ConfigState, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let db_path = match &config.database_path {
            Some(path) => path.clone(),
            None => default_database_path()?,
        };
        info!(?db_path, "Database path determined");

        let storage = Storage::new(StorageConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        Self::with_storage(storage, config, notifier).await
    }

    /// Builds the app on already-open storage.
    pub async fn with_storage(
        storage: Storage,
        config: ConfigState,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let store = StoreState::new(storage);
        let session = SessionState::load(&store).await?;

        Ok(App {
            store,
            session,
            config,
            config_path: None,
            notifier,
        })
    }
}

/// Loads configuration, opens storage and runs one command.
pub async fn run(cli: cli::Cli) -> Result<serde_json::Value, ApiError> {
    let mut config = ConfigState::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database_path = Some(db);
    }

    info!(marketplace = %config.marketplace_name, "Starting ArtVault");

    let notifier: Arc<dyn Notifier> = if cli.quiet {
        Arc::new(notify::LogNotifier)
    } else {
        Arc::new(notify::ConsoleNotifier)
    };

    let mut app = App::open(config, notifier).await?;
    app.config_path = cli.config;
    let output = cli::execute(&app, cli.command).await;
    app.store.inner().close().await;
    output
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=artvault=trace` - Show trace for artvault crates only
/// - Default: `info,artvault=debug,sqlx=warn`
///
/// Logs go to stderr so stdout stays valid JSON.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,artvault=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.artvault.artvault/artvault.db`
/// - **Windows**: `%APPDATA%\artvault\artvault\data\artvault.db`
/// - **Linux**: `~/.local/share/artvault/artvault.db`
///
/// Set `ARTVAULT_DB_PATH` (or `database_path` in the config) to override.
pub fn default_database_path() -> Result<PathBuf, ApiError> {
    let proj_dirs = ProjectDirs::from("com", "artvault", "artvault")
        .ok_or_else(|| ApiError::io("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ApiError::io(format!("Failed to create {}: {e}", data_dir.display())))?;

    Ok(data_dir.join("artvault.db"))
}
