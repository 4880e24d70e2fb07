//! # State Module
//!
//! Application state shared by the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  StoreState  │  │ SessionState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Storage     │  │  Arc<Mutex<  │  │  tax_rate_bps    │              │
//! │  │  (SQLite     │  │    Session   │  │  payment_delay   │              │
//! │  │   pool)      │  │  >>          │  │  currency        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: SqlitePool is internally synchronized                   │
//! │  • SessionState: Arc<Mutex<T>>, never held across an await             │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command asks only for the states it needs.

mod config;
mod session;
mod store;

pub use config::{ConfigError, ConfigResult, ConfigState, CONFIG_FILE_NAME};
pub use session::{Session, SessionState};
pub use store::StoreState;
