//! Reservation Server - restaurant booking and seating backend
//!
//! # Overview
//!
//! - **Rules** (`rules`): booking and table validation, pure over an injected "now"
//! - **Seating** (`seating`): seat / clear / cancel transitions, one transaction each
//! - **Database** (`db`): SQLite through sqlx, embedded migrations
//! - **HTTP API** (`api`): axum routes with the `{ data }` / `{ error }` envelope
//!
//! # Layout
//!
//! ```text
//! reservation-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── api/           # routes, handlers, extractors
//! ├── middleware/    # request logging
//! ├── rules/         # validation
//! ├── seating/       # status transitions
//! ├── db/            # pool, migrations, repositories
//! └── utils/         # logger, time helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod rules;
pub mod seating;
pub mod utils;

pub use crate::core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use utils::logger::init_logger_with_file;

/// Load `.env`, read the configuration and start logging
pub fn setup_environment() -> crate::core::Result<Config> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {}", e);
    }

    let config = Config::from_env()?;
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
  ____                                 _   _
 |  _ \ ___  ___  ___ _ ____   ____ _| |_(_) ___  _ __  ___
 | |_) / _ \/ __|/ _ \ '__\ \ / / _` | __| |/ _ \| '_ \/ __|
 |  _ <  __/\__ \  __/ |   \ V / (_| | |_| | (_) | | | \__ \
 |_| \_\___||___/\___|_|    \_/ \__,_|\__|_|\___/|_| |_|___/
    "#
    );
}
