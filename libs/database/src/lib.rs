//! PostgreSQL connection management for the workspace services.
//!
//! - [`postgres`]: pool configuration, connect-with-retry, migrations, health
//! - [`common`]: shared error type and retry helpers
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, RetryConfig::startup()).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "todo-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
