//! Todo Domain
//!
//! Items are to-do entries with a name, description, status and a set of
//! mode tags. Updates use optimistic concurrency: every item carries a
//! version, and a write based on an outdated version is rejected with an
//! edit conflict.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints under /v1/todo
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, version checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_todo::{handlers, repository::InMemoryItemRepository, service::ItemService};
//!
//! let service = ItemService::new(InMemoryItemRepository::new());
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod filters;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{ItemError, ItemResult};
pub use filters::{Filters, Metadata, calculate_metadata, validate_filters};
pub use handlers::ApiDoc;
pub use models::{CreateItem, Item, ItemQuery, ItemStatus, UpdateItem};
pub use postgres::PgItemRepository;
pub use repository::{InMemoryItemRepository, ItemRepository};
pub use service::ItemService;
pub use validation::validate_item;
