//! pantryctl-core: domain types shared by the store and the CLI
//!
//! Holds the `Item` model, expiry-date formatting and ordering, input
//! validation, and the configuration structs built once at startup.

pub mod config;
pub mod error;
pub mod model;

pub use config::{ContainerConfig, DatabaseConfig};
pub use error::ValidationError;
pub use model::{parse_int, ExpiryDate, Item, ItemName, NewItem, MONTH_ABBREVIATIONS, UPDATED_AT_FORMAT};
