//! Pharmacy Stock client
//!
//! Typed access to the pharmacy inventory backend: items and sectors, lot
//! level stock, batch stock movements, dashboards, alert settings and user
//! management. Persistence, inventory arithmetic and authorization are the
//! backend's job; this crate shapes requests, validates forms and keeps the
//! client-side state of the movement dialog.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod movement;
pub mod notify;
pub mod session;

pub use api::{ApiClient, CatalogSource, MovementBackend};
pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use events::{DataChanged, EventBus, Resource};
pub use session::{Session, TokenStore};
