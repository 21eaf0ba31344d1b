//! Backend wire models for the Pharmacy Stock client

mod dashboard;
mod item;
mod movement;
mod sector;
mod settings;
mod stock;
mod user;

pub use dashboard::*;
pub use item::*;
pub use movement::*;
pub use sector::*;
pub use settings::*;
pub use stock::*;
pub use user::*;
