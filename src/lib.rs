pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod events;
pub mod infrastructure;
pub mod services;

pub use config::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use events::*;
pub use services::*;
