use errors::Error;

pub mod configuration;
pub mod controller;
pub mod errors;
pub mod page;
pub mod startup;
pub mod telemetry;
pub mod view_engine;

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
