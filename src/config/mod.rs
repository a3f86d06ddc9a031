// src/config/mod.rs

pub mod parameters;
pub mod scenario;

pub use parameters::DriverParameters;
pub use scenario::Scenario;
