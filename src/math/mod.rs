// src/math/mod.rs

pub mod integrator;
pub mod coordinates;
pub mod error;

pub use integrator::OrbitIntegrator;
pub use coordinates::polar_to_cartesian;
pub use error::MathError;
