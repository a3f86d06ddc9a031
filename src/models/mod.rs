// src/models/mod.rs

pub mod termination;
pub mod trace;

pub use termination::{check_termination, Termination};
pub use trace::Trace;
